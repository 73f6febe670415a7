//! # 持仓明细路由控制器

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::server::AppState;
use crate::types::{AddPositionRequest, DataResponse, MessageResponse};
use kabu_core::store::port::Position;

/// 新增持仓明细
#[utoipa::path(
    post,
    path = "/addPosition",
    tag = "持仓 (Position)",
    security(("bearer_jwt" = [])),
    request_body = AddPositionRequest,
    responses(
        (status = 201, description = "持仓明细添加成功", body = DataResponse<Position>),
        (status = 401, description = "未认证", body = MessageResponse),
        (status = 403, description = "Token 无效或过期", body = MessageResponse),
        (status = 500, description = "服务器内部错误", body = MessageResponse)
    )
)]
pub async fn add_position(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<AddPositionRequest>,
) -> Result<(StatusCode, Json<DataResponse<Position>>), ApiError> {
    let position = state.store.add_position(&user.id, req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::ok("Position added successfully", position)),
    ))
}

/// 查询当前账户的全部持仓明细
#[utoipa::path(
    get,
    path = "/positions",
    tag = "持仓 (Position)",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "获取成功", body = DataResponse<Vec<Position>>),
        (status = 401, description = "未认证", body = MessageResponse),
        (status = 403, description = "Token 无效或过期", body = MessageResponse),
        (status = 500, description = "服务器内部错误", body = MessageResponse)
    )
)]
pub async fn get_positions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DataResponse<Vec<Position>>>, ApiError> {
    let positions = state.store.list_positions(&user.id).await?;

    Ok(Json(DataResponse::ok(
        "Positions fetched successfully",
        positions,
    )))
}
