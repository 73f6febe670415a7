//! # 持仓快照路由控制器
//!
//! 受鉴权中间件保护；归属账户一律取自已验证的 Token，绝不信任请求体。

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::server::AppState;
use crate::types::{AddHoldingRequest, DataResponse, MessageResponse};
use kabu_core::store::port::Holding;

/// 新增持仓快照
#[utoipa::path(
    post,
    path = "/addHolding",
    tag = "持仓 (Holding)",
    security(("bearer_jwt" = [])),
    request_body = AddHoldingRequest,
    responses(
        (status = 201, description = "持仓添加成功", body = DataResponse<Holding>),
        (status = 401, description = "未认证", body = MessageResponse),
        (status = 403, description = "Token 无效或过期", body = MessageResponse),
        (status = 500, description = "服务器内部错误", body = MessageResponse)
    )
)]
pub async fn add_holding(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<AddHoldingRequest>,
) -> Result<(StatusCode, Json<DataResponse<Holding>>), ApiError> {
    let holding = state.store.add_holding(&user.id, req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::ok("Holding added successfully", holding)),
    ))
}

/// 查询当前账户的全部持仓快照
#[utoipa::path(
    get,
    path = "/holdings",
    tag = "持仓 (Holding)",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "获取成功", body = DataResponse<Vec<Holding>>),
        (status = 401, description = "未认证", body = MessageResponse),
        (status = 403, description = "Token 无效或过期", body = MessageResponse),
        (status = 500, description = "服务器内部错误", body = MessageResponse)
    )
)]
pub async fn get_holdings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DataResponse<Vec<Holding>>>, ApiError> {
    let holdings = state.store.list_holdings(&user.id).await?;

    Ok(Json(DataResponse::ok(
        "Holdings fetched successfully",
        holdings,
    )))
}
