//! # 订单流水路由控制器
//!
//! 仅做流水记录的追加与查询，不涉及撮合；
//! 此路由组沿用上游行为，对字段存在性做显式校验。

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::server::AppState;
use crate::types::{AddOrderRequest, DataResponse, MessageResponse};
use kabu_core::store::port::Order;

/// 新增订单记录
#[utoipa::path(
    post,
    path = "/addOrder",
    tag = "订单 (Order)",
    security(("bearer_jwt" = [])),
    request_body = AddOrderRequest,
    responses(
        (status = 201, description = "订单添加成功", body = DataResponse<Order>),
        (status = 400, description = "字段缺失", body = MessageResponse),
        (status = 401, description = "未认证", body = MessageResponse),
        (status = 403, description = "Token 无效或过期", body = MessageResponse),
        (status = 500, description = "服务器内部错误", body = MessageResponse)
    )
)]
pub async fn add_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<AddOrderRequest>,
) -> Result<(StatusCode, Json<DataResponse<Order>>), ApiError> {
    // 存在性校验：数值字段由类型系统保证，字符串字段不允许为空
    if req.name.is_empty() || req.mode.is_empty() {
        return Err(ApiError::BadRequest("All fields are required".into()));
    }

    let order = state.store.add_order(&user.id, req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::ok("Order added successfully", order)),
    ))
}

/// 查询当前账户的全部订单记录
#[utoipa::path(
    get,
    path = "/orders",
    tag = "订单 (Order)",
    security(("bearer_jwt" = [])),
    responses(
        (status = 200, description = "获取成功", body = DataResponse<Vec<Order>>),
        (status = 401, description = "未认证", body = MessageResponse),
        (status = 403, description = "Token 无效或过期", body = MessageResponse),
        (status = 500, description = "服务器内部错误", body = MessageResponse)
    )
)]
pub async fn get_orders(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DataResponse<Vec<Order>>>, ApiError> {
    tracing::debug!("Fetching orders for user: {}", user.id);
    let orders = state.store.list_orders(&user.id).await?;

    Ok(Json(DataResponse::ok(
        "Orders fetched successfully",
        orders,
    )))
}
