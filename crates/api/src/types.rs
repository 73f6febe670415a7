//! # DTO (Data Transfer Object) 层
//!
//! 定义面向前端 JSON 输入/输出的轻量结构体，并在边界处完成显式校验。
//! 所有对外 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use kabu_core::store::port::{Account, NewHolding, NewOrder, NewPosition};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================
//  鉴权 DTO
// ============================================================

/// 注册 / 登录请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthRequest {
    /// 用户名
    #[schema(example = "alice")]
    pub username: String,
    /// 密码（明文，仅在传输中出现，落库前经 bcrypt 哈希）
    #[schema(example = "s3cret")]
    pub password: String,
}

/// 账户摘要，绝不携带密码哈希
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountSummary {
    /// 账户唯一标识
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: String,
    /// 用户名
    #[schema(example = "alice")]
    pub username: String,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            username: account.username.clone(),
        }
    }
}

/// 注册 / 登录成功响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// 提示信息
    #[schema(example = "User created successfully")]
    pub message: String,
    /// 账户摘要
    pub user: AccountSummary,
    /// JWT Bearer Token，有效期 7 天
    #[schema(example = "eyJhbGciOiJIUzI1NiIs...")]
    pub token: String,
}

/// `GET /verifyToken` 的诊断响应，永远伴随 200 状态码
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyTokenResponse {
    /// Token 是否有效
    pub valid: bool,
    /// 有效时返回 Token 的 subject（账户 ID）
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// 无效时返回原因
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VerifyTokenResponse {
    /// 构建验证通过的响应
    pub fn valid(user_id: impl Into<String>) -> Self {
        Self {
            valid: true,
            user_id: Some(user_id.into()),
            message: None,
        }
    }

    /// 构建验证失败的响应（不抛错，仅报告）
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            user_id: None,
            message: Some(message.into()),
        }
    }
}

/// JWT Claims 内容（内部使用，不暴露到 Swagger）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 账户唯一标识
    pub sub: String,
    /// 签发时间 (Unix 时间戳)
    pub iat: i64,
    /// 过期时间 (Unix 时间戳，签发后 7 天)
    pub exp: i64,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 仅携带提示信息的响应体，也是统一的错误响应形态
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// 提示或错误描述信息
    pub message: String,
}

impl MessageResponse {
    /// 从信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }
}

/// 资源操作成功响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataResponse<T: Serialize + ToSchema> {
    /// 提示信息
    pub message: String,
    /// 数据载荷
    pub data: T,
}

impl<T: Serialize + ToSchema> DataResponse<T> {
    /// 构建成功响应
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

// ============================================================
//  资源请求 DTO
// ============================================================

/// 新增持仓快照请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddHoldingRequest {
    /// 标的名称
    #[schema(example = "INFY")]
    pub name: String,
    /// 持有数量
    #[schema(example = 10.0)]
    pub qty: f64,
    /// 平均成本
    #[schema(example = 1500.0)]
    pub avg: f64,
    /// 当前价格
    #[schema(example = 1520.0)]
    pub price: f64,
    /// 净盈亏
    #[schema(example = 200.0)]
    pub net: f64,
    /// 当日涨跌
    #[schema(example = "+0.5%")]
    pub day: String,
}

impl From<AddHoldingRequest> for NewHolding {
    fn from(req: AddHoldingRequest) -> Self {
        Self {
            name: req.name,
            qty: req.qty,
            avg: req.avg,
            price: req.price,
            net: req.net,
            day: req.day,
        }
    }
}

/// 新增持仓明细请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPositionRequest {
    /// 产品类型
    #[schema(example = "CNC")]
    pub product: String,
    /// 标的名称
    #[schema(example = "TCS")]
    pub name: String,
    /// 持有数量
    #[schema(example = 5.0)]
    pub qty: f64,
    /// 平均成本
    #[schema(example = 3200.0)]
    pub avg: f64,
    /// 当前价格
    #[schema(example = 3100.0)]
    pub price: f64,
    /// 净盈亏（字符串格式）
    #[schema(example = "-1.2%")]
    pub net: String,
    /// 当日涨跌
    #[schema(example = "-0.4%")]
    pub day: String,
    /// 是否亏损
    #[schema(example = true)]
    pub is_loss: bool,
}

impl From<AddPositionRequest> for NewPosition {
    fn from(req: AddPositionRequest) -> Self {
        Self {
            product: req.product,
            name: req.name,
            qty: req.qty,
            avg: req.avg,
            price: req.price,
            net: req.net,
            day: req.day,
            is_loss: req.is_loss,
        }
    }
}

/// 新增订单记录请求体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddOrderRequest {
    /// 标的名称
    #[schema(example = "NVDA")]
    pub name: String,
    /// 委托数量
    #[schema(example = 2.0)]
    pub qty: f64,
    /// 委托价格
    #[schema(example = 120.5)]
    pub price: f64,
    /// 买卖方向 (BUY / SELL)
    #[schema(example = "BUY")]
    pub mode: String,
}

impl From<AddOrderRequest> for NewOrder {
    fn from(req: AddOrderRequest) -> Self {
        Self {
            name: req.name,
            qty: req.qty,
            price: req.price,
            mode: req.mode,
        }
    }
}
