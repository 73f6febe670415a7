use super::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Summary
/// 账户实体，代表一个已注册的用户身份。
///
/// # Invariants
/// - `id` 由存储层分配（UUID v4），全局唯一。
/// - `username` 全局唯一，由存储层唯一约束兜底。
/// - `password_hash` 为 bcrypt 单向哈希，创建后不可变，永不回传给客户端。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    // 账户唯一标识
    pub id: String,
    // 登录用户名
    pub username: String,
    // bcrypt 密码哈希
    pub password_hash: String,
    // 注册时间
    pub created_at: DateTime<Utc>,
}

/// # Summary
/// 持仓快照实体，记录用户持有的某一标的。
///
/// # Invariants
/// - `user_id` 必须引用一个存在的账户。
/// - 数值字段不做业务校验（上游即原样存储）。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    // 记录唯一标识
    pub id: String,
    // 标的名称
    pub name: String,
    // 持有数量
    pub qty: f64,
    // 平均成本
    pub avg: f64,
    // 当前价格
    pub price: f64,
    // 净盈亏
    pub net: f64,
    // 当日涨跌
    pub day: String,
    // 归属账户
    pub user_id: String,
}

/// # Summary
/// 持仓明细实体（按产品类型区分的日内/交割仓位）。
///
/// # Invariants
/// - `net` 在此实体中是字符串（沿用上游数据格式，可能带百分号等前端展示符号）。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    // 记录唯一标识
    pub id: String,
    // 产品类型 (例如: CNC, MIS)
    pub product: String,
    // 标的名称
    pub name: String,
    // 持有数量
    pub qty: f64,
    // 平均成本
    pub avg: f64,
    // 当前价格
    pub price: f64,
    // 净盈亏（字符串格式）
    pub net: String,
    // 当日涨跌
    pub day: String,
    // 是否亏损
    pub is_loss: bool,
    // 归属账户
    pub user_id: String,
}

/// # Summary
/// 订单记录实体，仅做流水记录，不参与撮合。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    // 记录唯一标识
    pub id: String,
    // 标的名称
    pub name: String,
    // 委托数量
    pub qty: f64,
    // 委托价格
    pub price: f64,
    // 买卖方向 (BUY / SELL)
    pub mode: String,
    // 归属账户
    pub user_id: String,
}

/// 新建持仓快照的输入载荷（`id` 与 `user_id` 由调用上下文补全）。
#[derive(Debug, Clone)]
pub struct NewHolding {
    pub name: String,
    pub qty: f64,
    pub avg: f64,
    pub price: f64,
    pub net: f64,
    pub day: String,
}

/// 新建持仓明细的输入载荷。
#[derive(Debug, Clone)]
pub struct NewPosition {
    pub product: String,
    pub name: String,
    pub qty: f64,
    pub avg: f64,
    pub price: f64,
    pub net: String,
    pub day: String,
    pub is_loss: bool,
}

/// 新建订单记录的输入载荷。
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub name: String,
    pub qty: f64,
    pub price: f64,
    pub mode: String,
}

/// # Summary
/// 系统级数据存储接口，负责账户与三类用户资源（持仓快照、持仓明细、订单）的持久化。
///
/// # Invariants
/// - 实现者必须保证单条写入的原子性；本接口不要求跨表事务。
/// - 所有资源记录必须携带归属账户外键。
#[async_trait]
pub trait SystemStore: Send + Sync {
    // --- 账户域 ---

    /// # Summary
    /// 按用户名查找账户。
    ///
    /// # Logic
    /// 查询 `accounts` 表的 `username` 唯一列。
    ///
    /// # Arguments
    /// * `username`: 登录用户名。
    ///
    /// # Returns
    /// 存在返回 `Some(Account)`，否则返回 `None`。
    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, StoreError>;

    /// # Summary
    /// 按账户 ID 获取账户。
    ///
    /// # Arguments
    /// * `id`: 账户唯一标识。
    ///
    /// # Returns
    /// 存在返回 `Some(Account)`，否则返回 `None`。
    async fn get_account(&self, id: &str) -> Result<Option<Account>, StoreError>;

    /// # Summary
    /// 创建新账户并由存储层分配 ID。
    ///
    /// # Logic
    /// 1. 生成 UUID v4 作为账户 ID。
    /// 2. 插入 `accounts` 表；`username` 唯一约束冲突时返回 `StoreError::Conflict`。
    ///
    /// # Arguments
    /// * `username`: 登录用户名。
    /// * `password_hash`: bcrypt 密码哈希。
    ///
    /// # Returns
    /// 返回持久化后的完整账户实体。
    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError>;

    // --- 持仓快照域 ---

    /// # Summary
    /// 为指定账户追加一条持仓快照。
    async fn add_holding(
        &self,
        user_id: &str,
        holding: NewHolding,
    ) -> Result<Holding, StoreError>;

    /// # Summary
    /// 列出指定账户的全部持仓快照。
    async fn list_holdings(&self, user_id: &str) -> Result<Vec<Holding>, StoreError>;

    // --- 持仓明细域 ---

    /// # Summary
    /// 为指定账户追加一条持仓明细。
    async fn add_position(
        &self,
        user_id: &str,
        position: NewPosition,
    ) -> Result<Position, StoreError>;

    /// # Summary
    /// 列出指定账户的全部持仓明细。
    async fn list_positions(&self, user_id: &str) -> Result<Vec<Position>, StoreError>;

    // --- 订单域 ---

    /// # Summary
    /// 为指定账户追加一条订单记录。
    async fn add_order(&self, user_id: &str, order: NewOrder) -> Result<Order, StoreError>;

    /// # Summary
    /// 列出指定账户的全部订单记录。
    async fn list_orders(&self, user_id: &str) -> Result<Vec<Order>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_wire_format_uses_camel_case() {
        let holding = Holding {
            id: "h1".to_string(),
            name: "INFY".to_string(),
            qty: 10.0,
            avg: 1500.0,
            price: 1520.0,
            net: 200.0,
            day: "+0.5%".to_string(),
            user_id: "u1".to_string(),
        };
        let json = serde_json::to_value(&holding).expect("serialize holding");
        assert_eq!(json["userId"], "u1");
        assert!(json.get("user_id").is_none());

        let position = Position {
            id: "p1".to_string(),
            product: "CNC".to_string(),
            name: "TCS".to_string(),
            qty: 5.0,
            avg: 3200.0,
            price: 3100.0,
            net: "-1.2%".to_string(),
            day: "-0.4%".to_string(),
            is_loss: true,
            user_id: "u1".to_string(),
        };
        let json = serde_json::to_value(&position).expect("serialize position");
        assert_eq!(json["isLoss"], true);
        assert_eq!(json["userId"], "u1");
    }
}
