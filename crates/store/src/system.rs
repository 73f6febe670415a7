use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kabu_core::store::error::StoreError;
use kabu_core::store::port::{
    Account, Holding, NewHolding, NewOrder, NewPosition, Order, Position, SystemStore,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// 默认系统数据库文件名
const DEFAULT_SYSTEM_DB: &str = "kabu.db";

/// SystemStore 的 SQLite 实现。
///
/// # Summary
/// 在中心化的 SQLite 数据库 (`kabu.db`) 中管理账户、持仓快照、持仓明细与订单流水。
///
/// # Invariants
/// * 数据库结构在存储实例创建时初始化。
/// * `accounts.username` 带存储级唯一约束，用于兜底并发注册竞态。
/// * 所有操作均通过共享的 `SqlitePool` 执行。
pub struct SqliteSystemStore {
    pool: SqlitePool,
}

impl SqliteSystemStore {
    /// 创建新的 SqliteSystemStore 并初始化表结构。
    ///
    /// # Logic
    /// 1. 确保注入的数据根目录存在。
    /// 2. 配置 SQLite 连接选项，开启 `create_if_missing`。
    /// 3. 连接到数据库并执行 DDL 初始化系统表结构。
    ///
    /// # Arguments
    /// * `data_dir` - 数据根目录，由进程启动配置显式注入。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例 or 数据库错误。
    pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = data_dir.as_ref();
        fs::create_dir_all(root).map_err(|e| StoreError::InitError(e.to_string()))?;

        let db_path = root.join(DEFAULT_SYSTEM_DB);

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        // 初始化系统表
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at DATETIME NOT NULL
            );

            CREATE TABLE IF NOT EXISTS holdings (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                qty REAL NOT NULL,
                avg REAL NOT NULL,
                price REAL NOT NULL,
                net REAL NOT NULL,
                day TEXT NOT NULL,
                user_id TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS positions (
                id TEXT PRIMARY KEY,
                product TEXT NOT NULL,
                name TEXT NOT NULL,
                qty REAL NOT NULL,
                avg REAL NOT NULL,
                price REAL NOT NULL,
                net TEXT NOT NULL,
                day TEXT NOT NULL,
                is_loss INTEGER NOT NULL,
                user_id TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS orders (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                qty REAL NOT NULL,
                price REAL NOT NULL,
                mode TEXT NOT NULL,
                user_id TEXT NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::InitError(e.to_string()))?;

        Ok(Self { pool })
    }
}

/// 将 sqlx 错误归一到存储层错误；唯一约束冲突单独归类，供上层映射为客户端错误。
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(db_err.to_string());
        }
    }
    StoreError::Database(err.to_string())
}

#[async_trait]
impl SystemStore for SqliteSystemStore {
    /// # Summary
    /// 按用户名查找账户。
    async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, (String, String, String, DateTime<Utc>)>(
            "SELECT id, username, password_hash, created_at FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
        .map(|row| {
            row.map(|r| Account {
                id: r.0,
                username: r.1,
                password_hash: r.2,
                created_at: r.3,
            })
        })
    }

    /// # Summary
    /// 按账户 ID 获取账户。
    async fn get_account(&self, id: &str) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, (String, String, String, DateTime<Utc>)>(
            "SELECT id, username, password_hash, created_at FROM accounts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
        .map(|row| {
            row.map(|r| Account {
                id: r.0,
                username: r.1,
                password_hash: r.2,
                created_at: r.3,
            })
        })
    }

    /// # Summary
    /// 创建新账户，ID 由存储层分配。
    ///
    /// # Logic
    /// 1. 生成 UUID v4。
    /// 2. 插入 `accounts` 表；用户名唯一约束冲突返回 `StoreError::Conflict`。
    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        let account = Account {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO accounts (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&account.id)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        tracing::info!("Account created: {} ({})", account.username, account.id);
        Ok(account)
    }

    /// # Summary
    /// 追加一条持仓快照。
    async fn add_holding(
        &self,
        user_id: &str,
        holding: NewHolding,
    ) -> Result<Holding, StoreError> {
        let record = Holding {
            id: Uuid::new_v4().to_string(),
            name: holding.name,
            qty: holding.qty,
            avg: holding.avg,
            price: holding.price,
            net: holding.net,
            day: holding.day,
            user_id: user_id.to_string(),
        };

        sqlx::query(
            "INSERT INTO holdings (id, name, qty, avg, price, net, day, user_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(record.qty)
        .bind(record.avg)
        .bind(record.price)
        .bind(record.net)
        .bind(&record.day)
        .bind(&record.user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(record)
    }

    /// # Summary
    /// 列出指定账户的持仓快照。
    async fn list_holdings(&self, user_id: &str) -> Result<Vec<Holding>, StoreError> {
        let rows = sqlx::query_as::<_, (String, String, f64, f64, f64, f64, String, String)>(
            "SELECT id, name, qty, avg, price, net, day, user_id FROM holdings WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|r| Holding {
                id: r.0,
                name: r.1,
                qty: r.2,
                avg: r.3,
                price: r.4,
                net: r.5,
                day: r.6,
                user_id: r.7,
            })
            .collect())
    }

    /// # Summary
    /// 追加一条持仓明细。
    async fn add_position(
        &self,
        user_id: &str,
        position: NewPosition,
    ) -> Result<Position, StoreError> {
        let record = Position {
            id: Uuid::new_v4().to_string(),
            product: position.product,
            name: position.name,
            qty: position.qty,
            avg: position.avg,
            price: position.price,
            net: position.net,
            day: position.day,
            is_loss: position.is_loss,
            user_id: user_id.to_string(),
        };

        sqlx::query(
            "INSERT INTO positions (id, product, name, qty, avg, price, net, day, is_loss, user_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.product)
        .bind(&record.name)
        .bind(record.qty)
        .bind(record.avg)
        .bind(record.price)
        .bind(&record.net)
        .bind(&record.day)
        .bind(record.is_loss)
        .bind(&record.user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(record)
    }

    /// # Summary
    /// 列出指定账户的持仓明细。
    async fn list_positions(&self, user_id: &str) -> Result<Vec<Position>, StoreError> {
        let rows = sqlx::query_as::<
            _,
            (String, String, String, f64, f64, f64, String, String, bool, String),
        >(
            "SELECT id, product, name, qty, avg, price, net, day, is_loss, user_id \
             FROM positions WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|r| Position {
                id: r.0,
                product: r.1,
                name: r.2,
                qty: r.3,
                avg: r.4,
                price: r.5,
                net: r.6,
                day: r.7,
                is_loss: r.8,
                user_id: r.9,
            })
            .collect())
    }

    /// # Summary
    /// 追加一条订单记录。
    async fn add_order(&self, user_id: &str, order: NewOrder) -> Result<Order, StoreError> {
        let record = Order {
            id: Uuid::new_v4().to_string(),
            name: order.name,
            qty: order.qty,
            price: order.price,
            mode: order.mode,
            user_id: user_id.to_string(),
        };

        sqlx::query(
            "INSERT INTO orders (id, name, qty, price, mode, user_id) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(record.qty)
        .bind(record.price)
        .bind(&record.mode)
        .bind(&record.user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(record)
    }

    /// # Summary
    /// 列出指定账户的订单记录。
    async fn list_orders(&self, user_id: &str) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query_as::<_, (String, String, f64, f64, String, String)>(
            "SELECT id, name, qty, price, mode, user_id FROM orders WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|r| Order {
                id: r.0,
                name: r.1,
                qty: r.2,
                price: r.3,
                mode: r.4,
                user_id: r.5,
            })
            .collect())
    }
}
