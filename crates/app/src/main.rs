use std::sync::Arc;

use kabu_api::server::{start_server, AppState};
use kabu_core::config::AppConfig;
use kabu_core::store::port::SystemStore;
use kabu_store::system::SqliteSystemStore;
use tracing::info;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责加载配置、实例化存储适配器，并通过 Arc<dyn Trait> 注入到 API 网关。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 从环境变量加载配置（HOST / PORT / JWT_SECRET / DATA_DIR）。
/// 3. 实例化 SQLite 存储适配器。
/// 4. 组装共享状态并启动 HTTP 服务，直至进程收到退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志
    tracing_subscriber::fmt::init();
    info!("Kabu tracker starting...");

    // 2. 加载配置
    let config = Arc::new(AppConfig::from_env());

    // 3. 实例化存储适配器
    let store: Arc<dyn SystemStore> =
        Arc::new(SqliteSystemStore::new(&config.database.data_dir).await?);
    info!("Database connected successfully");

    // 4. 组装共享状态并启动服务
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        store,
        config: config.clone(),
    };

    start_server(state, &bind_addr).await
}
