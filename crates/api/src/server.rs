//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use kabu_core::config::AppConfig;
use kabu_core::store::port::SystemStore;

use crate::routes::{auth, holding, order, position};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - `store` 与 `config` 在服务启动前由 DI 容器注入，生命周期与进程等同。
/// - 会话核心不持有任何跨请求的可变状态；并发请求之间互不影响。
#[derive(Clone)]
pub struct AppState {
    /// 系统数据访问接口（账户与三类用户资源）
    pub store: Arc<dyn SystemStore>,
    /// 全局应用配置（含 JWT 签名密钥）
    pub config: Arc<AppConfig>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kabu 交易组合追踪 API",
        version = "0.1.0",
        description = "Kabu 个人交易组合追踪器的 RESTful API。提供注册登录、Token 诊断，以及持仓与订单的记录查询功能。",
        contact(name = "Kabu Team"),
        license(name = "MIT")
    ),
    tags(
        (name = "鉴权 (Auth)", description = "注册、登录、登出与 JWT 诊断相关 API"),
        (name = "持仓 (Holding)", description = "持仓快照的追加与查询"),
        (name = "持仓 (Position)", description = "持仓明细的追加与查询"),
        (name = "订单 (Order)", description = "订单流水的追加与查询")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// 为 OpenAPI 文档注入全局 Bearer JWT 鉴权方案。
///
/// 注册后，Swagger UI 页面顶部将显示 🔒 Authorize 按钮，
/// 用户可以填入 JWT Token 后对所有标记了 `security` 的接口进行鉴权测试。
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // 若 components 不存在则创建
        let components = openapi.components.get_or_insert_with(Default::default);

        // 注册名为 "bearer_jwt" 的 HTTP Bearer 鉴权方案
        components.add_security_scheme(
            "bearer_jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "在此处填入注册/登录接口返回的 JWT Token（无需 'Bearer ' 前缀）",
                    ))
                    .build(),
            ),
        );
    }
}

// ============================================================
//  服务构建与启动
// ============================================================

/// 存活探针，不做任何鉴权或存储访问。
async fn health() -> &'static str {
    "Server is running"
}

/// 构建完整的 axum 应用路由树。
///
/// 与 `start_server` 分离，便于集成测试在临时端口上复用同一棵路由树。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
pub fn build_router(state: AppState) -> Router {
    // 1. 无需鉴权的公开路由
    let public_router = OpenApiRouter::new()
        .routes(routes!(auth::signup))
        .routes(routes!(auth::signin))
        .routes(routes!(auth::verify_token));

    // 2. 需要合法 JWT 的受保护路由
    let protected_router = OpenApiRouter::new()
        .routes(routes!(auth::logout))
        .routes(routes!(holding::add_holding))
        .routes(routes!(holding::get_holdings))
        .routes(routes!(position::add_position))
        .routes(routes!(position::get_positions))
        .routes(routes!(order::add_order))
        .routes(routes!(order::get_orders))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::auth_middleware,
        ));

    // 3. 合并所有路由与自动收集的 OpenAPI Doc
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(public_router)
        .merge(protected_router)
        .with_state(state)
        .split_for_parts();

    // 4. 配置 CORS (开发阶段允许所有来源)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 5. 挂载存活探针与 Swagger UI 并应用中间件
    router
        .route("/", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 绑定 TCP 端口并启动 HTTP 监听。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:3002"`
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("🚀 Kabu API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
