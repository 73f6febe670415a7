//! # `kabu-api` - HTTP API 网关
//!
//! 本 crate 是 Kabu 个人交易组合追踪器的 HTTP/REST 服务入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收来自前端客户端的 HTTP 请求
//! - 注册 / 登录时签发 JWT，之后由鉴权中间件对受保护路由做无状态校验
//! - 调用下层 `SystemStore` 端口完成账户与资源的读写
//! - 将领域模型转换为 DTO 返回给前端

pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod types;
