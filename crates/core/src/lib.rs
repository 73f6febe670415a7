//! # `kabu-core` - 领域核心
//!
//! 定义 Kabu 交易组合追踪器的领域实体、存储端口（Port）与全局配置。
//! 本 crate 不包含任何 I/O 实现，所有具体适配器位于 `kabu-store` 与 `kabu-api`。

pub mod config;
pub mod store;
