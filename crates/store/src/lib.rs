//! # `kabu-store` - SQLite 存储适配器
//!
//! 实现 `kabu-core` 定义的 `SystemStore` 端口。
//! 账户与三类用户资源统一落在单个 SQLite 数据库文件中，
//! 数据根目录在构造存储实例时显式注入，不依赖任何进程级全局量。

pub mod system;
