use serde::{Deserialize, Serialize};

/// 全局应用配置
///
/// 生命周期与进程等同：启动时从环境变量读取一次，
/// 之后以 `Arc<AppConfig>` 注入到各层，不使用任何环境全局量。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub data_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3002,
                jwt_secret: "YOUR_SUPER_SECRET_KEY".to_string(), // Default for dev, should be overwritten by env
            },
            database: DatabaseConfig {
                data_dir: "data".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// 从进程环境变量加载配置。
    ///
    /// 识别 `HOST` / `PORT` / `JWT_SECRET` / `DATA_DIR`，
    /// 缺失或非法的值回退到 `Default`。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 基于任意键值查找函数构建配置，便于测试注入。
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            server: ServerConfig {
                host: get("HOST").unwrap_or(defaults.server.host),
                port: get("PORT")
                    .and_then(|p| p.parse::<u16>().ok())
                    .unwrap_or(defaults.server.port),
                jwt_secret: get("JWT_SECRET").unwrap_or(defaults.server.jwt_secret),
            },
            database: DatabaseConfig {
                data_dir: get("DATA_DIR").unwrap_or(defaults.database.data_dir),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3002);
        assert_eq!(config.server.jwt_secret, "YOUR_SUPER_SECRET_KEY");
        assert_eq!(config.database.data_dir, "data");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let mut env = HashMap::new();
        env.insert("PORT".to_string(), "8090".to_string());
        env.insert("JWT_SECRET".to_string(), "s3cret-key".to_string());

        let config = AppConfig::from_lookup(|k| env.get(k).cloned());
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.server.jwt_secret, "s3cret-key");
        // 未覆盖的键保持默认
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.data_dir, "data");
    }

    #[test]
    fn test_from_lookup_invalid_port_falls_back() {
        let config = AppConfig::from_lookup(|k| {
            (k == "PORT").then(|| "not-a-port".to_string())
        });
        assert_eq!(config.server.port, 3002);
    }
}
