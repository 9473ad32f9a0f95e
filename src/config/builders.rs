//! 缓存配置构建器
//!
//! 链式构建`CacheStoreConfig`，后端类型和连接配置必须显式设置

use crate::error::{CacheError, CacheResult};
use crate::types::{BackendConnectionConfig, CacheBackendType, CacheStoreConfig};

/// 缓存实例配置构建器
#[derive(Debug, Default)]
pub struct CacheStoreConfigBuilder {
    backend: Option<CacheBackendType>,
    connection: Option<BackendConnectionConfig>,
    alias: Option<String>,
    key_prefix: String,
    default_lifetime_secs: u64,
}

impl CacheStoreConfigBuilder {
    /// 创建空构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置后端类型
    pub fn backend(mut self, backend: CacheBackendType) -> Self {
        self.backend = Some(backend);
        self
    }

    /// 设置连接配置
    pub fn connection(mut self, connection: BackendConnectionConfig) -> Self {
        self.connection = Some(connection);
        self
    }

    /// 设置缓存别名
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// 设置键前缀（默认为空）
    pub fn key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// 设置默认生存时间（秒，默认为0）
    pub fn default_lifetime_secs(mut self, secs: u64) -> Self {
        self.default_lifetime_secs = secs;
        self
    }

    /// 构建并校验配置
    pub fn build(self) -> CacheResult<CacheStoreConfig> {
        let backend = self.backend.ok_or_else(|| CacheError::ConfigError {
            message: "必须显式设置后端类型".to_string(),
        })?;
        let connection = self.connection.ok_or_else(|| CacheError::ConfigError {
            message: "必须显式设置连接配置".to_string(),
        })?;
        let alias = self.alias.ok_or_else(|| CacheError::ConfigError {
            message: "必须显式设置缓存别名".to_string(),
        })?;

        let config = CacheStoreConfig {
            backend,
            connection,
            alias,
            key_prefix: self.key_prefix,
            default_lifetime_secs: self.default_lifetime_secs,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_backend() {
        let result = CacheStoreConfigBuilder::new()
            .connection(BackendConnectionConfig::Memory { max_entries: 0 })
            .alias("default")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_builds_valid_config() {
        let config = CacheStoreConfigBuilder::new()
            .backend(CacheBackendType::Memory)
            .connection(BackendConnectionConfig::Memory { max_entries: 100 })
            .alias("sessions")
            .key_prefix("sess:")
            .default_lifetime_secs(300)
            .build()
            .unwrap();
        assert_eq!(config.alias, "sessions");
        assert_eq!(config.key_prefix, "sess:");
        assert_eq!(config.default_lifetime_secs, 300);
    }

    #[test]
    fn test_builder_rejects_mismatched_connection() {
        let result = CacheStoreConfigBuilder::new()
            .backend(CacheBackendType::File)
            .connection(BackendConnectionConfig::Memory { max_entries: 0 })
            .alias("default")
            .build();
        assert!(result.is_err());
    }
}
