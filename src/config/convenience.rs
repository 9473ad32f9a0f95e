//! 便捷配置函数
//!
//! 为各后端提供一步到位的配置构造，内部走构建器完成校验

use crate::error::CacheResult;
use crate::types::{BackendConnectionConfig, CacheBackendType, CacheStoreConfig};

use super::builders::CacheStoreConfigBuilder;

/// 创建文件缓存配置
pub fn file_cache_config(
    cache_dir: &str,
    file_suffix: &str,
    alias: &str,
    default_lifetime_secs: u64,
) -> CacheResult<CacheStoreConfig> {
    CacheStoreConfigBuilder::new()
        .backend(CacheBackendType::File)
        .connection(BackendConnectionConfig::File {
            cache_dir: cache_dir.to_string(),
            file_suffix: file_suffix.to_string(),
        })
        .alias(alias)
        .default_lifetime_secs(default_lifetime_secs)
        .build()
}

/// 创建内存缓存配置
pub fn memory_cache_config(
    max_entries: usize,
    alias: &str,
    default_lifetime_secs: u64,
) -> CacheResult<CacheStoreConfig> {
    CacheStoreConfigBuilder::new()
        .backend(CacheBackendType::Memory)
        .connection(BackendConnectionConfig::Memory { max_entries })
        .alias(alias)
        .default_lifetime_secs(default_lifetime_secs)
        .build()
}

/// 创建Memcached缓存配置
pub fn memcached_cache_config(
    servers: Vec<String>,
    key_prefix: &str,
    alias: &str,
    default_lifetime_secs: u64,
) -> CacheResult<CacheStoreConfig> {
    CacheStoreConfigBuilder::new()
        .backend(CacheBackendType::Memcached)
        .connection(BackendConnectionConfig::Memcached { servers })
        .alias(alias)
        .key_prefix(key_prefix)
        .default_lifetime_secs(default_lifetime_secs)
        .build()
}

/// 创建Redis缓存配置
pub fn redis_cache_config(
    host: &str,
    port: u16,
    database: i64,
    password: Option<String>,
    key_prefix: &str,
    alias: &str,
    default_lifetime_secs: u64,
) -> CacheResult<CacheStoreConfig> {
    CacheStoreConfigBuilder::new()
        .backend(CacheBackendType::Redis)
        .connection(BackendConnectionConfig::Redis {
            host: host.to_string(),
            port,
            database,
            password,
        })
        .alias(alias)
        .key_prefix(key_prefix)
        .default_lifetime_secs(default_lifetime_secs)
        .build()
}

/// 创建MongoDB缓存配置
pub fn mongodb_cache_config(
    host: &str,
    port: u16,
    database: &str,
    collection: &str,
    username: Option<String>,
    password: Option<String>,
    alias: &str,
    default_lifetime_secs: u64,
) -> CacheResult<CacheStoreConfig> {
    CacheStoreConfigBuilder::new()
        .backend(CacheBackendType::MongoDB)
        .connection(BackendConnectionConfig::MongoDB {
            host: host.to_string(),
            port,
            database: database.to_string(),
            collection: collection.to_string(),
            username,
            password,
        })
        .alias(alias)
        .default_lifetime_secs(default_lifetime_secs)
        .build()
}
