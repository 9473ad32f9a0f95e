//! Memcached缓存适配器
//!
//! 基于memcache库客户端的透传后端。TTL语义：0透传给守护进程表示
//! 永不过期；守护进程把超过30天的相对秒数解释为绝对Unix时间戳，
//! 因此超过30天的lifetime在发送前转换为绝对时间

use super::{CacheAdapter, unix_now};
use crate::error::{CacheError, CacheResult};
use crate::types::{BackendStats, CacheBackendType, CacheStoreConfig, CacheValue};
use async_trait::async_trait;
use rat_logger::{debug, warn};

/// memcached协议的相对TTL上限（30天，秒）
const MAX_RELATIVE_TTL_SECS: u64 = 60 * 60 * 24 * 30;

/// Memcached缓存适配器
pub struct MemcachedCacheAdapter {
    /// memcache客户端（内部连接池，跨调用复用）
    client: memcache::Client,
    /// 键前缀
    key_prefix: String,
    /// 默认生存时间（秒）
    default_lifetime_secs: u64,
}

impl MemcachedCacheAdapter {
    /// 根据配置创建Memcached缓存适配器并建立连接
    pub fn new(config: &CacheStoreConfig) -> CacheResult<Self> {
        config.validate()?;

        let servers = match &config.connection {
            crate::types::BackendConnectionConfig::Memcached { servers } => servers.clone(),
            _ => {
                return Err(CacheError::ConfigError {
                    message: "Memcached缓存适配器需要Memcached连接配置".to_string(),
                });
            }
        };

        let urls: Vec<String> = servers
            .iter()
            .map(|server| format!("memcache://{}", server))
            .collect();

        let client = memcache::connect(urls).map_err(|e| CacheError::ConnectionError {
            message: format!("Memcached连接失败: {:?}, {}", servers, e),
        })?;

        debug!("Memcached缓存适配器已连接: {:?}", servers);

        Ok(Self {
            client,
            key_prefix: config.key_prefix.clone(),
            default_lifetime_secs: config.default_lifetime_secs,
        })
    }

    fn prefixed_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// 把lifetime转换为memcached的expiration参数
    ///
    /// 0保持为0（永不过期）；30天以内透传相对秒数；
    /// 超过30天转换为绝对Unix时间戳
    fn to_expiration(lifetime_secs: u64) -> u32 {
        if lifetime_secs == 0 {
            0
        } else if lifetime_secs <= MAX_RELATIVE_TTL_SECS {
            lifetime_secs.min(u32::MAX as u64) as u32
        } else {
            (unix_now() as u64 + lifetime_secs).min(u32::MAX as u64) as u32
        }
    }

    fn operation_error(context: &str, e: memcache::MemcacheError) -> CacheError {
        CacheError::OperationError {
            message: format!("Memcached {}失败: {}", context, e),
        }
    }
}

#[async_trait]
impl CacheAdapter for MemcachedCacheAdapter {
    fn backend_type(&self) -> CacheBackendType {
        CacheBackendType::Memcached
    }

    fn default_lifetime(&self) -> u64 {
        self.default_lifetime_secs
    }

    async fn store(&self, key: &str, value: &CacheValue, lifetime_secs: u64) -> CacheResult<bool> {
        let payload = value.to_json_bytes()?;
        let full_key = self.prefixed_key(key);
        let expiration = Self::to_expiration(lifetime_secs);

        self.client
            .set(&full_key, &payload[..], expiration)
            .map_err(|e| Self::operation_error("set", e))?;
        Ok(true)
    }

    async fn fetch(&self, key: &str) -> CacheResult<Option<CacheValue>> {
        let full_key = self.prefixed_key(key);

        let payload: Option<Vec<u8>> = self
            .client
            .get(&full_key)
            .map_err(|e| Self::operation_error("get", e))?;

        match payload {
            Some(payload) => match CacheValue::from_json_bytes(&payload) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    warn!("缓存负载解析失败: key={}, error={}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn contains(&self, key: &str) -> CacheResult<bool> {
        let full_key = self.prefixed_key(key);

        let payload: Option<Vec<u8>> = self
            .client
            .get(&full_key)
            .map_err(|e| Self::operation_error("get", e))?;
        Ok(payload.is_some())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let full_key = self.prefixed_key(key);

        self.client
            .delete(&full_key)
            .map_err(|e| Self::operation_error("delete", e))
    }

    async fn clear(&self) -> CacheResult<bool> {
        self.client
            .flush()
            .map_err(|e| Self::operation_error("flush", e))?;
        Ok(true)
    }

    async fn stats(&self) -> CacheResult<BackendStats> {
        let server_stats = self
            .client
            .stats()
            .map_err(|e| Self::operation_error("stats", e))?;

        // 统一接口仅报告第一台服务器的统计
        let mut stats = BackendStats::unsupported();
        if let Some((_, fields)) = server_stats.first() {
            let parse = |name: &str| fields.get(name).and_then(|raw| raw.parse::<u64>().ok());
            stats.hits = parse("get_hits");
            stats.misses = parse("get_misses");
            stats.uptime_secs = parse("uptime");
            stats.memory_usage_bytes = parse("bytes");
            stats.memory_available_bytes = parse("limit_maxbytes");
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_expiration_passthrough() {
        assert_eq!(MemcachedCacheAdapter::to_expiration(0), 0);
        assert_eq!(MemcachedCacheAdapter::to_expiration(60), 60);
        assert_eq!(
            MemcachedCacheAdapter::to_expiration(MAX_RELATIVE_TTL_SECS),
            MAX_RELATIVE_TTL_SECS as u32
        );
    }

    #[test]
    fn test_to_expiration_converts_long_ttl_to_absolute() {
        let lifetime = MAX_RELATIVE_TTL_SECS + 1;
        let expiration = MemcachedCacheAdapter::to_expiration(lifetime) as i64;
        // 超过30天的值应是"现在 + lifetime"附近的绝对时间戳
        let expected = unix_now() + lifetime as i64;
        assert!((expiration - expected).abs() <= 2);
    }
}
