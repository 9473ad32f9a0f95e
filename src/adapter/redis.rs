//! Redis缓存适配器
//!
//! 使用redis库的tokio多路复用连接，TTL直接透传为SETEX的相对秒数。
//! 构造时立即建立连接，失败即报错，不允许退化为空操作缓存

use super::CacheAdapter;
use crate::error::{CacheError, CacheResult};
use crate::types::{BackendStats, CacheBackendType, CacheStoreConfig, CacheValue};
use async_trait::async_trait;
use rat_logger::{debug, warn};
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

/// Redis缓存适配器
pub struct RedisCacheAdapter {
    /// 多路复用连接（Clone按调用复用同一底层连接）
    connection: MultiplexedConnection,
    /// 键前缀
    key_prefix: String,
    /// 默认生存时间（秒）
    default_lifetime_secs: u64,
}

impl RedisCacheAdapter {
    /// 根据配置创建Redis缓存适配器并建立连接
    pub async fn new(config: &CacheStoreConfig) -> CacheResult<Self> {
        config.validate()?;

        let (host, port, database, password) = match &config.connection {
            crate::types::BackendConnectionConfig::Redis { host, port, database, password } => {
                (host.clone(), *port, *database, password.clone())
            }
            _ => {
                return Err(CacheError::ConfigError {
                    message: "Redis缓存适配器需要Redis连接配置".to_string(),
                });
            }
        };

        let url = match &password {
            Some(password) => format!("redis://:{}@{}:{}/{}", password, host, port, database),
            None => format!("redis://{}:{}/{}", host, port, database),
        };

        let client = redis::Client::open(url).map_err(|e| CacheError::ConnectionError {
            message: format!("Redis客户端创建失败: {}", e),
        })?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::ConnectionError {
                message: format!("Redis连接失败: {}:{}, {}", host, port, e),
            })?;

        debug!("Redis缓存适配器已连接: {}:{}/{}", host, port, database);

        Ok(Self {
            connection,
            key_prefix: config.key_prefix.clone(),
            default_lifetime_secs: config.default_lifetime_secs,
        })
    }

    fn prefixed_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    fn operation_error(context: &str, e: redis::RedisError) -> CacheError {
        CacheError::OperationError {
            message: format!("Redis {}失败: {}", context, e),
        }
    }
}

#[async_trait]
impl CacheAdapter for RedisCacheAdapter {
    fn backend_type(&self) -> CacheBackendType {
        CacheBackendType::Redis
    }

    fn default_lifetime(&self) -> u64 {
        self.default_lifetime_secs
    }

    async fn store(&self, key: &str, value: &CacheValue, lifetime_secs: u64) -> CacheResult<bool> {
        // lifetime为0表示"不缓存"，拒绝写入
        if lifetime_secs == 0 {
            debug!("lifetime为0，拒绝存储: key={}", key);
            return Ok(false);
        }

        let payload = value.to_json_bytes()?;
        let mut connection = self.connection.clone();
        let full_key = self.prefixed_key(key);

        let _: () = connection
            .set_ex(&full_key, payload, lifetime_secs)
            .await
            .map_err(|e| Self::operation_error("SETEX", e))?;
        Ok(true)
    }

    async fn fetch(&self, key: &str) -> CacheResult<Option<CacheValue>> {
        let mut connection = self.connection.clone();
        let full_key = self.prefixed_key(key);

        let payload: Option<Vec<u8>> = connection
            .get(&full_key)
            .await
            .map_err(|e| Self::operation_error("GET", e))?;

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
        let mut connection = self.connection.clone();
        let full_key = self.prefixed_key(key);

        connection
            .exists(&full_key)
            .await
            .map_err(|e| Self::operation_error("EXISTS", e))
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let mut connection = self.connection.clone();
        let full_key = self.prefixed_key(key);

        let deleted: i64 = connection
            .del(&full_key)
            .await
            .map_err(|e| Self::operation_error("DEL", e))?;
        Ok(deleted > 0)
    }

    async fn clear(&self) -> CacheResult<bool> {
        let mut connection = self.connection.clone();

        // 无前缀时直接FLUSHDB，有前缀时仅清理本实例键空间
        if self.key_prefix.is_empty() {
            let _: () = redis::cmd("FLUSHDB")
                .query_async(&mut connection)
                .await
                .map_err(|e| Self::operation_error("FLUSHDB", e))?;
            return Ok(true);
        }

        let pattern = format!("{}*", self.key_prefix);
        let mut keys: Vec<String> = Vec::new();
        {
            let mut iter: redis::AsyncIter<String> = connection
                .scan_match(&pattern)
                .await
                .map_err(|e| Self::operation_error("SCAN", e))?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }

        if !keys.is_empty() {
            let mut connection = self.connection.clone();
            let _: i64 = connection
                .del(keys)
                .await
                .map_err(|e| Self::operation_error("DEL", e))?;
        }
        Ok(true)
    }

    async fn stats(&self) -> CacheResult<BackendStats> {
        let mut connection = self.connection.clone();

        let info: String = redis::cmd("INFO")
            .query_async(&mut connection)
            .await
            .map_err(|e| Self::operation_error("INFO", e))?;

        let mut stats = BackendStats::unsupported();
        for line in info.lines() {
            let Some((field, raw)) = line.split_once(':') else {
                continue;
            };
            let parsed: Option<u64> = raw.trim().parse().ok();
            match field {
                "keyspace_hits" => stats.hits = parsed,
                "keyspace_misses" => stats.misses = parsed,
                "uptime_in_seconds" => stats.uptime_secs = parsed,
                "used_memory" => stats.memory_usage_bytes = parsed,
                // maxmemory为0表示未配置上限，报告为不可用
                "maxmemory" => stats.memory_available_bytes = parsed.filter(|&v| v > 0),
                _ => {}
            }
        }

        Ok(stats)
    }
}
