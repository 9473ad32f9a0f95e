//! 内存缓存适配器
//!
//! 进程内共享的用户缓存后端（对应原系统的Wincache/APC用户缓存角色），
//! 读取时惰性检查过期，提供命中/未命中计数和近似内存占用统计

use super::{CacheAdapter, unix_now};
use crate::error::CacheResult;
use crate::types::{BackendStats, CacheBackendType, CacheStoreConfig, CacheValue};
use async_trait::async_trait;
use dashmap::DashMap;
use rat_logger::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// 内存缓存条目
struct MemoryEntry {
    /// 绝对过期时间戳（秒），None表示永不过期
    expire_at: Option<i64>,
    /// 缓存值
    value: CacheValue,
    /// 近似字节大小
    size_bytes: u64,
}

impl MemoryEntry {
    fn is_expired(&self, now: i64) -> bool {
        match self.expire_at {
            Some(expire_at) => expire_at < now,
            None => false,
        }
    }
}

/// 内存缓存适配器
pub struct MemoryCacheAdapter {
    /// 条目存储
    entries: DashMap<String, MemoryEntry>,
    /// 键前缀
    key_prefix: String,
    /// 最大条目数（0表示不限制）
    max_entries: usize,
    /// 默认生存时间（秒）
    default_lifetime_secs: u64,
    /// 命中计数
    hits: AtomicU64,
    /// 未命中计数
    misses: AtomicU64,
    /// 近似内存占用（字节）
    memory_usage: AtomicU64,
    /// 创建时刻（用于uptime统计）
    created_at: Instant,
}

impl MemoryCacheAdapter {
    /// 根据配置创建内存缓存适配器
    pub fn new(config: &CacheStoreConfig) -> CacheResult<Self> {
        config.validate()?;

        match &config.connection {
            crate::types::BackendConnectionConfig::Memory { max_entries } => Ok(Self {
                entries: DashMap::new(),
                key_prefix: config.key_prefix.clone(),
                max_entries: *max_entries,
                default_lifetime_secs: config.default_lifetime_secs,
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
                memory_usage: AtomicU64::new(0),
                created_at: Instant::now(),
            }),
            _ => Err(crate::error::CacheError::ConfigError {
                message: "内存缓存适配器需要Memory连接配置".to_string(),
            }),
        }
    }

    fn prefixed_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// 读取未过期的条目值，过期条目惰性移除
    fn get_live(&self, key: &str) -> Option<CacheValue> {
        let full_key = self.prefixed_key(key);
        let now = unix_now();

        let expired = match self.entries.get(&full_key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            if let Some((_, entry)) = self.entries.remove(&full_key) {
                self.memory_usage.fetch_sub(entry.size_bytes, Ordering::Relaxed);
            }
        }
        None
    }
}

#[async_trait]
impl CacheAdapter for MemoryCacheAdapter {
    fn backend_type(&self) -> CacheBackendType {
        CacheBackendType::Memory
    }

    fn default_lifetime(&self) -> u64 {
        self.default_lifetime_secs
    }

    async fn store(&self, key: &str, value: &CacheValue, lifetime_secs: u64) -> CacheResult<bool> {
        let full_key = self.prefixed_key(key);

        // 容量上限：已满且是新键时拒绝写入
        if self.max_entries > 0
            && self.entries.len() >= self.max_entries
            && !self.entries.contains_key(&full_key)
        {
            debug!("内存缓存已达条目上限: max_entries={}", self.max_entries);
            return Ok(false);
        }

        // lifetime为0表示永不过期（用户缓存语义）
        let expire_at = if lifetime_secs == 0 {
            None
        } else {
            Some(unix_now() + lifetime_secs as i64)
        };

        let size_bytes = value.approximate_size() as u64;
        let entry = MemoryEntry {
            expire_at,
            value: value.clone(),
            size_bytes,
        };

        if let Some(old) = self.entries.insert(full_key, entry) {
            self.memory_usage.fetch_sub(old.size_bytes, Ordering::Relaxed);
        }
        self.memory_usage.fetch_add(size_bytes, Ordering::Relaxed);
        Ok(true)
    }

    async fn fetch(&self, key: &str) -> CacheResult<Option<CacheValue>> {
        match self.get_live(key) {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Some(value))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    async fn contains(&self, key: &str) -> CacheResult<bool> {
        Ok(self.get_live(key).is_some())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let full_key = self.prefixed_key(key);
        match self.entries.remove(&full_key) {
            Some((_, entry)) => {
                self.memory_usage.fetch_sub(entry.size_bytes, Ordering::Relaxed);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear(&self) -> CacheResult<bool> {
        self.entries.clear();
        self.memory_usage.store(0, Ordering::Relaxed);
        Ok(true)
    }

    async fn stats(&self) -> CacheResult<BackendStats> {
        Ok(BackendStats {
            hits: Some(self.hits.load(Ordering::Relaxed)),
            misses: Some(self.misses.load(Ordering::Relaxed)),
            uptime_secs: Some(self.created_at.elapsed().as_secs()),
            memory_usage_bytes: Some(self.memory_usage.load(Ordering::Relaxed)),
            memory_available_bytes: None,
        })
    }
}
