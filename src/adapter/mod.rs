//! 缓存适配器模块
//!
//! 提供统一的缓存操作接口，屏蔽不同后端的实现差异

use crate::error::{CacheError, CacheResult};
use crate::types::{BackendStats, CacheBackendType, CacheStoreConfig, CacheValue};
use async_trait::async_trait;
use std::sync::Arc;

// 导入各个后端适配器 (条件编译)
mod file;
#[cfg(feature = "memcached-support")]
mod memcached;
mod memory;
#[cfg(feature = "mongodb-support")]
mod mongodb;
#[cfg(feature = "redis-support")]
mod redis;

// 条件导出适配器
pub use file::FileCacheAdapter;
#[cfg(feature = "memcached-support")]
pub use memcached::MemcachedCacheAdapter;
pub use memory::MemoryCacheAdapter;
#[cfg(feature = "mongodb-support")]
pub use mongodb::MongoCacheAdapter;
#[cfg(feature = "redis-support")]
pub use redis::RedisCacheAdapter;

/// 缓存适配器trait，定义统一的缓存操作接口
///
/// 约定：普通的缓存未命中（键不存在、条目已过期）以 `Ok(None)` /
/// `Ok(false)` 表示，绝不作为错误返回；`Err` 仅用于连接、配置、
/// 序列化等真正的故障
#[async_trait]
pub trait CacheAdapter: Send + Sync {
    /// 后端类型
    fn backend_type(&self) -> CacheBackendType;

    /// 配置的默认生存时间（秒）
    fn default_lifetime(&self) -> u64;

    /// 存储条目
    ///
    /// `lifetime_secs` 的零值语义因后端而异（保持各后端原有行为，
    /// 不做统一）：文件和Redis后端拒绝存储并返回 `Ok(false)`；
    /// 内存和Memcached后端视为永不过期；MongoDB后端写入立即过期的条目。
    /// 普通写入失败（磁盘满、权限不足）返回 `Ok(false)`，不重试
    async fn store(&self, key: &str, value: &CacheValue, lifetime_secs: u64) -> CacheResult<bool>;

    /// 读取条目，未命中或已过期返回 `Ok(None)`
    async fn fetch(&self, key: &str) -> CacheResult<Option<CacheValue>>;

    /// 判断是否存在未过期的条目
    async fn contains(&self, key: &str) -> CacheResult<bool>;

    /// 删除条目（尽力而为，条目不存在返回 `Ok(false)`）
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// 清空本实例管理的所有条目
    async fn clear(&self) -> CacheResult<bool>;

    /// 后端统计信息，不支持的项为 `None`
    async fn stats(&self) -> CacheResult<BackendStats>;

    /// 以配置的默认生存时间存储条目
    async fn store_with_default(&self, key: &str, value: &CacheValue) -> CacheResult<bool> {
        self.store(key, value, self.default_lifetime()).await
    }
}

/// 根据配置创建缓存适配器
///
/// 后端类型是封闭枚举，按feature静态分发到具体适配器，
/// 未启用对应feature时返回 `UnsupportedBackend` 错误
pub async fn create_adapter(config: &CacheStoreConfig) -> CacheResult<Arc<dyn CacheAdapter>> {
    config.validate()?;

    match config.backend {
        CacheBackendType::File => Ok(Arc::new(FileCacheAdapter::new(config)?)),
        CacheBackendType::Memory => Ok(Arc::new(MemoryCacheAdapter::new(config)?)),
        #[cfg(feature = "memcached-support")]
        CacheBackendType::Memcached => Ok(Arc::new(MemcachedCacheAdapter::new(config)?)),
        #[cfg(feature = "redis-support")]
        CacheBackendType::Redis => Ok(Arc::new(RedisCacheAdapter::new(config).await?)),
        #[cfg(feature = "mongodb-support")]
        CacheBackendType::MongoDB => Ok(Arc::new(MongoCacheAdapter::new(config).await?)),
        #[allow(unreachable_patterns)]
        _ => Err(CacheError::UnsupportedBackend {
            backend: format!("{} (可能需要启用相应的feature)", config.backend.as_str()),
        }),
    }
}

/// 当前Unix时间戳（秒）
pub(crate) fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
