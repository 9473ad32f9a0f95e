//! rat_quickcache - 统一缓存抽象层
//!
//! 提供统一的缓存操作接口，支持文件、内存、Memcached、Redis和MongoDB后端
//! 通过封闭的后端类型枚举静态分发到具体适配器，连接按别名在注册表内复用
//!
//! # 示例
//!
//! ```no_run
//! use rat_quickcache::{CacheAdapter, CacheRegistry, CacheValue, config::memory_cache_config};
//!
//! # async fn example() -> rat_quickcache::CacheResult<()> {
//! let registry = CacheRegistry::new();
//! registry.register(memory_cache_config(1024, "default", 60)?).await?;
//!
//! let cache = registry.get(None)?;
//! cache.store("greeting", &CacheValue::from("你好"), 60).await?;
//! let value = cache.fetch("greeting").await?;
//! assert!(value.is_some());
//! # Ok(())
//! # }
//! ```

// 导出所有公共模块
pub mod adapter;
pub mod config;
pub mod error;
pub mod manager;
pub mod types;

// 重新导出常用类型和函数
pub use adapter::{CacheAdapter, FileCacheAdapter, MemoryCacheAdapter, create_adapter};
pub use error::{CacheError, CacheResult};
pub use manager::CacheRegistry;
pub use types::{
    BackendConnectionConfig, BackendStats, CacheBackendType, CacheStoreConfig, CacheValue,
    STATS_KEY_HITS, STATS_KEY_MEMORY_AVAILABLE, STATS_KEY_MEMORY_USAGE, STATS_KEY_MISSES,
    STATS_KEY_UPTIME,
};

pub use config::{
    CacheStoreConfigBuilder, file_cache_config, memcached_cache_config, memory_cache_config,
    mongodb_cache_config, redis_cache_config,
};

// 条件导出后端适配器
#[cfg(feature = "memcached-support")]
pub use adapter::MemcachedCacheAdapter;
#[cfg(feature = "mongodb-support")]
pub use adapter::MongoCacheAdapter;
#[cfg(feature = "redis-support")]
pub use adapter::RedisCacheAdapter;
