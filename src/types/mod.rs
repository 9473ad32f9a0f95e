//! 缓存类型定义和配置
//!
//! 定义支持的后端类型、连接配置和通用缓存值类型

pub mod backend_config;
pub mod backend_stats;
pub mod cache_value;

// 重新导出所有公共类型以保持API兼容性
pub use backend_config::{BackendConnectionConfig, CacheBackendType, CacheStoreConfig};
pub use backend_stats::{
    BackendStats, STATS_KEY_HITS, STATS_KEY_MEMORY_AVAILABLE, STATS_KEY_MEMORY_USAGE,
    STATS_KEY_MISSES, STATS_KEY_UPTIME,
};
pub use cache_value::CacheValue;
