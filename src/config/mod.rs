//! # 配置管理模块
//!
//! 提供缓存实例配置的构建器模式和便捷构造函数，
//! 所有配置在构建时完成校验

pub mod builders;
pub mod convenience;

// 重新导出所有公共类型以保持API兼容性
pub use builders::CacheStoreConfigBuilder;
pub use convenience::{
    file_cache_config, memcached_cache_config, memory_cache_config, mongodb_cache_config,
    redis_cache_config,
};
