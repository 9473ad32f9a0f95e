//! 缓存注册表模块
//!
//! 管理多个命名缓存实例（别名 -> 适配器）。注册表是普通对象，
//! 由应用的组装点显式创建和传递，不依赖隐藏的全局可变状态

use dashmap::DashMap;
use parking_lot::RwLock;
use rat_logger::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::adapter::{CacheAdapter, create_adapter};
use crate::error::{CacheError, CacheResult};
use crate::types::{BackendStats, CacheStoreConfig};

/// 缓存注册表
///
/// 按别名持有已构建的适配器实例，同一别名的适配器（及其底层连接）
/// 在进程内复用，避免每次调用重新建立连接
pub struct CacheRegistry {
    /// 别名 -> 适配器实例
    adapters: DashMap<String, Arc<dyn CacheAdapter>>,
    /// 默认别名
    default_alias: RwLock<String>,
}

impl CacheRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            adapters: DashMap::new(),
            default_alias: RwLock::new("default".to_string()),
        }
    }

    /// 根据配置构建适配器并以配置中的别名注册
    ///
    /// 重复注册同一别名是配置错误
    pub async fn register(&self, config: CacheStoreConfig) -> CacheResult<()> {
        if self.adapters.contains_key(&config.alias) {
            return Err(CacheError::ConfigError {
                message: format!("缓存别名已存在: {}", config.alias),
            });
        }

        let alias = config.alias.clone();
        let adapter = create_adapter(&config).await?;
        self.adapters.insert(alias.clone(), adapter);
        debug!("已注册缓存实例: alias={}, backend={}", alias, config.backend.as_str());
        Ok(())
    }

    /// 直接注册已构建的适配器实例（用于注入自定义适配器）
    pub fn register_adapter(
        &self,
        alias: &str,
        adapter: Arc<dyn CacheAdapter>,
    ) -> CacheResult<()> {
        if alias.is_empty() {
            return Err(CacheError::ConfigError {
                message: "缓存别名不能为空".to_string(),
            });
        }
        if self.adapters.contains_key(alias) {
            return Err(CacheError::ConfigError {
                message: format!("缓存别名已存在: {}", alias),
            });
        }
        self.adapters.insert(alias.to_string(), adapter);
        Ok(())
    }

    /// 获取缓存实例，`None`表示使用默认别名
    pub fn get(&self, alias: Option<&str>) -> CacheResult<Arc<dyn CacheAdapter>> {
        let alias = match alias {
            Some(alias) => alias.to_string(),
            None => self.default_alias.read().clone(),
        };

        self.adapters
            .get(&alias)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(CacheError::AliasNotFound { alias })
    }

    /// 移除缓存实例，返回是否存在
    pub fn remove(&self, alias: &str) -> bool {
        self.adapters.remove(alias).is_some()
    }

    /// 判断别名是否已注册
    pub fn contains_alias(&self, alias: &str) -> bool {
        self.adapters.contains_key(alias)
    }

    /// 获取所有已注册别名
    pub fn aliases(&self) -> Vec<String> {
        self.adapters.iter().map(|entry| entry.key().clone()).collect()
    }

    /// 设置默认别名（必须已注册）
    pub fn set_default_alias(&self, alias: &str) -> CacheResult<()> {
        if !self.adapters.contains_key(alias) {
            return Err(CacheError::AliasNotFound {
                alias: alias.to_string(),
            });
        }
        *self.default_alias.write() = alias.to_string();
        Ok(())
    }

    /// 清空所有已注册实例管理的条目
    pub async fn clear_all(&self) -> CacheResult<()> {
        let adapters: Vec<(String, Arc<dyn CacheAdapter>)> = self
            .adapters
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();

        for (alias, adapter) in adapters {
            if let Err(e) = adapter.clear().await {
                warn!("清空缓存实例失败: alias={}, error={}", alias, e);
                return Err(e);
            }
        }
        Ok(())
    }

    /// 收集所有实例的统计信息（统计失败的实例被跳过）
    pub async fn stats_all(&self) -> HashMap<String, BackendStats> {
        let adapters: Vec<(String, Arc<dyn CacheAdapter>)> = self
            .adapters
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();

        let mut all_stats = HashMap::new();
        for (alias, adapter) in adapters {
            match adapter.stats().await {
                Ok(stats) => {
                    all_stats.insert(alias, stats);
                }
                Err(e) => {
                    warn!("获取缓存统计失败: alias={}, error={}", alias, e);
                }
            }
        }
        all_stats
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}
