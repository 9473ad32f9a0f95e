//! 缓存注册表集成测试

use rat_quickcache::{
    CacheAdapter, CacheError, CacheRegistry, CacheValue, file_cache_config, memory_cache_config,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_register_and_get_default() {
    let registry = CacheRegistry::new();
    registry
        .register(memory_cache_config(0, "default", 60).unwrap())
        .await
        .unwrap();

    let cache = registry.get(None).unwrap();
    cache.store("key", &CacheValue::from("v"), 60).await.unwrap();
    assert!(cache.contains("key").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_alias_is_config_error() {
    let registry = CacheRegistry::new();
    registry
        .register(memory_cache_config(0, "default", 60).unwrap())
        .await
        .unwrap();

    let result = registry
        .register(memory_cache_config(0, "default", 60).unwrap())
        .await;
    assert!(matches!(result, Err(CacheError::ConfigError { .. })));
}

#[tokio::test]
async fn test_unknown_alias_not_found() {
    let registry = CacheRegistry::new();
    let result = registry.get(Some("missing"));
    assert!(matches!(result, Err(CacheError::AliasNotFound { .. })));
}

#[tokio::test]
async fn test_multiple_named_instances() {
    let dir = TempDir::new().unwrap();
    let registry = CacheRegistry::new();

    registry
        .register(memory_cache_config(0, "hot", 60).unwrap())
        .await
        .unwrap();
    registry
        .register(
            file_cache_config(dir.path().to_str().unwrap(), ".cache", "disk", 60).unwrap(),
        )
        .await
        .unwrap();

    let mut aliases = registry.aliases();
    aliases.sort();
    assert_eq!(aliases, vec!["disk".to_string(), "hot".to_string()]);

    // 同一别名的实例被复用，写入对后续get可见
    registry
        .get(Some("hot"))
        .unwrap()
        .store("key", &CacheValue::from(1i64), 60)
        .await
        .unwrap();
    assert!(registry.get(Some("hot")).unwrap().contains("key").await.unwrap());
    assert!(!registry.get(Some("disk")).unwrap().contains("key").await.unwrap());
}

#[tokio::test]
async fn test_set_default_alias() {
    let registry = CacheRegistry::new();
    registry
        .register(memory_cache_config(0, "sessions", 60).unwrap())
        .await
        .unwrap();

    assert!(registry.set_default_alias("missing").is_err());
    registry.set_default_alias("sessions").unwrap();

    let cache = registry.get(None).unwrap();
    assert_eq!(
        cache.backend_type(),
        rat_quickcache::CacheBackendType::Memory
    );
}

#[tokio::test]
async fn test_remove_instance() {
    let registry = CacheRegistry::new();
    registry
        .register(memory_cache_config(0, "temp", 60).unwrap())
        .await
        .unwrap();

    assert!(registry.contains_alias("temp"));
    assert!(registry.remove("temp"));
    assert!(!registry.contains_alias("temp"));
    assert!(!registry.remove("temp"));
}

#[tokio::test]
async fn test_clear_all_instances() {
    let dir = TempDir::new().unwrap();
    let registry = CacheRegistry::new();

    registry
        .register(memory_cache_config(0, "hot", 60).unwrap())
        .await
        .unwrap();
    registry
        .register(
            file_cache_config(dir.path().to_str().unwrap(), ".cache", "disk", 60).unwrap(),
        )
        .await
        .unwrap();

    registry
        .get(Some("hot"))
        .unwrap()
        .store("a", &CacheValue::from(1i64), 60)
        .await
        .unwrap();
    registry
        .get(Some("disk"))
        .unwrap()
        .store("b", &CacheValue::from(2i64), 60)
        .await
        .unwrap();

    registry.clear_all().await.unwrap();
    assert!(!registry.get(Some("hot")).unwrap().contains("a").await.unwrap());
    assert!(!registry.get(Some("disk")).unwrap().contains("b").await.unwrap());
}

#[tokio::test]
async fn test_stats_all_reports_every_alias() {
    let registry = CacheRegistry::new();
    registry
        .register(memory_cache_config(0, "hot", 60).unwrap())
        .await
        .unwrap();

    let all_stats = registry.stats_all().await;
    assert!(all_stats.contains_key("hot"));
}

#[tokio::test]
async fn test_store_with_default_lifetime() {
    let registry = CacheRegistry::new();
    registry
        .register(memory_cache_config(0, "default", 120).unwrap())
        .await
        .unwrap();

    let cache = registry.get(None).unwrap();
    assert_eq!(cache.default_lifetime(), 120);
    assert!(cache.store_with_default("key", &CacheValue::from("v")).await.unwrap());
    assert!(cache.contains("key").await.unwrap());
}
