//! 内存缓存适配器集成测试

use std::time::Duration;

use rat_quickcache::{CacheAdapter, CacheValue, MemoryCacheAdapter, memory_cache_config};

fn new_adapter(max_entries: usize) -> MemoryCacheAdapter {
    let config = memory_cache_config(max_entries, "default", 60).unwrap();
    MemoryCacheAdapter::new(&config).unwrap()
}

#[tokio::test]
async fn test_store_then_fetch_roundtrip() {
    let adapter = new_adapter(0);

    assert!(adapter.store("key", &CacheValue::from("v"), 60).await.unwrap());
    assert_eq!(
        adapter.fetch("key").await.unwrap(),
        Some(CacheValue::String("v".to_string()))
    );
}

#[tokio::test]
async fn test_zero_lifetime_stores_without_expiry() {
    let adapter = new_adapter(0);

    // 用户缓存语义：0表示永不过期，写入成功
    assert!(adapter.store("forever", &CacheValue::from("v"), 0).await.unwrap());
    assert!(adapter.contains("forever").await.unwrap());
}

#[tokio::test]
async fn test_entry_expires_after_lifetime() {
    let adapter = new_adapter(0);

    adapter.store("short", &CacheValue::from("v"), 1).await.unwrap();
    assert!(adapter.contains("short").await.unwrap());

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(adapter.fetch("short").await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_after_store() {
    let adapter = new_adapter(0);

    adapter.store("key", &CacheValue::from("v"), 60).await.unwrap();
    assert!(adapter.delete("key").await.unwrap());
    assert!(!adapter.contains("key").await.unwrap());
}

#[tokio::test]
async fn test_clear_removes_all_entries() {
    let adapter = new_adapter(0);

    for i in 0..5i64 {
        adapter
            .store(&format!("key{}", i), &CacheValue::from(i), 60)
            .await
            .unwrap();
    }

    assert!(adapter.clear().await.unwrap());
    for i in 0..5 {
        assert!(!adapter.contains(&format!("key{}", i)).await.unwrap());
    }
}

#[tokio::test]
async fn test_max_entries_guard() {
    let adapter = new_adapter(2);

    assert!(adapter.store("a", &CacheValue::from(1i64), 60).await.unwrap());
    assert!(adapter.store("b", &CacheValue::from(2i64), 60).await.unwrap());

    // 已满且是新键：拒绝写入
    assert!(!adapter.store("c", &CacheValue::from(3i64), 60).await.unwrap());

    // 覆盖已有键仍然允许
    assert!(adapter.store("a", &CacheValue::from(9i64), 60).await.unwrap());
}

#[tokio::test]
async fn test_stats_tracks_hits_and_misses() {
    let adapter = new_adapter(0);

    adapter.store("key", &CacheValue::from("v"), 60).await.unwrap();
    adapter.fetch("key").await.unwrap();
    adapter.fetch("key").await.unwrap();
    adapter.fetch("absent").await.unwrap();

    let stats = adapter.stats().await.unwrap();
    assert_eq!(stats.hits, Some(2));
    assert_eq!(stats.misses, Some(1));
    assert!(stats.uptime_secs.is_some());
    assert!(stats.memory_usage_bytes.unwrap() > 0);
    assert!(stats.memory_available_bytes.is_none());
}

#[tokio::test]
async fn test_memory_usage_drops_after_delete() {
    let adapter = new_adapter(0);

    adapter
        .store("big", &CacheValue::from("x".repeat(1024)), 60)
        .await
        .unwrap();
    let before = adapter.stats().await.unwrap().memory_usage_bytes.unwrap();
    assert!(before >= 1024);

    adapter.delete("big").await.unwrap();
    let after = adapter.stats().await.unwrap().memory_usage_bytes.unwrap();
    assert_eq!(after, 0);
}
