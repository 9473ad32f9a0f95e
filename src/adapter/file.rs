//! 文件缓存适配器
//!
//! 以序列化负载落盘的缓存后端，文件首行为十进制绝对过期时间戳，
//! 换行后是JSON序列化的缓存值。文件名由键的MD5摘要加固定后缀构成

use super::{CacheAdapter, unix_now};
use crate::error::CacheResult;
use crate::types::{BackendStats, CacheBackendType, CacheStoreConfig, CacheValue};
use async_trait::async_trait;
use md5::{Digest, Md5};
use rat_logger::{debug, warn};
use std::path::{Path, PathBuf};

/// 文件缓存适配器
pub struct FileCacheAdapter {
    /// 缓存目录
    cache_dir: PathBuf,
    /// 缓存文件后缀
    file_suffix: String,
    /// 默认生存时间（秒）
    default_lifetime_secs: u64,
}

impl FileCacheAdapter {
    /// 根据配置创建文件缓存适配器
    pub fn new(config: &CacheStoreConfig) -> CacheResult<Self> {
        config.validate()?;

        match &config.connection {
            crate::types::BackendConnectionConfig::File { cache_dir, file_suffix } => Ok(Self {
                cache_dir: PathBuf::from(cache_dir),
                file_suffix: file_suffix.clone(),
                default_lifetime_secs: config.default_lifetime_secs,
            }),
            _ => Err(crate::error::CacheError::ConfigError {
                message: "文件缓存适配器需要File连接配置".to_string(),
            }),
        }
    }

    /// 根据键计算缓存文件路径
    ///
    /// 键经MD5摘要映射为32位十六进制文件名（内容寻址，不可逆），
    /// 相同键始终得到相同路径
    pub fn create_filename_from_key(&self, key: &str) -> PathBuf {
        let mut hasher = Md5::new();
        hasher.update(key.as_bytes());
        let digest = hasher.finalize();
        let filename = format!("{}{}", hex::encode(digest), self.file_suffix);
        self.cache_dir.join(filename)
    }

    /// 读取缓存文件并解析内嵌的过期时间戳和负载
    ///
    /// 返回 `None` 表示未命中（文件不存在、已过期或格式损坏）。
    /// 过期的文件不会被删除，仅作为未命中处理
    async fn read_entry(&self, key: &str) -> Option<(i64, Vec<u8>)> {
        let path = self.create_filename_from_key(key);
        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("读取缓存文件失败: path={}, error={}", path.display(), e);
                return None;
            }
        };

        let newline_pos = content.iter().position(|&b| b == b'\n')?;
        let expiry_line = std::str::from_utf8(&content[..newline_pos]).ok()?;
        let expiry: i64 = expiry_line.trim().parse().ok()?;

        if expiry < unix_now() {
            // 过期文件保留在磁盘上，仅报告未命中
            debug!("缓存条目已过期: key={}", key);
            return None;
        }

        Some((expiry, content[newline_pos + 1..].to_vec()))
    }
}

#[async_trait]
impl CacheAdapter for FileCacheAdapter {
    fn backend_type(&self) -> CacheBackendType {
        CacheBackendType::File
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
        let expiry = unix_now() + lifetime_secs as i64;

        if !self.cache_dir.is_dir() {
            if let Err(e) = tokio::fs::create_dir_all(&self.cache_dir).await {
                warn!("创建缓存目录失败: dir={}, error={}", self.cache_dir.display(), e);
                return Ok(false);
            }
        }

        let mut content = format!("{}\n", expiry).into_bytes();
        content.extend_from_slice(&payload);

        let path = self.create_filename_from_key(key);
        match tokio::fs::write(&path, content).await {
            Ok(()) => {
                debug!("已存储缓存条目: key={}, expiry={}", key, expiry);
                Ok(true)
            }
            Err(e) => {
                warn!("写入缓存文件失败: path={}, error={}", path.display(), e);
                Ok(false)
            }
        }
    }

    async fn fetch(&self, key: &str) -> CacheResult<Option<CacheValue>> {
        match self.read_entry(key).await {
            Some((_, payload)) => match CacheValue::from_json_bytes(&payload) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    // 损坏的负载按未命中处理
                    warn!("缓存负载解析失败: key={}, error={}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn contains(&self, key: &str) -> CacheResult<bool> {
        Ok(self.read_entry(key).await.is_some())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let path = self.create_filename_from_key(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => {
                warn!("删除缓存文件失败: path={}, error={}", path.display(), e);
                Ok(false)
            }
        }
    }

    async fn clear(&self) -> CacheResult<bool> {
        let mut entries = match tokio::fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
            Err(e) => {
                warn!("枚举缓存目录失败: dir={}, error={}", self.cache_dir.display(), e);
                return Ok(false);
            }
        };

        let mut all_removed = true;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if !is_cache_file(&path, &self.file_suffix) {
                continue;
            }
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!("清理缓存文件失败: path={}, error={}", path.display(), e);
                all_removed = false;
            }
        }

        Ok(all_removed)
    }

    async fn stats(&self) -> CacheResult<BackendStats> {
        // 文件后端不提供统计信息
        Ok(BackendStats::unsupported())
    }
}

/// 判断路径是否是本适配器管理的缓存文件（按后缀匹配）
fn is_cache_file(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(suffix))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BackendConnectionConfig;

    fn test_config(dir: &str) -> CacheStoreConfig {
        CacheStoreConfig {
            backend: CacheBackendType::File,
            connection: BackendConnectionConfig::File {
                cache_dir: dir.to_string(),
                file_suffix: ".cache".to_string(),
            },
            alias: "default".to_string(),
            key_prefix: String::new(),
            default_lifetime_secs: 60,
        }
    }

    #[test]
    fn test_filename_is_deterministic() {
        let adapter = FileCacheAdapter::new(&test_config("/tmp/rqc")).unwrap();
        let first = adapter.create_filename_from_key("ABC");
        let second = adapter.create_filename_from_key("ABC");
        assert_eq!(first, second);
    }

    #[test]
    fn test_filename_uses_md5_digest() {
        let adapter = FileCacheAdapter::new(&test_config("/tmp/rqc")).unwrap();
        let path = adapter.create_filename_from_key("ABC");
        // md5("ABC") = 902fbdd2b1df0c4f70b4a5d23525e932
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "902fbdd2b1df0c4f70b4a5d23525e932.cache"
        );
    }

    #[test]
    fn test_filename_differs_for_different_keys() {
        let adapter = FileCacheAdapter::new(&test_config("/tmp/rqc")).unwrap();
        assert_ne!(
            adapter.create_filename_from_key("ABC"),
            adapter.create_filename_from_key("ABD")
        );
    }

    #[test]
    fn test_is_cache_file() {
        assert!(is_cache_file(Path::new("/tmp/abc.cache"), ".cache"));
        assert!(!is_cache_file(Path::new("/tmp/abc.txt"), ".cache"));
    }
}
