use serde::{Deserialize, Serialize};

use crate::error::{CacheError, CacheResult};

/// 支持的缓存后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheBackendType {
    /// 文件缓存（序列化负载 + 内嵌过期时间戳）
    File,
    /// 进程内共享内存缓存
    Memory,
    /// Memcached 守护进程
    Memcached,
    /// Redis 服务器
    Redis,
    /// MongoDB 集合（手动过期检查）
    MongoDB,
}

impl CacheBackendType {
    /// 获取后端类型的字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheBackendType::File => "file",
            CacheBackendType::Memory => "memory",
            CacheBackendType::Memcached => "memcached",
            CacheBackendType::Redis => "redis",
            CacheBackendType::MongoDB => "mongodb",
        }
    }

    /// 从字符串解析后端类型
    pub fn from_str(s: &str) -> CacheResult<Self> {
        match s.to_lowercase().as_str() {
            "file" => Ok(CacheBackendType::File),
            "memory" | "mem" => Ok(CacheBackendType::Memory),
            "memcached" | "memcache" => Ok(CacheBackendType::Memcached),
            "redis" => Ok(CacheBackendType::Redis),
            "mongodb" | "mongo" => Ok(CacheBackendType::MongoDB),
            _ => Err(CacheError::UnsupportedBackend {
                backend: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for CacheBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 后端连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BackendConnectionConfig {
    /// 文件缓存配置
    File {
        /// 缓存目录路径
        cache_dir: String,
        /// 缓存文件后缀
        file_suffix: String,
    },
    /// 内存缓存配置
    Memory {
        /// 最大条目数（0表示不限制）
        max_entries: usize,
    },
    /// Memcached 连接配置
    Memcached {
        /// 服务器列表（host:port）
        servers: Vec<String>,
    },
    /// Redis 连接配置
    Redis {
        /// 主机地址
        host: String,
        /// 端口号
        port: u16,
        /// 数据库编号
        database: i64,
        /// 密码（可选）
        password: Option<String>,
    },
    /// MongoDB 连接配置
    MongoDB {
        /// 主机地址
        host: String,
        /// 端口号（默认27017）
        port: u16,
        /// 数据库名
        database: String,
        /// 集合名
        collection: String,
        /// 用户名（可选）
        username: Option<String>,
        /// 密码（可选）
        password: Option<String>,
    },
}

impl BackendConnectionConfig {
    /// 判断连接配置是否与指定后端类型匹配
    pub fn matches_backend(&self, backend: CacheBackendType) -> bool {
        matches!(
            (self, backend),
            (BackendConnectionConfig::File { .. }, CacheBackendType::File)
                | (BackendConnectionConfig::Memory { .. }, CacheBackendType::Memory)
                | (BackendConnectionConfig::Memcached { .. }, CacheBackendType::Memcached)
                | (BackendConnectionConfig::Redis { .. }, CacheBackendType::Redis)
                | (BackendConnectionConfig::MongoDB { .. }, CacheBackendType::MongoDB)
        )
    }
}

/// 缓存实例配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStoreConfig {
    /// 后端类型
    pub backend: CacheBackendType,
    /// 连接配置
    pub connection: BackendConnectionConfig,
    /// 缓存别名（注册表内唯一标识，默认为 "default"）
    pub alias: String,
    /// 键前缀（共享后端上隔离本实例的键空间）
    pub key_prefix: String,
    /// 默认生存时间（秒），用于未显式指定lifetime的存储
    pub default_lifetime_secs: u64,
}

impl CacheStoreConfig {
    /// 校验配置合法性
    pub fn validate(&self) -> CacheResult<()> {
        if self.alias.is_empty() {
            return Err(CacheError::ConfigError {
                message: "缓存别名不能为空".to_string(),
            });
        }

        if !self.connection.matches_backend(self.backend) {
            return Err(CacheError::ConfigError {
                message: format!(
                    "连接配置与后端类型不匹配: backend={}",
                    self.backend.as_str()
                ),
            });
        }

        match &self.connection {
            BackendConnectionConfig::File { cache_dir, file_suffix } => {
                if cache_dir.is_empty() {
                    return Err(CacheError::ConfigError {
                        message: "文件缓存目录不能为空".to_string(),
                    });
                }
                if file_suffix.is_empty() {
                    return Err(CacheError::ConfigError {
                        message: "缓存文件后缀不能为空".to_string(),
                    });
                }
            }
            BackendConnectionConfig::Memcached { servers } => {
                if servers.is_empty() {
                    return Err(CacheError::ConfigError {
                        message: "Memcached服务器列表不能为空".to_string(),
                    });
                }
            }
            BackendConnectionConfig::Redis { host, .. } => {
                if host.is_empty() {
                    return Err(CacheError::ConfigError {
                        message: "Redis主机地址不能为空".to_string(),
                    });
                }
            }
            BackendConnectionConfig::MongoDB { host, database, collection, .. } => {
                if host.is_empty() {
                    return Err(CacheError::ConfigError {
                        message: "MongoDB主机地址不能为空".to_string(),
                    });
                }
                if database.is_empty() || collection.is_empty() {
                    return Err(CacheError::ConfigError {
                        message: "MongoDB数据库名和集合名不能为空".to_string(),
                    });
                }
            }
            BackendConnectionConfig::Memory { .. } => {}
        }

        Ok(())
    }
}
