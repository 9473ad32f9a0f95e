//! MongoDB缓存适配器
//!
//! 使用mongodb库把缓存条目存入专用集合，文档结构为
//! `{ _id: 键, expire_at: 绝对过期时间戳, payload: BSON负载 }`。
//! MongoDB没有自动过期机制参与这里的语义，过期在读取时手动比对

use super::{CacheAdapter, unix_now};
use crate::error::{CacheError, CacheResult};
use crate::types::{BackendStats, CacheBackendType, CacheStoreConfig, CacheValue};
use async_trait::async_trait;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use rat_logger::{debug, warn};

/// MongoDB缓存适配器
pub struct MongoCacheAdapter {
    /// 缓存集合
    collection: Collection<Document>,
    /// 客户端（用于serverStatus统计）
    client: Client,
    /// 键前缀
    key_prefix: String,
    /// 默认生存时间（秒）
    default_lifetime_secs: u64,
}

impl MongoCacheAdapter {
    /// 根据配置创建MongoDB缓存适配器并建立连接
    pub async fn new(config: &CacheStoreConfig) -> CacheResult<Self> {
        config.validate()?;

        let (host, port, database, collection_name, username, password) = match &config.connection
        {
            crate::types::BackendConnectionConfig::MongoDB {
                host,
                port,
                database,
                collection,
                username,
                password,
            } => (
                host.clone(),
                *port,
                database.clone(),
                collection.clone(),
                username.clone(),
                password.clone(),
            ),
            _ => {
                return Err(CacheError::ConfigError {
                    message: "MongoDB缓存适配器需要MongoDB连接配置".to_string(),
                });
            }
        };

        let uri = match (&username, &password) {
            (Some(user), Some(pass)) => {
                format!("mongodb://{}:{}@{}:{}/{}", user, pass, host, port, database)
            }
            _ => format!("mongodb://{}:{}", host, port),
        };

        let options = ClientOptions::parse(&uri)
            .await
            .map_err(|e| CacheError::ConnectionError {
                message: format!("MongoDB连接字符串解析失败: {}", e),
            })?;

        let client = Client::with_options(options).map_err(|e| CacheError::ConnectionError {
            message: format!("MongoDB客户端创建失败: {}", e),
        })?;

        // 立即ping确认连接可用，失败即报错
        let db = client.database(&database);
        db.run_command(doc! {"ping": 1}, None)
            .await
            .map_err(|e| CacheError::ConnectionError {
                message: format!("MongoDB连接失败: {}:{}, {}", host, port, e),
            })?;

        debug!("MongoDB缓存适配器已连接: {}:{}/{}.{}", host, port, database, collection_name);

        Ok(Self {
            collection: db.collection(&collection_name),
            client,
            key_prefix: config.key_prefix.clone(),
            default_lifetime_secs: config.default_lifetime_secs,
        })
    }

    fn prefixed_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    fn operation_error(context: &str, e: mongodb::error::Error) -> CacheError {
        CacheError::OperationError {
            message: format!("MongoDB {}失败: {}", context, e),
        }
    }

    /// 读取未过期的条目文档
    async fn find_live(&self, key: &str) -> CacheResult<Option<Document>> {
        let full_key = self.prefixed_key(key);

        let document = self
            .collection
            .find_one(doc! {"_id": &full_key}, None)
            .await
            .map_err(|e| Self::operation_error("find_one", e))?;

        let Some(document) = document else {
            return Ok(None);
        };

        // 手动过期检查：expire_at早于当前时间即未命中
        let expire_at = document.get_i64("expire_at").unwrap_or(0);
        if expire_at < unix_now() {
            debug!("缓存条目已过期: key={}", key);
            return Ok(None);
        }

        Ok(Some(document))
    }
}

#[async_trait]
impl CacheAdapter for MongoCacheAdapter {
    fn backend_type(&self) -> CacheBackendType {
        CacheBackendType::MongoDB
    }

    fn default_lifetime(&self) -> u64 {
        self.default_lifetime_secs
    }

    async fn store(&self, key: &str, value: &CacheValue, lifetime_secs: u64) -> CacheResult<bool> {
        let full_key = self.prefixed_key(key);
        let expire_at = unix_now() + lifetime_secs as i64;

        let payload: Bson =
            mongodb::bson::to_bson(value).map_err(|e| CacheError::SerializationError {
                message: format!("缓存值转换BSON失败: {}", e),
            })?;

        // 先删后插，不使用原子upsert；并发写入者之间存在短暂的无条目窗口
        self.collection
            .delete_one(doc! {"_id": &full_key}, None)
            .await
            .map_err(|e| Self::operation_error("delete_one", e))?;

        let document = doc! {
            "_id": &full_key,
            "expire_at": expire_at,
            "payload": payload,
        };

        match self.collection.insert_one(document, None).await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!("MongoDB写入缓存条目失败: key={}, error={}", key, e);
                Ok(false)
            }
        }
    }

    async fn fetch(&self, key: &str) -> CacheResult<Option<CacheValue>> {
        let Some(document) = self.find_live(key).await? else {
            return Ok(None);
        };

        let Some(payload) = document.get("payload") else {
            warn!("缓存文档缺少payload字段: key={}", key);
            return Ok(None);
        };

        match mongodb::bson::from_bson::<CacheValue>(payload.clone()) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("缓存负载解析失败: key={}, error={}", key, e);
                Ok(None)
            }
        }
    }

    async fn contains(&self, key: &str) -> CacheResult<bool> {
        Ok(self.find_live(key).await?.is_some())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let full_key = self.prefixed_key(key);

        let result = self
            .collection
            .delete_one(doc! {"_id": &full_key}, None)
            .await
            .map_err(|e| Self::operation_error("delete_one", e))?;
        Ok(result.deleted_count > 0)
    }

    async fn clear(&self) -> CacheResult<bool> {
        // 集合由本实例独占，清空整个集合
        self.collection
            .delete_many(doc! {}, None)
            .await
            .map_err(|e| Self::operation_error("delete_many", e))?;
        Ok(true)
    }

    async fn stats(&self) -> CacheResult<BackendStats> {
        let status = self
            .client
            .database("admin")
            .run_command(doc! {"serverStatus": 1}, None)
            .await
            .map_err(|e| Self::operation_error("serverStatus", e))?;

        let mut stats = BackendStats::unsupported();
        stats.uptime_secs = status
            .get("uptime")
            .and_then(Bson::as_f64)
            .map(|uptime| uptime as u64);
        Ok(stats)
    }
}
