use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 通用缓存值类型 - 支持跨后端的数据表示
///
/// 文件/内存/Memcached/Redis后端通过JSON序列化存储，
/// MongoDB后端转换为BSON文档存储
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CacheValue {
    /// 空值
    Null,
    /// 布尔值
    Bool(bool),
    /// 整数
    Int(i64),
    /// 无符号整数
    UInt(u64),
    /// 浮点数
    Float(f64),
    /// 字符串
    String(String),
    /// 字节数组
    Bytes(Vec<u8>),
    /// UTC日期时间
    DateTime(DateTime<Utc>),
    /// JSON 对象
    Json(serde_json::Value),
    /// 数组
    Array(Vec<CacheValue>),
    /// 对象/文档
    Object(HashMap<String, CacheValue>),
}

impl CacheValue {
    /// 序列化为JSON字节（文件/Redis/Memcached后端的存储格式）
    pub fn to_json_bytes(&self) -> crate::error::CacheResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| crate::error::CacheError::SerializationError {
            message: format!("缓存值序列化失败: {}", e),
        })
    }

    /// 从JSON字节反序列化
    pub fn from_json_bytes(bytes: &[u8]) -> crate::error::CacheResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| crate::error::CacheError::SerializationError {
            message: format!("缓存值反序列化失败: {}", e),
        })
    }

    /// 估算值的近似字节大小（用于内存后端统计）
    pub fn approximate_size(&self) -> usize {
        serde_json::to_vec(self).map(|v| v.len()).unwrap_or(0)
    }
}

impl std::fmt::Display for CacheValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheValue::Null => write!(f, "null"),
            CacheValue::Bool(b) => write!(f, "{}", b),
            CacheValue::Int(i) => write!(f, "{}", i),
            CacheValue::UInt(u) => write!(f, "{}", u),
            CacheValue::Float(fl) => write!(f, "{}", fl),
            CacheValue::String(s) => write!(f, "{}", s),
            CacheValue::Bytes(bytes) => write!(f, "[{} bytes]", bytes.len()),
            CacheValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            CacheValue::Json(json) => write!(f, "{}", json),
            CacheValue::Array(arr) => {
                let json_str = serde_json::to_string(arr).unwrap_or_default();
                write!(f, "{}", json_str)
            }
            CacheValue::Object(obj) => {
                let json_str = serde_json::to_string(obj).unwrap_or_default();
                write!(f, "{}", json_str)
            }
        }
    }
}

impl From<&str> for CacheValue {
    fn from(s: &str) -> Self {
        CacheValue::String(s.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(s: String) -> Self {
        CacheValue::String(s)
    }
}

impl From<i64> for CacheValue {
    fn from(i: i64) -> Self {
        CacheValue::Int(i)
    }
}

impl From<u64> for CacheValue {
    fn from(u: u64) -> Self {
        CacheValue::UInt(u)
    }
}

impl From<f64> for CacheValue {
    fn from(fl: f64) -> Self {
        CacheValue::Float(fl)
    }
}

impl From<bool> for CacheValue {
    fn from(b: bool) -> Self {
        CacheValue::Bool(b)
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(bytes: Vec<u8>) -> Self {
        CacheValue::Bytes(bytes)
    }
}

impl From<serde_json::Value> for CacheValue {
    fn from(json: serde_json::Value) -> Self {
        CacheValue::Json(json)
    }
}
