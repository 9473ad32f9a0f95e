//! 错误类型定义模块
//!
//! 提供统一的缓存错误类型和结果别名

use thiserror::Error;

/// 缓存层统一错误类型
#[derive(Error, Debug)]
pub enum CacheError {
    /// 连接错误 - 无法连接到缓存后端
    #[error("连接错误: {message}")]
    ConnectionError {
        /// 错误消息
        message: String,
    },

    /// 配置错误 - 配置项缺失或不合法
    #[error("配置错误: {message}")]
    ConfigError {
        /// 错误消息
        message: String,
    },

    /// 序列化错误 - 缓存值编码/解码失败
    #[error("序列化错误: {message}")]
    SerializationError {
        /// 错误消息
        message: String,
    },

    /// 别名未找到 - 注册表中不存在该缓存实例
    #[error("缓存别名未找到: {alias}")]
    AliasNotFound {
        /// 缓存别名
        alias: String,
    },

    /// 不支持的缓存后端（可能需要启用相应的feature）
    #[error("不支持的缓存后端: {backend}")]
    UnsupportedBackend {
        /// 后端类型描述
        backend: String,
    },

    /// 缓存操作错误 - 后端操作失败
    #[error("缓存操作错误: {message}")]
    OperationError {
        /// 错误消息
        message: String,
    },
}

/// 缓存层统一结果类型
pub type CacheResult<T> = Result<T, CacheError>;
