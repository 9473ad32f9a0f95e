use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 统计项键名 - 命中次数
pub const STATS_KEY_HITS: &str = "hits";
/// 统计项键名 - 未命中次数
pub const STATS_KEY_MISSES: &str = "misses";
/// 统计项键名 - 运行时长（秒）
pub const STATS_KEY_UPTIME: &str = "uptime";
/// 统计项键名 - 已用内存（字节）
pub const STATS_KEY_MEMORY_USAGE: &str = "memory_usage";
/// 统计项键名 - 可用内存（字节）
pub const STATS_KEY_MEMORY_AVAILABLE: &str = "memory_available";

/// 后端统计信息
///
/// 固定形状的统计结果，后端不支持的项为 `None`，
/// 调用方必须容忍缺失项
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendStats {
    /// 缓存命中次数
    pub hits: Option<u64>,
    /// 缓存未命中次数
    pub misses: Option<u64>,
    /// 后端运行时长（秒）
    pub uptime_secs: Option<u64>,
    /// 已用内存（字节）
    pub memory_usage_bytes: Option<u64>,
    /// 可用内存上限（字节）
    pub memory_available_bytes: Option<u64>,
}

impl BackendStats {
    /// 全部字段为 `None` 的统计结果（不支持统计的后端使用）
    pub fn unsupported() -> Self {
        Self::default()
    }

    /// 按固定键名导出为映射
    pub fn to_map(&self) -> HashMap<&'static str, Option<u64>> {
        let mut map = HashMap::new();
        map.insert(STATS_KEY_HITS, self.hits);
        map.insert(STATS_KEY_MISSES, self.misses);
        map.insert(STATS_KEY_UPTIME, self.uptime_secs);
        map.insert(STATS_KEY_MEMORY_USAGE, self.memory_usage_bytes);
        map.insert(STATS_KEY_MEMORY_AVAILABLE, self.memory_available_bytes);
        map
    }

    /// 计算命中率（命中与未命中均可用时）
    pub fn hit_rate(&self) -> Option<f64> {
        match (self.hits, self.misses) {
            (Some(hits), Some(misses)) => {
                let total = hits + misses;
                if total == 0 {
                    Some(0.0)
                } else {
                    Some(hits as f64 / total as f64)
                }
            }
            _ => None,
        }
    }
}
