use serde::Serialize;

/// 自定义线程数取值所在偏移
pub const THREAD_COUNT_OFFSET: usize = 0x1A3;
/// 自定义线程数开关所在偏移
pub const CUSTOM_THREADS_FLAG_OFFSET: usize = 0x1B2;
/// 偏好文件至少需要的长度
pub const MIN_PREFERENCES_LEN: usize = CUSTOM_THREADS_FLAG_OFFSET + 1;

/// 偏好文件中两个受控字节的快照
///
/// 启动时采集一次，结束时原样写回一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreferenceState {
    /// 0x1B2: 是否启用自定义线程数
    pub custom_threads_enabled: u8,
    /// 0x1A3: 自定义线程数
    pub custom_threads_value: u8,
}

impl PreferenceState {
    /// 从偏好数据中读取快照，长度不足时返回 None
    pub fn capture(blob: &[u8]) -> Option<Self> {
        if blob.len() < MIN_PREFERENCES_LEN {
            return None;
        }
        Some(Self {
            custom_threads_enabled: blob[CUSTOM_THREADS_FLAG_OFFSET],
            custom_threads_value: blob[THREAD_COUNT_OFFSET],
        })
    }
}

impl std::fmt::Display for PreferenceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[启用#{} 线程数#{}]",
            self.custom_threads_enabled, self.custom_threads_value
        )
    }
}
