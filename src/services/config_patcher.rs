//! 偏好修改服务 - 业务能力层
//!
//! 只负责在内存中的偏好数据上改写两个固定偏移的字节，
//! 落盘由 [`crate::infrastructure::PreferenceGuard`] 负责。

use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::models::{
    PreferenceState, CUSTOM_THREADS_FLAG_OFFSET, MIN_PREFERENCES_LEN, THREAD_COUNT_OFFSET,
};
use std::path::Path;
use tracing::debug;

/// 单字节字段能表示的最大线程数
pub const MAX_THREAD_COUNT: u32 = u8::MAX as u32;

/// 读取偏好文件并采集原始状态
///
/// # 返回
/// 返回完整的偏好数据和两个受控字节的快照
pub async fn load_preferences(path: &Path) -> AppResult<(Vec<u8>, PreferenceState)> {
    let blob = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path, e))?;

    let state = PreferenceState::capture(&blob).ok_or_else(|| FileError::PreferencesTooShort {
        path: path.display().to_string(),
        len: blob.len(),
        required: MIN_PREFERENCES_LEN,
    })?;

    debug!(
        "读取偏好文件 {}: {} 字节, 原始状态 {}",
        path.display(),
        blob.len(),
        state
    );
    Ok((blob, state))
}

/// 校验线程数能否写入单字节字段
pub fn thread_count_byte(count: u32) -> AppResult<u8> {
    if count == 0 || count > MAX_THREAD_COUNT {
        return Err(ConfigError::ThreadCountOutOfRange { value: count }.into());
    }
    Ok(count as u8)
}

/// 写入自定义线程数并强制启用开关
///
/// 超过 255 的线程数直接拒绝，不会截断。
pub fn apply_thread_count(blob: &mut [u8], count: u32) -> AppResult<()> {
    let value = thread_count_byte(count)?;
    ensure_len(blob)?;
    blob[THREAD_COUNT_OFFSET] = value;
    blob[CUSTOM_THREADS_FLAG_OFFSET] = 1;
    Ok(())
}

/// 把原始的两个字节写回
pub fn restore(blob: &mut [u8], original: PreferenceState) -> AppResult<()> {
    ensure_len(blob)?;
    blob[THREAD_COUNT_OFFSET] = original.custom_threads_value;
    blob[CUSTOM_THREADS_FLAG_OFFSET] = original.custom_threads_enabled;
    Ok(())
}

fn ensure_len(blob: &[u8]) -> AppResult<()> {
    if blob.len() < MIN_PREFERENCES_LEN {
        return Err(FileError::PreferencesTooShort {
            path: String::new(),
            len: blob.len(),
            required: MIN_PREFERENCES_LEN,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob() -> Vec<u8> {
        let mut blob = vec![0xAB; 0x200];
        blob[THREAD_COUNT_OFFSET] = 12;
        blob[CUSTOM_THREADS_FLAG_OFFSET] = 0;
        blob
    }

    #[test]
    fn test_apply_sets_value_and_flag() {
        let mut data = blob();
        apply_thread_count(&mut data, 16).unwrap();
        assert_eq!(data[THREAD_COUNT_OFFSET], 16);
        assert_eq!(data[CUSTOM_THREADS_FLAG_OFFSET], 1);
        // 其余字节不动
        assert_eq!(data[0], 0xAB);
        assert_eq!(data[0x1FF], 0xAB);
    }

    #[test]
    fn test_apply_then_restore_round_trips() {
        let original_blob = blob();
        let state = PreferenceState::capture(&original_blob).unwrap();

        let mut data = original_blob.clone();
        apply_thread_count(&mut data, 255).unwrap();
        apply_thread_count(&mut data, 1).unwrap();
        restore(&mut data, state).unwrap();

        assert_eq!(data, original_blob);
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let mut data = blob();
        for count in [0, 256, 1024] {
            let err = apply_thread_count(&mut data, count).unwrap_err();
            assert!(matches!(
                err,
                AppError::Config(ConfigError::ThreadCountOutOfRange { value }) if value == count
            ));
        }
        assert_eq!(data, blob());
    }

    #[test]
    fn test_short_blob_is_rejected() {
        let mut data = vec![0u8; MIN_PREFERENCES_LEN - 1];
        assert!(apply_thread_count(&mut data, 4).is_err());
        assert!(PreferenceState::capture(&data).is_none());
    }

    #[tokio::test]
    async fn test_load_preferences_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_preferences(&dir.path().join("missing.prefs"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::File(FileError::ReadFailed { .. })));
    }
}
