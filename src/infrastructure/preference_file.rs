//! 偏好文件 - 基础设施层
//!
//! 持有外部程序的偏好文件，是唯一会写这个文件的地方。
//!
//! 每次修改和还原都会把整个文件重新写一遍（不是局部修改），
//! 如果外部程序同时在写这个文件，它的改动会丢失。这里不加锁。
//!
//! 写盘一律用同步的 `std::fs::write`：写入中间没有 await 点，
//! Ctrl+C 取消运行时不会留下写了一半的文件，也不会和还原交错。

use crate::error::{AppError, AppResult, ConfigError, ResourceError};
use crate::models::PreferenceState;
use crate::services::config_patcher;
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// 不含 `**` 时，搜索深度等于模式的层数；含 `**` 时的上限
const MAX_SEARCH_DEPTH: usize = 16;

/// 编译偏好文件搜索模式，`*` 不跨目录
pub fn compile_prefs_glob(pattern: &str) -> AppResult<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| ConfigError::InvalidPrefsGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
    Ok(glob.compile_matcher())
}

/// 在 `root` 下查找第一个与 `pattern` 匹配的文件
///
/// `pattern` 相对于 `root`，`*` 不跨目录，`**` 跨任意层。
/// 多个匹配时按路径排序取第一个。
pub async fn locate_preferences(root: &Path, pattern: &str) -> AppResult<PathBuf> {
    let not_found = || {
        AppError::from(ResourceError::PreferencesNotFound {
            location: root.join(pattern).display().to_string(),
        })
    };

    let matcher = compile_prefs_glob(pattern)?;

    let max_depth = if pattern.contains("**") {
        MAX_SEARCH_DEPTH
    } else {
        pattern.split('/').filter(|s| !s.is_empty()).count()
    };

    let mut matches = Vec::new();
    let mut pending = vec![(root.to_path_buf(), 1usize)];

    while let Some((dir, depth)) = pending.pop() {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                debug!("跳过无法读取的目录 {}: {}", dir.display(), e);
                continue;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            let Ok(file_type) = entry.file_type().await else {
                continue;
            };
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };

            if file_type.is_dir() {
                if depth < max_depth {
                    pending.push((path.clone(), depth + 1));
                }
            } else if matcher.is_match(relative) {
                matches.push(path);
            }
        }
    }

    matches.sort();
    if matches.len() > 1 {
        warn!(
            "⚠️ 找到 {} 个偏好文件，使用第一个: {}",
            matches.len(),
            matches[0].display()
        );
    }
    matches.into_iter().next().ok_or_else(not_found)
}

/// 偏好文件守卫
///
/// - 获取：读取整个文件并记录两个受控字节
/// - 使用：每个线程组改写并落盘
/// - 释放：写回原始字节并落盘，只做一次
///
/// 没有显式调用 [`PreferenceGuard::release`] 就被丢弃时（错误提前返回、
/// panic、任务被取消），在 `Drop` 中同步还原。
#[derive(Debug)]
pub struct PreferenceGuard {
    path: PathBuf,
    blob: Vec<u8>,
    original: PreferenceState,
    released: bool,
}

impl PreferenceGuard {
    /// 读取偏好文件并记录原始状态
    pub async fn acquire(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let (blob, original) = config_patcher::load_preferences(&path).await?;
        info!("🔒 已备份偏好文件 {} 原始状态 {}", path.display(), original);
        Ok(Self {
            path,
            blob,
            original,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 启动时采集的原始状态
    pub fn original(&self) -> PreferenceState {
        self.original
    }

    /// 写入线程数并落盘（整文件覆盖）
    pub async fn apply(&mut self, thread_count: u32) -> AppResult<()> {
        config_patcher::apply_thread_count(&mut self.blob, thread_count)?;
        self.write_blob()?;
        debug!("偏好文件已设置为 {} 线程", thread_count);
        Ok(())
    }

    /// 还原原始字节并落盘
    pub async fn release(mut self) -> AppResult<()> {
        self.released = true;
        config_patcher::restore(&mut self.blob, self.original)?;
        self.write_blob()?;
        info!("🔓 偏好文件已还原 {}", self.original);
        Ok(())
    }

    fn write_blob(&self) -> AppResult<()> {
        std::fs::write(&self.path, &self.blob)
            .map_err(|e| AppError::file_write_failed(&self.path, e))
    }
}

impl Drop for PreferenceGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let result = config_patcher::restore(&mut self.blob, self.original)
            .and_then(|_| self.write_blob());
        match result {
            Ok(()) => warn!("⚠️ 运行中断，偏好文件已还原 {}", self.original),
            Err(e) => error!("❌ 还原偏好文件失败: {}", e),
        }
    }
}
