use std::path::{Path, PathBuf};
use thiserror::Error;

/// 应用程序错误类型
///
/// 每个分类对应一个独立的进程退出码，见 [`AppError::exit_code`]。
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误（在任何副作用之前被拒绝）
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 外部资源缺失（可执行文件 / 偏好文件）
    #[error("资源错误: {0}")]
    Resource(#[from] ResourceError),
    /// 跑分输出解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 用户中断（Ctrl+C）
    #[error("运行被中断")]
    Interrupted,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 每组运行次数超出范围
    #[error("运行次数 {value} 超出范围 [1, 100]")]
    RunsOutOfRange { value: u32 },
    /// 冷却时间超出范围
    #[error("冷却时间 {value} 秒超出范围 [0, 600]")]
    CooldownOutOfRange { value: u64 },
    /// 空闲等待时间超出范围
    #[error("空闲等待时间 {value} 秒超出范围 [0, 1200]")]
    IdleWaitOutOfRange { value: u64 },
    /// 线程组为空
    #[error("至少需要一个线程组")]
    NoThreadGroups,
    /// 线程数无法写入单字节偏好字段
    #[error("线程数 {value} 超出范围 [1, 255]")]
    ThreadCountOutOfRange { value: u32 },
    /// 偏好文件搜索模式无法编译
    #[error("偏好文件搜索模式 '{pattern}' 无效: {message}")]
    InvalidPrefsGlob { pattern: String, message: String },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {message}")]
    FileParseFailed { path: String, message: String },
}

/// 外部资源缺失
#[derive(Debug, Error)]
pub enum ResourceError {
    /// 跑分程序不存在
    #[error("找不到跑分程序: {}", path.display())]
    ExecutableNotFound { path: PathBuf },
    /// 偏好文件不存在
    #[error("找不到偏好文件: {location}")]
    PreferencesNotFound { location: String },
}

/// 跑分输出解析错误
#[derive(Debug, Error)]
pub enum ParseError {
    /// 输出中没有 `Values: {...}`
    #[error("输出中未找到分数 (输出片段: {excerpt})")]
    ScoreNotFound { excerpt: String },
    /// 匹配到了但不是数字
    #[error("无法将 '{raw}' 解析为分数")]
    InvalidScore { raw: String },
    /// 没有收集到任何分数
    #[error("分数序列为空，无法统计")]
    NoScores,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 启动跑分进程失败
    #[error("启动进程失败 ({path}): {source}")]
    SpawnFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 偏好文件长度不足，无法包含目标偏移
    #[error("偏好文件过短 ({path}): {len} 字节，至少需要 {required} 字节")]
    PreferencesTooShort {
        path: String,
        len: usize,
        required: usize,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: &Path, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: &Path, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 创建进程启动错误
    pub fn spawn_failed(path: &Path, source: std::io::Error) -> Self {
        AppError::File(FileError::SpawnFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 进程退出码
    ///
    /// - 2: 配置错误
    /// - 3: 找不到跑分程序
    /// - 4: 找不到偏好文件
    /// - 5: 分数解析失败
    /// - 6: 文件读写 / 格式错误
    /// - 130: 被中断
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::Resource(ResourceError::ExecutableNotFound { .. }) => 3,
            AppError::Resource(ResourceError::PreferencesNotFound { .. }) => 4,
            AppError::Parse(_) => 5,
            AppError::File(_) => 6,
            AppError::Interrupted => 130,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
