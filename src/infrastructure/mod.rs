//! 基础设施层（Infrastructure Layer）
//!
//! 持有稀缺的外部资源，只暴露能力：
//!
//! - `ProcessRunner` - 唯一调用外部跑分程序的地方
//! - `PreferenceGuard` - 唯一写偏好文件的地方
//! - `TokioSleeper` - 定时等待

pub mod benchmark_runner;
pub mod preference_file;
pub mod sleeper;

pub use benchmark_runner::{BenchmarkRunner, ProcessRunner};
pub use preference_file::{compile_prefs_glob, locate_preferences, PreferenceGuard};
pub use sleeper::{Sleeper, TokioSleeper};
