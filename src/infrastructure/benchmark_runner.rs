//! 跑分程序执行器 - 基础设施层
//!
//! 持有跑分程序路径，只暴露"跑一次并拿回输出"的能力

use crate::error::{AppError, AppResult, ResourceError};
use crate::workflow::RunCtx;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// 跑分执行能力
///
/// 职责：
/// - 同步执行一次跑分（等待其结束）
/// - 返回合并后的 stdout + stderr
/// - 不解析分数
pub trait BenchmarkRunner {
    fn run(&mut self, ctx: &RunCtx) -> impl Future<Output = AppResult<String>>;
}

/// 通过子进程调用外部跑分程序
///
/// 没有超时：跑分程序卡住会一直阻塞。
pub struct ProcessRunner {
    executable: PathBuf,
    benchmark_arg: String,
}

impl ProcessRunner {
    /// 创建新的执行器
    pub fn new(executable: impl Into<PathBuf>, benchmark_arg: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            benchmark_arg: benchmark_arg.into(),
        }
    }

    /// 获取跑分程序路径
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl BenchmarkRunner for ProcessRunner {
    async fn run(&mut self, ctx: &RunCtx) -> AppResult<String> {
        debug!(
            "{} 启动 {} {}",
            ctx,
            self.executable.display(),
            self.benchmark_arg
        );

        let output = Command::new(&self.executable)
            .arg(&self.benchmark_arg)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AppError::from(ResourceError::ExecutableNotFound {
                    path: self.executable.clone(),
                }),
                _ => AppError::spawn_failed(&self.executable, e),
            })?;

        if !output.status.success() {
            warn!("{} 跑分进程退出状态异常: {}", ctx, output.status);
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(combined)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("bench.sh");
        std::fs::write(&script, "echo Rendering\necho 'Values: {321.5}' 1>&2\n").unwrap();

        // sh 读取脚本作为参数，等价于 `<exe> <benchmark_arg>`
        let mut runner = ProcessRunner::new("/bin/sh", script.display().to_string());
        let output = runner.run(&RunCtx::new(4, 0, 0, 1)).await.unwrap();

        assert!(output.contains("Rendering"));
        assert!(output.contains("Values: {321.5}"));
    }

    #[tokio::test]
    async fn test_run_missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ProcessRunner::new(dir.path().join("nope"), "--benchmark");
        let err = runner.run(&RunCtx::new(1, 0, 0, 1)).await.unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
