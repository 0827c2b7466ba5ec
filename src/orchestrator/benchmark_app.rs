//! 跑分应用 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责资源检查和生命周期管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：检查跑分程序、定位偏好文件（不做任何修改）
//! 2. **资源管理**：持有 `PreferenceGuard`，保证每条退出路径都还原偏好文件
//! 3. **中断处理**：Ctrl+C 时取消当前运行（子进程随之被杀掉）并还原
//! 4. **报告生成**：汇总为 `BenchmarkReport`
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单次运行的细节
//! - **资源所有者**：唯一持有偏好文件守卫的模块
//! - **向下委托**：委托 run_orchestrator 执行线程组序列

use crate::config::{PreferenceLocation, RunConfig};
use crate::error::{AppError, AppResult, ResourceError};
use crate::infrastructure::{
    locate_preferences, BenchmarkRunner, PreferenceGuard, ProcessRunner, Sleeper, TokioSleeper,
};
use crate::models::BenchmarkReport;
use crate::orchestrator::run_orchestrator::run_benchmark;
use crate::utils::logging;
use chrono::Local;
use std::future::Future;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: RunConfig,
    preferences_path: PathBuf,
}

impl App {
    /// 初始化应用
    ///
    /// 只做检查，不产生副作用：跑分程序不存在或找不到偏好文件时直接失败。
    pub async fn initialize(config: RunConfig) -> AppResult<Self> {
        logging::log_startup(&config);

        if !config.executable_path.is_file() {
            return Err(ResourceError::ExecutableNotFound {
                path: config.executable_path.clone(),
            }
            .into());
        }

        let preferences_path = match &config.preferences {
            PreferenceLocation::Explicit(path) => {
                if !path.is_file() {
                    return Err(ResourceError::PreferencesNotFound {
                        location: path.display().to_string(),
                    }
                    .into());
                }
                path.clone()
            }
            PreferenceLocation::Search { root, pattern } => {
                info!("\n📁 正在 {} 下搜索偏好文件 {}", root.display(), pattern);
                locate_preferences(root, pattern).await?
            }
        };
        info!("✓ 偏好文件: {}", preferences_path.display());

        Ok(Self {
            config,
            preferences_path,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<BenchmarkReport> {
        let mut runner = ProcessRunner::new(
            &self.config.executable_path,
            self.config.benchmark_arg.as_str(),
        );
        self.run_with(&mut runner, &mut TokioSleeper).await
    }

    /// 使用指定的执行器和等待方式运行，Ctrl+C 时中断
    pub async fn run_with<R, S>(
        &self,
        runner: &mut R,
        sleeper: &mut S,
    ) -> AppResult<BenchmarkReport>
    where
        R: BenchmarkRunner,
        S: Sleeper,
    {
        let ctrl_c = async {
            // 无法监听信号时不中断
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };
        self.run_with_shutdown(runner, sleeper, ctrl_c).await
    }

    /// 使用指定的执行器、等待方式和中断信号运行
    ///
    /// `shutdown` 完成时取消当前运行，还原偏好文件后返回 [`AppError::Interrupted`]。
    pub async fn run_with_shutdown<R, S, F>(
        &self,
        runner: &mut R,
        sleeper: &mut S,
        shutdown: F,
    ) -> AppResult<BenchmarkReport>
    where
        R: BenchmarkRunner,
        S: Sleeper,
        F: Future<Output = ()>,
    {
        let started_at = Local::now();
        let mut prefs = PreferenceGuard::acquire(&self.preferences_path).await?;

        let outcome = tokio::select! {
            result = run_benchmark(&self.config, &mut prefs, runner, sleeper) => result,
            () = shutdown => {
                warn!("⚠️ 收到中断信号，正在还原偏好文件...");
                Err(AppError::Interrupted)
            }
        };

        // 无论成功与否都还原一次
        let restored = prefs.release().await;

        let results = match (outcome, restored) {
            (Ok(results), Ok(())) => results,
            (Ok(_), Err(e)) => return Err(e),
            (Err(e), restored) => {
                if let Err(restore_err) = restored {
                    error!("❌ 还原偏好文件失败: {}", restore_err);
                }
                return Err(e);
            }
        };

        let report = BenchmarkReport {
            started_at,
            finished_at: Local::now(),
            runs_per_group: self.config.runs_per_group,
            cooldown_seconds: self.config.cooldown_seconds,
            idle_wait_seconds: self.config.idle_wait_seconds,
            executable: self.config.executable_path.display().to_string(),
            results,
        };

        logging::print_final_stats(&report);
        Ok(report)
    }
}
