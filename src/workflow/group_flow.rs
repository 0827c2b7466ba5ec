//! 线程组流程 - 流程层
//!
//! 核心职责：定义"一个线程组"的完整跑分流程
//!
//! 流程顺序（每次运行）：
//! 1. 冷却（可选）
//! 2. 调用跑分程序
//! 3. 提取分数
//!
//! 全部运行结束后汇总为 `RunResult`。

use std::time::Duration;
use tracing::info;

use crate::error::AppResult;
use crate::infrastructure::{BenchmarkRunner, Sleeper};
use crate::models::RunResult;
use crate::services::{extract_score, statistics};
use crate::workflow::run_ctx::RunCtx;

/// 冷却计划
///
/// 每次运行前冷却一次；只有当空闲等待已经超过冷却时间时，
/// 整个序列的第一次运行才跳过冷却。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPlan {
    cooldown: Duration,
    idle_wait: Duration,
}

impl CooldownPlan {
    pub fn new(cooldown_seconds: u64, idle_wait_seconds: u64) -> Self {
        Self {
            cooldown: Duration::from_secs(cooldown_seconds),
            idle_wait: Duration::from_secs(idle_wait_seconds),
        }
    }

    /// 第一个线程组之前的空闲等待
    pub fn idle_wait(&self) -> Option<Duration> {
        (self.idle_wait > self.cooldown).then_some(self.idle_wait)
    }

    /// 某次运行之前的冷却
    pub fn cooldown_before(&self, ctx: &RunCtx) -> Option<Duration> {
        if self.cooldown.is_zero() {
            return None;
        }
        if ctx.is_first_overall() && self.idle_wait().is_some() {
            return None;
        }
        Some(self.cooldown)
    }
}

/// 线程组流程
///
/// - 按顺序执行本组的每一次运行
/// - 不持有偏好文件（由编排层在进入本组前设置好）
/// - 任何一次失败立即中止，不重试
pub struct ThreadGroupFlow {
    plan: CooldownPlan,
    runs_per_group: u32,
}

impl ThreadGroupFlow {
    /// 创建新的线程组流程
    pub fn new(plan: CooldownPlan, runs_per_group: u32) -> Self {
        Self {
            plan,
            runs_per_group,
        }
    }

    pub async fn run<R, S>(
        &self,
        runner: &mut R,
        sleeper: &mut S,
        thread_count: u32,
        group_index: usize,
    ) -> AppResult<RunResult>
    where
        R: BenchmarkRunner,
        S: Sleeper,
    {
        let mut scores = vec![0.0; self.runs_per_group as usize];

        for (run_index, slot) in scores.iter_mut().enumerate() {
            let ctx = RunCtx::new(thread_count, group_index, run_index, self.runs_per_group);

            if let Some(cooldown) = self.plan.cooldown_before(&ctx) {
                info!("{} ❄️ 冷却 {} 秒...", ctx, cooldown.as_secs());
                sleeper.sleep(cooldown).await;
            }

            info!("{} ▶️ 开始跑分", ctx);
            let output = runner.run(&ctx).await?;
            let score = extract_score(&output)?;
            info!("{} ✓ 分数: {}", ctx, score);

            *slot = score;
        }

        statistics::summarize_group(thread_count, scores)
    }
}
