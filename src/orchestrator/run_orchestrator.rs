//! 运行编排器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责整个跑分序列的调度，是线程组级别的编排器。
//!
//! ## 核心流程
//!
//! 1. **排序**：线程组按降序执行
//! 2. **空闲等待**：空闲等待比冷却长时，在第一个线程组前等待一次
//! 3. **逐组执行**：改写偏好文件 → 委托 `ThreadGroupFlow` 跑完本组
//! 4. **汇总**：每组结果追加到 `ResultSet`，追加后不再修改
//!
//! 偏好文件的还原由调用方持有的 `PreferenceGuard` 负责。

use crate::config::RunConfig;
use crate::error::AppResult;
use crate::infrastructure::{BenchmarkRunner, PreferenceGuard, Sleeper};
use crate::models::ResultSet;
use crate::utils::logging;
use crate::workflow::{CooldownPlan, ThreadGroupFlow};
use tracing::info;

/// 按配置跑完所有线程组
///
/// # 参数
/// - `config`: 已校验的运行配置
/// - `prefs`: 偏好文件守卫（每组改写一次）
/// - `runner`: 跑分执行器
/// - `sleeper`: 定时等待
///
/// # 返回
/// 返回按执行顺序排列的结果集合；任何错误立即中止
pub async fn run_benchmark<R, S>(
    config: &RunConfig,
    prefs: &mut PreferenceGuard,
    runner: &mut R,
    sleeper: &mut S,
) -> AppResult<ResultSet>
where
    R: BenchmarkRunner,
    S: Sleeper,
{
    let order = config.execution_order();
    let plan = CooldownPlan::new(config.cooldown_seconds, config.idle_wait_seconds);
    let flow = ThreadGroupFlow::new(plan, config.runs_per_group);

    logging::log_plan(&order, config.runs_per_group, config.cooldown_seconds);

    if let Some(idle_wait) = plan.idle_wait() {
        info!("💤 空闲等待 {} 秒...", idle_wait.as_secs());
        sleeper.sleep(idle_wait).await;
    }

    let mut results = ResultSet::new();

    for (group_index, &thread_count) in order.iter().enumerate() {
        logging::log_group_start(group_index + 1, order.len(), thread_count);

        prefs.apply(thread_count).await?;
        let result = flow.run(runner, sleeper, thread_count, group_index).await?;

        logging::log_group_complete(&result);
        results.push(result);
    }

    Ok(results)
}
