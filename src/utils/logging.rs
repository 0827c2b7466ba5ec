//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use crate::config::RunConfig;
use crate::models::{BenchmarkReport, RunResult};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 info，`verbose` 时为 debug。
/// 日志写到 stderr，stdout 只留给 JSON 结果。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &RunConfig) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 线程数循环跑分模式");
    info!("🖥️ 跑分程序: {}", config.executable_path.display());
    info!("📊 线程组: {:?}", config.thread_groups);
    info!("{}", "=".repeat(60));
}

/// 记录执行计划
///
/// # 参数
/// - `order`: 执行顺序（降序）
/// - `runs_per_group`: 每组运行次数
/// - `cooldown_seconds`: 冷却时间
pub fn log_plan(order: &[u32], runs_per_group: u32, cooldown_seconds: u64) {
    info!("✓ 共 {} 个线程组，执行顺序: {:?}", order.len(), order);
    info!("📋 每组运行 {} 次，每次冷却 {} 秒", runs_per_group, cooldown_seconds);
    info!("💡 高线程数先跑，低线程数留到最后\n");
}

/// 记录线程组开始信息
///
/// # 参数
/// - `group_num`: 线程组编号（从1开始）
/// - `total_groups`: 线程组总数
/// - `thread_count`: 线程数
pub fn log_group_start(group_num: usize, total_groups: usize, thread_count: u32) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始第 {}/{} 组: {} 线程", group_num, total_groups, thread_count);
    info!("{}", "=".repeat(60));
}

/// 记录线程组完成信息
pub fn log_group_complete(result: &RunResult) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ {} 线程完成: 平均 {:.2} | 最低 {:.2} | 最高 {:.2} | 标准差 {:.2} ({})",
        result.thread_count,
        result.average,
        result.minimum,
        result.maximum,
        result.std_dev,
        result.std_dev_percent_display()
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(report: &BenchmarkReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部跑分完成统计");
    info!("开始时间: {}", report.started_at.format("%Y-%m-%d %H:%M:%S"));
    info!("完成时间: {}", report.finished_at.format("%Y-%m-%d %H:%M:%S"));
    info!("{}", "=".repeat(60));
    for result in report.results.iter() {
        info!(
            "{:>4} 线程: 平均 {:>10.2}  标准差 {}",
            result.thread_count,
            result.average,
            result.std_dev_percent_display()
        );
    }
    info!("{}", "=".repeat(60));
}
