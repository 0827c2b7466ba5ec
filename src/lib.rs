//! # Threadbench
//!
//! 按线程数循环运行 CPU 压力测试程序、收集分数并统计的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（跑分程序、偏好文件），只暴露能力
//! - `ProcessRunner` - 唯一调用跑分程序的地方
//! - `PreferenceGuard` - 唯一写偏好文件的地方，保证还原
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个输入
//! - `score_extractor` - 从输出中提取分数
//! - `statistics` - 汇总统计
//! - `config_patcher` - 改写偏好字节
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个线程组"的完整流程
//! - `RunCtx` - 上下文封装（线程数 + 运行序号）
//! - `ThreadGroupFlow` - 流程编排（冷却 → 运行 → 提取 → 汇总）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/benchmark_app` - 应用生命周期、资源管理
//! - `orchestrator/run_orchestrator` - 线程组排序、空闲等待、逐组调度
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Cli, RunConfig};
pub use error::{AppError, AppResult};
pub use infrastructure::{BenchmarkRunner, PreferenceGuard, ProcessRunner, Sleeper};
pub use models::{BenchmarkReport, PreferenceState, ResultSet, RunResult};
pub use orchestrator::{run_benchmark, App};
pub use workflow::{RunCtx, ThreadGroupFlow};
