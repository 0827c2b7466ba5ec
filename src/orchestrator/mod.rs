//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整个跑分序列的调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `benchmark_app` - 跑分应用
//! - 管理应用生命周期（初始化、运行、还原）
//! - 检查跑分程序、定位偏好文件
//! - 持有偏好文件守卫（PreferenceGuard）
//! - 处理 Ctrl+C 中断
//! - 生成最终报告
//!
//! ### `run_orchestrator` - 运行编排器
//! - 线程组降序排序
//! - 空闲等待
//! - 逐组改写偏好文件并委托 ThreadGroupFlow
//! - 汇总 ResultSet
//!
//! ## 层次关系
//!
//! ```text
//! benchmark_app (持有 PreferenceGuard)
//!     ↓
//! run_orchestrator (处理 Vec<线程组>)
//!     ↓
//! workflow::ThreadGroupFlow (处理单个线程组)
//!     ↓
//! services (能力层：extract / aggregate / patch)
//!     ↓
//! infrastructure (基础设施：ProcessRunner / PreferenceGuard)
//! ```
//!
//! ## 设计原则
//!
//! 1. **严格串行**：同一时间只有一个跑分进程，不做并发
//! 2. **资源隔离**：只有编排层持有偏好文件守卫
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure
//! 4. **不重试**：任何错误中止整个序列

pub mod benchmark_app;
pub mod run_orchestrator;

// 重新导出主要类型
pub use benchmark_app::App;
pub use run_orchestrator::run_benchmark;
