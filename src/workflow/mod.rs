pub mod group_flow;
pub mod run_ctx;

pub use group_flow::{CooldownPlan, ThreadGroupFlow};
pub use run_ctx::RunCtx;
