//! 单次运行上下文
//!
//! 封装"我正在跑哪个线程组的第几次"这一信息

use std::fmt::Display;

/// 单次运行上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunCtx {
    /// 本组的线程数
    pub thread_count: u32,

    /// 线程组在执行顺序中的索引（从0开始）
    pub group_index: usize,

    /// 本次运行在组内的索引（从0开始）
    pub run_index: usize,

    /// 每组运行次数
    pub runs_per_group: u32,
}

impl RunCtx {
    /// 创建新的运行上下文
    pub fn new(
        thread_count: u32,
        group_index: usize,
        run_index: usize,
        runs_per_group: u32,
    ) -> Self {
        Self {
            thread_count,
            group_index,
            run_index,
            runs_per_group,
        }
    }

    /// 是否为整个序列的第一次运行
    pub fn is_first_overall(&self) -> bool {
        self.group_index == 0 && self.run_index == 0
    }
}

impl Display for RunCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[线程数#{} 运行#{}/{}]",
            self.thread_count,
            self.run_index + 1,
            self.runs_per_group
        )
    }
}
