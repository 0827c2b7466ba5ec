use std::future::Future;
use std::time::Duration;

/// 定时等待能力（空闲等待 / 冷却）
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration) -> impl Future<Output = ()>;
}

/// 真实等待
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
