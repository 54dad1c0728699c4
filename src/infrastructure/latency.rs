//! 模拟延迟钩子
//!
//! 代表每个创意检查的异步耗时。关闭时不等待，对结果没有任何影响。

use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedLatency {
    delay: Option<Duration>,
}

impl SimulatedLatency {
    pub fn disabled() -> Self {
        Self { delay: None }
    }

    pub fn from_millis(ms: u64) -> Self {
        if ms == 0 {
            Self::disabled()
        } else {
            Self {
                delay: Some(Duration::from_millis(ms)),
            }
        }
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    pub async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}
