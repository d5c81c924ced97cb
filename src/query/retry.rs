use std::time::Duration;

use crate::config::QueryConfig;
use crate::errors::RequestError;

/// 查询的有限重试策略：`min(base * 2^attempt, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    retries: u32,
    base: Duration,
    max: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, base: Duration, max: Duration) -> Self {
        Self { retries, base, max }
    }

    pub fn from_config(config: &QueryConfig) -> Self {
        Self::new(
            config.retry,
            Duration::from_millis(config.retry_base_delay_ms),
            Duration::from_millis(config.retry_max_delay_ms),
        )
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// 第 `attempt` 次失败后的等待时间（从 0 开始）
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base.saturating_mul(factor).min(self.max)
    }

    /// 传输失败和 5xx 可以重试；4xx 重试也不会改变结果
    pub fn is_retryable(err: &RequestError) -> bool {
        match err.status_code() {
            None => true,
            Some(status) => status >= 500,
        }
    }
}
