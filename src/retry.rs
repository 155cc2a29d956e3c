//! 重试与退避策略模块
//!
//! 此模块负责：
//! - 定义哪些失败属于临时故障（500/502/503/504、超时、连接失败）
//! - 计算指数退避延迟：factor * 2^(n-1)
//! - 以顺序、阻塞等待的方式执行带重试的异步操作

// 标准库导入
use std::future::Future;
use std::time::Duration;

// 第三方crate导入
use tracing::{info, warn};

// 本地模块导入
use crate::api_constants::retry_config;

/// 重试策略
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// 最大尝试次数（含首次请求）
    max_attempts: u32,
    /// 退避系数
    backoff_factor: Duration,
    /// 单次退避上限
    max_backoff: Duration,
    /// 需要重试的状态码
    retry_statuses: Vec<u16>,
}

impl RetryPolicy {
    /// 创建默认重试策略：最多5次尝试，退避系数1秒
    pub fn new() -> Self {
        Self {
            max_attempts: retry_config::MAX_ATTEMPTS,
            backoff_factor: Duration::from_secs_f64(retry_config::BACKOFF_FACTOR_SECONDS),
            max_backoff: Duration::from_secs(retry_config::MAX_BACKOFF_SECONDS),
            retry_statuses: retry_config::RETRY_STATUS_CODES.to_vec(),
        }
    }

    /// 设置最大尝试次数（至少为1）
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// 设置退避系数
    pub fn with_backoff_factor(mut self, factor: Duration) -> Self {
        self.backoff_factor = factor;
        self
    }

    /// 设置单次退避上限
    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    /// 获取最大尝试次数
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// 获取退避系数
    pub fn backoff_factor(&self) -> Duration {
        self.backoff_factor
    }

    /// 状态码是否应当重试
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// 第 `attempt` 次尝试失败后、下一次尝试前的等待时间
    ///
    /// `attempt` 从1开始：1s, 2s, 4s, 8s ...（系数为1秒时）。
    /// 默认最多5次尝试，因此实际只会等待前4个间隔。
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31) as i32;
        let delay = self.backoff_factor.mul_f64(2f64.powi(exponent));
        delay.min(self.max_backoff)
    }

    /// 带重试地执行异步操作
    ///
    /// `op` 接收当前尝试序号（从1开始）。`should_retry` 判定本次结果是否属于临时故障。
    /// 尝试次数耗尽后原样返回最后一次的结果，不区分成功或失败。
    pub async fn run<T, E, F, Fut, R>(&self, mut op: F, should_retry: R) -> std::result::Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        R: Fn(&std::result::Result<T, E>) -> bool,
    {
        let mut attempt = 1;
        loop {
            let outcome = op(attempt).await;

            if !should_retry(&outcome) {
                if attempt > 1 {
                    info!("✅ 第 {} 次尝试后结束重试", attempt);
                }
                return outcome;
            }

            if attempt >= self.max_attempts {
                warn!("❌ 已达到最大尝试次数 {}，返回最后一次结果", self.max_attempts);
                return outcome;
            }

            let delay = self.delay_for(attempt);
            warn!(
                "🔄 临时故障 (尝试 {}/{})，等待 {:?} 后重试...",
                attempt, self.max_attempts, delay
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
