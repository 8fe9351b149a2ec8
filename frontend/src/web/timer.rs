//! 定时器封装模块
//!
//! `gloo-timers` 的薄封装。`Interval` 被 drop 时自动清除。

use gloo_timers::callback::{Interval as GlooInterval, Timeout};
use std::time::Duration;

/// 周期性定时器
pub struct Interval {
    inner: Option<GlooInterval>,
}

impl Interval {
    pub fn new<F>(period: Duration, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Self {
            inner: Some(GlooInterval::new(millis, callback)),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(interval) = self.inner.take() {
            interval.cancel();
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 延迟执行一次，不可取消
pub fn delay<F>(after: Duration, callback: F)
where
    F: FnOnce() + 'static,
{
    let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
    Timeout::new(millis, callback).forget();
}
