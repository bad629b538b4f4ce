use std::time::Duration;

use crate::execution::{DelayFuture, DelayTimer};
use crate::models::TaskIndex;

/// Delays on tokio's timer wheel. Requires an enabled time driver.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioDelayTimer;

impl DelayTimer for TokioDelayTimer {
    fn delay(&self, _index: TaskIndex, duration: Duration) -> DelayFuture {
        Box::pin(async move {
            if !duration.is_zero() {
                tokio::time::sleep(duration).await;
            }
            Ok(())
        })
    }
}
