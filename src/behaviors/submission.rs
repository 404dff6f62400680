use futures::future::{FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;

use crate::error::SubmitError;

/// Delivers a validated email address somewhere.
pub trait Submitter {
    fn submit(&self, email: String) -> LocalBoxFuture<'static, Result<(), SubmitError>>;
}

/// Source of wall-clock waits, swapped out in tests.
pub trait Delay {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

/// Pretends to talk to a backend: waits `latency_ms` and reports success.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    pub latency_ms: u32,
}

impl Submitter for SimulatedSubmitter {
    fn submit(&self, email: String) -> LocalBoxFuture<'static, Result<(), SubmitError>> {
        let latency_ms = self.latency_ms;
        async move {
            TimeoutFuture::new(latency_ms).await;
            log::debug!("Simulated signup accepted for {}", email);
            Ok(())
        }
        .boxed_local()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimerDelay;

impl Delay for TimerDelay {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        TimeoutFuture::new(ms).boxed_local()
    }
}
