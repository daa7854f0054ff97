//! Timer helpers over `gloo-timers`.
//!
//! Outside the browser [`BrowserTimer`] has no timer source: its `sleep`
//! never completes, so deadlines raced against it never fire. Code that needs
//! a deadline takes a [`Timer`] so tests can supply one that does.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{Either, select};

/// The deadline passed before the future completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Elapsed;

/// Source of deadlines.
#[async_trait(?Send)]
pub trait Timer: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Timer backed by `gloo-timers`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        sleep(duration).await;
    }
}

pub async fn sleep(duration: Duration) {
    #[cfg(feature = "csr")]
    {
        gloo_timers::future::sleep(duration).await;
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = duration;
        futures::future::pending::<()>().await;
    }
}

/// Race `fut` against `deadline`. `fut` is polled first.
///
/// # Errors
///
/// Returns [`Elapsed`] when the deadline fires first; `fut` is dropped.
pub async fn race_deadline<F, D>(fut: F, deadline: D) -> Result<F::Output, Elapsed>
where
    F: Future,
    D: Future<Output = ()>,
{
    let fut = pin!(fut);
    let deadline = pin!(deadline);
    match select(fut, deadline).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(Elapsed),
    }
}
