//! Runtime - the single event loop the explorer runs on
//!
//! All state lives on one thread. Lookups are spawned as local tasks and
//! debounce timers are plain sleeps that get dropped when cancelled.

use futures::future::LocalBoxFuture;
use std::time::Duration;

/// Task spawning and timers for the host event loop
pub trait Platform {
    /// Run `task` to completion on the current event loop
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// Resolve after `duration`. Dropping the future cancels the timer.
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Tokio `LocalSet`-backed platform.
///
/// `spawn` must be called from inside a `LocalSet`.
#[cfg(feature = "native")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPlatform;

#[cfg(feature = "native")]
impl Platform for TokioPlatform {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}
