//! Browser platform: event loop, timers and address bar from `web_sys`

use super::log;
use crate::error::HistoryError;
use crate::history::AddressBar;
use crate::runtime::Platform;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn unavailable(err: JsValue) -> HistoryError {
    HistoryError::Unavailable(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

// =============================================================================
// Platform
// =============================================================================

/// Tasks on the browser microtask queue, timers via `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPlatform;

impl Platform for BrowserPlatform {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        match Timeout::start(duration) {
            Ok(timeout) => Box::pin(timeout),
            Err(err) => {
                log!("[manifests] setTimeout unavailable: {:?}", err);
                Box::pin(futures::future::ready(()))
            }
        }
    }
}

/// `setTimeout` as a future. Dropping it clears the timer.
struct Timeout {
    handle: i32,
    fired: oneshot::Receiver<()>,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    fn start(duration: Duration) -> Result<Self, JsValue> {
        let (tx, fired) = oneshot::channel();
        let callback = Closure::once(move || {
            let _ = tx.send(());
        });
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let handle = window()?
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), millis)?;
        Ok(Self { handle, fired, _callback: callback })
    }
}

impl Future for Timeout {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.get_mut().fired.poll_unpin(cx).map(|_| ())
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}

// =============================================================================
// Address bar
// =============================================================================

/// `window.location` + `window.history`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl BrowserHistory {
    fn history(&self) -> Result<web_sys::History, HistoryError> {
        window().and_then(|w| w.history()).map_err(unavailable)
    }
}

impl AddressBar for BrowserHistory {
    fn location(&self) -> Result<String, HistoryError> {
        window().and_then(|w| w.location().pathname()).map_err(unavailable)
    }

    fn replace(&self, url: &str) -> Result<(), HistoryError> {
        self.history()?.replace_state_with_url(&JsValue::NULL, "", Some(url)).map_err(unavailable)
    }

    fn push(&self, url: &str) -> Result<(), HistoryError> {
        self.history()?.push_state_with_url(&JsValue::NULL, "", Some(url)).map_err(unavailable)
    }
}
