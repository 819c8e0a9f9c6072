//! Autocomplete: debounced prefix lookups for the in-progress search text
//!
//! Every keystroke cancels the pending lookup (timer and request alike) and
//! arms a new one. Only input that stays unchanged for the quiet period
//! reaches the backend.

use crate::backend::SchemaBackend;
use crate::core::SchemaVersion;
use crate::runtime::Platform;
use futures::future::{abortable, AbortHandle};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Called after every suggestion state change
pub type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct CompletionState {
    pending: Option<AbortHandle>,
    suggestions: Vec<String>,
    loading: bool,
}

pub struct Autocomplete {
    backend: Rc<dyn SchemaBackend>,
    platform: Rc<dyn Platform>,
    quiet_period: Duration,
    state: Rc<RefCell<CompletionState>>,
    listener: Option<Listener>,
}

/// Prefix to look up for `text`: a trailing `.` only announces a child
/// segment. None when there is nothing to look up.
pub fn completion_query(text: &str) -> Option<&str> {
    let query = text.strip_suffix('.').unwrap_or(text);
    (!query.trim().is_empty()).then_some(query)
}

impl Autocomplete {
    pub fn new(backend: Rc<dyn SchemaBackend>, platform: Rc<dyn Platform>, quiet_period: Duration) -> Self {
        Self { backend, platform, quiet_period, state: Rc::new(RefCell::new(CompletionState::default())), listener: None }
    }

    pub fn with_listener(mut self, listener: Listener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Replace any pending lookup with one for `text`
    pub fn on_input(&self, version: &SchemaVersion, text: &str) {
        self.cancel();
        let Some(query) = completion_query(text) else { return };

        let lookup = Lookup {
            backend: self.backend.clone(),
            platform: self.platform.clone(),
            quiet_period: self.quiet_period,
            state: self.state.clone(),
            listener: self.listener.clone(),
            version: version.clone(),
            query: query.to_string(),
        };
        let (task, handle) = abortable(lookup.run());
        self.state.borrow_mut().pending = Some(handle);
        self.platform.spawn(Box::pin(async move {
            let _ = task.await;
        }));
    }

    /// Drop the pending lookup, if any. Suggestions are kept.
    pub fn cancel(&self) {
        let was_loading = {
            let mut state = self.state.borrow_mut();
            if let Some(pending) = state.pending.take() {
                pending.abort();
            }
            std::mem::replace(&mut state.loading, false)
        };
        if was_loading {
            notify(&self.listener);
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.state.borrow().suggestions.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending.is_some()
    }
}

impl Drop for Autocomplete {
    fn drop(&mut self) {
        if let Some(pending) = self.state.borrow_mut().pending.take() {
            pending.abort();
        }
    }
}

struct Lookup {
    backend: Rc<dyn SchemaBackend>,
    platform: Rc<dyn Platform>,
    quiet_period: Duration,
    state: Rc<RefCell<CompletionState>>,
    listener: Option<Listener>,
    version: SchemaVersion,
    query: String,
}

impl Lookup {
    async fn run(self) {
        self.platform.sleep(self.quiet_period).await;

        self.state.borrow_mut().loading = true;
        notify(&self.listener);

        let result = self.backend.keys(&self.version, &self.query).await;
        {
            let mut state = self.state.borrow_mut();
            state.loading = false;
            state.pending = None;
            match result {
                Ok(candidates) if !candidates.is_empty() => state.suggestions = candidates,
                Ok(_) => {}
                Err(err) => tracing::debug!(query = %self.query, error = %err, "autocomplete lookup dropped"),
            }
        }
        notify(&self.listener);
    }
}

fn notify(listener: &Option<Listener>) {
    if let Some(listener) = listener {
        listener();
    }
}
