//! Explorer - navigation controller owning the current path
//!
//! Every transition goes through one pipeline:
//!
//! ```text
//! transition(next, intent)
//!   │
//!   ├── path = next                       (sole writer)
//!   ├── address bar ← path.to_url()       (replace, or push for Navigate)
//!   └── if path changed: spawn resolve ──► ViewSlot (stale results dropped)
//! ```
//!
//! History events re-enter the same pipeline, so the URL and the in-memory
//! path agree after any kind of change.

mod config;

pub use config::{ExplorerConfig, ENV_API_URL, ENV_CATALOG, ENV_DEBOUNCE_MS};

use crate::backend::SchemaBackend;
use crate::core::{FieldPath, Path, SchemaCatalog, SchemaVersion, Snapshot};
use crate::engine::{Autocomplete, ResolutionEngine, ViewSlot};
use crate::history::{AddressBar, NavigationIntent};
use crate::runtime::Platform;
use futures::channel::mpsc;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Navigation controller. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Explorer {
    shared: Rc<Shared>,
}

struct Shared {
    catalog: SchemaCatalog,
    engine: ResolutionEngine,
    completer: Autocomplete,
    history: Rc<dyn AddressBar>,
    platform: Rc<dyn Platform>,
    state: RefCell<NavState>,
    watchers: RefCell<Vec<mpsc::UnboundedSender<Snapshot>>>,
}

#[derive(Default)]
struct NavState {
    path: Path,
    draft: String,
    slot: ViewSlot,
}

impl Explorer {
    pub fn new(
        config: &ExplorerConfig,
        backend: Rc<dyn SchemaBackend>,
        history: Rc<dyn AddressBar>,
        platform: Rc<dyn Platform>,
    ) -> Self {
        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let listener = weak.clone();
            let completer = Autocomplete::new(backend.clone(), platform.clone(), config.quiet_period)
                .with_listener(Rc::new(move || {
                    if let Some(shared) = listener.upgrade() {
                        shared.broadcast();
                    }
                }));
            Shared {
                catalog: config.catalog.clone(),
                engine: ResolutionEngine::new(backend),
                completer,
                history,
                platform,
                state: RefCell::new(NavState::default()),
                watchers: RefCell::new(Vec::new()),
            }
        });
        Self { shared }
    }

    // =========================================================================
    // Browser location
    // =========================================================================

    /// Read the address bar, rewrite it in canonical form, resolve.
    pub fn initialize_from_browser_location(&self) {
        let path = self.shared.read_location();
        tracing::info!(url = %path, "explorer initialized");
        self.shared.sync_draft(&path);
        self.shared.transition(path, NavigationIntent::Sync, true);
    }

    /// Back/forward: the address bar already moved, follow it.
    pub fn on_browser_navigated(&self) {
        let path = self.shared.read_location();
        self.shared.sync_draft(&path);
        self.shared.transition(path, NavigationIntent::Sync, false);
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Switch schema version. Keeps the field path, drops the pinned version.
    pub fn set_schema_version(&self, version: SchemaVersion, intent: NavigationIntent) {
        let next = self.path().with_schema_version(version.clone());
        self.shared.transition(next, intent, false);
        let draft = self.draft();
        self.shared.completer.on_input(&version, &draft);
    }

    /// Switch field path. Drops the pinned version.
    pub fn set_field_path(&self, field_path: FieldPath, intent: NavigationIntent) {
        let next = self.path().with_field_path(field_path);
        self.shared.sync_draft(&next);
        self.shared.transition(next, intent, false);
    }

    /// Pin (or unpin with None) an alternate resource version
    pub fn set_resource_version(&self, resource_version: Option<String>, intent: NavigationIntent) {
        let next = self.path().with_resource_version(resource_version);
        self.shared.transition(next, intent, false);
    }

    /// Follow a navigable row of the current view into its child.
    /// Returns false when `segment` is not navigable.
    pub fn navigate_into(&self, segment: &str) -> bool {
        let navigable = {
            let state = self.shared.state.borrow();
            state.slot.view().map(|v| v.is_navigable(segment)).unwrap_or(false)
        };
        if !navigable {
            tracing::debug!(segment, "not navigable");
            return false;
        }
        let next = self.path().field_path.child(segment);
        self.set_field_path(next, NavigationIntent::Navigate);
        true
    }

    // =========================================================================
    // Search box
    // =========================================================================

    /// Typing: update the draft and re-arm autocomplete. Nothing is committed.
    pub fn set_draft(&self, text: &str) {
        self.shared.state.borrow_mut().draft = text.to_string();
        if let Some(version) = self.path().schema_version {
            self.shared.completer.on_input(&version, text);
        }
        self.shared.broadcast();
    }

    /// Commit the draft as the field path
    pub fn submit_draft(&self, intent: NavigationIntent) {
        let field_path = FieldPath::parse(&self.draft());
        self.set_field_path(field_path, intent);
    }

    /// Commit a suggestion as the field path
    pub fn select_suggestion(&self, suggestion: &str, intent: NavigationIntent) {
        self.set_field_path(FieldPath::parse(suggestion), intent);
    }

    // =========================================================================
    // Observation
    // =========================================================================

    pub fn path(&self) -> Path {
        self.shared.state.borrow().path.clone()
    }

    pub fn draft(&self) -> String {
        self.shared.state.borrow().draft.clone()
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.shared.catalog
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.snapshot()
    }

    /// Receive a snapshot after every change
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<Snapshot> {
        let (tx, rx) = mpsc::unbounded();
        self.shared.watchers.borrow_mut().push(tx);
        rx
    }
}

impl Shared {
    fn read_location(&self) -> Path {
        let url = self.history.location().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "address bar unreadable, using root");
            "/".to_string()
        });
        Path::parse(&url, &self.catalog)
    }

    /// The search box shows the committed path; no lookup for it
    fn sync_draft(&self, path: &Path) {
        self.completer.cancel();
        self.state.borrow_mut().draft = path.field_path.to_string();
    }

    fn transition(self: &Rc<Self>, next: Path, intent: NavigationIntent, force: bool) {
        let moved = {
            let mut state = self.state.borrow_mut();
            let moved = state.path != next;
            state.path = next;
            moved
        };
        // Re-committing the shown path never adds a history entry
        let intent = if moved { intent } else { NavigationIntent::Sync };
        self.commit(intent, moved || force);
    }

    /// Write the URL, then resolve if the path changed.
    fn commit(self: &Rc<Self>, intent: NavigationIntent, resolve: bool) {
        let path = self.state.borrow().path.clone();
        let url = path.to_url();
        if let Err(err) = self.history.apply(intent, &url) {
            tracing::warn!(%url, error = %err, "address bar not updated");
        }
        if !resolve {
            self.broadcast();
            return;
        }

        tracing::info!(%url, ?intent, "resolving");
        let ticket = self.state.borrow_mut().slot.begin(path);
        self.broadcast();

        let shared = Rc::clone(self);
        self.platform.spawn(Box::pin(async move {
            let view = shared.engine.resolve(&ticket.path).await;
            let accepted = shared.state.borrow_mut().slot.complete(&ticket, view);
            if accepted {
                shared.broadcast();
            } else {
                tracing::debug!(url = %ticket.path, "discarding stale resolution");
            }
        }));
    }

    fn snapshot(&self) -> Snapshot {
        let state = self.state.borrow();
        Snapshot {
            url: state.path.to_url(),
            path: state.path.clone(),
            draft: state.draft.clone(),
            loading: state.slot.is_loading(),
            view: state.slot.view().cloned(),
            suggestions: self.completer.suggestions(),
            suggestions_loading: self.completer.is_loading(),
        }
    }

    fn broadcast(&self) {
        let snapshot = self.snapshot();
        self.watchers.borrow_mut().retain(|tx| tx.unbounded_send(snapshot.clone()).is_ok());
    }
}
