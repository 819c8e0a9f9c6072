//! Manifests: a reference explorer for versioned API schemas.
//!
//! # Architecture
//!
//! ```text
//! address bar / input
//!   │
//!   ├── Explorer (navigation controller, owns Path)
//!   │     ├── AddressBar (MemoryHistory | BrowserHistory)
//!   │     └── ResolutionEngine ──┐
//!   │                            ├── SchemaBackend (HttpBackend | MemoryBackend)
//!   └── Autocomplete ────────────┘
//!         └── Platform (TokioPlatform | BrowserPlatform)
//! ```
//!
//! # URL shape
//!
//! | URL | Path |
//! |-----|------|
//! | `/` | default version, resource listing |
//! | `/k8s-1.28/` | `k8s-1.28`, resource listing |
//! | `/k8s-1.28/pod.spec` | `k8s-1.28`, field path `pod.spec` |
//! | `/k8s-1.28/ingress/v1beta1` | pinned to resource version `v1beta1` |
//!
//! # Features
//!
//! - `native` - tokio event loop, stderr logging, `manifests` CLI
//! - `wasm` - browser address bar, `setTimeout` timers, JS bindings
//!
//! # Usage
//!
//! ```ignore
//! use manifests::{Explorer, ExplorerConfig, HttpBackend, MemoryHistory, TokioPlatform};
//!
//! let config = ExplorerConfig::from_env()?;
//! let backend = HttpBackend::new(&config.api_url)?;
//! let explorer = Explorer::new(&config, Rc::new(backend), Rc::new(MemoryHistory::new("/k8s-1.28/pod.spec")), Rc::new(TokioPlatform));
//!
//! let mut changes = explorer.subscribe();
//! explorer.initialize_from_browser_location();
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod backend;
pub mod core;
pub mod engine;
pub mod error;
pub mod explorer;
pub mod history;
pub mod runtime;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use backend::{HttpBackend, LookupResult, MemoryBackend, SchemaBackend, VersionFixture};
pub use core::{FieldPath, Path, ResolvedView, SchemaCatalog, SchemaVersion, Snapshot};
pub use engine::{Autocomplete, ResolutionEngine};
pub use error::{ConfigError, HistoryError, LookupError};
pub use explorer::{Explorer, ExplorerConfig};
pub use history::{AddressBar, MemoryHistory, NavigationIntent};
pub use runtime::Platform;

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use logging::init_logging;
#[cfg(feature = "native")]
pub use runtime::TokioPlatform;

// =============================================================================
// Re-exports: WASM
// =============================================================================
#[cfg(feature = "wasm")]
pub use wasm::{BrowserHistory, BrowserPlatform, ManifestExplorer};
