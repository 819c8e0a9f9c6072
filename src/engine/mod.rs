//! Engines: resolution of committed paths and autocomplete of draft text
//!
//! # Components
//!
//! - **ResolutionEngine**: fans a path out to the node, example and version
//!   lookups and reconciles them into one `ResolvedView`
//! - **ViewSlot**: holds the displayed view, discards superseded results
//! - **Autocomplete**: debounced, cancel-on-keystroke prefix lookups

mod autocomplete;
mod resolve;
mod slot;

pub use autocomplete::{completion_query, Autocomplete, Listener};
pub use resolve::{field_rows, listing_banner, type_display, ResolutionEngine};
pub use slot::{Ticket, ViewSlot};
