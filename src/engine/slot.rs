//! ViewSlot - last-committed path wins

use crate::core::{Path, ResolvedView};

/// Identifies one resolution. Only the newest ticket may write the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub path: Path,
}

/// Holds the displayed view and discards results of superseded resolutions
#[derive(Debug, Default)]
pub struct ViewSlot {
    generation: u64,
    view: Option<ResolvedView>,
    loading: bool,
}

impl ViewSlot {
    /// Start a resolution for `path`. Clears the current view.
    pub fn begin(&mut self, path: Path) -> Ticket {
        self.generation += 1;
        self.view = None;
        self.loading = true;
        Ticket { generation: self.generation, path }
    }

    /// Store `view` if `ticket` is still current. Returns false for stale results.
    pub fn complete(&mut self, ticket: &Ticket, view: ResolvedView) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.view = Some(view);
        self.loading = false;
        true
    }

    pub fn view(&self) -> Option<&ResolvedView> {
        self.view.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
