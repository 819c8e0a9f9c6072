//! History - the address bar the explorer keeps in sync

use crate::error::HistoryError;
use std::cell::{Cell, RefCell};

/// Whether a transition is a genuine navigation or a state sync.
///
/// Only `Navigate` adds an entry to the back/forward stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationIntent {
    #[default]
    Sync,
    Navigate,
}

/// Read and rewrite the current location
pub trait AddressBar {
    /// Current URL path, e.g. `/k8s-1.28/pod.spec`
    fn location(&self) -> Result<String, HistoryError>;

    /// Rewrite the current entry
    fn replace(&self, url: &str) -> Result<(), HistoryError>;

    /// Add a new entry
    fn push(&self, url: &str) -> Result<(), HistoryError>;

    fn apply(&self, intent: NavigationIntent, url: &str) -> Result<(), HistoryError> {
        match intent {
            NavigationIntent::Sync => self.replace(url),
            NavigationIntent::Navigate => self.push(url),
        }
    }
}

/// In-process history stack with back/forward
#[derive(Debug)]
pub struct MemoryHistory {
    entries: RefCell<Vec<String>>,
    cursor: Cell<usize>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self { entries: RefCell::new(vec![initial.into()]), cursor: Cell::new(0) }
    }

    /// Step back; false at the start of history
    pub fn back(&self) -> bool {
        let cursor = self.cursor.get();
        if cursor == 0 {
            return false;
        }
        self.cursor.set(cursor - 1);
        true
    }

    /// Step forward; false at the end of history
    pub fn forward(&self) -> bool {
        let cursor = self.cursor.get();
        if cursor + 1 >= self.entries.borrow().len() {
            return false;
        }
        self.cursor.set(cursor + 1);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn current(&self) -> String {
        self.entries.borrow()[self.cursor.get()].clone()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl AddressBar for MemoryHistory {
    fn location(&self) -> Result<String, HistoryError> {
        Ok(self.current())
    }

    fn replace(&self, url: &str) -> Result<(), HistoryError> {
        self.entries.borrow_mut()[self.cursor.get()] = url.to_string();
        Ok(())
    }

    fn push(&self, url: &str) -> Result<(), HistoryError> {
        let mut entries = self.entries.borrow_mut();
        let next = self.cursor.get() + 1;
        entries.truncate(next);
        entries.push(url.to_string());
        self.cursor.set(next);
        Ok(())
    }
}
