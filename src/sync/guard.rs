//! Re-entrancy guard for observer refreshes
//!
//! While observers reload from the store they set widget values, and widgets
//! answer value changes with edits. The flag is held for the whole refresh
//! pass, and every edit checks it first and does nothing while it is set.

use core::cell::Cell;

/// Set while observers are being refreshed from the store
#[derive(Debug, Default)]
pub struct ExternalUpdateFlag(Cell<bool>);

impl ExternalUpdateFlag {
    pub const fn new() -> Self {
        Self(Cell::new(false))
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Set the flag for the lifetime of the returned guard
    ///
    /// Returns `None` if a refresh pass is already running.
    pub fn acquire(&self) -> Option<ExternalUpdateGuard<'_>> {
        if self.0.replace(true) {
            return None;
        }
        Some(ExternalUpdateGuard { flag: &self.0 })
    }
}

/// Clears the flag when dropped, on every exit path
#[derive(Debug)]
pub struct ExternalUpdateGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for ExternalUpdateGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
