//! Authoritative per-pad configuration snapshots.

use crate::config::PadConfig;
use crate::error::{Error, Result};
use crate::pad::{ActivePadSelection, PAD_COUNT, PadIndex, PadSet};

/// Holds the last known configuration of each pad
///
/// Values are replaced wholesale. Edits work on a copy and commit it with
/// [`ConfigStore::set`], so a reader never sees a half-applied edit.
#[derive(Debug, Default)]
pub struct ConfigStore {
    configs: [Option<PadConfig>; PAD_COUNT],
    pending: PadSet,
}

impl ConfigStore {
    pub const fn new() -> Self {
        Self {
            configs: [None; PAD_COUNT],
            pending: PadSet::EMPTY,
        }
    }

    /// Pads with a known configuration
    pub fn connected(&self) -> PadSet {
        PadIndex::ALL
            .into_iter()
            .filter(|pad| self.configs[pad.index()].is_some())
            .collect()
    }

    pub fn get(&self, pad: PadIndex) -> Result<PadConfig> {
        self.configs[pad.index()].ok_or(Error::NotConnected)
    }

    /// Replace a pad's configuration and mark it for broadcast
    pub fn set(&mut self, pad: PadIndex, config: PadConfig) {
        self.configs[pad.index()] = Some(config);
        self.pending.insert(pad);
    }

    /// Forget a disconnected pad
    pub fn remove(&mut self, pad: PadIndex) -> Option<PadConfig> {
        let removed = self.configs[pad.index()].take();
        if removed.is_some() {
            self.pending.insert(pad);
        }
        removed
    }

    /// Stored configuration, or a default for rendering an absent pad
    pub fn snapshot(&self, pad: PadIndex) -> PadConfig {
        self.configs[pad.index()].unwrap_or_default()
    }

    /// Configuration the UI reads from under `selection`
    pub fn first_active(&self, selection: ActivePadSelection) -> Result<PadConfig> {
        let pad = selection
            .first(self.connected())
            .ok_or(Error::NotConnected)?;
        self.get(pad)
    }

    /// Every pad targeted by `selection`, with a copy of its configuration
    pub fn for_each_active(
        &self,
        selection: ActivePadSelection,
    ) -> impl Iterator<Item = (PadIndex, PadConfig)> + '_ {
        selection
            .targets(self.connected())
            .iter()
            .filter_map(|pad| self.configs[pad.index()].map(|config| (pad, config)))
    }

    /// Pads changed since the last call
    pub fn take_pending(&mut self) -> PadSet {
        core::mem::take(&mut self.pending)
    }
}
