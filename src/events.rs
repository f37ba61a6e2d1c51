//! Configuration change notifications
//!
//! Edits and device notifications post [`ConfigChanged`] events into a bounded
//! queue built on `critical-section` and `heapless::Deque`. The device side may
//! post from a transport callback, so the queue is interrupt and thread safe.
//! The UI side drains it once per refresh and sees a single merged event.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::pad::{PadIndex, PadSet};

/// Default capacity of a [`ChangeChannel`]
pub const DEFAULT_CHANGE_CHANNEL_SIZE: usize = 8;

/// Pads whose configuration changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigChanged {
    /// Changed by an edit made through this crate; the store is current
    pub edited: PadSet,
    /// Changed on the device side; the store must be reloaded
    pub reloaded: PadSet,
    /// Slider group settings changed
    pub settings: bool,
}

impl ConfigChanged {
    pub const fn edited(pads: PadSet) -> Self {
        Self {
            edited: pads,
            reloaded: PadSet::EMPTY,
            settings: false,
        }
    }

    pub const fn reloaded(pads: PadSet) -> Self {
        Self {
            edited: PadSet::EMPTY,
            reloaded: pads,
            settings: false,
        }
    }

    pub const fn settings_changed() -> Self {
        Self {
            edited: PadSet::EMPTY,
            reloaded: PadSet::EMPTY,
            settings: true,
        }
    }

    /// Every pad touched by the event
    pub const fn pads(self) -> PadSet {
        self.edited.union(self.reloaded)
    }

    pub const fn is_empty(self) -> bool {
        self.edited.is_empty() && self.reloaded.is_empty() && !self.settings
    }

    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            edited: self.edited.union(other.edited),
            reloaded: self.reloaded.union(other.reloaded),
            settings: self.settings || other.settings,
        }
    }
}

/// Bounded queue of change events
///
/// Posting never fails: once the queue is full, new events are merged into
/// the newest queued one.
pub struct ChangeChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<ConfigChanged, SIZE>>>,
}

impl<const SIZE: usize> ChangeChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for posting events
    pub const fn sender(&self) -> ChangeSender<'_, SIZE> {
        ChangeSender { channel: self }
    }

    /// Handle for draining events
    pub const fn receiver(&self) -> ChangeReceiver<'_, SIZE> {
        ChangeReceiver { channel: self }
    }

    pub fn post(&self, event: ConfigChanged) {
        if event.is_empty() {
            return;
        }
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            if let Err(event) = queue.push_back(event) {
                #[cfg(feature = "esp32-log")]
                println!("[ChangeChannel.post] queue full, merging {:?}", event);
                if let Some(newest) = queue.back_mut() {
                    *newest = newest.merge(event);
                }
            }
        });
    }

    /// Take every queued event merged into one
    pub fn drain(&self) -> Option<ConfigChanged> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let mut merged: Option<ConfigChanged> = None;
            while let Some(event) = queue.pop_front() {
                merged = Some(merged.map_or(event, |acc| acc.merge(event)));
            }
            merged
        })
    }

    pub fn is_empty(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().is_empty())
    }
}

impl<const SIZE: usize> Default for ChangeChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting handle for a [`ChangeChannel`]
///
/// Handed to the transport so it can report configuration changes made on the
/// device side.
#[derive(Clone, Copy)]
pub struct ChangeSender<'a, const SIZE: usize> {
    channel: &'a ChangeChannel<SIZE>,
}

impl<const SIZE: usize> ChangeSender<'_, SIZE> {
    pub fn post(&self, event: ConfigChanged) {
        self.channel.post(event);
    }

    /// Report that a pad's configuration changed on the device
    pub fn device_changed(&self, pad: PadIndex) {
        self.post(ConfigChanged::reloaded(PadSet::single(pad)));
    }
}

/// Draining handle for a [`ChangeChannel`]
#[derive(Clone, Copy)]
pub struct ChangeReceiver<'a, const SIZE: usize> {
    channel: &'a ChangeChannel<SIZE>,
}

impl<const SIZE: usize> ChangeReceiver<'_, SIZE> {
    pub fn drain(&self) -> Option<ConfigChanged> {
        self.channel.drain()
    }
}
