//! Rate-limited floor light writes
//!
//! The pad configuration is not applied to the floor strip in real time, so
//! floor colors are also pushed as a raw light command. Dragging the color
//! slider produces a stream of edits. The batcher arms a deadline on the first
//! edit and lets later edits replace the pending colors without moving it.
//! This bounds the write rate and still sends the settled color.
//!
//! # Usage
//!
//! ```ignore
//! batcher.request_color_write(PadIndex::P1, color, now);
//!
//! // Later, from the timer or main loop
//! if let Some(command) = batcher.poll(now) {
//!     device.write_raw_light_command(command.as_bytes())?;
//! }
//! ```

use embassy_time::{Duration, Instant};

use crate::color::{Rgb, rgb_to_bytes};
use crate::pad::{PAD_COUNT, PadIndex};

/// Number of strip segments per pad; each repeats the pad color
pub const LIGHT_STRIP_SEGMENTS: usize = 44;

/// Size of one raw light command
pub const LIGHT_COMMAND_LEN: usize = PAD_COUNT * LIGHT_STRIP_SEGMENTS * 3;

/// Delay between the first queued color and the write
pub const DEFAULT_LIGHT_DELAY: Duration = Duration::from_millis(33);

/// Raw floor light command covering both pads
///
/// Pad-major, each pad is `LIGHT_STRIP_SEGMENTS` repeated `[r, g, b]` triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightCommand([u8; LIGHT_COMMAND_LEN]);

impl LightCommand {
    pub fn new(colors: [Rgb; PAD_COUNT]) -> Self {
        let mut bytes = [0; LIGHT_COMMAND_LEN];
        for (pad_bytes, color) in bytes.chunks_exact_mut(LIGHT_STRIP_SEGMENTS * 3).zip(colors) {
            let triple = rgb_to_bytes(color);
            for segment in pad_bytes.chunks_exact_mut(3) {
                segment.copy_from_slice(&triple);
            }
        }
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Color sent to one strip segment of a pad
    pub fn segment_color(&self, pad: PadIndex, segment: usize) -> Rgb {
        let start = (pad.index() * LIGHT_STRIP_SEGMENTS + segment) * 3;
        Rgb::new(self.0[start], self.0[start + 1], self.0[start + 2])
    }
}

/// Coalesces floor color edits into delayed light commands
#[derive(Debug, Clone)]
pub struct LightCommandBatcher {
    colors: [Rgb; PAD_COUNT],
    deadline: Option<Instant>,
    delay: Duration,
}

impl Default for LightCommandBatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl LightCommandBatcher {
    /// Create a batcher with [`DEFAULT_LIGHT_DELAY`]
    pub const fn new() -> Self {
        Self::with_delay(DEFAULT_LIGHT_DELAY)
    }

    pub const fn with_delay(delay: Duration) -> Self {
        Self {
            colors: [Rgb { r: 0, g: 0, b: 0 }; PAD_COUNT],
            deadline: None,
            delay,
        }
    }

    /// Queue a color for one pad
    ///
    /// Arms the deadline if nothing is pending. A pending write keeps its
    /// deadline and sends the newest colors.
    pub fn request_color_write(&mut self, pad: PadIndex, color: Rgb, now: Instant) {
        self.colors[pad.index()] = color;
        if self.deadline.is_none() {
            self.deadline = Some(now + self.delay);
        }
    }

    /// Record a pad's committed color without scheduling a write
    pub fn set_known_color(&mut self, pad: PadIndex, color: Rgb) {
        self.colors[pad.index()] = color;
    }

    pub const fn known_color(&self, pad: PadIndex) -> Rgb {
        self.colors[pad as usize]
    }

    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending write is due
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Take the pending command once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<LightCommand> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        Some(LightCommand::new(self.colors))
    }
}
