//! Enabled-sensor mask packing
//!
//! The firmware stores which sensors are enabled as five bytes, one nibble per
//! panel:
//!
//! ```text
//! byte:    0       1       2       3       4
//!        hi  lo  hi  lo  hi  lo  hi  lo  hi  lo
//! panel:  0   1   2   3   4   5   6   7   8   (reserved)
//! ```
//!
//! Each nibble holds one bit per sensor. A panel is enabled iff its nibble is
//! nonzero.

use super::PANEL_COUNT;

/// Nibble with every sensor of a panel enabled
const ALL_SENSORS: u8 = 0x0F;

/// Packed enabled-sensor mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorMask(pub [u8; 5]);

/// Nibble-per-panel view of a [`SensorMask`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnpackedSensorMask {
    /// Low four bits hold the sensor bits of each panel
    pub panels: [u8; PANEL_COUNT],
    /// Unused low nibble of the last byte, carried through untouched
    pub reserved: u8,
}

impl SensorMask {
    /// Every sensor of every panel enabled
    pub const ALL_PANELS: Self = Self([0xFF, 0xFF, 0xFF, 0xFF, 0xF0]);

    pub const fn from_bytes(bytes: [u8; 5]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(self) -> [u8; 5] {
        self.0
    }

    /// Byte index and bit shift of a panel's nibble
    const fn location(panel: usize) -> (usize, u32) {
        let shift = if panel.is_multiple_of(2) { 4 } else { 0 };
        (panel / 2, shift)
    }

    /// Sensor bits of one panel
    pub const fn panel_sensors(self, panel: u8) -> u8 {
        let (byte, shift) = Self::location(panel as usize);
        (self.0[byte] >> shift) & 0x0F
    }

    pub const fn panel_enabled(self, panel: u8) -> bool {
        self.panel_sensors(panel) != 0
    }

    /// Replace the sensor bits of one panel
    pub fn set_panel_sensors(&mut self, panel: u8, sensors: u8) {
        let (byte, shift) = Self::location(usize::from(panel));
        self.0[byte] = (self.0[byte] & !(0x0Fu8 << shift)) | ((sensors & 0x0F) << shift);
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn enabled_panels(self) -> [bool; PANEL_COUNT] {
        core::array::from_fn(|panel| self.panel_enabled(panel as u8))
    }

    /// Enable or disable whole panels
    ///
    /// Panels that stay enabled keep their sensor bits. Newly enabled panels get
    /// all four sensors.
    #[must_use]
    pub fn with_enabled_panels(self, enabled: [bool; PANEL_COUNT]) -> Self {
        let mut unpacked = self.unpack();
        for (sensors, enabled) in unpacked.panels.iter_mut().zip(enabled) {
            *sensors = match (enabled, *sensors) {
                (false, _) => 0,
                (true, 0) => ALL_SENSORS,
                (true, current) => current,
            };
        }
        Self::pack(unpacked)
    }

    /// One bit per enabled panel, panel 0 in bit 0
    #[allow(clippy::cast_possible_truncation)]
    pub fn panel_bits(self) -> u16 {
        (0..PANEL_COUNT as u8)
            .filter(|panel| self.panel_enabled(*panel))
            .fold(0u16, |mask, panel| mask | (1u16 << panel))
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn unpack(self) -> UnpackedSensorMask {
        UnpackedSensorMask {
            panels: core::array::from_fn(|panel| self.panel_sensors(panel as u8)),
            reserved: self.0[4] & 0x0F,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn pack(unpacked: UnpackedSensorMask) -> Self {
        let mut mask = Self([0, 0, 0, 0, unpacked.reserved & 0x0F]);
        for (panel, sensors) in unpacked.panels.into_iter().enumerate() {
            mask.set_panel_sensors(panel as u8, sensors);
        }
        mask
    }
}
