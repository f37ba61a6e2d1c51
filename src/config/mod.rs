//! In-memory mirror of a pad's configuration block.

mod sensor_mask;
mod store;

pub use sensor_mask::{SensorMask, UnpackedSensorMask};
pub use store::ConfigStore;

use crate::color::{Rgb, rgb_from_bytes, rgb_to_bytes, scale_color, unscale_color};

/// Panels on one pad
pub const PANEL_COUNT: usize = 9;

/// Pressure sensors on one FSR panel
pub const SENSORS_PER_PANEL: usize = 4;

/// The center panel
pub const CENTER_PANEL: u8 = 4;

/// Index of the upward-facing sensor within a panel
pub const SENSOR_UP: u8 = 2;

/// Auto-light mask value meaning every panel lights when pressed
pub const LIGHT_ALL_PANELS_MASK: u16 = 0xFFFF;

/// High threshold that keeps a sensor from ever triggering
pub const SENSOR_DISABLED_THRESHOLD: u8 = 255;

/// Sensor technology fitted to a pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorTechnology {
    /// Force-sensing resistors, one threshold pair per sensor
    #[default]
    Fsr,
    /// Load cells, one threshold pair per panel
    LoadCell,
}

impl SensorTechnology {
    pub const fn is_fsr(self) -> bool {
        matches!(self, Self::Fsr)
    }
}

/// Master firmware version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FirmwareGeneration(pub u8);

impl FirmwareGeneration {
    /// First generation without the legacy `0xFF` threshold sentinel
    pub const NEW_GEN: Self = Self(4);

    pub const fn is_new_gen(self) -> bool {
        self.0 >= Self::NEW_GEN.0
    }
}

impl Default for FirmwareGeneration {
    fn default() -> Self {
        Self::NEW_GEN
    }
}

/// Threshold settings of one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSetting {
    pub fsr_low_threshold: [u8; SENSORS_PER_PANEL],
    pub fsr_high_threshold: [u8; SENSORS_PER_PANEL],
    pub load_cell_low_threshold: u8,
    pub load_cell_high_threshold: u8,
}

impl Default for PanelSetting {
    fn default() -> Self {
        Self {
            fsr_low_threshold: [180; SENSORS_PER_PANEL],
            fsr_high_threshold: [190; SENSORS_PER_PANEL],
            load_cell_low_threshold: 33,
            load_cell_high_threshold: 42,
        }
    }
}

impl PanelSetting {
    /// Raw `(low, high)` pair for a sensor. Load cells ignore `sensor`.
    pub const fn raw_threshold(&self, technology: SensorTechnology, sensor: u8) -> (u8, u8) {
        match technology {
            SensorTechnology::Fsr => (
                self.fsr_low_threshold[sensor as usize],
                self.fsr_high_threshold[sensor as usize],
            ),
            SensorTechnology::LoadCell => {
                (self.load_cell_low_threshold, self.load_cell_high_threshold)
            }
        }
    }

    /// Store a raw `(low, high)` pair for a sensor. Load cells ignore `sensor`.
    pub fn set_raw_threshold(
        &mut self,
        technology: SensorTechnology,
        sensor: u8,
        low: u8,
        high: u8,
    ) {
        match technology {
            SensorTechnology::Fsr => {
                self.fsr_low_threshold[sensor as usize] = low;
                self.fsr_high_threshold[sensor as usize] = high;
            }
            SensorTechnology::LoadCell => {
                self.load_cell_low_threshold = low;
                self.load_cell_high_threshold = high;
            }
        }
    }
}

/// Configuration of one pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadConfig {
    pub panels: [PanelSetting; PANEL_COUNT],
    pub enabled_sensors: SensorMask,
    /// Bit `p` lights panel `p` automatically when pressed
    pub auto_light_panel_mask: u16,
    /// Per-panel RGB, stored in the reduced device range
    pub step_color: [u8; PANEL_COUNT * 3],
    /// Floor strip RGB, stored as-is
    pub platform_strip_color: [u8; 3],
    pub generation: FirmwareGeneration,
    pub technology: SensorTechnology,
}

impl Default for PadConfig {
    fn default() -> Self {
        let enabled_sensors = SensorMask::ALL_PANELS;
        let mut config = Self {
            panels: [PanelSetting::default(); PANEL_COUNT],
            enabled_sensors,
            auto_light_panel_mask: 0,
            step_color: [170; PANEL_COUNT * 3],
            platform_strip_color: [255; 3],
            generation: FirmwareGeneration::default(),
            technology: SensorTechnology::default(),
        };
        config.refresh_auto_light_panel_mask(true);
        config
    }
}

impl PadConfig {
    pub const fn is_fsr(&self) -> bool {
        self.technology.is_fsr()
    }

    pub const fn is_new_gen(&self) -> bool {
        self.generation.is_new_gen()
    }

    /// Whether every panel, corners included, is enabled
    pub fn has_all_panels(&self) -> bool {
        self.enabled_sensors.enabled_panels().iter().all(|enabled| *enabled)
    }

    pub const fn light_all_panels(&self) -> bool {
        self.auto_light_panel_mask == LIGHT_ALL_PANELS_MASK
    }

    /// Switch between lighting every panel and lighting only enabled panels
    pub fn set_light_all_panels(&mut self, enabled: bool) {
        if enabled {
            self.auto_light_panel_mask = LIGHT_ALL_PANELS_MASK;
        } else {
            self.refresh_auto_light_panel_mask(true);
        }
    }

    /// Re-derive the auto-light mask from the enabled panels
    ///
    /// Leaves the mask alone in light-all-panels mode unless `force` is set.
    pub fn refresh_auto_light_panel_mask(&mut self, force: bool) {
        if self.light_all_panels() && !force {
            return;
        }
        self.auto_light_panel_mask = self.enabled_sensors.panel_bits();
    }

    /// Panel color as shown in the UI
    pub fn step_color(&self, panel: u8) -> Rgb {
        let start = usize::from(panel) * 3;
        unscale_color([
            self.step_color[start],
            self.step_color[start + 1],
            self.step_color[start + 2],
        ])
    }

    /// Store a UI panel color in the reduced device range
    pub fn set_step_color(&mut self, panel: u8, color: Rgb) {
        let start = usize::from(panel) * 3;
        self.step_color[start..start + 3].copy_from_slice(&scale_color(color));
    }

    pub const fn platform_strip_color(&self) -> Rgb {
        rgb_from_bytes(self.platform_strip_color)
    }

    pub const fn set_platform_strip_color(&mut self, color: Rgb) {
        self.platform_strip_color = rgb_to_bytes(color);
    }

    /// Whether the upward-facing sensor of the center panel can trigger
    pub const fn center_top_sensor_enabled(&self) -> bool {
        self.panels[CENTER_PANEL as usize].fsr_high_threshold[SENSOR_UP as usize]
            < SENSOR_DISABLED_THRESHOLD
    }

    /// Disable the center panel's top sensor by raising its high threshold out
    /// of reach, or enable it by syncing it with the panel's first sensor.
    pub const fn set_center_top_sensor(&mut self, enabled: bool) {
        let panel = &mut self.panels[CENTER_PANEL as usize];
        panel.fsr_high_threshold[SENSOR_UP as usize] = if enabled {
            panel.fsr_high_threshold[0]
        } else {
            SENSOR_DISABLED_THRESHOLD
        };
    }
}
