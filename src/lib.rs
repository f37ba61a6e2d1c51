#![no_std]

pub mod color;
pub mod config;
pub mod error;
pub mod events;
pub mod light_batcher;
pub mod pad;
pub mod settings;
pub mod sync;
pub mod threshold;
pub mod view;

pub use config::{
    ConfigStore, FirmwareGeneration, PANEL_COUNT, PadConfig, PanelSetting, SENSORS_PER_PANEL,
    SensorMask, SensorTechnology,
};
pub use error::{Error, Result};
pub use events::{ChangeChannel, ChangeReceiver, ChangeSender, ConfigChanged};
pub use light_batcher::{LightCommand, LightCommandBatcher};
pub use pad::{ActivePadSelection, PAD_COUNT, PadIndex, PadSet};
pub use settings::{SensorGroupSettings, SettingKey, SettingsStore};
pub use sync::{ColorTarget, ConfigObserver, ConfigSync, EditOutcome, EditReport, SyncConfig};
pub use threshold::{
    DecodedThreshold, PanelAndSensor, SensorGroup, SensorSet, SliderKind, ThresholdDefinition,
    ThresholdGroupResolver,
};
pub use view::{Highlight, LevelReading, SensorHighlights, SensorTestData, SliderState};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract pad transport trait
///
/// Implement this trait to talk to the pads over USB HID or any other link.
/// The sync controller is generic over this trait.
pub trait PadDevice {
    /// Read the current configuration of a pad
    fn read_config(&mut self, pad: PadIndex) -> Result<PadConfig>;

    /// Write a configuration to a pad
    ///
    /// Returns [`Error::NotConnected`] if the pad dropped off.
    fn write_config(&mut self, pad: PadIndex, config: &PadConfig) -> Result<()>;

    /// Send a raw light command, see [`LightCommand`] for the layout
    fn write_raw_light_command(&mut self, command: &[u8]) -> Result<()>;

    /// Pads currently attached
    fn connected_pads(&self) -> PadSet;
}
