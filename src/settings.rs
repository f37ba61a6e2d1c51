//! Process-wide user settings that live outside the pad configuration.

use crate::threshold::{SensorGroup, SensorSet};

/// Boolean settings read by the threshold sliders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    UseInnerSensorThresholds,
    UseOuterSensorThresholds,
}

/// Persisted settings collaborator
///
/// Loaded at startup and saved on every edit. Independent of any pad.
pub trait SettingsStore {
    /// The user-picked sensor set of the custom slider
    fn custom_sensors(&self) -> SensorSet;
    fn set_custom_sensors(&mut self, sensors: &SensorSet);
    fn get_bool(&self, key: SettingKey) -> bool;
    fn set_bool(&mut self, key: SettingKey, value: bool);
}

/// Snapshot of the settings that decide slider membership
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorGroupSettings {
    pub use_inner: bool,
    pub use_outer: bool,
    pub custom: SensorSet,
}

impl SensorGroupSettings {
    pub fn load<S: SettingsStore + ?Sized>(settings: &S) -> Self {
        Self {
            use_inner: settings.get_bool(SettingKey::UseInnerSensorThresholds),
            use_outer: settings.get_bool(SettingKey::UseOuterSensorThresholds),
            custom: settings.custom_sensors(),
        }
    }

    pub const fn is_group_enabled(&self, group: SensorGroup) -> bool {
        match group {
            SensorGroup::Inner => self.use_inner,
            SensorGroup::Outer => self.use_outer,
        }
    }
}
