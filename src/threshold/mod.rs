//! Threshold sliders and the sensors they control.

pub mod codec;
mod resolver;

pub use codec::{
    DecodedThreshold, RawThreshold, ThresholdDefinition, ThresholdRange, decode, definition,
    encode, normalized_level,
};
pub use resolver::ThresholdGroupResolver;

use heapless::Vec;

use crate::config::{PANEL_COUNT, SENSORS_PER_PANEL};
use crate::settings::SettingKey;

/// Capacity of a [`SensorSet`]: every sensor of every panel
pub const MAX_SENSORS: usize = PANEL_COUNT * SENSORS_PER_PANEL;

/// One physical sensing point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelAndSensor {
    pub panel: u8,
    pub sensor: u8,
}

impl PanelAndSensor {
    /// Returns `None` if either index is out of range
    pub const fn new(panel: u8, sensor: u8) -> Option<Self> {
        if (panel as usize) < PANEL_COUNT && (sensor as usize) < SENSORS_PER_PANEL {
            Some(Self { panel, sensor })
        } else {
            None
        }
    }

    /// Whether both indices are in range
    pub const fn is_valid(self) -> bool {
        Self::new(self.panel, self.sensor).is_some()
    }

    /// Index into per-sensor arrays laid out panel-major
    pub const fn flat_index(self) -> usize {
        self.panel as usize * SENSORS_PER_PANEL + self.sensor as usize
    }
}

/// Unordered set of sensors with no duplicates
#[derive(Debug, Clone, Default)]
pub struct SensorSet {
    items: Vec<PanelAndSensor, MAX_SENSORS>,
}

impl SensorSet {
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a sensor. Returns `false` if it was already present or does not
    /// exist on a pad.
    pub fn insert(&mut self, sensor: PanelAndSensor) -> bool {
        if !sensor.is_valid() || self.contains(sensor) {
            return false;
        }
        // Capacity covers every distinct sensor, so a new one always fits.
        self.items.push(sensor).is_ok()
    }

    pub fn remove(&mut self, sensor: PanelAndSensor) -> bool {
        let Some(position) = self.items.iter().position(|item| *item == sensor) else {
            return false;
        };
        self.items.swap_remove(position);
        true
    }

    pub fn contains(&self, sensor: PanelAndSensor) -> bool {
        self.items.contains(&sensor)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PanelAndSensor> + '_ {
        self.items.iter().copied()
    }

    /// First sensor in insertion order, used to read a slider's value
    pub fn first(&self) -> Option<PanelAndSensor> {
        self.items.first().copied()
    }

    /// Add every sensor of `other`
    pub fn extend_from(&mut self, other: &Self) {
        for sensor in other.iter() {
            self.insert(sensor);
        }
    }

    /// Remove every sensor of `other`
    pub fn remove_all(&mut self, other: &Self) {
        self.items.retain(|item| !other.contains(*item));
    }

    /// Collapse to one entry per panel with sensor 0
    #[must_use]
    pub fn by_panel(&self) -> Self {
        self.iter()
            .map(|item| PanelAndSensor {
                panel: item.panel,
                sensor: 0,
            })
            .collect()
    }
}

impl PartialEq for SensorSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl Eq for SensorSet {}

impl Extend<PanelAndSensor> for SensorSet {
    fn extend<I: IntoIterator<Item = PanelAndSensor>>(&mut self, iter: I) {
        for sensor in iter {
            self.insert(sensor);
        }
    }
}

impl FromIterator<PanelAndSensor> for SensorSet {
    fn from_iter<I: IntoIterator<Item = PanelAndSensor>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Sensor groups that can be switched on and off by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorGroup {
    /// Sensors facing the center panel
    Inner,
    /// Sensors facing away from the center panel
    Outer,
}

impl SensorGroup {
    /// Setting holding whether the group is in use
    pub const fn setting_key(self) -> SettingKey {
        match self {
            Self::Inner => SettingKey::UseInnerSensorThresholds,
            Self::Outer => SettingKey::UseOuterSensorThresholds,
        }
    }
}

/// Threshold slider identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderKind {
    /// Every sensor of one panel
    Panel(u8),
    /// Up, left, right and down panels together
    Cardinal,
    /// The four corner panels together
    Corner,
    InnerSensors,
    OuterSensors,
    /// Sensors picked by the user
    CustomSensors,
}

impl SliderKind {
    /// Every slider, lowest priority first
    pub const ALL: [Self; 14] = [
        Self::Panel(0),
        Self::Panel(1),
        Self::Panel(2),
        Self::Panel(3),
        Self::Panel(4),
        Self::Panel(5),
        Self::Panel(6),
        Self::Panel(7),
        Self::Panel(8),
        Self::Cardinal,
        Self::Corner,
        Self::InnerSensors,
        Self::OuterSensors,
        Self::CustomSensors,
    ];

    /// Switchable group behind this slider, if any
    pub const fn group(self) -> Option<SensorGroup> {
        match self {
            Self::InnerSensors => Some(SensorGroup::Inner),
            Self::OuterSensors => Some(SensorGroup::Outer),
            _ => None,
        }
    }
}
