//! Slider membership
//!
//! Sliders overlap: an enabled inner/outer group takes its sensors away from
//! the panel sliders, and the custom set takes its sensors away from every
//! other slider. Priority, highest first:
//!
//! 1. custom sensors (when non-empty)
//! 2. inner and outer sensors (when their setting is on)
//! 3. panel, cardinal and corner sliders

use crate::config::{PANEL_COUNT, SENSORS_PER_PANEL, SensorTechnology};
use crate::settings::SensorGroupSettings;
use crate::threshold::{PanelAndSensor, SensorSet, SliderKind};

const CARDINAL_PANELS: [u8; 4] = [1, 3, 5, 7];
const CORNER_PANELS: [u8; 4] = [0, 2, 6, 8];

/// Sensors facing the center panel
const INNER_SENSORS: [PanelAndSensor; 4] = [
    PanelAndSensor { panel: 1, sensor: 3 },
    PanelAndSensor { panel: 3, sensor: 1 },
    PanelAndSensor { panel: 5, sensor: 0 },
    PanelAndSensor { panel: 7, sensor: 2 },
];

/// Sensors facing away from the center panel
const OUTER_SENSORS: [PanelAndSensor; 4] = [
    PanelAndSensor { panel: 1, sensor: 2 },
    PanelAndSensor { panel: 3, sensor: 0 },
    PanelAndSensor { panel: 5, sensor: 1 },
    PanelAndSensor { panel: 7, sensor: 3 },
];

const fn is_corner(panel: u8) -> bool {
    matches!(panel, 0 | 2 | 6 | 8)
}

#[allow(clippy::cast_possible_truncation)]
fn all_sensors_of(panels: &[u8]) -> SensorSet {
    panels
        .iter()
        .flat_map(|panel| {
            (0..SENSORS_PER_PANEL as u8).map(move |sensor| PanelAndSensor {
                panel: *panel,
                sensor,
            })
        })
        .collect()
}

/// Resolves a slider to the sensors it controls
pub struct ThresholdGroupResolver<'a> {
    groups: &'a SensorGroupSettings,
    technology: SensorTechnology,
}

impl<'a> ThresholdGroupResolver<'a> {
    pub const fn new(groups: &'a SensorGroupSettings, technology: SensorTechnology) -> Self {
        Self { groups, technology }
    }

    /// Sensors controlled by `kind`
    ///
    /// `has_all_panels` is false when the corner panels are disabled; corner
    /// sliders then control nothing. With `include_overridden` the result also
    /// holds sensors claimed by a higher-priority slider. Use that only for
    /// display, never for writes.
    ///
    /// An inactive slider controls nothing, but still covers its sensors with
    /// `include_overridden`.
    ///
    /// Load-cell pads have one threshold per panel, so every sensor index in the
    /// result is 0 and each panel appears once.
    pub fn resolve(
        &self,
        kind: SliderKind,
        has_all_panels: bool,
        include_overridden: bool,
    ) -> SensorSet {
        if !include_overridden && !self.is_active(kind) {
            return SensorSet::new();
        }
        let mut sensors = self.base_sensors(kind, has_all_panels);
        if !include_overridden {
            sensors.remove_all(&self.claimed_above(kind));
        }
        match self.technology {
            SensorTechnology::Fsr => sensors,
            SensorTechnology::LoadCell => sensors.by_panel(),
        }
    }

    /// Whether the slider takes part in editing at all
    ///
    /// An empty custom set leaves the custom slider inactive.
    pub fn is_active(&self, kind: SliderKind) -> bool {
        match kind {
            SliderKind::CustomSensors => !self.groups.custom.is_empty(),
            other => other
                .group()
                .is_none_or(|group| self.groups.is_group_enabled(group)),
        }
    }

    fn base_sensors(&self, kind: SliderKind, has_all_panels: bool) -> SensorSet {
        match kind {
            SliderKind::Panel(panel) if usize::from(panel) >= PANEL_COUNT => SensorSet::new(),
            SliderKind::Panel(panel) if is_corner(panel) && !has_all_panels => SensorSet::new(),
            SliderKind::Panel(panel) => all_sensors_of(&[panel]),
            SliderKind::Cardinal => all_sensors_of(&CARDINAL_PANELS),
            SliderKind::Corner if has_all_panels => all_sensors_of(&CORNER_PANELS),
            SliderKind::Corner => SensorSet::new(),
            SliderKind::InnerSensors => INNER_SENSORS.into_iter().collect(),
            SliderKind::OuterSensors => OUTER_SENSORS.into_iter().collect(),
            SliderKind::CustomSensors => self.groups.custom.clone(),
        }
    }

    /// Sensors held by sliders that outrank `kind`
    fn claimed_above(&self, kind: SliderKind) -> SensorSet {
        let mut claimed = SensorSet::new();
        if matches!(kind, SliderKind::CustomSensors) {
            return claimed;
        }
        claimed.extend_from(&self.groups.custom);
        if kind.group().is_some() {
            return claimed;
        }
        if self.groups.use_inner {
            claimed.extend(INNER_SENSORS);
        }
        if self.groups.use_outer {
            claimed.extend(OUTER_SENSORS);
        }
        claimed
    }
}
