//! What the UI shows for a slider, computed from a pad configuration.

use crate::config::{PANEL_COUNT, PadConfig, SENSORS_PER_PANEL, SensorTechnology};
use crate::error::{Error, Result};
use crate::settings::SensorGroupSettings;
use crate::threshold::{
    DecodedThreshold, MAX_SENSORS, PanelAndSensor, SensorSet, SliderKind, ThresholdDefinition,
    ThresholdGroupResolver, ThresholdRange, decode, definition, normalized_level,
};

/// Display state of a threshold slider
#[derive(Debug, Clone, PartialEq)]
pub struct SliderState {
    pub kind: SliderKind,
    /// Whether the slider can be edited. An empty custom set or a switched-off
    /// inner/outer group makes it inactive.
    pub active: bool,
    pub definition: ThresholdDefinition,
    /// Value of the first controlled sensor
    pub value: DecodedThreshold,
    /// Sensors the slider writes to
    pub controlled: SensorSet,
    /// Every sensor the slider covers, including ones another slider took over
    pub covered: SensorSet,
}

impl SliderState {
    pub fn new(kind: SliderKind, config: &PadConfig, groups: &SensorGroupSettings) -> Self {
        let resolver = ThresholdGroupResolver::new(groups, config.technology);
        let has_all_panels = config.has_all_panels();
        let controlled = resolver.resolve(kind, has_all_panels, false);
        let covered = resolver.resolve(kind, has_all_panels, true);

        let (low, high) = controlled.first().map_or((0, 0), |first| {
            config.panels[usize::from(first.panel)].raw_threshold(config.technology, first.sensor)
        });

        Self {
            kind,
            active: resolver.is_active(kind),
            definition: definition(config.technology),
            value: decode(low, high, config.is_new_gen()),
            controlled,
            covered,
        }
    }

    /// Threshold marks on the level meter. A disabled threshold sits at the top.
    pub fn bar_thresholds(&self) -> (f32, f32) {
        match self.value {
            DecodedThreshold::Disabled => (1.0, 1.0),
            DecodedThreshold::Range(range) => (
                self.definition.bar_position(range.lower),
                self.definition.bar_position(range.upper),
            ),
        }
    }

    /// Value the slider shows
    ///
    /// Fails with [`Error::InvalidGroup`] when the slider controls no sensors,
    /// and with [`Error::MalformedLegacyThreshold`] when the sensor is switched
    /// off by legacy firmware.
    pub fn range(&self) -> Result<ThresholdRange> {
        if !self.active || self.controlled.is_empty() {
            return Err(Error::InvalidGroup);
        }
        self.value.range()
    }

    pub fn highlights(&self) -> SensorHighlights {
        SensorHighlights::new(&self.controlled, &self.covered)
    }
}

/// How a sensor is drawn in a slider's panel icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Off,
    /// Covered by the slider but taken over by another one
    Dim,
    /// Written by the slider
    Bright,
}

/// Per-sensor highlight of a slider's panel icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorHighlights([[Highlight; SENSORS_PER_PANEL]; PANEL_COUNT]);

impl SensorHighlights {
    /// `controlled` wins over `dim` for a sensor present in both
    pub fn new(controlled: &SensorSet, dim: &SensorSet) -> Self {
        let mut highlights = [[Highlight::Off; SENSORS_PER_PANEL]; PANEL_COUNT];
        for sensor in dim.iter() {
            highlights[usize::from(sensor.panel)][usize::from(sensor.sensor)] = Highlight::Dim;
        }
        for sensor in controlled.iter() {
            highlights[usize::from(sensor.panel)][usize::from(sensor.sensor)] = Highlight::Bright;
        }
        Self(highlights)
    }

    /// Highlight of a sensor. Sensors that do not exist are `Off`.
    pub fn get(&self, sensor: PanelAndSensor) -> Highlight {
        self.0
            .get(usize::from(sensor.panel))
            .and_then(|panel| panel.get(usize::from(sensor.sensor)))
            .copied()
            .unwrap_or_default()
    }

    /// Brightly highlighted sensors in panel-major order
    #[allow(clippy::cast_possible_truncation)]
    pub fn bright(&self) -> impl Iterator<Item = PanelAndSensor> + '_ {
        (0..PANEL_COUNT as u8).flat_map(move |panel| {
            (0..SENSORS_PER_PANEL as u8)
                .map(move |sensor| PanelAndSensor { panel, sensor })
                .filter(|sensor| self.get(*sensor) == Highlight::Bright)
        })
    }
}

/// Live sensor readings of one pad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorTestData {
    /// Raw level per sensor, panel-major
    pub sensor_level: [i16; MAX_SENSORS],
    /// Whether the panel reported a reading for the sensor
    pub sensor_valid: [bool; MAX_SENSORS],
    /// Bit `p` is set while panel `p` is pressed
    pub inputs: u16,
}

impl Default for SensorTestData {
    fn default() -> Self {
        Self {
            sensor_level: [0; MAX_SENSORS],
            sensor_valid: [false; MAX_SENSORS],
            inputs: 0,
        }
    }
}

impl SensorTestData {
    pub const fn has_sensor_valid(&self, sensor: PanelAndSensor) -> bool {
        self.sensor_valid[sensor.flat_index()]
    }

    pub const fn level(&self, sensor: PanelAndSensor) -> i16 {
        self.sensor_level[sensor.flat_index()]
    }

    pub const fn panel_pressed(&self, panel: u8) -> bool {
        self.inputs & (1 << panel) != 0
    }
}

/// Highlighted sensor with the highest live reading
///
/// Ties go to the later sensor in panel-major order. Readings below -1 never
/// qualify.
// TODO: panel 0 and sensor 0 never qualify here, which also hides the meter on
// load-cell pads; decide whether the meter should track them.
pub fn highest_active_sensor(
    highlights: &SensorHighlights,
    data: &SensorTestData,
) -> Option<PanelAndSensor> {
    let mut highest: Option<PanelAndSensor> = None;
    let mut best = -1;
    for sensor in highlights.bright() {
        if !data.has_sensor_valid(sensor) {
            continue;
        }
        let level = data.level(sensor);
        if level >= best {
            highest = Some(sensor);
            best = level;
        }
    }
    highest.filter(|sensor| sensor.panel > 0 && sensor.sensor > 0)
}

/// Level meter contents next to a slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelReading {
    pub sensor: PanelAndSensor,
    /// Normalized level, `0.0..=1.0`
    pub value: f32,
    pub panel_pressed: bool,
}

impl LevelReading {
    /// Meter reading for a slider, or `None` when the meter is hidden
    pub fn read(
        state: &SliderState,
        data: &SensorTestData,
        technology: SensorTechnology,
    ) -> Option<Self> {
        let sensor = highest_active_sensor(&state.highlights(), data)?;
        Some(Self {
            sensor,
            value: normalized_level(data.level(sensor), technology),
            panel_pressed: data.panel_pressed(sensor.panel),
        })
    }
}
