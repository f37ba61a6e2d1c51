//! Conversion between firmware threshold bytes and slider values
//!
//! Raw bytes map to slider values one-to-one for both sensor technologies. Only
//! the slider domain differs, see [`definition`]. Firmware before generation 4
//! used a low threshold of `0xFF` to switch a sensor off.

use crate::config::SensorTechnology;
use crate::error::{Error, Result};

/// Low threshold value meaning "disabled" on legacy firmware
pub const LEGACY_DISABLED: u8 = 0xFF;

/// Full-scale FSR sample after dropping its two extra bits
const FSR_LEVEL_MAX: f32 = 250.0;

/// Full-scale load-cell sample
const LOAD_CELL_LEVEL_MAX: f32 = 500.0;

/// Slider domain for one sensor technology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdDefinition {
    /// Lowest value the slider offers
    pub user_min: u8,
    /// Highest value the slider offers
    pub user_max: u8,
    /// Smallest allowed gap between the low and high threshold
    pub min_range: u8,
    /// Sensor level shown at the bottom of the level meter
    pub real_min: u16,
    /// Sensor level shown at the top of the level meter
    pub real_max: u16,
}

const FSR_DEFINITION: ThresholdDefinition = ThresholdDefinition {
    user_min: 5,
    user_max: 250,
    min_range: 5,
    real_min: 0,
    real_max: 250,
};

const LOAD_CELL_DEFINITION: ThresholdDefinition = ThresholdDefinition {
    user_min: 20,
    user_max: 200,
    min_range: 10,
    real_min: 0,
    real_max: 500,
};

/// Slider domain for `technology`
pub const fn definition(technology: SensorTechnology) -> ThresholdDefinition {
    match technology {
        SensorTechnology::Fsr => FSR_DEFINITION,
        SensorTechnology::LoadCell => LOAD_CELL_DEFINITION,
    }
}

impl ThresholdDefinition {
    /// Clamp a pair into the slider domain, keeping at least `min_range`
    /// between the two values
    pub fn constrain(&self, lower: u8, upper: u8) -> ThresholdRange {
        let lower = lower.clamp(self.user_min, self.user_max - self.min_range);
        let upper = upper.clamp(lower + self.min_range, self.user_max);
        ThresholdRange { lower, upper }
    }

    /// Position of a threshold on the level meter, `0.0..=1.0` within the real domain
    pub fn bar_position(&self, value: u8) -> f32 {
        let span = f32::from(self.real_max - self.real_min);
        (f32::from(value) - f32::from(self.real_min)) / span
    }
}

/// Low/high threshold pair in slider units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdRange {
    pub lower: u8,
    pub upper: u8,
}

/// Low/high threshold pair as stored by the firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawThreshold {
    pub low: u8,
    pub high: u8,
}

/// A threshold read from the firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedThreshold {
    /// Legacy firmware switched this sensor off
    Disabled,
    Range(ThresholdRange),
}

impl DecodedThreshold {
    pub const fn is_disabled(self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Numeric range, or an error for a disabled threshold
    pub const fn range(self) -> Result<ThresholdRange> {
        match self {
            Self::Range(range) => Ok(range),
            Self::Disabled => Err(Error::MalformedLegacyThreshold),
        }
    }
}

/// Interpret a raw threshold pair
pub const fn decode(raw_low: u8, raw_high: u8, is_new_gen: bool) -> DecodedThreshold {
    if !is_new_gen && raw_low == LEGACY_DISABLED {
        return DecodedThreshold::Disabled;
    }
    DecodedThreshold::Range(ThresholdRange {
        lower: raw_low,
        upper: raw_high,
    })
}

/// Raw bytes for a slider pair. New writes never use the legacy sentinel.
pub const fn encode(lower: u8, upper: u8) -> RawThreshold {
    RawThreshold {
        low: lower,
        high: upper,
    }
}

/// Scale a live sensor sample into `0.0..=1.0` for the level meter
///
/// FSR samples carry two more bits than load-cell samples and are shifted down
/// first. Negative samples read as zero.
pub fn normalized_level(sample: i16, technology: SensorTechnology) -> f32 {
    let sample = sample.max(0);
    let (sample, max) = match technology {
        SensorTechnology::Fsr => (sample >> 2, FSR_LEVEL_MAX),
        SensorTechnology::LoadCell => (sample, LOAD_CELL_LEVEL_MAX),
    };
    (f32::from(sample) / max).clamp(0.0, 1.0)
}
