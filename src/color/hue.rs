//! Hue slider conversions
//!
//! The color picker is a single hue slider with an extra stop below the first
//! hue that selects white.

use smart_leds::hsv::hsv2rgb;

use super::{Hsv, Rgb};

/// Saturation at or below which a color is treated as unsaturated
const WHITE_MAX_SATURATION: u8 = 0;

/// Value at or above which an unsaturated color reads back as white
///
/// Scaling through the device range may not land exactly on `#FFFFFF`.
const WHITE_MIN_VALUE: u8 = 230;

/// Position of the hue slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HueSelection {
    /// The white stop at the left edge of the slider
    White,
    /// Fully saturated hue on the 0-255 color wheel
    Hue(u8),
}

/// Color produced by a hue slider position
pub fn selection_color(selection: HueSelection) -> Rgb {
    match selection {
        HueSelection::White => Rgb::new(255, 255, 255),
        HueSelection::Hue(hue) => hsv2rgb(Hsv {
            hue,
            sat: 255,
            val: 255,
        }),
    }
}

/// Slider position that best represents a stored color
pub fn hue_selection(color: Rgb) -> HueSelection {
    let hsv = rgb2hsv(color);
    if hsv.sat <= WHITE_MAX_SATURATION && hsv.val >= WHITE_MIN_VALUE {
        HueSelection::White
    } else {
        HueSelection::Hue(hsv.hue)
    }
}

/// Convert RGB to HSV with hue on a 0-255 wheel, matching `smart_leds::hsv::Hsv`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb2hsv(rgb: Rgb) -> Hsv {
    let max = rgb.r.max(rgb.g).max(rgb.b);
    let min = rgb.r.min(rgb.g).min(rgb.b);
    let delta = max - min;

    let sat = if max == 0 {
        0
    } else {
        ((u16::from(delta) * 255) / u16::from(max)) as u8
    };

    if delta == 0 {
        return Hsv {
            hue: 0,
            sat,
            val: max,
        };
    }

    // Sector offsets 0, 85 and 171 split the wheel into thirds.
    let (offset, a, b) = if max == rgb.r {
        (0i16, rgb.g, rgb.b)
    } else if max == rgb.g {
        (85, rgb.b, rgb.r)
    } else {
        (171, rgb.r, rgb.g)
    };
    let hue = offset + (43 * (i16::from(a) - i16::from(b))) / i16::from(delta);

    Hsv {
        hue: hue.rem_euclid(256) as u8,
        sat,
        val: max,
    }
}
