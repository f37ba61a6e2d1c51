//! Device color scaling
//!
//! Panel LEDs take 8-bit channels, but values above 170 draw more power without
//! getting noticeably brighter. Step colors are stored on the device scaled into
//! `0..=170` and scaled back up when read.

use super::Rgb;

/// Ratio between the stored channel value and the UI channel value
pub const LIGHTS_SCALE_FACTOR: f32 = 0.666_666;

/// Scale a UI channel value into the device range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_channel(value: u8) -> u8 {
    libm::roundf(f32::from(value) * LIGHTS_SCALE_FACTOR) as u8
}

/// Scale a stored channel value back into the UI range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unscale_channel(value: u8) -> u8 {
    libm::roundf(f32::from(value) / LIGHTS_SCALE_FACTOR).min(255.0) as u8
}

/// Scale a UI color into the `[r, g, b]` bytes stored on the device
pub fn scale_color(color: Rgb) -> [u8; 3] {
    [
        scale_channel(color.r),
        scale_channel(color.g),
        scale_channel(color.b),
    ]
}

/// Inverse of [`scale_color`]
pub fn unscale_color(stored: [u8; 3]) -> Rgb {
    Rgb {
        r: unscale_channel(stored[0]),
        g: unscale_channel(stored[1]),
        b: unscale_channel(stored[2]),
    }
}
