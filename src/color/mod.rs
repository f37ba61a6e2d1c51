//! Color types and the conversions applied between the UI and the device.

mod hue;
mod scale;

pub use hue::{HueSelection, hue_selection, rgb2hsv, selection_color};
pub use scale::{LIGHTS_SCALE_FACTOR, scale_channel, scale_color, unscale_channel, unscale_color};
use smart_leds::{RGB8, hsv::Hsv as HSV};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Read an RGB triple from a byte slice laid out as `[r, g, b]`
pub const fn rgb_from_bytes(bytes: [u8; 3]) -> Rgb {
    Rgb {
        r: bytes[0],
        g: bytes[1],
        b: bytes[2],
    }
}

/// Lay out a color as `[r, g, b]`
pub const fn rgb_to_bytes(color: Rgb) -> [u8; 3] {
    [color.r, color.g, color.b]
}
