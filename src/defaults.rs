//! Default values for the preference set.
//!
//! Each function doubles as a `#[serde(default = "crate::defaults::...")]`
//! attribute target on `PreferenceSet` fields, and together they make up the
//! complete compiled-in preference set used when no file is present.

use crate::color::Rgba;
use crate::preference::PALETTE_SIZE;

pub fn background() -> Rgba {
    Rgba::from_rgb8(0, 0, 0)
}

pub fn foreground() -> Rgba {
    Rgba::from_rgb8(255, 255, 255)
}

pub fn cursor() -> Rgba {
    Rgba::from_rgb8(255, 255, 255)
}

pub fn bold() -> Rgba {
    Rgba::from_rgb8(255, 255, 255)
}

pub fn opacity() -> f32 {
    1.0
}

pub fn font_family() -> String {
    "monospace".to_string()
}

/// Kept as text so forms like "12" and "12pt" survive unchanged.
pub fn font_size() -> String {
    "12".to_string()
}

/// The standard xterm 16-color set: ANSI colors 0-7 then their bright
/// counterparts 8-15.
pub fn palette() -> [Rgba; PALETTE_SIZE] {
    [
        Rgba::from_rgb8(0, 0, 0),       // black
        Rgba::from_rgb8(205, 0, 0),     // red
        Rgba::from_rgb8(0, 205, 0),     // green
        Rgba::from_rgb8(205, 205, 0),   // yellow
        Rgba::from_rgb8(0, 0, 238),     // blue
        Rgba::from_rgb8(205, 0, 205),   // magenta
        Rgba::from_rgb8(0, 205, 205),   // cyan
        Rgba::from_rgb8(229, 229, 229), // white
        Rgba::from_rgb8(127, 127, 127), // bright black
        Rgba::from_rgb8(255, 0, 0),     // bright red
        Rgba::from_rgb8(0, 255, 0),     // bright green
        Rgba::from_rgb8(255, 255, 0),   // bright yellow
        Rgba::from_rgb8(92, 92, 255),   // bright blue
        Rgba::from_rgb8(255, 0, 255),   // bright magenta
        Rgba::from_rgb8(0, 255, 255),   // bright cyan
        Rgba::from_rgb8(255, 255, 255), // bright white
    ]
}
