//! RGBA color type with parsing and hex encoding.
//!
//! The preference file carries colors as text; this module supplies the
//! parse function the decoder needs. Accepted forms are hex (`#rgb`,
//! `#rgba`, `#rrggbb`, `#rrggbbaa`), functional `rgb()`/`rgba()` notation,
//! and a small set of named colors (the CSS basic names plus common grays).

use serde::{Deserialize, Serialize};

/// A color with four floating-point channels, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a fully opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Build a color from 8-bit channels, normalized to `0.0..=1.0`.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parse a color string.
    ///
    /// Returns `None` for anything that is not a recognized hex form,
    /// `rgb()`/`rgba()` notation, or a known color name. Never panics.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Some(body) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            return Self::parse_channels(body, true);
        }
        if let Some(body) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            return Self::parse_channels(body, false);
        }
        Self::named(s)
    }

    /// Encode as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    ///
    /// Channels are rounded to the nearest 8-bit value, so parse → encode →
    /// parse round trips exactly at 8-bit granularity.
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Convert to 8-bit channels, clamping out-of-range values.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            // Shorthand digits expand by repetition: #f00 == #ff0000
            3 | 4 => {
                let mut ch = [255u8; 4];
                for (i, c) in hex.chars().enumerate() {
                    ch[i] = c.to_digit(16)? as u8 * 17;
                }
                Some(Self::from_rgba8(ch[0], ch[1], ch[2], ch[3]))
            }
            6 | 8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = if hex.len() == 8 {
                    u8::from_str_radix(&hex[6..8], 16).ok()?
                } else {
                    255
                };
                Some(Self::from_rgba8(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Parse the comma-separated body of `rgb(...)` or `rgba(...)`.
    ///
    /// Color channels are integers 0-255; the alpha channel is a float in
    /// `0.0..=1.0`, as in the CSS notation.
    fn parse_channels(body: &str, with_alpha: bool) -> Option<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != if with_alpha { 4 } else { 3 } {
            return None;
        }
        let mut ch = [0u8; 3];
        for (slot, part) in ch.iter_mut().zip(&parts) {
            let v = part.parse::<u16>().ok()?;
            if v > 255 {
                return None;
            }
            *slot = v as u8;
        }
        let a = if with_alpha {
            let a = parts[3].parse::<f32>().ok()?;
            if !(0.0..=1.0).contains(&a) {
                return None;
            }
            a
        } else {
            1.0
        };
        let mut color = Self::from_rgb8(ch[0], ch[1], ch[2]);
        color.a = a;
        Some(color)
    }

    fn named(name: &str) -> Option<Self> {
        let rgb = match name.to_ascii_lowercase().as_str() {
            "black" => [0x00, 0x00, 0x00],
            "silver" => [0xc0, 0xc0, 0xc0],
            "gray" | "grey" => [0x80, 0x80, 0x80],
            "white" => [0xff, 0xff, 0xff],
            "maroon" => [0x80, 0x00, 0x00],
            "red" => [0xff, 0x00, 0x00],
            "purple" => [0x80, 0x00, 0x80],
            "fuchsia" | "magenta" => [0xff, 0x00, 0xff],
            "green" => [0x00, 0x80, 0x00],
            "lime" => [0x00, 0xff, 0x00],
            "olive" => [0x80, 0x80, 0x00],
            "yellow" => [0xff, 0xff, 0x00],
            "navy" => [0x00, 0x00, 0x80],
            "blue" => [0x00, 0x00, 0xff],
            "teal" => [0x00, 0x80, 0x80],
            "aqua" | "cyan" => [0x00, 0xff, 0xff],
            "orange" => [0xff, 0xa5, 0x00],
            "transparent" => return Some(Self::from_rgba8(0, 0, 0, 0)),
            _ => return None,
        };
        Some(Self::from_rgb8(rgb[0], rgb[1], rgb[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_full() {
        let c = Rgba::parse("#ff8000").expect("6-digit hex should parse");
        assert_eq!(c.to_rgba8(), [255, 128, 0, 255]);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_parse_hex_with_alpha() {
        let c = Rgba::parse("#11223344").expect("8-digit hex should parse");
        assert_eq!(c.to_rgba8(), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_parse_hex_shorthand() {
        assert_eq!(Rgba::parse("#f00"), Some(Rgba::from_rgb8(255, 0, 0)));
        assert_eq!(Rgba::parse("#f008"), Some(Rgba::from_rgba8(255, 0, 0, 0x88)));
    }

    #[test]
    fn test_parse_hex_case_insensitive() {
        assert_eq!(Rgba::parse("#FF00AA"), Rgba::parse("#ff00aa"));
    }

    #[test]
    fn test_parse_functional() {
        assert_eq!(Rgba::parse("rgb(255, 0, 10)"), Some(Rgba::from_rgb8(255, 0, 10)));
        let c = Rgba::parse("rgba(0, 0, 0, 0.5)").expect("rgba() should parse");
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Rgba::parse("white"), Some(Rgba::from_rgb8(255, 255, 255)));
        assert_eq!(Rgba::parse("Lime"), Some(Rgba::from_rgb8(0, 255, 0)));
        assert_eq!(Rgba::parse("grey"), Rgba::parse("gray"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgba::parse("").is_none());
        assert!(Rgba::parse("not-a-color").is_none());
        assert!(Rgba::parse("#12345").is_none());
        assert!(Rgba::parse("#gggggg").is_none());
        assert!(Rgba::parse("rgb(300, 0, 0)").is_none());
        assert!(Rgba::parse("rgba(0, 0, 0, 1.5)").is_none());
    }

    #[test]
    fn test_hex_round_trip() {
        for input in ["#000000", "#ffffff", "#4fc3f7", "#11223344"] {
            let c = Rgba::parse(input).expect("hex should parse");
            assert_eq!(c.to_hex_string(), input, "round trip for {input}");
        }
    }
}
