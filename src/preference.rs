//! Preference snapshot type and the `preferencerc` file dialect.
//!
//! The dialect is line oriented: `Name=Value` pairs, with bare lines after a
//! pair appended to its value using a `;` separator (multi-line palette
//! lists). Parsing is fail-open: a recognized field whose value does not
//! decode is logged and keeps its compiled-in default, so a parse always
//! yields a fully populated snapshot and never aborts the host process.

use crate::color::Rgba;
use crate::defaults;
use crate::error::PreferenceError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of palette slots; terminal-style ANSI colors 0-15.
pub const PALETTE_SIZE: usize = 16;

/// One immutable, fully populated preference snapshot.
///
/// Every field always carries a value, user-supplied or default; consumers
/// never see an "unset" state. Snapshots are constructed fresh on every
/// parse and handed over by value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferenceSet {
    #[serde(default = "crate::defaults::background")]
    pub background: Rgba,
    #[serde(default = "crate::defaults::foreground")]
    pub foreground: Rgba,
    #[serde(default = "crate::defaults::cursor")]
    pub cursor: Rgba,
    #[serde(default = "crate::defaults::bold")]
    pub bold: Rgba,
    #[serde(default = "crate::defaults::palette")]
    pub palette: [Rgba; PALETTE_SIZE],
    #[serde(default = "crate::defaults::opacity")]
    pub opacity: f32,
    #[serde(default = "crate::defaults::font_family")]
    pub font_family: String,
    /// Raw textual form, e.g. "12" or "12pt".
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: String,
}

impl Default for PreferenceSet {
    fn default() -> Self {
        Self {
            background: defaults::background(),
            foreground: defaults::foreground(),
            cursor: defaults::cursor(),
            bold: defaults::bold(),
            palette: defaults::palette(),
            opacity: defaults::opacity(),
            font_family: defaults::font_family(),
            font_size: defaults::font_size(),
        }
    }
}

impl PreferenceSet {
    /// Parse preference file contents into a snapshot.
    ///
    /// Fields absent from `source`, and fields whose values fail validation,
    /// keep their defaults; unknown names are ignored for forward
    /// compatibility. Empty, truncated, or decoration-only input yields the
    /// all-default snapshot.
    pub fn parse(source: &str) -> Self {
        let mut preferences = Self::default();
        let mut pending: Option<(String, String)> = None;

        for raw in source.lines() {
            let line = trim_decoration(raw);
            if line.is_empty() {
                continue;
            }
            if let Some((name, value)) = line.split_once('=') {
                if let Some((name, value)) = pending.take() {
                    preferences.apply_logged(&name, &value);
                }
                pending = Some((name.trim().to_string(), value.trim().to_string()));
            } else if let Some((_, value)) = pending.as_mut() {
                // Continuation line, appended with the palette separator.
                value.push(';');
                value.push_str(line);
            }
            // A bare line with no open pair is ignored.
        }

        if let Some((name, value)) = pending {
            preferences.apply_logged(&name, &value);
        }

        preferences
    }

    /// Read `path` and parse its contents.
    ///
    /// A missing or unreadable file is an `Io` error; parsing itself cannot
    /// fail.
    pub fn load(path: &Path) -> Result<Self, PreferenceError> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// Render the snapshot back into the file dialect.
    ///
    /// Re-parsing the output reproduces the snapshot exactly at 8-bit color
    /// granularity. This subsystem never writes the watched preference file
    /// itself; the caller owns any persistence of this string.
    pub fn to_rc_string(&self) -> String {
        let palette: Vec<String> = self.palette.iter().map(Rgba::to_hex_string).collect();
        format!(
            "ColorBackground={}\n\
             ColorForeground={}\n\
             ColorCursor={}\n\
             ColorBold={}\n\
             ColorPalette={}\n\
             Opacity={}\n\
             FontFamily={}\n\
             FontSize={}\n",
            self.background.to_hex_string(),
            self.foreground.to_hex_string(),
            self.cursor.to_hex_string(),
            self.bold.to_hex_string(),
            palette.join(";"),
            self.opacity,
            self.font_family,
            self.font_size,
        )
    }

    /// Get the preference file path: `<user-config-dir>/vimb/preferencerc`.
    pub fn preference_path() -> PathBuf {
        Self::preference_dir().join("preferencerc")
    }

    /// Get the preference directory path.
    pub fn preference_dir() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("vimb")
        } else {
            // Fallback if the user config directory cannot be determined
            PathBuf::from(".")
        }
    }

    fn apply_logged(&mut self, name: &str, value: &str) {
        if let Err(e) = self.apply_field(name, value) {
            log::warn!("{e}; keeping default");
        }
    }

    /// Apply one decoded `name=value` pair to the snapshot.
    ///
    /// Valid palette tokens before and after an invalid one are still
    /// applied; the error reports the first token that failed.
    fn apply_field(&mut self, name: &str, value: &str) -> Result<(), PreferenceError> {
        match name {
            "ColorForeground" => self.foreground = decode_color(name, value)?,
            "ColorBackground" => self.background = decode_color(name, value)?,
            "ColorCursor" => self.cursor = decode_color(name, value)?,
            "ColorBold" => self.bold = decode_color(name, value)?,
            "ColorPalette" => self.apply_palette(value)?,
            "Opacity" => self.opacity = decode_opacity(value)?,
            "FontFamily" => self.font_family = value.to_string(),
            "FontSize" => self.font_size = value.to_string(),
            _ => log::trace!("ignoring unknown preference `{name}`"),
        }
        Ok(())
    }

    fn apply_palette(&mut self, value: &str) -> Result<(), PreferenceError> {
        let mut first_bad: Option<PreferenceError> = None;
        let tokens = value
            .split(';')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .take(PALETTE_SIZE);
        for (slot, token) in tokens.enumerate() {
            match Rgba::parse(token) {
                Some(color) => self.palette[slot] = color,
                None => {
                    if first_bad.is_none() {
                        first_bad = Some(PreferenceError::Decode {
                            name: "ColorPalette".to_string(),
                            value: token.to_string(),
                        });
                    }
                }
            }
        }
        match first_bad {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn decode_color(name: &str, value: &str) -> Result<Rgba, PreferenceError> {
    Rgba::parse(value).ok_or_else(|| PreferenceError::Decode {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn decode_opacity(value: &str) -> Result<f32, PreferenceError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|opacity| opacity.is_finite())
        .ok_or_else(|| PreferenceError::Decode {
            name: "Opacity".to_string(),
            value: value.to_string(),
        })
}

/// Trim leading and trailing characters that are neither alphanumeric nor
/// one of `= # ( ) ;`. This strips whitespace and decoration without
/// touching the interior of values.
fn trim_decoration(line: &str) -> &str {
    line.trim_matches(|c: char| !(c.is_alphanumeric() || "=#();".contains(c)))
}
