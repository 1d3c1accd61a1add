use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hue step between consecutive generated slice colors. The golden angle
/// keeps neighbours far apart on the wheel no matter how many slices exist.
const GOLDEN_ANGLE: f64 = 137.507_764_05;

const GENERATED_SATURATION: f64 = 0.62;
const GENERATED_VALUE: f64 = 0.88;

/// An opaque sRGB color with components in [0, 1].
///
/// Serializes as `#rrggbb`, so it can sit directly in config files next to
/// hand-picked palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected a '#rrggbb' hex color, got '{0}'")]
    Malformed(String),
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Deterministic color for a slice index. Same index, same color, which
    /// is what makes charts (and tests) reproducible across rebuilds.
    pub fn for_index(index: usize) -> Self {
        let hue = (index as f64 * GOLDEN_ANGLE).rem_euclid(360.0);
        let rgb = Srgb::from_color(Hsv::new_srgb(hue, GENERATED_SATURATION, GENERATED_VALUE));
        Self::new(rgb.red, rgb.green, rgb.blue)
    }

    pub fn components(&self) -> (f64, f64, f64) {
        (self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        )
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6)
            .ok_or_else(|| ColorParseError::Malformed(s.to_string()))?;

        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map(|b| f64::from(b) / 255.0)
                .map_err(|_| ColorParseError::Malformed(s.to_string()))
        };

        Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let cases = ["#fcba03", "#000000", "#ffffff", "#0377fc"];
        for hex in cases {
            let color: Color = hex.parse().unwrap();
            assert_eq!(color.to_string(), hex);
        }
    }

    #[test]
    fn test_rejects_malformed_hex() {
        for bad in ["fcba03", "#fcba0", "#fcba033", "#gggggg", ""] {
            assert!(bad.parse::<Color>().is_err(), "'{bad}' should not parse");
        }
    }

    #[test]
    fn test_generated_colors_are_deterministic() {
        for i in 0..16 {
            assert_eq!(Color::for_index(i), Color::for_index(i));
        }
    }

    #[test]
    fn test_generated_neighbours_are_distinct() {
        for i in 0..32 {
            assert_ne!(Color::for_index(i), Color::for_index(i + 1));
        }
    }

    #[test]
    fn test_serde_as_hex_string() {
        let color: Color = serde_json::from_str("\"#fcba03\"").unwrap();
        assert_eq!(color, "#fcba03".parse().unwrap());
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#fcba03\"");
    }
}
