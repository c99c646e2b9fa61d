//! Color utilities for bulb materials and lights.
//!
//! Bulb colors are handled as 8-bit sRGB triples ([`LampColor`]) so that
//! interpolation results and picked colors compare exactly. Conversion into
//! Bevy's color types happens only at the point where a material or a light
//! is written.
//!
//! # Main Items
//!
//! - [`LampColor`]: 8-bit sRGB triple with hex parsing and formatting
//! - [`emissive_for`]: linear emissive value for a color at a given intensity
//!
//! # Usage
//!
//! ```rust
//! use desklamp::utils::color::LampColor;
//!
//! let warm: LampColor = "#FFDAB3".parse().unwrap();
//! assert_eq!(warm, LampColor::rgb(255, 218, 179));
//! assert_eq!(warm.to_hex(), "#FFDAB3");
//! ```

use crate::error::LampError;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with one byte per channel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LampColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl LampColor {
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_u32(packed: u32) -> Self {
        Self::rgb(
            ((packed >> 16) & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            (packed & 0xFF) as u8,
        )
    }

    #[must_use]
    pub const fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    #[must_use]
    pub const fn from_channels(channels: [u8; 3]) -> Self {
        Self::rgb(channels[0], channels[1], channels[2])
    }

    /// Formats the color as `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl FromStr for LampColor {
    type Err = LampError;

    /// Accepts `#RRGGBB`, `RRGGBB` and `0xRRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(LampError::InvalidColor(s.to_string()));
        }

        u32::from_str_radix(digits, 16)
            .map(Self::from_u32)
            .map_err(|_| LampError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for LampColor {
    type Error = LampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LampColor> for String {
    fn from(color: LampColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for LampColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<LampColor> for Color {
    fn from(color: LampColor) -> Self {
        Color::srgb_u8(color.red, color.green, color.blue)
    }
}

impl From<LampColor> for LinearRgba {
    fn from(color: LampColor) -> Self {
        Color::from(color).to_linear()
    }
}

/// Linear emissive value for `color` scaled by `intensity`.
///
/// Bevy materials carry no separate emissive intensity, so the intensity is
/// folded into the color channels. Alpha stays at 1.
#[must_use]
pub fn emissive_for(color: LampColor, intensity: f32) -> LinearRgba {
    let linear = LinearRgba::from(color);
    LinearRgba::new(
        linear.red * intensity,
        linear.green * intensity,
        linear.blue * intensity,
        1.0,
    )
}
