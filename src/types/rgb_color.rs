// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light color in RGB mode.
//!
//! The light server carries colors as a three-element array `[r, g, b]`;
//! pickers and displays use `#RRGGBB`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Color of a light in RGB mode, one byte per channel.
///
/// # Examples
///
/// ```
/// use lightdeck::types::RgbColor;
///
/// let amber: RgbColor = "#FF8000".parse().unwrap();
/// assert_eq!(amber, RgbColor::new(255, 128, 0));
/// assert_eq!(amber.r, 255);
///
/// assert_eq!(RgbColor::from_hex("0f0").unwrap().to_hex_with_hash(), "#00FF00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct RgbColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl RgbColor {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or the short `#RGB` form; the `#` is optional.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidHexColor`] for any other input.
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::InvalidHexColor(hex.to_string());
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        let [_, r, g, b] = value.to_be_bytes();

        match digits.len() {
            6 => Ok(Self::new(r, g, b)),
            3 => {
                // each nibble doubles: F -> FF
                let [_, _, hi, lo] = value.to_be_bytes();
                let expand = |n: u8| n * 0x11;
                Ok(Self::new(expand(hi & 0x0F), expand(lo >> 4), expand(lo & 0x0F)))
            }
            _ => Err(invalid()),
        }
    }

    /// Formats the color as `RRGGBB`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Formats the color as `#RRGGBB`, the form used for swatches.
    #[must_use]
    pub fn to_hex_with_hash(&self) -> String {
        format!("#{}", self.to_hex())
    }

    /// All channels at full.
    #[must_use]
    pub const fn white() -> Self {
        Self::new(u8::MAX, u8::MAX, u8::MAX)
    }

    /// All channels off.
    #[must_use]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_with_hash())
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim())
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<RgbColor> for [u8; 3] {
    fn from(color: RgbColor) -> Self {
        [color.r, color.g, color.b]
    }
}
