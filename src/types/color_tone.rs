// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! White color tone on the device's warm-to-cool scale.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// White tone of a light, 0 (warmest) to 100 (coolest).
///
/// Only meaningful while the device is in tone mode (`use_rgb == false`).
///
/// # Examples
///
/// ```
/// use lightdeck::types::ColorTone;
///
/// let tone = ColorTone::new(30).unwrap();
/// assert_eq!(tone.value(), 30);
/// assert!(ColorTone::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct ColorTone(u8);

impl ColorTone {
    /// Warmest tone.
    pub const WARMEST: Self = Self(0);

    /// Coolest tone.
    pub const COOLEST: Self = Self(100);

    /// Creates a new color tone.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw tone value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ColorTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tone {}", self.0)
    }
}

impl TryFrom<u8> for ColorTone {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColorTone> for u8 {
    fn from(value: ColorTone) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_bounds() {
        assert_eq!(ColorTone::new(0).unwrap(), ColorTone::WARMEST);
        assert_eq!(ColorTone::new(100).unwrap(), ColorTone::COOLEST);
        assert!(ColorTone::new(200).is_err());
    }

    #[test]
    fn tone_ordering() {
        assert!(ColorTone::WARMEST < ColorTone::COOLEST);
    }
}
