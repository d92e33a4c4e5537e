// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mutating light commands and how to recognize their effect.
//!
//! Each [`LightCommand`] knows which [`DeviceApi`] call carries it and which
//! predicate a returned [`DeviceStatus`] must satisfy for the command to
//! count as confirmed.
//!
//! # Examples
//!
//! ```
//! use lightdeck::command::LightCommand;
//! use lightdeck::state::DeviceStatus;
//! use lightdeck::types::Brightness;
//!
//! let cmd = LightCommand::Brightness(Brightness::new(40).unwrap());
//!
//! let stale = DeviceStatus::online(true).with_brightness(Brightness::new(90).unwrap());
//! let fresh = DeviceStatus::online(true).with_brightness(Brightness::new(40).unwrap());
//!
//! assert!(!cmd.is_confirmed_by(&stale));
//! assert!(cmd.is_confirmed_by(&fresh));
//! ```

use std::fmt;

use crate::error::ApiError;
use crate::protocol::DeviceApi;
use crate::state::DeviceStatus;
use crate::types::{Brightness, ColorTone, DeviceId, RgbColor};

/// A command that changes a light's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCommand {
    /// Switch the light on (`true`) or off (`false`).
    Power(bool),
    /// Set the brightness.
    Brightness(Brightness),
    /// Switch to RGB mode with this color.
    Rgb(RgbColor),
    /// Switch to tone mode with this white tone.
    Tone(ColorTone),
}

impl LightCommand {
    /// Returns `true` if `status` shows this command as applied.
    ///
    /// Only the field the command targets is compared.
    #[must_use]
    pub fn is_confirmed_by(&self, status: &DeviceStatus) -> bool {
        match *self {
            Self::Power(on) => status.is_on == on,
            Self::Brightness(level) => status.brightness == level,
            Self::Rgb(rgb) => status.rgb == rgb,
            Self::Tone(tone) => status.color_tone == tone,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Power(_) => "set_on_off",
            Self::Brightness(_) => "set_brightness",
            Self::Rgb(_) => "set_rgb",
            Self::Tone(_) => "set_tone",
        }
    }

    /// Issues the command through `api`.
    ///
    /// # Errors
    ///
    /// Returns the API's error if the server rejects the command.
    pub async fn send<A: DeviceApi>(&self, api: &A, id: &DeviceId) -> Result<DeviceStatus, ApiError> {
        match *self {
            Self::Power(on) => api.set_on_off(id, on).await,
            Self::Brightness(level) => api.set_brightness(id, level).await,
            Self::Rgb(rgb) => api.set_rgb(id, rgb).await,
            Self::Tone(tone) => api.set_tone(id, tone).await,
        }
    }
}

impl fmt::Display for LightCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power(true) => f.write_str("power on"),
            Self::Power(false) => f.write_str("power off"),
            Self::Brightness(level) => write!(f, "brightness {level}"),
            Self::Rgb(rgb) => write!(f, "color {rgb}"),
            Self::Tone(tone) => write!(f, "{tone}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_predicate() {
        assert!(LightCommand::Power(true).is_confirmed_by(&DeviceStatus::online(true)));
        assert!(!LightCommand::Power(true).is_confirmed_by(&DeviceStatus::online(false)));
    }

    #[test]
    fn rgb_predicate_compares_every_channel() {
        let status = DeviceStatus::online(true).with_rgb(RgbColor::new(10, 20, 30));
        assert!(LightCommand::Rgb(RgbColor::new(10, 20, 30)).is_confirmed_by(&status));
        assert!(!LightCommand::Rgb(RgbColor::new(10, 20, 31)).is_confirmed_by(&status));
        assert!(!LightCommand::Rgb(RgbColor::new(11, 20, 30)).is_confirmed_by(&status));
    }

    #[test]
    fn tone_predicate_ignores_other_fields() {
        let tone = ColorTone::new(70).unwrap();
        let status = DeviceStatus::online(false).with_tone(tone);
        assert!(LightCommand::Tone(tone).is_confirmed_by(&status));
        assert!(!LightCommand::Tone(ColorTone::WARMEST).is_confirmed_by(&status));
    }

    #[test]
    fn display() {
        assert_eq!(LightCommand::Power(false).to_string(), "power off");
        assert_eq!(
            LightCommand::Brightness(Brightness::new(5).unwrap()).to_string(),
            "brightness 5%"
        );
        assert_eq!(
            LightCommand::Rgb(RgbColor::new(255, 0, 0)).to_string(),
            "color #FF0000"
        );
    }
}
