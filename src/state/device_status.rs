// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-in-time device status snapshot.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, ColorTone, RgbColor};

/// Reported state of a light at one point in time.
///
/// When [`is_online`](Self::is_online) is `false` the device could not be
/// reached and every other field is meaningless. That is different from
/// having no status at all, which controllers represent as `None`.
///
/// # Examples
///
/// ```
/// use lightdeck::state::DeviceStatus;
/// use lightdeck::types::{Brightness, RgbColor};
///
/// let status: DeviceStatus = serde_json::from_str(
///     r#"{"is_online":true,"is_on":true,"brightness":80,
///         "use_rgb":true,"rgb":[255,0,0],"color_tone":50}"#,
/// ).unwrap();
///
/// assert!(status.is_on);
/// assert_eq!(status.brightness, Brightness::new(80).unwrap());
/// assert_eq!(status.rgb, RgbColor::new(255, 0, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// Whether the device answered at all.
    pub is_online: bool,
    /// Whether the light is switched on.
    #[serde(default)]
    pub is_on: bool,
    /// Brightness level.
    #[serde(default)]
    pub brightness: Brightness,
    /// Selects the color model: RGB when true, white tone otherwise.
    #[serde(default)]
    pub use_rgb: bool,
    /// RGB color, meaningful when `use_rgb` is set.
    #[serde(default)]
    pub rgb: RgbColor,
    /// White tone, meaningful when `use_rgb` is not set.
    #[serde(default)]
    pub color_tone: ColorTone,
}

impl DeviceStatus {
    /// Status of a device that could not be reached.
    #[must_use]
    pub fn offline() -> Self {
        Self::default()
    }

    /// Status of an online device with the given power state and default
    /// light settings.
    #[must_use]
    pub fn online(is_on: bool) -> Self {
        Self {
            is_online: true,
            is_on,
            ..Self::default()
        }
    }

    /// Returns a copy with the given brightness.
    #[must_use]
    pub fn with_brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = brightness;
        self
    }

    /// Returns a copy in RGB mode with the given color.
    #[must_use]
    pub fn with_rgb(mut self, rgb: RgbColor) -> Self {
        self.use_rgb = true;
        self.rgb = rgb;
        self
    }

    /// Returns a copy in tone mode with the given tone.
    #[must_use]
    pub fn with_tone(mut self, tone: ColorTone) -> Self {
        self.use_rgb = false;
        self.color_tone = tone;
        self
    }
}
