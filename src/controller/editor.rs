// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-shot hooks for external value pickers.
//!
//! A picker UI (brightness slider, color wheel) is opened with the current
//! value and a hook. When the user commits a value the picker consumes the
//! hook, which issues the matching verified command on the device. The
//! library does not manage the picker's lifecycle; dropping a hook without
//! using it simply cancels the edit.

use std::fmt;

use crate::command::LightCommand;
use crate::state::DeviceStatus;
use crate::types::{Brightness, ColorTone, RgbColor};

pub(crate) type Dispatch = Box<dyn FnOnce(LightCommand) + Send + 'static>;

/// Hook a brightness picker calls once with the chosen value.
pub struct BrightnessChosen {
    dispatch: Dispatch,
}

impl BrightnessChosen {
    pub(crate) fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Commits the chosen brightness.
    pub fn choose(self, value: Brightness) {
        (self.dispatch)(LightCommand::Brightness(value));
    }
}

impl fmt::Debug for BrightnessChosen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrightnessChosen").finish_non_exhaustive()
    }
}

/// Hook a color picker calls once with either an RGB color or a white tone.
pub struct ColorChosen {
    dispatch: Dispatch,
}

impl ColorChosen {
    pub(crate) fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Commits an RGB color.
    pub fn rgb(self, color: RgbColor) {
        (self.dispatch)(LightCommand::Rgb(color));
    }

    /// Commits a white tone.
    pub fn tone(self, tone: ColorTone) {
        (self.dispatch)(LightCommand::Tone(tone));
    }
}

impl fmt::Debug for ColorChosen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorChosen").finish_non_exhaustive()
    }
}

/// External brightness editor.
pub trait BrightnessPicker {
    /// Opens the editor at `current` (unknown if `None`).
    fn open(&self, current: Option<Brightness>, on_chosen: BrightnessChosen);
}

/// External color editor.
pub trait ColorPicker {
    /// Opens the editor on the held status (unknown if `None`).
    fn open(&self, current: Option<DeviceStatus>, on_chosen: ColorChosen);
}
