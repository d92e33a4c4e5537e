// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color swatch derivation for a device status.
//!
//! A light in RGB mode previews as its literal color. A light in tone mode
//! previews through a [`ToneTable`], which maps the white tone scale to a
//! displayable color.

use crate::state::DeviceStatus;
use crate::types::{ColorTone, RgbColor};

/// Maps a white tone to the color used to display it.
pub trait ToneTable: Send + Sync {
    /// Returns the display color for `tone`.
    fn color_for(&self, tone: ColorTone) -> RgbColor;
}

impl<F> ToneTable for F
where
    F: Fn(ColorTone) -> RgbColor + Send + Sync,
{
    fn color_for(&self, tone: ColorTone) -> RgbColor {
        self(tone)
    }
}

/// Default tone table: a linear blend from warm white to cool white.
///
/// ```
/// use lightdeck::preview::{ToneTable, WarmCoolTable};
/// use lightdeck::types::ColorTone;
///
/// let table = WarmCoolTable;
/// assert_eq!(table.color_for(ColorTone::WARMEST), WarmCoolTable::WARM);
/// assert_eq!(table.color_for(ColorTone::COOLEST), WarmCoolTable::COOL);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WarmCoolTable;

impl WarmCoolTable {
    /// Color of tone 0 (about 2700 K).
    pub const WARM: RgbColor = RgbColor::new(0xFF, 0x93, 0x2C);
    /// Color of tone 100 (about 6500 K).
    pub const COOL: RgbColor = RgbColor::new(0xC9, 0xE2, 0xFF);
}

impl ToneTable for WarmCoolTable {
    fn color_for(&self, tone: ColorTone) -> RgbColor {
        let t = u32::from(tone.value());
        let blend = |warm: u8, cool: u8| -> u8 {
            let mixed = (u32::from(warm) * (100 - t) + u32::from(cool) * t + 50) / 100;
            // both inputs are u8 and the weights sum to 100
            u8::try_from(mixed).unwrap_or(u8::MAX)
        };
        RgbColor::new(
            blend(Self::WARM.r, Self::COOL.r),
            blend(Self::WARM.g, Self::COOL.g),
            blend(Self::WARM.b, Self::COOL.b),
        )
    }
}

/// Returns the swatch color for a status.
///
/// Uses the literal RGB triple when `use_rgb` is set, otherwise the tone
/// table entry for `color_tone`; a leftover `rgb` value is ignored in tone
/// mode.
///
/// ```
/// use lightdeck::preview::{preview_color, WarmCoolTable};
/// use lightdeck::state::DeviceStatus;
/// use lightdeck::types::RgbColor;
///
/// let status = DeviceStatus::online(true).with_rgb(RgbColor::new(255, 0, 0));
/// assert_eq!(preview_color(&status, &WarmCoolTable).to_hex_with_hash(), "#FF0000");
/// ```
#[must_use]
pub fn preview_color(status: &DeviceStatus, tones: &dyn ToneTable) -> RgbColor {
    if status.use_rgb {
        status.rgb
    } else {
        tones.color_for(status.color_tone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_mode_uses_literal_color() {
        let status = DeviceStatus::online(true).with_rgb(RgbColor::new(255, 0, 0));
        assert_eq!(preview_color(&status, &WarmCoolTable), RgbColor::new(255, 0, 0));
    }

    #[test]
    fn tone_mode_ignores_stale_rgb() {
        let tone = ColorTone::new(100).unwrap();
        let status = DeviceStatus::online(true)
            .with_rgb(RgbColor::new(12, 34, 56))
            .with_tone(tone);

        assert_eq!(
            preview_color(&status, &WarmCoolTable),
            WarmCoolTable.color_for(tone)
        );
    }

    #[test]
    fn warm_cool_table_blends_linearly() {
        let mid = WarmCoolTable.color_for(ColorTone::new(50).unwrap());
        assert_eq!(mid, RgbColor::new(228, 187, 150));
    }

    #[test]
    fn closures_act_as_tone_tables() {
        let table = |_tone: ColorTone| RgbColor::black();
        let status = DeviceStatus::online(true).with_tone(ColorTone::WARMEST);
        assert_eq!(preview_color(&status, &table), RgbColor::black());
    }
}
