// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for smart-light control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so a command can never carry an out-of-range value to the server.
//!
//! # Types
//!
//! - [`DeviceId`] - Opaque server-assigned device identifier
//! - [`Brightness`] - Brightness level (0-100%)
//! - [`ColorTone`] - White tone, warm (0) to cool (100)
//! - [`RgbColor`] - 8-bit RGB color

mod brightness;
mod color_tone;
mod device_id;
mod rgb_color;

pub use brightness::Brightness;
pub use color_tone::ColorTone;
pub use device_id::DeviceId;
pub use rgb_color::RgbColor;
