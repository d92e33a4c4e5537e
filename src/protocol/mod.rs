// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device API seam and its HTTP implementation.
//!
//! Controllers only talk to the light server through the [`DeviceApi`]
//! trait. Every operation resolves to a fresh [`DeviceStatus`] (or the
//! roster) or fails with an opaque [`ApiError`].
//!
//! # Implementations
//!
//! - [`HttpClient`]: JSON over HTTP against the light server (feature `http`)
//!
//! Tests and alternative transports implement the trait directly.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::future::Future;

use crate::error::ApiError;
use crate::state::{DeviceInfo, DeviceStatus};
use crate::types::{Brightness, ColorTone, DeviceId, RgbColor};

/// Operations offered by the light server.
///
/// Mutating operations return the status snapshot the server captured
/// after issuing the command. That snapshot may predate the command taking
/// effect on the device; callers must not assume it reflects the request.
///
/// The returned futures are `Send` so controllers can run them on spawned
/// tasks.
pub trait DeviceApi: Send + Sync + 'static {
    /// Lists every device on the account, in display order.
    fn list_devices(&self) -> impl Future<Output = Result<Vec<DeviceInfo>, ApiError>> + Send;

    /// Fetches the current status of one device.
    fn get_status(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<DeviceStatus, ApiError>> + Send;

    /// Switches a device on or off.
    fn set_on_off(
        &self,
        id: &DeviceId,
        on: bool,
    ) -> impl Future<Output = Result<DeviceStatus, ApiError>> + Send;

    /// Sets a device's brightness.
    fn set_brightness(
        &self,
        id: &DeviceId,
        brightness: Brightness,
    ) -> impl Future<Output = Result<DeviceStatus, ApiError>> + Send;

    /// Switches a device to RGB mode with the given color.
    fn set_rgb(
        &self,
        id: &DeviceId,
        rgb: RgbColor,
    ) -> impl Future<Output = Result<DeviceStatus, ApiError>> + Send;

    /// Switches a device to tone mode with the given white tone.
    fn set_tone(
        &self,
        id: &DeviceId,
        tone: ColorTone,
    ) -> impl Future<Output = Result<DeviceStatus, ApiError>> + Send;
}
