// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Render snapshots handed to display surfaces.

use crate::state::DeviceStatus;
use crate::types::{DeviceId, RgbColor};

/// Everything a display needs to draw one device.
///
/// Emitted on every adopted status, every recorded error and every change of
/// the loading flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceView {
    /// The device this view describes.
    pub device_id: DeviceId,
    /// Display name from the roster.
    pub name: String,
    /// Held status; `None` when nothing is known about the device.
    pub status: Option<DeviceStatus>,
    /// Error overlay, shown on top of whatever status is held.
    pub error: Option<String>,
    /// Whether a request or a scheduled re-check is outstanding.
    pub loading: bool,
    /// Swatch color derived from the held status.
    pub preview: Option<RgbColor>,
}

impl DeviceView {
    /// Returns `true` if no status is known (fetch failed or never answered).
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.status.is_none()
    }

    /// Returns `true` if the device reported itself as unreachable.
    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.status.is_some_and(|s| !s.is_online)
    }

    /// Returns the brightness label, e.g. `"75%"`, when it is meaningful.
    #[must_use]
    pub fn brightness_label(&self) -> Option<String> {
        self.status
            .filter(|s| s.is_online)
            .map(|s| s.brightness.to_string())
    }
}

/// Aggregate state of the device roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterView {
    /// A roster fetch is in flight.
    Loading,
    /// The roster was loaded; entries are `(id, name)` in display order.
    Loaded(Vec<(DeviceId, String)>),
    /// The roster fetch failed; no devices are shown.
    Failed(String),
}

/// A single render notification, as carried by the [`EventBus`](super::EventBus).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// One device's observable state changed.
    Device(DeviceView),
    /// The roster changed.
    Roster(RosterView),
}

impl RenderEvent {
    /// Returns the device ID for device events.
    #[must_use]
    pub fn device_id(&self) -> Option<&DeviceId> {
        match self {
            Self::Device(view) => Some(&view.device_id),
            Self::Roster(_) => None,
        }
    }

    /// Returns `true` if this is a roster event.
    #[must_use]
    pub fn is_roster(&self) -> bool {
        matches!(self, Self::Roster(_))
    }
}
