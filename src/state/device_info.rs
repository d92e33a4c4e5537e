// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roster entry describing one device.

use serde::{Deserialize, Serialize};

use crate::types::DeviceId;

use super::DeviceStatus;

/// Identity record for a device, as returned by a roster fetch.
///
/// A fresh `DeviceInfo` replaces the old one on every roster fetch; the
/// fields are never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Stable device identifier.
    pub id: DeviceId,
    /// User-assigned display name.
    pub name: String,
    /// Status captured at roster-fetch time, if any.
    #[serde(default)]
    pub status: Option<DeviceStatus>,
}

impl DeviceInfo {
    /// Creates a roster entry.
    #[must_use]
    pub fn new(id: impl Into<DeviceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: None,
        }
    }

    /// Sets the status captured with the roster.
    #[must_use]
    pub fn with_status(mut self, status: DeviceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the roster status if it reports the device as online.
    ///
    /// An offline roster status is not trusted as final, so this returns
    /// `None` for it as well.
    #[must_use]
    pub fn online_status(&self) -> Option<DeviceStatus> {
        self.status.filter(|s| s.is_online)
    }
}
