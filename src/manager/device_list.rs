// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roster controller.

use std::fmt;
use std::sync::Arc;

use crate::controller::{ControllerConfig, DeviceController, bounded};
use crate::error::Error;
use crate::event::{DisplaySurface, RosterView};
use crate::protocol::DeviceApi;
use crate::types::DeviceId;

/// Owner of the device roster.
///
/// The roster is either empty, fully loaded, or failed; a partial list is
/// never held. Controllers are borrowed from the list and live until the
/// next [`load`](Self::load), [`clear`](Self::clear) or until the list is
/// dropped.
pub struct DeviceListController<A: DeviceApi> {
    api: Arc<A>,
    surface: Arc<dyn DisplaySurface>,
    config: ControllerConfig,
    devices: Vec<DeviceController<A>>,
    error: Option<String>,
}

impl<A: DeviceApi> DeviceListController<A> {
    /// Creates an empty list with the default controller configuration.
    #[must_use]
    pub fn new(api: Arc<A>, surface: Arc<dyn DisplaySurface>) -> Self {
        Self {
            api,
            surface,
            config: ControllerConfig::default(),
            devices: Vec::new(),
            error: None,
        }
    }

    /// Sets the configuration handed to every controller created by
    /// subsequent loads.
    #[must_use]
    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the controller configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetches the roster and rebuilds every controller.
    ///
    /// Existing controllers are discarded first, whatever the outcome. On
    /// success [`RosterView::Loaded`] is rendered, then one controller is
    /// created per entry, in the order received, and the number of devices
    /// is returned. A surface therefore always sees a device in the roster
    /// before its first device render.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] if the roster cannot be fetched. The
    /// message is also recorded as the list error and rendered.
    pub async fn load(&mut self) -> Result<usize, Error> {
        self.surface.render_roster(&RosterView::Loading);

        let result = bounded(self.config.request_timeout(), self.api.list_devices()).await;
        self.devices.clear();

        match result {
            Ok(roster) => {
                tracing::info!(count = roster.len(), "Device roster loaded");
                self.error = None;
                self.surface.render_roster(&RosterView::Loaded(
                    roster
                        .iter()
                        .map(|info| (info.id.clone(), info.name.clone()))
                        .collect(),
                ));
                self.devices = roster
                    .into_iter()
                    .map(|info| {
                        DeviceController::new(
                            info,
                            Arc::clone(&self.api),
                            Arc::clone(&self.surface),
                            self.config.clone(),
                        )
                    })
                    .collect();
                Ok(self.devices.len())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Device roster fetch failed");
                self.error = Some(err.message().to_string());
                self.surface
                    .render_roster(&RosterView::Failed(err.message().to_string()));
                Err(Error::FetchFailed(err))
            }
        }
    }

    /// Starts a background refresh on every device.
    pub fn refresh_all(&self) {
        tracing::debug!(count = self.devices.len(), "Refreshing all devices");
        for device in &self.devices {
            device.spawn_refresh();
        }
    }

    /// Discards every controller and the list error.
    pub fn clear(&mut self) {
        self.devices.clear();
        self.error = None;
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Returns the controllers in roster order.
    #[must_use]
    pub fn devices(&self) -> &[DeviceController<A>] {
        &self.devices
    }

    /// Returns the controller for `id`, if it is in the roster.
    #[must_use]
    pub fn device(&self, id: &DeviceId) -> Option<&DeviceController<A>> {
        self.devices.iter().find(|d| d.id() == id)
    }

    /// Returns the number of devices in the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if the roster holds no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Returns the error of the last failed load.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<A: DeviceApi> fmt::Debug for DeviceListController<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceListController")
            .field("devices", &self.devices)
            .field("error", &self.error)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
