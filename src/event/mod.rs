// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rendering seam between controllers and whatever draws them.
//!
//! Controllers never draw anything. They call a [`DisplaySurface`] with a
//! [`DeviceView`] whenever a device's observable state changes, and with a
//! [`RosterView`] whenever the roster does. [`EventBus`] is a ready-made
//! surface that republishes those calls on a tokio broadcast channel.
//!
//! # Examples
//!
//! ```
//! use lightdeck::event::{DeviceView, DisplaySurface, RosterView};
//!
//! struct Printer;
//!
//! impl DisplaySurface for Printer {
//!     fn render_device(&self, view: &DeviceView) {
//!         println!("{}: loading={} error={:?}", view.name, view.loading, view.error);
//!     }
//!
//!     fn render_roster(&self, roster: &RosterView) {
//!         println!("roster: {roster:?}");
//!     }
//! }
//! ```

mod event_bus;
mod render_event;

pub use event_bus::EventBus;
pub use render_event::{DeviceView, RenderEvent, RosterView};

/// Receives render notifications from controllers.
///
/// Implementations must not block; they are called from within controller
/// operations. A device is always rendered in a [`RosterView::Loaded`]
/// before its first [`DeviceView`], and never again once its controller is
/// dropped.
pub trait DisplaySurface: Send + Sync {
    /// Draws one device.
    fn render_device(&self, view: &DeviceView);

    /// Draws the roster as a whole.
    fn render_roster(&self, roster: &RosterView);
}

/// Surface that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl DisplaySurface for NullSurface {
    fn render_device(&self, _view: &DeviceView) {}

    fn render_roster(&self, _roster: &RosterView) {}
}
