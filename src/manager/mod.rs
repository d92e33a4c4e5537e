// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device roster management.
//!
//! A [`DeviceListController`] fetches the roster from a
//! [`DeviceApi`](crate::protocol::DeviceApi) and owns one
//! [`DeviceController`](crate::controller::DeviceController) per device.
//! Every load replaces the whole roster; controllers from the previous load
//! are discarded together with their pending work.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lightdeck::event::EventBus;
//! use lightdeck::manager::DeviceListController;
//! use lightdeck::protocol::HttpConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(HttpConfig::new("192.168.1.20").with_port(8080).into_client()?);
//!     let bus = EventBus::new();
//!     let mut events = bus.subscribe();
//!
//!     let mut list = DeviceListController::new(api, Arc::new(bus));
//!     let count = list.load().await?;
//!     println!("{count} devices");
//!
//!     if let Some(lamp) = list.devices().first() {
//!         lamp.toggle_power().await?;
//!     }
//!
//!     while let Ok(event) = events.try_recv() {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```

mod device_list;

pub use device_list::DeviceListController;
