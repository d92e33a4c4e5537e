// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `lightdeck` - A client library for networked smart lights.
//!
//! This library lists the lights known to a light server, shows what each
//! one reports, and issues commands whose effect may reach the device only
//! after the server has answered.
//!
//! # Supported Features
//!
//! - **Roster**: Load all devices, one controller per device
//! - **Power control**: On, off, toggle
//! - **Light control**: Brightness, RGB color, white color tone
//! - **Verified commands**: Every command is checked against the returned
//!   status and re-checked once after a delay if it did not show yet
//! - **Color preview**: Swatch color for RGB and tone modes
//! - **Rendering seam**: Plug any display in through [`DisplaySurface`](event::DisplaySurface)
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lightdeck::{Brightness, DeviceListController, HttpConfig, NullSurface};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(HttpConfig::new("192.168.1.20").with_port(8080).into_client()?);
//!     let mut list = DeviceListController::new(api, Arc::new(NullSurface));
//!     list.load().await?;
//!
//!     for device in list.devices() {
//!         let outcome = device.set_brightness(Brightness::new(60)?).await?;
//!         println!("{}: {outcome:?}", device.name());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Verified Commands
//!
//! A command is confirmed immediately when the server's response already
//! shows it. Otherwise the controller keeps its previous status, waits
//! [`ControllerConfig::verify_delay`] and refreshes once, adopting whatever
//! that refresh reports. See [`controller`] for the full protocol.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lightdeck::{
//!     CommandOutcome, DeviceController, DeviceInfo, HttpClient, NullSurface, RgbColor,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = Arc::new(HttpClient::new("192.168.1.20:8080")?);
//! let lamp = DeviceController::new(
//!     DeviceInfo::new("12", "Desk lamp"),
//!     api,
//!     Arc::new(NullSurface),
//!     Default::default(),
//! );
//!
//! match lamp.set_color_rgb(RgbColor::from_hex("#FF8800")?).await? {
//!     CommandOutcome::Confirmed(status) => println!("now {:?}", status.rgb),
//!     CommandOutcome::Unconfirmed { recheck_after } => {
//!         println!("checking again in {recheck_after:?}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod controller;
pub mod error;
pub mod event;
pub mod manager;
pub mod preview;
pub mod protocol;
pub mod state;
pub mod types;

pub use command::LightCommand;
pub use controller::{
    BrightnessChosen, BrightnessPicker, ColorChosen, ColorPicker, CommandMode, CommandOutcome,
    ControllerConfig, ControllerPhase, DeviceController,
};
pub use error::{ApiError, Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{DeviceView, DisplaySurface, EventBus, NullSurface, RenderEvent, RosterView};
pub use manager::DeviceListController;
pub use preview::{ToneTable, WarmCoolTable, preview_color};
pub use protocol::DeviceApi;
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use state::{DeviceInfo, DeviceStatus};
pub use types::{Brightness, ColorTone, DeviceId, RgbColor};
