// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device data model.
//!
//! [`DeviceInfo`] is a roster entry and [`DeviceStatus`] a point-in-time
//! snapshot of what a device reports. Both mirror the light server's JSON
//! shapes.
//!
//! # Examples
//!
//! ```
//! use lightdeck::state::{DeviceInfo, DeviceStatus};
//!
//! let info = DeviceInfo::new("42", "Kitchen").with_status(DeviceStatus::online(true));
//! assert!(info.online_status().is_some());
//! ```

mod device_info;
mod device_status;

pub use device_info::DeviceInfo;
pub use device_status::DeviceStatus;
