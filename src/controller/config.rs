// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::preview::{ToneTable, WarmCoolTable};

/// How a controller treats a command issued while another is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandMode {
    /// Requests run concurrently; the held status is whatever completed
    /// last. Callers are expected to disable controls while a device is
    /// loading.
    #[default]
    Concurrent,
    /// Requests of one device are queued and run one at a time, in issue
    /// order.
    Serialized,
}

/// Timing and behavior knobs shared by every controller of a roster.
///
/// # Examples
///
/// ```
/// use lightdeck::controller::{CommandMode, ControllerConfig};
/// use std::time::Duration;
///
/// let config = ControllerConfig::default()
///     .with_verify_delay(Duration::from_millis(500))
///     .with_command_mode(CommandMode::Serialized);
///
/// assert_eq!(config.verify_delay(), Duration::from_millis(500));
/// assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
/// ```
#[derive(Clone)]
pub struct ControllerConfig {
    verify_delay: Duration,
    request_timeout: Option<Duration>,
    command_mode: CommandMode,
    tone_table: Arc<dyn ToneTable>,
}

impl ControllerConfig {
    /// Delay before re-checking a command whose response did not reflect it.
    pub const DEFAULT_VERIFY_DELAY: Duration = Duration::from_millis(1000);
    /// Upper bound on any single API request.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            verify_delay: Self::DEFAULT_VERIFY_DELAY,
            request_timeout: Some(Self::DEFAULT_REQUEST_TIMEOUT),
            command_mode: CommandMode::default(),
            tone_table: Arc::new(WarmCoolTable),
        }
    }

    /// Sets the re-check delay.
    #[must_use]
    pub fn with_verify_delay(mut self, delay: Duration) -> Self {
        self.verify_delay = delay;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Lets requests run without a timeout.
    #[must_use]
    pub fn without_request_timeout(mut self) -> Self {
        self.request_timeout = None;
        self
    }

    /// Sets how overlapping commands are handled.
    #[must_use]
    pub fn with_command_mode(mut self, mode: CommandMode) -> Self {
        self.command_mode = mode;
        self
    }

    /// Sets the tone table used for color previews.
    #[must_use]
    pub fn with_tone_table(mut self, table: impl ToneTable + 'static) -> Self {
        self.tone_table = Arc::new(table);
        self
    }

    /// Returns the re-check delay.
    #[must_use]
    pub fn verify_delay(&self) -> Duration {
        self.verify_delay
    }

    /// Returns the per-request timeout, if any.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Returns the command mode.
    #[must_use]
    pub fn command_mode(&self) -> CommandMode {
        self.command_mode
    }

    /// Returns the tone table.
    #[must_use]
    pub fn tone_table(&self) -> &dyn ToneTable {
        self.tone_table.as_ref()
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("verify_delay", &self.verify_delay)
            .field("request_timeout", &self.request_timeout)
            .field("command_mode", &self.command_mode)
            .finish_non_exhaustive()
    }
}
