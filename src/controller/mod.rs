// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device state machine with verified commands.
//!
//! A [`DeviceController`] holds the last confirmed [`DeviceStatus`] of one
//! device and issues commands against a [`DeviceApi`]. The server answers a
//! command with a status snapshot that may have been captured before the
//! device applied it, so every command is verified:
//!
//! 1. The controller enters [`ControllerPhase::Pending`] and sends the command.
//! 2. If the request fails, the error is recorded and the held status is
//!    left exactly as it was.
//! 3. If the response satisfies the command's predicate, it is adopted.
//! 4. Otherwise the response is not adopted and exactly one unconditional
//!    refresh is scheduled after [`ControllerConfig::verify_delay`]. Whatever
//!    that refresh reports becomes the held status; there is no further
//!    retry.
//!
//! There is no push channel from the devices, so the single re-check is a
//! heuristic: a device slower than the delay shows the old state until the
//! next interaction.
//!
//! # Overlapping commands
//!
//! With [`CommandMode::Concurrent`] (the default) nothing stops a second
//! command while the first is pending, and the held status ends up being
//! whichever response completed last. Callers should disable controls while
//! [`DeviceController::is_loading`] is true. [`CommandMode::Serialized`]
//! queues requests per device instead.
//!
//! # Lifecycle
//!
//! Dropping a controller discards it: tasks it spawned (initial fetch,
//! scheduled re-checks, picker commands) are aborted and nothing is
//! rendered for it afterwards.

mod config;
mod editor;

pub use config::{CommandMode, ControllerConfig};
pub use editor::{BrightnessChosen, BrightnessPicker, ColorChosen, ColorPicker};

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::command::LightCommand;
use crate::error::{ApiError, Error, ProtocolError};
use crate::event::{DeviceView, DisplaySurface};
use crate::preview::preview_color;
use crate::protocol::DeviceApi;
use crate::state::{DeviceInfo, DeviceStatus};
use crate::types::{Brightness, ColorTone, DeviceId, RgbColor};

use editor::Dispatch;

/// Whether a controller has a request in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    /// No request in flight; the held status (possibly unknown) is current.
    Idle,
    /// At least one request (refresh or command) is in flight.
    Pending,
}

/// Result of a verified command that the server accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The response already reflected the command and was adopted.
    Confirmed(DeviceStatus),
    /// The response did not reflect the command yet; a single refresh runs
    /// after `recheck_after`.
    Unconfirmed {
        /// Delay before the re-check.
        recheck_after: Duration,
    },
}

impl CommandOutcome {
    /// Returns `true` if the command was confirmed immediately.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

/// Controller for one device.
///
/// See the [module documentation](self) for the command protocol.
pub struct DeviceController<A: DeviceApi> {
    shared: Arc<Shared<A>>,
}

impl<A: DeviceApi> DeviceController<A> {
    /// Creates a controller for a roster entry.
    ///
    /// If the entry carries an online status it is adopted immediately.
    /// Otherwise a refresh is started right away in the background, since an
    /// offline roster snapshot is not trusted as final.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    #[must_use]
    pub fn new(
        info: DeviceInfo,
        api: Arc<A>,
        surface: Arc<dyn DisplaySurface>,
        config: ControllerConfig,
    ) -> Self {
        let initial = info.online_status();
        let shared = Arc::new(Shared {
            info,
            api,
            surface,
            config,
            runtime: Handle::current(),
            held: RwLock::new(Held::default()),
            renders: ReentrantMutex::new(()),
            gate: tokio::sync::Mutex::new(()),
            tasks: Mutex::new(Vec::new()),
            discarded: AtomicBool::new(false),
        });

        if let Some(status) = initial {
            shared.update(|held, config| held.adopt(status, config));
        } else {
            tracing::debug!(device_id = %shared.info.id, "No online roster status, fetching");
            let pending = shared.begin();
            let task = Arc::clone(&shared);
            shared.spawn(async move {
                let _ = task.fetch_and_adopt(pending).await;
            });
        }

        Self { shared }
    }

    /// Returns the device ID.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.shared.info.id
    }

    /// Returns the device's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.shared.info.name
    }

    /// Returns the roster entry this controller was created from.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.shared.info
    }

    /// Returns the held status, `None` if unknown.
    #[must_use]
    pub fn status(&self) -> Option<DeviceStatus> {
        self.shared.held.read().status
    }

    /// Returns the error overlay, if one is shown.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.shared.held.read().error.clone()
    }

    /// Returns the swatch color of the held status.
    #[must_use]
    pub fn preview(&self) -> Option<RgbColor> {
        self.shared.held.read().preview
    }

    /// Returns whether a request is in flight.
    #[must_use]
    pub fn phase(&self) -> ControllerPhase {
        if self.shared.held.read().in_flight > 0 {
            ControllerPhase::Pending
        } else {
            ControllerPhase::Idle
        }
    }

    /// Returns `true` while a request is in flight or a re-check is
    /// scheduled.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.held.read().is_loading()
    }

    /// Returns the current render snapshot.
    #[must_use]
    pub fn view(&self) -> DeviceView {
        self.shared.view()
    }

    /// Fetches the device status and adopts it unconditionally.
    ///
    /// On failure the held status becomes unknown and the error is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] if the status request fails.
    pub async fn refresh(&self) -> Result<DeviceStatus, Error> {
        let pending = self.shared.begin();
        self.shared.fetch_and_adopt(pending).await
    }

    /// Starts a refresh in the background.
    pub fn spawn_refresh(&self) {
        let pending = self.shared.begin();
        let task = Arc::clone(&self.shared);
        self.shared.spawn(async move {
            let _ = task.fetch_and_adopt(pending).await;
        });
    }

    /// Switches the device on or off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandFailed`] if the server rejects the command.
    pub async fn set_power(&self, on: bool) -> Result<CommandOutcome, Error> {
        self.execute(LightCommand::Power(on)).await
    }

    /// Flips the held power state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatusUnknown`] without contacting the server if no
    /// status is held, or [`Error::CommandFailed`] if the server rejects the
    /// command.
    pub async fn toggle_power(&self) -> Result<CommandOutcome, Error> {
        let status = self.status().ok_or(Error::StatusUnknown)?;
        self.set_power(!status.is_on).await
    }

    /// Sets the brightness.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandFailed`] if the server rejects the command.
    pub async fn set_brightness(&self, brightness: Brightness) -> Result<CommandOutcome, Error> {
        self.execute(LightCommand::Brightness(brightness)).await
    }

    /// Switches to RGB mode with the given color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandFailed`] if the server rejects the command.
    pub async fn set_color_rgb(&self, rgb: RgbColor) -> Result<CommandOutcome, Error> {
        self.execute(LightCommand::Rgb(rgb)).await
    }

    /// Switches to tone mode with the given white tone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandFailed`] if the server rejects the command.
    pub async fn set_color_tone(&self, tone: ColorTone) -> Result<CommandOutcome, Error> {
        self.execute(LightCommand::Tone(tone)).await
    }

    /// Issues any light command with verification.
    ///
    /// Dropping the returned future before it completes abandons the
    /// request: the controller leaves `Pending` and nothing is adopted from
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandFailed`] if the server rejects the command.
    pub async fn execute(&self, command: LightCommand) -> Result<CommandOutcome, Error> {
        self.shared.run_command(command).await
    }

    /// Opens a brightness picker on the held brightness.
    pub fn edit_brightness(&self, picker: &dyn BrightnessPicker) {
        let current = self.status().map(|s| s.brightness);
        picker.open(current, self.brightness_hook());
    }

    /// Opens a color picker on the held status.
    pub fn edit_color(&self, picker: &dyn ColorPicker) {
        picker.open(self.status(), self.color_hook());
    }

    /// Returns a one-shot hook that sets the brightness when used.
    #[must_use]
    pub fn brightness_hook(&self) -> BrightnessChosen {
        BrightnessChosen::new(self.dispatcher())
    }

    /// Returns a one-shot hook that sets an RGB color or tone when used.
    #[must_use]
    pub fn color_hook(&self) -> ColorChosen {
        ColorChosen::new(self.dispatcher())
    }

    /// Builds a dispatcher that runs a command on a background task.
    ///
    /// Holds only a weak reference so an abandoned picker does not keep a
    /// discarded controller alive.
    fn dispatcher(&self) -> Dispatch {
        let weak = Arc::downgrade(&self.shared);
        Box::new(move |command| {
            let Some(shared) = weak.upgrade() else {
                tracing::debug!(%command, "Picker committed after device was discarded");
                return;
            };
            let task = Arc::clone(&shared);
            shared.spawn(async move {
                let _ = task.run_command(command).await;
            });
        })
    }
}

impl<A: DeviceApi> Drop for DeviceController<A> {
    fn drop(&mut self) {
        self.shared.discard();
    }
}

impl<A: DeviceApi> fmt::Debug for DeviceController<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceController")
            .field("id", self.id())
            .field("name", &self.name())
            .field("status", &self.status())
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

/// Runs an API call, failing it with [`ProtocolError::Timeout`] once `limit`
/// has elapsed.
pub(crate) async fn bounded<T>(
    limit: Option<Duration>,
    call: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    let Some(limit) = limit else {
        return call.await;
    };
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            let millis = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
            Err(ProtocolError::Timeout(millis).into())
        }
    }
}

// ============================================================================
// Shared state
// ============================================================================

/// Mutable part of a controller. Never locked across an await point.
#[derive(Debug, Default)]
struct Held {
    status: Option<DeviceStatus>,
    preview: Option<RgbColor>,
    error: Option<String>,
    in_flight: usize,
    rechecks: usize,
}

impl Held {
    fn adopt(&mut self, status: DeviceStatus, config: &ControllerConfig) {
        self.status = Some(status);
        // an offline snapshot's color fields are not authoritative
        self.preview = status
            .is_online
            .then(|| preview_color(&status, config.tone_table()));
        self.error = None;
    }

    fn forget(&mut self, message: String) {
        self.status = None;
        self.preview = None;
        self.error = Some(message);
    }

    fn is_loading(&self) -> bool {
        self.in_flight > 0 || self.rechecks > 0
    }
}

struct Shared<A: DeviceApi> {
    info: DeviceInfo,
    api: Arc<A>,
    surface: Arc<dyn DisplaySurface>,
    config: ControllerConfig,
    runtime: Handle,
    held: RwLock<Held>,
    /// Held from the discard check through the render, and by
    /// [`discard`](Self::discard) while it raises the flag.
    renders: ReentrantMutex<()>,
    /// Queues requests in [`CommandMode::Serialized`].
    gate: tokio::sync::Mutex<()>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    discarded: AtomicBool,
}

impl<A: DeviceApi> Shared<A> {
    fn is_discarded(&self) -> bool {
        self.discarded.load(Ordering::Acquire)
    }

    fn view(&self) -> DeviceView {
        let held = self.held.read();
        DeviceView {
            device_id: self.info.id.clone(),
            name: self.info.name.clone(),
            status: held.status,
            error: held.error.clone(),
            loading: held.is_loading(),
            preview: held.preview,
        }
    }

    /// Applies `change` to the held state and renders the result.
    fn update(&self, change: impl FnOnce(&mut Held, &ControllerConfig)) {
        let _renders = self.renders.lock();
        if self.is_discarded() {
            return;
        }
        change(&mut self.held.write(), &self.config);
        self.surface.render_device(&self.view());
    }

    /// Enters `Pending` for one more request.
    fn begin(self: &Arc<Self>) -> InFlight<A> {
        self.begin_with(|_| {})
    }

    /// Enters `Pending`, applying `change` in the same step.
    fn begin_with(self: &Arc<Self>, change: impl FnOnce(&mut Held)) -> InFlight<A> {
        self.update(|held, _| {
            held.in_flight += 1;
            change(held);
        });
        InFlight {
            shared: Arc::clone(self),
            settled: false,
        }
    }

    async fn gate(&self) -> Option<tokio::sync::MutexGuard<'_, ()>> {
        match self.config.command_mode() {
            CommandMode::Serialized => Some(self.gate.lock().await),
            CommandMode::Concurrent => None,
        }
    }

    async fn request<T>(
        &self,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        bounded(self.config.request_timeout(), call).await
    }

    /// Fetches and adopts the device status under an already counted
    /// request.
    async fn fetch_and_adopt(&self, pending: InFlight<A>) -> Result<DeviceStatus, Error> {
        let _gate = self.gate().await;
        let id = &self.info.id;

        match self.request(self.api.get_status(id)).await {
            Ok(status) => {
                tracing::debug!(device_id = %id, ?status, "Status fetched");
                pending.settle(|held, config| held.adopt(status, config));
                Ok(status)
            }
            Err(err) => {
                tracing::warn!(device_id = %id, error = %err, "Status fetch failed");
                pending.settle(|held, _| held.forget(err.message().to_string()));
                Err(Error::FetchFailed(err))
            }
        }
    }

    async fn run_command(self: &Arc<Self>, command: LightCommand) -> Result<CommandOutcome, Error> {
        let id = &self.info.id;
        tracing::debug!(device_id = %id, %command, "Issuing command");

        let pending = self.begin();
        let gate = self.gate().await;
        let result = self.request(command.send(self.api.as_ref(), id)).await;
        drop(gate);

        match result {
            Err(err) => {
                tracing::warn!(device_id = %id, %command, error = %err, "Command failed");
                pending.settle(|held, _| held.error = Some(err.message().to_string()));
                Err(Error::CommandFailed(err))
            }
            Ok(status) if command.is_confirmed_by(&status) => {
                pending.settle(|held, config| held.adopt(status, config));
                Ok(CommandOutcome::Confirmed(status))
            }
            Ok(_) => {
                let delay = self.config.verify_delay();
                tracing::debug!(
                    device_id = %id,
                    %command,
                    ?delay,
                    "Response does not reflect command yet, scheduling re-check"
                );
                pending.settle(|held, _| held.rechecks += 1);
                self.schedule_recheck(command, delay);
                Ok(CommandOutcome::Unconfirmed {
                    recheck_after: delay,
                })
            }
        }
    }

    fn schedule_recheck(self: &Arc<Self>, command: LightCommand, delay: Duration) {
        let weak: Weak<Self> = Arc::downgrade(self);
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(shared) = weak.upgrade() else {
                return;
            };
            if shared.is_discarded() {
                return;
            }
            let pending =
                shared.begin_with(|held| held.rechecks = held.rechecks.saturating_sub(1));
            if let Ok(status) = shared.fetch_and_adopt(pending).await
                && !command.is_confirmed_by(&status)
            {
                tracing::warn!(
                    device_id = %shared.info.id,
                    %command,
                    "Command still not reflected after re-check, accepting reported state"
                );
            }
        });
    }

    /// Spawns a task owned by this controller.
    fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) {
        let mut tasks = self.tasks.lock();
        if self.is_discarded() {
            // unlock before the task drops; it may render on the way out
            drop(tasks);
            drop(task);
            return;
        }
        tasks.retain(|handle| !handle.is_finished());
        tasks.push(self.runtime.spawn(task));
    }

    fn discard(&self) {
        let _renders = self.renders.lock();
        let mut tasks = self.tasks.lock();
        self.discarded.store(true, Ordering::Release);
        for handle in tasks.drain(..) {
            handle.abort();
        }
        tracing::debug!(device_id = %self.info.id, "Controller discarded");
    }
}

/// One counted request. Settling it leaves `Pending` together with the
/// outcome; dropping it unsettled (the request future was abandoned) only
/// leaves `Pending`.
struct InFlight<A: DeviceApi> {
    shared: Arc<Shared<A>>,
    settled: bool,
}

impl<A: DeviceApi> InFlight<A> {
    fn settle(mut self, change: impl FnOnce(&mut Held, &ControllerConfig)) {
        self.settled = true;
        self.shared.update(|held, config| {
            held.in_flight = held.in_flight.saturating_sub(1);
            change(held, config);
        });
    }
}

impl<A: DeviceApi> Drop for InFlight<A> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        tracing::debug!(device_id = %self.shared.info.id, "Request abandoned before completion");
        self.shared.update(|held, _| {
            held.in_flight = held.in_flight.saturating_sub(1);
        });
    }
}
