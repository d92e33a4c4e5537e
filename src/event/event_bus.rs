// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast-channel display surface.

use tokio::sync::broadcast;

use super::{DeviceView, DisplaySurface, RenderEvent, RosterView};

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Display surface that forwards every render to broadcast subscribers.
///
/// Useful when the actual drawing happens on another task (a terminal UI,
/// a websocket bridge). Each subscriber gets its own copy of each event.
///
/// # Capacity
///
/// The bus has a fixed capacity (default 256). A subscriber that falls
/// behind loses the oldest events and receives `RecvError::Lagged`.
///
/// # Examples
///
/// ```
/// use lightdeck::event::{DisplaySurface, EventBus, RenderEvent, RosterView};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.render_roster(&RosterView::Loading);
/// assert_eq!(rx.try_recv().unwrap(), RenderEvent::Roster(RosterView::Loading));
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<RenderEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to render events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RenderEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event to all subscribers.
    ///
    /// If there are no subscribers, the event is silently discarded.
    pub fn publish(&self, event: RenderEvent) {
        // no subscribers is not an error
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for EventBus {
    fn render_device(&self, view: &DeviceView) {
        self.publish(RenderEvent::Device(view.clone()));
    }

    fn render_roster(&self, roster: &RosterView) {
        self.publish(RenderEvent::Roster(roster.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceId;

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        bus.render_roster(&RosterView::Failed("nope".to_string()));
    }

    #[test]
    fn every_subscriber_receives_events() {
        let bus = EventBus::with_capacity(8);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        let view = DeviceView {
            device_id: DeviceId::new("7"),
            name: "Porch".to_string(),
            status: None,
            error: Some("timeout".to_string()),
            loading: false,
            preview: None,
        };
        bus.render_device(&view);

        assert_eq!(rx1.try_recv().unwrap(), RenderEvent::Device(view.clone()));
        assert_eq!(rx2.try_recv().unwrap(), RenderEvent::Device(view));
    }

    #[test]
    fn clones_share_the_channel() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        bus.clone().publish(RenderEvent::Roster(RosterView::Loading));
        assert!(rx.try_recv().unwrap().is_roster());
    }
}
