//! Recording doubles for the surface and sink traits.
//!
//! Used by this crate's tests and available to host applications that want to
//! assert on consent-driven UI effects.

use parking_lot::Mutex;

use crate::surface::{AdSurface, NotificationSink};
use crate::types::{EffectiveConsent, NotificationLevel};

/// A single observed surface call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    ShowAd,
    ShowPlaceholder,
    ShowBanner,
    HideBanner,
    ShowPreferences,
}

/// Surface that records every call in order.
#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
    last_preferences: Mutex<Option<EffectiveConsent>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
        *self.last_preferences.lock() = None;
    }

    /// The status snapshot passed to the most recent `show_preferences` call.
    pub fn last_preferences(&self) -> Option<EffectiveConsent> {
        *self.last_preferences.lock()
    }
}

impl AdSurface for RecordingSurface {
    fn show_ad(&self) {
        self.events.lock().push(SurfaceEvent::ShowAd);
    }

    fn show_placeholder(&self) {
        self.events.lock().push(SurfaceEvent::ShowPlaceholder);
    }

    fn show_banner(&self) {
        self.events.lock().push(SurfaceEvent::ShowBanner);
    }

    fn hide_banner(&self) {
        self.events.lock().push(SurfaceEvent::HideBanner);
    }

    fn show_preferences(&self, current: &EffectiveConsent) {
        self.events.lock().push(SurfaceEvent::ShowPreferences);
        *self.last_preferences.lock() = Some(*current);
    }
}

/// Sink that records every notification in order.
#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<(String, NotificationLevel)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, NotificationLevel)> {
        self.messages.lock().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, message: &str, level: NotificationLevel) {
        self.messages.lock().push((message.to_string(), level));
    }
}
