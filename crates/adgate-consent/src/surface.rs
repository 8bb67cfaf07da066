//! Host UI collaborators: the ad surface and the notification sink.

use crate::types::{EffectiveConsent, NotificationLevel};

/// Everything the consent manager asks the host page to display.
///
/// All calls are fire-and-forget: implementations must not fail and must not
/// block the dispatching event.
pub trait AdSurface: Send + Sync {
    /// Render ad content into the ad slot.
    fn show_ad(&self);

    /// Render the consent-required placeholder instead of ad content.
    fn show_placeholder(&self);

    /// Display the consent banner.
    fn show_banner(&self);

    /// Hide the consent banner if visible.
    fn hide_banner(&self);

    /// Open the preference-management surface with the current settings.
    fn show_preferences(&self, current: &EffectiveConsent);
}

/// Fire-and-forget toast collaborator. Must not fail.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, level: NotificationLevel);
}

/// Surface and sink that do nothing, for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl AdSurface for NullSurface {
    fn show_ad(&self) {}
    fn show_placeholder(&self) {}
    fn show_banner(&self) {}
    fn hide_banner(&self) {}
    fn show_preferences(&self, _current: &EffectiveConsent) {}
}

impl NotificationSink for NullSurface {
    fn notify(&self, _message: &str, _level: NotificationLevel) {}
}
