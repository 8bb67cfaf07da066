//! Consent manager — decision recording, precedence rules, banner scheduling.

use std::sync::Arc;

use tracing::{info, warn};

use adgate_core::Clock;
use adgate_store::OriginStore;

use crate::banner::BannerScheduler;
use crate::config::ConsentConfig;
use crate::surface::{AdSurface, NotificationSink};
use crate::types::{
    ConsentPrefs, ConsentRecord, ConsentState, EffectiveConsent, LegacyCookieFlag,
    NotificationLevel,
};

/// Decides, on page load and on every user action, whether ad content may be
/// shown, and keeps the two persisted records consistent with the most recent
/// explicit decision.
///
/// The store is shared per origin: other instances (tabs) may write the same
/// keys at any time. Writes are last-write-wins and status is never cached,
/// so a re-query always reflects the latest store contents.
pub struct ConsentManager {
    store: Arc<dyn OriginStore>,
    clock: Arc<dyn Clock>,
    surface: Arc<dyn AdSurface>,
    notifications: Arc<dyn NotificationSink>,
    scheduler: Arc<dyn BannerScheduler>,
    config: ConsentConfig,
}

impl ConsentManager {
    pub fn new(
        store: Arc<dyn OriginStore>,
        clock: Arc<dyn Clock>,
        surface: Arc<dyn AdSurface>,
        notifications: Arc<dyn NotificationSink>,
        scheduler: Arc<dyn BannerScheduler>,
        config: ConsentConfig,
    ) -> Self {
        Self {
            store,
            clock,
            surface,
            notifications,
            scheduler,
            config,
        }
    }

    /// Page-load entry point: reflect the recorded decision on the surface,
    /// then offer the first-visit banner if nothing is on record.
    pub fn init(&self) {
        self.check_consent_status();
        self.schedule_banner_if_needed();
    }

    /// Reflect the current effective consent on the ad surface.
    pub fn check_consent_status(&self) {
        if self.consent_status().ads {
            self.surface.show_ad();
        } else {
            self.surface.show_placeholder();
        }
    }

    /// Offer the first-visit banner after the configured delay, but only if
    /// no decision exists at schedule time. The deferred task re-checks the
    /// store when it fires, so a decision made inside the delay window
    /// suppresses the banner without any cancellation.
    pub fn schedule_banner_if_needed(&self) {
        if !self.is_undecided() {
            return;
        }
        let store = Arc::clone(&self.store);
        let surface = Arc::clone(&self.surface);
        let consent_key = self.config.consent_key.clone();
        let cookies_key = self.config.cookies_key.clone();
        self.scheduler.schedule(
            self.config.banner_delay(),
            Box::new(move || {
                // Same predicate as at schedule time: the structured key
                // counts only if it parses as a record, the legacy key by raw
                // presence. A read failure counts as "no record":
                // privacy-conservative, so the banner is still offered.
                let decided = store
                    .get(&consent_key)
                    .unwrap_or_default()
                    .is_some_and(|raw| serde_json::from_str::<ConsentRecord>(&raw).is_ok())
                    || store.get(&cookies_key).unwrap_or_default().is_some();
                if !decided {
                    surface.show_banner();
                }
            }),
        );
    }

    // ---------------------------------------------------------------
    // Persisted records
    // ---------------------------------------------------------------

    /// Read the structured record. Malformed or unreadable data is treated
    /// as no prior consent; the caller never sees the failure. Expiry is not
    /// checked here.
    pub fn stored_consent(&self) -> Option<ConsentRecord> {
        let raw = match self.store.get(&self.config.consent_key) {
            Ok(v) => v?,
            Err(e) => {
                warn!("Failed to read consent record: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Failed to parse consent record: {}", e);
                None
            }
        }
    }

    /// Write a fresh record stamped with the current time, replacing any
    /// prior record whole. A failed write is logged and forgotten; the
    /// session proceeds as if it succeeded and the next decision writes
    /// again.
    pub fn store_consent(&self, prefs: ConsentPrefs) {
        let record = ConsentRecord {
            ads: prefs.ads,
            analytics: prefs.analytics,
            functional: prefs.functional,
            timestamp: self.clock.now_ms(),
        };
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.store.set(&self.config.consent_key, &json) {
                    warn!("Failed to store consent record: {}", e);
                }
            }
            Err(e) => warn!("Failed to encode consent record: {}", e),
        }
    }

    /// Whether a record written at `timestamp` is past the configured expiry.
    ///
    /// Retained from the historical scheme. [`consent_status`] does not
    /// consult it, so in practice a recorded consent never expires.
    ///
    /// [`consent_status`]: Self::consent_status
    pub fn is_consent_expired(&self, timestamp: i64) -> bool {
        let expiry_ms = self.config.expiry_days.saturating_mul(crate::types::MS_PER_DAY);
        self.clock.now_ms().saturating_sub(timestamp) > expiry_ms
    }

    fn raw_legacy_flag(&self) -> Option<String> {
        match self.store.get(&self.config.cookies_key) {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to read legacy cookie flag: {}", e);
                None
            }
        }
    }

    fn set_legacy_flag(&self, flag: LegacyCookieFlag) {
        if let Err(e) = self.store.set(&self.config.cookies_key, flag.as_str()) {
            warn!("Failed to store legacy cookie flag: {}", e);
        }
    }

    // ---------------------------------------------------------------
    // Derived status
    // ---------------------------------------------------------------

    /// Current effective consent, computed fresh from both records.
    ///
    /// The legacy flag `"true"` grants ads and analytics via logical OR: it
    /// can elevate a structured record but never override one to false.
    /// `"ads-only"` grants nothing by itself; that path relies on the
    /// structured record written alongside it.
    pub fn consent_status(&self) -> EffectiveConsent {
        let stored = self.stored_consent();
        let flag = self
            .raw_legacy_flag()
            .as_deref()
            .and_then(LegacyCookieFlag::parse);
        let accept_all = flag == Some(LegacyCookieFlag::True);

        EffectiveConsent {
            ads: stored.as_ref().is_some_and(|c| c.ads) || accept_all,
            analytics: stored.as_ref().is_some_and(|c| c.analytics) || accept_all,
            essential: true,
            cookies_accepted: flag,
        }
    }

    /// Per-load view of the state machine: `Unknown` iff neither record
    /// exists.
    pub fn state(&self) -> ConsentState {
        if self.is_undecided() {
            ConsentState::Unknown
        } else {
            let status = self.consent_status();
            ConsentState::Decided {
                ads: status.ads,
                analytics: status.analytics,
            }
        }
    }

    fn is_undecided(&self) -> bool {
        self.stored_consent().is_none() && self.raw_legacy_flag().is_none()
    }

    // ---------------------------------------------------------------
    // User decisions
    // ---------------------------------------------------------------

    /// Enable advertising only. Idempotent.
    pub fn grant_ad_consent(&self) {
        self.store_consent(ConsentPrefs {
            ads: true,
            ..Default::default()
        });
        self.set_legacy_flag(LegacyCookieFlag::AdsOnly);
        self.surface.show_ad();
        self.surface.hide_banner();
        self.notifications.notify(
            "Ads enabled! Thank you for supporting us.",
            NotificationLevel::Success,
        );
        info!("Consent decision: ads-only");
    }

    /// Enable advertising, analytics, and functional cookies. Idempotent.
    pub fn accept_all_cookies(&self) {
        self.store_consent(ConsentPrefs {
            ads: true,
            analytics: true,
            functional: true,
        });
        self.set_legacy_flag(LegacyCookieFlag::True);
        self.surface.show_ad();
        self.surface.hide_banner();
        self.notifications
            .notify("All cookies accepted", NotificationLevel::Success);
        info!("Consent decision: accept-all");
    }

    /// Keep essential cookies only. Idempotent.
    pub fn reject_cookies(&self) {
        self.store_consent(ConsentPrefs {
            functional: true,
            ..Default::default()
        });
        self.set_legacy_flag(LegacyCookieFlag::False);
        self.surface.show_placeholder();
        self.surface.hide_banner();
        self.notifications
            .notify("Only essential cookies enabled", NotificationLevel::Info);
        info!("Consent decision: reject");
    }

    /// Forget both records and return to the first-visit state, banner
    /// scheduling included.
    pub fn clear_all_consent(&self) {
        if let Err(e) = self.store.remove(&self.config.consent_key) {
            warn!("Failed to clear consent record: {}", e);
        }
        if let Err(e) = self.store.remove(&self.config.cookies_key) {
            warn!("Failed to clear legacy cookie flag: {}", e);
        }
        self.surface.show_placeholder();
        self.schedule_banner_if_needed();
        info!("Consent cleared");
    }

    /// Open the preference-management surface with a fresh status snapshot.
    pub fn open_preferences(&self) {
        let status = self.consent_status();
        self.surface.show_preferences(&status);
    }
}
