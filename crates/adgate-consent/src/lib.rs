//! AdGate Consent — the GDPR ad-consent component.
//!
//! One component, [`ConsentManager`], owns two persisted records in an
//! origin-scoped store — a structured consent record and a legacy flat flag —
//! and derives effective consent from them fresh on every query. The manager
//! is the sole reader and writer of those keys in this codebase, but the store
//! itself is shared per origin, so other instances can race it at any time.

pub mod banner;
pub mod config;
pub mod manager;
pub mod surface;
pub mod testkit;
pub mod types;

pub use banner::{BannerScheduler, ManualScheduler};
pub use config::ConsentConfig;
pub use manager::ConsentManager;
pub use surface::{AdSurface, NotificationSink, NullSurface};
pub use types::{
    ConsentPrefs, ConsentRecord, ConsentState, EffectiveConsent, LegacyCookieFlag,
    NotificationLevel,
};
