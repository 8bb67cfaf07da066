//! Consent records, the legacy compatibility flag, and derived status.

use serde::{Deserialize, Serialize};

/// Milliseconds in one day, for expiry arithmetic.
pub(crate) const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// The structured consent decision, persisted as JSON under the consent key.
///
/// Written whole on every decision — no merge with a prior record. The
/// timestamp is stamped at write time and never backdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    #[serde(default)]
    pub ads: bool,
    #[serde(default)]
    pub analytics: bool,
    #[serde(default)]
    pub functional: bool,
    pub timestamp: i64,
}

impl ConsentRecord {
    /// Whether the record is older than `expiry_days`.
    ///
    /// Effective consent never consults this: a stale record still grants
    /// whatever it granted when written. See
    /// [`ConsentManager::consent_status`](crate::ConsentManager::consent_status).
    pub fn is_expired(&self, now_ms: i64, expiry_days: i64) -> bool {
        now_ms.saturating_sub(self.timestamp) > expiry_days.saturating_mul(MS_PER_DAY)
    }
}

/// Decision input. Fields left at their default are persisted as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsentPrefs {
    pub ads: bool,
    pub analytics: bool,
    pub functional: bool,
}

/// The flat flag predating the structured record, kept for compatibility.
/// Persisted as its raw string form via [`as_str`](Self::as_str), never as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyCookieFlag {
    True,
    False,
    AdsOnly,
}

impl LegacyCookieFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::AdsOnly => "ads-only",
        }
    }

    /// Strict parse. Unrecognized values yield `None`, though any stored
    /// value still counts as a recorded decision for banner suppression.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "ads-only" => Some(Self::AdsOnly),
            _ => None,
        }
    }
}

impl std::fmt::Display for LegacyCookieFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived combination of both records. Computed fresh on every query, never
/// persisted or cached; `essential` is always true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveConsent {
    pub ads: bool,
    pub analytics: bool,
    pub essential: bool,
    pub cookies_accepted: Option<LegacyCookieFlag>,
}

/// Per-load view of the consent state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    /// Neither record exists; a banner prompt will be offered.
    Unknown,
    /// A decision is on record. Re-deciding is always allowed.
    Decided { ads: bool, analytics: bool },
}

/// Severity passed to the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}
