//! End-to-end consent flows: first visit, banner timing race, and
//! multi-instance behavior on a shared origin store.
//!
//! These tests wire a real ConsentManager against the in-memory store, a
//! manual clock, and a manual scheduler, so every race is deterministic.

use std::sync::Arc;

use adgate_consent::testkit::{RecordingSink, RecordingSurface, SurfaceEvent};
use adgate_consent::{
    AdSurface, BannerScheduler, ConsentConfig, ConsentManager, ConsentState, LegacyCookieFlag,
    ManualScheduler, NotificationSink,
};
use adgate_core::{Clock, ManualClock};
use adgate_store::{MemoryStore, OriginStore};

struct Tab {
    surface: Arc<RecordingSurface>,
    scheduler: Arc<ManualScheduler>,
    manager: ConsentManager,
}

/// Open a "tab": a manager instance bound to the shared store.
fn open_tab(store: &Arc<MemoryStore>, clock: &Arc<ManualClock>) -> Tab {
    let surface = Arc::new(RecordingSurface::new());
    let scheduler = Arc::new(ManualScheduler::new());
    let manager = ConsentManager::new(
        Arc::clone(store) as Arc<dyn OriginStore>,
        Arc::clone(clock) as Arc<dyn Clock>,
        Arc::clone(&surface) as Arc<dyn AdSurface>,
        Arc::new(RecordingSink::new()) as Arc<dyn NotificationSink>,
        Arc::clone(&scheduler) as Arc<dyn BannerScheduler>,
        ConsentConfig::default(),
    );
    Tab {
        surface,
        scheduler,
        manager,
    }
}

#[test]
fn test_first_visit_shows_placeholder_and_schedules_banner() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let tab = open_tab(&store, &clock);

    tab.manager.init();

    assert_eq!(tab.surface.events(), vec![SurfaceEvent::ShowPlaceholder]);
    assert_eq!(tab.scheduler.pending(), 1);

    tab.scheduler.fire_all();
    assert_eq!(
        tab.surface.events(),
        vec![SurfaceEvent::ShowPlaceholder, SurfaceEvent::ShowBanner]
    );
}

#[test]
fn test_decision_inside_delay_window_suppresses_banner_at_fire_time() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let tab = open_tab(&store, &clock);

    tab.manager.init();
    assert_eq!(tab.scheduler.pending(), 1);

    // User accepts through another UI path before the 2s delay elapses.
    tab.manager.accept_all_cookies();

    // The deferred task still fires, but its guard re-checks the store and
    // must not show the banner.
    tab.scheduler.fire_all();
    let events = tab.surface.events();
    assert!(!events.contains(&SurfaceEvent::ShowBanner));
}

#[test]
fn test_returning_visitor_with_consent_sees_ad_and_no_banner() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));

    open_tab(&store, &clock).manager.accept_all_cookies();

    let tab = open_tab(&store, &clock);
    tab.manager.init();

    assert_eq!(tab.surface.events(), vec![SurfaceEvent::ShowAd]);
    // Decided at schedule time: nothing is even queued.
    assert_eq!(tab.scheduler.pending(), 0);
}

#[test]
fn test_legacy_flag_alone_gates_ads_on_page_load() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    store.set("cookies-accepted", "true").unwrap();

    let tab = open_tab(&store, &clock);
    tab.manager.init();

    assert_eq!(tab.surface.events(), vec![SurfaceEvent::ShowAd]);
    let status = tab.manager.consent_status();
    assert!(status.ads);
    assert!(status.analytics);
    assert_eq!(status.cookies_accepted, Some(LegacyCookieFlag::True));
}

#[test]
fn test_two_tabs_race_last_write_wins() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let tab_a = open_tab(&store, &clock);
    let tab_b = open_tab(&store, &clock);

    tab_a.manager.accept_all_cookies();
    clock.advance(10);
    tab_b.manager.reject_cookies();

    // No merge: tab B's whole record replaced tab A's.
    let record = tab_a.manager.stored_consent().unwrap();
    assert!(!record.ads);
    assert!(!record.analytics);
    assert!(record.functional);

    // A status snapshot taken before the other tab's write goes stale; only a
    // re-query observes the change.
    let stale = tab_a.manager.consent_status();
    tab_b.manager.accept_all_cookies();
    assert!(!stale.ads);
    assert!(tab_a.manager.consent_status().ads);
}

#[test]
fn test_clear_in_one_tab_resets_the_other() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let tab_a = open_tab(&store, &clock);
    let tab_b = open_tab(&store, &clock);

    tab_a.manager.accept_all_cookies();
    assert_eq!(
        tab_b.manager.state(),
        ConsentState::Decided {
            ads: true,
            analytics: true
        }
    );

    tab_b.manager.clear_all_consent();
    assert_eq!(tab_a.manager.state(), ConsentState::Unknown);
    assert!(store.is_empty());
}

#[test]
fn test_full_decision_cycle_is_redecidable() {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let tab = open_tab(&store, &clock);

    tab.manager.reject_cookies();
    assert!(!tab.manager.consent_status().ads);

    tab.manager.grant_ad_consent();
    let status = tab.manager.consent_status();
    assert!(status.ads);
    assert!(!status.analytics);

    tab.manager.accept_all_cookies();
    let status = tab.manager.consent_status();
    assert!(status.ads);
    assert!(status.analytics);

    // No terminal state: rejecting after accepting works the same way.
    tab.manager.reject_cookies();
    assert!(!tab.manager.consent_status().ads);
}
