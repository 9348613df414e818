use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use unity_core::config::LandingConfig;
use unity_core::landing::{GenerationShowcase, TourBanner, SHOWCASE_AGENTS, TOUR_MESSAGES};
use unity_core::ticker::ScopedTicker;

fn fast_landing() -> LandingConfig {
    LandingConfig {
        tour_message_interval_ms: 1000,
        tour_typing_interval_ms: 10,
        showcase_interval_ms: 500,
    }
}

#[tokio::test(start_paused = true)]
async fn test_banner_types_one_char_per_tick() {
    let banner = TourBanner::with_messages(&fast_landing(), ["Hello, world"]);
    assert_eq!(banner.text(), "");

    tokio::time::sleep(Duration::from_millis(55)).await;
    assert_eq!(banner.text(), "Hello");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(banner.text(), "Hello, world");
}

#[tokio::test(start_paused = true)]
async fn test_banner_rotates_messages() {
    let banner = TourBanner::start(&LandingConfig::default());
    assert_eq!(banner.message_index(), 0);

    tokio::time::sleep(Duration::from_millis(8_050)).await;
    assert_eq!(banner.message_index(), 1);
    assert!(TOUR_MESSAGES[1].starts_with(&banner.text()));

    tokio::time::sleep(Duration::from_millis(24_000)).await;
    assert_eq!(banner.message_index(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_showcase_rotation_counts_transitions() {
    let showcase = GenerationShowcase::start(&fast_landing());
    assert_eq!(showcase.active(), SHOWCASE_AGENTS[0]);

    tokio::time::sleep(Duration::from_millis(2_250)).await;
    assert_eq!(showcase.transitions(), 4);
    assert_eq!(showcase.active_index(), 0);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(showcase.active().name, "Synapse");
}

#[tokio::test(start_paused = true)]
async fn test_dropped_ticker_stops_callbacks() {
    let count = Arc::new(AtomicUsize::new(0));
    let ticks = Arc::clone(&count);
    let ticker = ScopedTicker::spawn(Duration::from_millis(100), move || {
        ticks.fetch_add(1, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(count.load(Ordering::SeqCst), 3);
    drop(ticker);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_stop_waits_for_task() {
    let count = Arc::new(AtomicUsize::new(0));
    let ticks = Arc::clone(&count);
    let ticker = ScopedTicker::spawn(Duration::from_millis(50), move || {
        ticks.fetch_add(1, Ordering::SeqCst);
    });
    assert!(ticker.is_running());

    tokio::time::sleep(Duration::from_millis(120)).await;
    ticker.stop().await;
    let after_stop = count.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(count.load(Ordering::SeqCst), after_stop);
    assert_eq!(after_stop, 2);
}
