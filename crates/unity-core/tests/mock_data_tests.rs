use chrono::NaiveDate;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use unity_core::mock::{
    generate_audience_segments, generate_performance_history, BaseRates, SEGMENT_NAMES,
};
use unity_core::seed::seed_agents_with;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

#[test]
fn test_history_dates_contiguous() {
    let mut rng = StdRng::seed_from_u64(2024);
    let history = generate_performance_history(BaseRates::new(85.0, 10.0, 180.0), today(), &mut rng);

    assert_eq!(history.first().unwrap().date, NaiveDate::from_ymd_opt(2024, 5, 16).unwrap());
    assert_eq!(history.last().unwrap().date, today());
    for pair in history.windows(2) {
        assert_eq!((pair[1].date - pair[0].date).num_days(), 1);
    }
}

#[test]
fn test_segment_labels() {
    let mut rng = StdRng::seed_from_u64(8);
    let labels: Vec<String> = generate_audience_segments(&mut rng)
        .iter()
        .map(|s| s.short_label())
        .collect();
    assert_eq!(
        labels,
        vec!["Older Buyers", "US-West", "Premium", "New", "Mobile"]
    );
    assert_eq!(SEGMENT_NAMES.len(), 5);
}

#[test]
fn test_seed_histories_track_each_agent() {
    let mut rng = StdRng::seed_from_u64(77);
    let agents = seed_agents_with(today(), &mut rng);
    for agent in &agents {
        let first = &agent.performance_history[0];
        assert!((first.fcr - agent.fcr).abs() <= 2.5, "{}", agent.name);
        assert!((first.escalation_rate - agent.escalation_rate).abs() <= 1.5);
    }
}

proptest! {
    #[test]
    fn prop_history_single_marker_at_fifteen(
        seed in any::<u64>(),
        fcr in 0.0f64..100.0,
        esc in 0.0f64..100.0,
        aht in 60.0f64..600.0,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let history = generate_performance_history(BaseRates::new(fcr, esc, aht), today(), &mut rng);

        prop_assert_eq!(history.len(), 31);
        let markers: Vec<usize> = history
            .iter()
            .enumerate()
            .filter(|(_, h)| h.version_change.is_some())
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(markers, vec![15]);
    }

    #[test]
    fn prop_segments_within_bounds(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for segment in generate_audience_segments(&mut rng) {
            prop_assert!((0.0..=1.0).contains(&segment.sentiment_score));
            prop_assert!((0.0..=100.0).contains(&segment.fcr));
            prop_assert!(segment.avg_transaction_value >= 50.0);
            prop_assert!(segment.avg_transaction_value < 150.0);
        }
    }
}
