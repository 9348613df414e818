//! Mock analytics generation
//!
//! Seeds agent charts with a randomized 30-day performance history and
//! randomized audience-segment statistics. Structure is fixed (window
//! length, marker position, segment names); values are jittered.

use crate::config::PlatformConfig;
use crate::types::{AgentAudienceSegment, AgentPerformanceHistory};
use chrono::{Duration, Local, NaiveDate};
use rand::Rng;

/// Jitter amplitudes (full width of the uniform range)
const FCR_JITTER: f64 = 5.0;
const ESCALATION_JITTER: f64 = 3.0;
const AHT_JITTER: f64 = 15.0;

/// Audience cohorts every seeded agent reports on
pub const SEGMENT_NAMES: [&str; 5] = [
    "Age Bucket: \"Older Buyers\"",
    "Region Code: \"US-West\"",
    "Product Affinity: \"Premium\"",
    "User Status: \"New\"",
    "Device: \"Mobile\"",
];

/// Starting rates for a history window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseRates {
    pub fcr: f64,
    pub escalation: f64,
    pub aht: f64,
}

impl BaseRates {
    #[inline]
    #[must_use]
    pub fn new(fcr: f64, escalation: f64, aht: f64) -> Self {
        Self {
            fcr,
            escalation,
            aht,
        }
    }

    /// Shift applied after a deployment: better resolution, fewer
    /// escalations, faster handling.
    #[inline]
    fn after_deployment(self) -> Self {
        Self {
            fcr: self.fcr + 2.0,
            escalation: self.escalation - 1.0,
            aht: self.aht - 5.0,
        }
    }
}

/// Shape of a history window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryWindow {
    /// Days before today; the window holds `days + 1` points
    pub days: u32,
    /// Index of the version marker from the start of the window
    pub marker_offset: u32,
    pub label: String,
}

impl HistoryWindow {
    #[must_use]
    pub fn from_config(config: &PlatformConfig) -> Self {
        Self {
            days: config.history_days,
            marker_offset: config.version_marker_offset,
            label: config.version_label.clone(),
        }
    }

    /// Number of points produced
    #[inline]
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.days as usize + 1
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::from_config(&PlatformConfig::default())
    }
}

/// Generate a 31-point history ending at `today`, ascending by date.
///
/// The entry at index 15 carries the `v1.1` marker; every later entry is
/// drawn around the shifted base rates.
pub fn generate_performance_history<R: Rng>(
    base: BaseRates,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<AgentPerformanceHistory> {
    generate_history_window(&HistoryWindow::default(), base, today, rng)
}

/// Generate a history for an arbitrary window.
pub fn generate_history_window<R: Rng>(
    window: &HistoryWindow,
    base: BaseRates,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<AgentPerformanceHistory> {
    let mut base = base;
    let mut history = Vec::with_capacity(window.point_count());

    for (idx, days_back) in (0..=window.days).rev().enumerate() {
        let mut entry = AgentPerformanceHistory {
            date: today - Duration::days(i64::from(days_back)),
            fcr: base.fcr + jitter(rng, FCR_JITTER),
            escalation_rate: base.escalation + jitter(rng, ESCALATION_JITTER),
            aht: base.aht + jitter(rng, AHT_JITTER),
            version_change: None,
        };
        if idx == window.marker_offset as usize {
            entry.version_change = Some(window.label.clone());
            base = base.after_deployment();
        }
        history.push(entry);
    }

    history
}

/// History ending today, drawn from the thread RNG.
#[must_use]
pub fn performance_history(base: BaseRates) -> Vec<AgentPerformanceHistory> {
    generate_performance_history(base, Local::now().date_naive(), &mut rand::rng())
}

/// Attach bounded random statistics to each of [`SEGMENT_NAMES`].
pub fn generate_audience_segments<R: Rng>(rng: &mut R) -> Vec<AgentAudienceSegment> {
    SEGMENT_NAMES
        .iter()
        .map(|name| AgentAudienceSegment {
            segment: (*name).to_string(),
            avg_transaction_value: 50.0 + rng.random::<f64>() * 100.0,
            fcr: 60.0 + rng.random::<f64>() * 35.0,
            sentiment_score: 0.6 + rng.random::<f64>() * 0.35,
        })
        .collect()
}

/// Segments drawn from the thread RNG.
#[must_use]
pub fn audience_segments() -> Vec<AgentAudienceSegment> {
    generate_audience_segments(&mut rand::rng())
}

/// Uniform in `[-width/2, width/2)`
#[inline]
fn jitter<R: Rng>(rng: &mut R, width: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * width
}
