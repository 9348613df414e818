//! Dashboard aggregation
//!
//! Read-only derived metrics. Nothing here is cached; callers recompute per
//! render.

use crate::types::{Agent, Project};
use serde::Serialize;

/// Cross-project totals for the nerve-center dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Sum of estimated ROI, USD
    pub total_roi: f64,
    /// Interaction-weighted first-call resolution, percent
    pub weighted_fcr: f64,
    /// Interaction-weighted escalation rate, percent
    pub weighted_escalation: f64,
    pub total_interactions: u64,
    pub project_count: usize,
}

impl DashboardSummary {
    /// Aggregate `projects`.
    ///
    /// With zero total interactions the denominator is floored to one, so
    /// the weighted rates are `0.0` rather than NaN.
    #[must_use]
    pub fn from_projects(projects: &[Project]) -> Self {
        let total_interactions: u64 = projects.iter().map(|p| p.total_interactions).sum();
        let denominator = total_interactions.max(1) as f64;

        let weighted = |rate: fn(&Project) -> f64| {
            projects
                .iter()
                .map(|p| rate(p) * p.total_interactions as f64)
                .sum::<f64>()
                / denominator
        };

        Self {
            total_roi: projects.iter().map(|p| p.estimated_roi).sum(),
            weighted_fcr: weighted(|p| p.fcr),
            weighted_escalation: weighted(|p| p.escalation_rate),
            total_interactions,
            project_count: projects.len(),
        }
    }
}

/// Coarse health classification used for the card indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthBand {
    Healthy,
    Warning,
    Critical,
}

impl HealthBand {
    /// `> 80` healthy, `> 60` warning, otherwise critical
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score > 80.0 {
            HealthBand::Healthy
        } else if score > 60.0 {
            HealthBand::Warning
        } else {
            HealthBand::Critical
        }
    }
}

/// Composite agent health:
/// `0.5*fcr + 0.3*(100 - escalation) + 0.2*sentiment*100`.
#[inline]
#[must_use]
pub fn health_score(agent: &Agent) -> f64 {
    health_score_from(agent.fcr, agent.escalation_rate, agent.sentiment_score)
}

#[inline]
#[must_use]
pub fn health_score_from(fcr: f64, escalation_rate: f64, sentiment_score: f64) -> f64 {
    0.5 * fcr + 0.3 * (100.0 - escalation_rate) + 0.2 * (sentiment_score * 100.0)
}

/// Card-level summary of one agent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCardSummary {
    pub name: String,
    pub use_case: &'static str,
    pub health: f64,
    pub band: HealthBand,
    pub workflows_completed: u64,
    pub value_generated: f64,
    pub deployment: &'static str,
}

impl AgentCardSummary {
    #[must_use]
    pub fn from_agent(agent: &Agent) -> Self {
        let health = health_score(agent);
        Self {
            name: agent.name.clone(),
            use_case: agent.use_case.label(),
            health,
            band: HealthBand::classify(health),
            workflows_completed: agent.workflows_completed,
            value_generated: agent.value_generated,
            deployment: agent.deployment_type.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_projects;

    #[test]
    fn weighted_rates_from_seed() {
        let summary = DashboardSummary::from_projects(&seed_projects());

        let expected_fcr = (82.0 * 2130.0 + 76.0 * 980.0 + 65.0 * 540.0) / 3650.0;
        assert!((summary.weighted_fcr - expected_fcr).abs() < 1e-9);
        assert_eq!(summary.total_roi, 20700.0);
        assert_eq!(summary.total_interactions, 3650);
        assert_eq!(summary.project_count, 3);
    }

    #[test]
    fn empty_projects_yield_zero() {
        let summary = DashboardSummary::from_projects(&[]);
        assert_eq!(summary.weighted_fcr, 0.0);
        assert_eq!(summary.weighted_escalation, 0.0);
        assert_eq!(summary.total_roi, 0.0);
    }

    #[test]
    fn health_score_formula() {
        // 0.5*85 + 0.3*90 + 0.2*90 = 42.5 + 27 + 18
        assert!((health_score_from(85.0, 10.0, 0.9) - 87.5).abs() < 1e-9);
        assert!((health_score_from(100.0, 0.0, 1.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn health_bands() {
        assert_eq!(HealthBand::classify(87.5), HealthBand::Healthy);
        assert_eq!(HealthBand::classify(80.0), HealthBand::Warning);
        assert_eq!(HealthBand::classify(60.0), HealthBand::Critical);
    }
}
