//! Core types for UNITY
//!
//! Defines the platform's data shapes:
//! - Projects and their aggregate metrics
//! - Agents with profile, voice and performance counters
//! - Daily performance history and audience segments
//!
//! Serialized field names and enum literals match the dashboard's JSON shapes.

use crate::error::PlatformError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// TTS model used by every internally hosted agent.
pub const INTERNAL_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Project identifier (`proj-01` style for seed data)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Wrap an existing identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Agent identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl AgentId {
    /// Wrap an existing identifier
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh unique id (ULID for sortability)
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("agent-{}", Ulid::new()))
    }

    /// Borrow as str
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Active,
    Optimizing,
    Error,
}

/// A customer project grouping agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub status: ProjectStatus,
    /// Budget consumed, percent
    pub budget_usage: f64,
    /// First-call resolution, percent
    pub fcr: f64,
    /// Escalation rate, percent
    pub escalation_rate: f64,
    pub total_agents: u32,
    pub total_interactions: u64,
    /// Estimated return in USD (may be negative)
    #[serde(rename = "estimatedROI")]
    pub estimated_roi: f64,
}

impl Project {
    /// Check the percentage invariants.
    ///
    /// # Errors
    /// `PlatformError::InvalidPercentage` naming the first field outside [0, 100].
    pub fn validate(&self) -> Result<(), PlatformError> {
        check_percentage("budgetUsage", self.budget_usage)?;
        check_percentage("fcr", self.fcr)?;
        check_percentage("escalationRate", self.escalation_rate)
    }
}

fn check_percentage(field: &'static str, value: f64) -> Result<(), PlatformError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(PlatformError::InvalidPercentage { field, value })
    }
}

/// What the agent is deployed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UseCase {
    #[serde(rename = "Customer Service")]
    CustomerService,
    Sales,
    #[serde(rename = "Technical Support")]
    TechnicalSupport,
    Onboarding,
}

impl UseCase {
    /// All use cases in menu order
    pub const ALL: [UseCase; 4] = [
        UseCase::CustomerService,
        UseCase::Sales,
        UseCase::TechnicalSupport,
        UseCase::Onboarding,
    ];

    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            UseCase::CustomerService => "Customer Service",
            UseCase::Sales => "Sales",
            UseCase::TechnicalSupport => "Technical Support",
            UseCase::Onboarding => "Onboarding",
        }
    }
}

impl Default for UseCase {
    fn default() -> Self {
        UseCase::CustomerService
    }
}

/// Agent lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentStatus {
    Active,
    Inactive,
    Training,
}

/// Where the model/voice stack is hosted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentType {
    /// LLM, workflow, TTS and hosting managed by UNITY
    #[serde(rename = "UNITY_Internal")]
    UnityInternal,
    /// External logic and/or voice providers
    #[serde(rename = "External_Hybrid")]
    ExternalHybrid,
}

impl DeploymentType {
    /// Whether this deployment needs the external configuration step
    #[inline]
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, DeploymentType::ExternalHybrid)
    }

    /// TTS model selected when switching to this deployment
    #[inline]
    #[must_use]
    pub fn default_tts_model(&self) -> TtsModel {
        match self {
            DeploymentType::UnityInternal => TtsModel::GeminiTts,
            DeploymentType::ExternalHybrid => TtsModel::ElevenLabsV2,
        }
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DeploymentType::UnityInternal => "UNITY Internal",
            DeploymentType::ExternalHybrid => "External Hybrid",
        }
    }
}

impl Default for DeploymentType {
    fn default() -> Self {
        DeploymentType::UnityInternal
    }
}

/// Text-to-speech model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TtsModel {
    #[serde(rename = "gemini-2.5-flash-preview-tts")]
    GeminiTts,
    #[serde(rename = "ElevenLabs-v2")]
    ElevenLabsV2,
}

impl TtsModel {
    /// Model identifier string
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsModel::GeminiTts => INTERNAL_TTS_MODEL,
            TtsModel::ElevenLabsV2 => "ElevenLabs-v2",
        }
    }
}

/// Optional agent capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    #[serde(rename = "Multi-language support")]
    MultiLanguage,
    #[serde(rename = "Sentiment analysis")]
    SentimentAnalysis,
    #[serde(rename = "Real-time data lookup")]
    RealTimeDataLookup,
    #[serde(rename = "Proactive engagement")]
    ProactiveEngagement,
}

impl Capability {
    /// Capabilities offered by the wizard and profile editor
    pub const ALL: [Capability; 4] = [
        Capability::MultiLanguage,
        Capability::SentimentAnalysis,
        Capability::RealTimeDataLookup,
        Capability::ProactiveEngagement,
    ];

    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Capability::MultiLanguage => "Multi-language support",
            Capability::SentimentAnalysis => "Sentiment analysis",
            Capability::RealTimeDataLookup => "Real-time data lookup",
            Capability::ProactiveEngagement => "Proactive engagement",
        }
    }
}

/// Toggle membership of `capability`, preserving insertion order.
pub fn toggle_capability(capabilities: &mut Vec<Capability>, capability: Capability) {
    if let Some(idx) = capabilities.iter().position(|c| *c == capability) {
        capabilities.remove(idx);
    } else {
        capabilities.push(capability);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceGender {
    Female,
    Male,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceRegion {
    #[serde(rename = "US-East")]
    UsEast,
    #[serde(rename = "US-West")]
    UsWest,
    #[serde(rename = "UK")]
    Uk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceStyle {
    Enthusiastic,
    Professional,
    Calm,
}

/// Voice settings for an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub gender: VoiceGender,
    pub region: VoiceRegion,
    pub style: VoiceStyle,
}

impl VoiceProfile {
    /// Create voice profile
    #[inline]
    #[must_use]
    pub fn new(gender: VoiceGender, region: VoiceRegion, style: VoiceStyle) -> Self {
        Self {
            gender,
            region,
            style,
        }
    }
}

impl Default for VoiceProfile {
    /// Voice assigned to agents created through the wizard
    fn default() -> Self {
        Self::new(VoiceGender::Female, VoiceRegion::UsEast, VoiceStyle::Enthusiastic)
    }
}

/// One day of agent performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPerformanceHistory {
    pub date: NaiveDate,
    pub fcr: f64,
    pub escalation_rate: f64,
    /// Average handle time in seconds
    pub aht: f64,
    /// Deployment marker, e.g. `v1.1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_change: Option<String>,
}

/// Per-cohort agent statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAudienceSegment {
    /// `Dimension: "Value"`
    pub segment: String,
    pub avg_transaction_value: f64,
    pub fcr: f64,
    /// 0.0 - 1.0
    pub sentiment_score: f64,
}

impl AgentAudienceSegment {
    /// Value part of the segment name with quotes removed.
    ///
    /// `Region Code: "US-West"` -> `US-West`. Falls back to the full name
    /// when there is no colon.
    #[must_use]
    pub fn short_label(&self) -> String {
        let value = self
            .segment
            .split_once(':')
            .map_or(self.segment.as_str(), |(_, v)| v);
        value.trim().replace('"', "")
    }
}

/// A deployed (or training) conversational agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: AgentId,
    pub project_id: ProjectId,
    pub name: String,
    pub avatar_url: String,
    pub use_case: UseCase,
    pub status: AgentStatus,
    pub deployment_type: DeploymentType,

    // Performance
    pub interactions: u64,
    pub fcr: f64,
    pub escalation_rate: f64,
    pub sentiment_score: f64,
    pub workflows_completed: u64,
    pub value_generated: f64,

    // Profile
    pub personality: String,
    pub backstory: String,
    pub greeting: String,
    pub voice_profile: VoiceProfile,
    pub tts_model: TtsModel,
    pub monthly_budget: f64,
    pub capabilities: Vec<Capability>,

    pub created_at: NaiveDate,

    pub performance_history: Vec<AgentPerformanceHistory>,
    pub audience_segments: Vec<AgentAudienceSegment>,
}

impl Agent {
    /// Re-apply the deployment invariant on the TTS model.
    #[inline]
    pub fn enforce_deployment_tts(&mut self) {
        if self.deployment_type == DeploymentType::UnityInternal {
            self.tts_model = TtsModel::GeminiTts;
        }
    }
}

/// Generated persona triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPersona {
    pub personality: String,
    pub backstory: String,
    pub greeting: String,
}

impl AgentPersona {
    /// Create persona
    #[inline]
    #[must_use]
    pub fn new(
        personality: impl Into<String>,
        backstory: impl Into<String>,
        greeting: impl Into<String>,
    ) -> Self {
        Self {
            personality: personality.into(),
            backstory: backstory.into(),
            greeting: greeting.into(),
        }
    }
}

/// Agent record assembled by the wizard, before the controller assigns
/// identity, ownership and counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDraft {
    pub name: String,
    pub use_case: UseCase,
    pub status: AgentStatus,
    pub personality: String,
    pub backstory: String,
    pub greeting: String,
    /// Data URI of the generated avatar, or empty
    pub avatar_url: String,
    pub deployment_type: DeploymentType,
    pub voice_profile: VoiceProfile,
    pub tts_model: TtsModel,
    pub monthly_budget: f64,
    pub capabilities: Vec<Capability>,
}

/// Parse a numeric text field, coercing empty or malformed input to zero.
#[must_use]
pub fn parse_budget(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_id_generation() {
        let a = AgentId::generate();
        let b = AgentId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("agent-"));
    }

    #[test]
    fn budget_parsing_is_lenient() {
        assert_eq!(parse_budget("5000"), 5000.0);
        assert_eq!(parse_budget(" 250.5 "), 250.5);
        assert_eq!(parse_budget(""), 0.0);
        assert_eq!(parse_budget("abc"), 0.0);
        assert_eq!(parse_budget("inf"), 0.0);
    }

    #[test]
    fn project_percentage_validation() {
        let mut project = Project {
            id: ProjectId::new("p"),
            name: "p".to_string(),
            status: ProjectStatus::Active,
            budget_usage: 50.0,
            fcr: 80.0,
            escalation_rate: 10.0,
            total_agents: 1,
            total_interactions: 10,
            estimated_roi: 0.0,
        };
        assert!(project.validate().is_ok());

        project.escalation_rate = 120.0;
        assert!(matches!(
            project.validate(),
            Err(PlatformError::InvalidPercentage { field: "escalationRate", .. })
        ));
    }

    #[test]
    fn segment_short_label() {
        let segment = AgentAudienceSegment {
            segment: "Region Code: \"US-West\"".to_string(),
            avg_transaction_value: 1.0,
            fcr: 1.0,
            sentiment_score: 0.5,
        };
        assert_eq!(segment.short_label(), "US-West");
    }

    #[test]
    fn capability_toggle_preserves_order() {
        let mut caps = vec![Capability::SentimentAnalysis];
        toggle_capability(&mut caps, Capability::MultiLanguage);
        assert_eq!(caps, vec![Capability::SentimentAnalysis, Capability::MultiLanguage]);
        toggle_capability(&mut caps, Capability::SentimentAnalysis);
        assert_eq!(caps, vec![Capability::MultiLanguage]);
    }

    #[test]
    fn enum_wire_names() {
        let json = serde_json::to_string(&DeploymentType::UnityInternal).unwrap();
        assert_eq!(json, "\"UNITY_Internal\"");
        let json = serde_json::to_string(&TtsModel::ElevenLabsV2).unwrap();
        assert_eq!(json, "\"ElevenLabs-v2\"");
        let json = serde_json::to_string(&UseCase::TechnicalSupport).unwrap();
        assert_eq!(json, "\"Technical Support\"");
    }

    #[test]
    fn internal_deployment_forces_tts() {
        assert_eq!(DeploymentType::UnityInternal.default_tts_model().as_str(), INTERNAL_TTS_MODEL);
        assert_eq!(DeploymentType::ExternalHybrid.default_tts_model(), TtsModel::ElevenLabsV2);
    }
}
