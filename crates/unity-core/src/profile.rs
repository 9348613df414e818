//! Agent profile editing and chart data
//!
//! The editor works on a cloned buffer of the editable fields. Saving
//! produces an [`AgentProfileUpdate`] holding only what changed, which the
//! platform applies in place.

use crate::error::WizardError;
use crate::types::{
    parse_budget, toggle_capability, Agent, AgentAudienceSegment, AgentPerformanceHistory,
    Capability, DeploymentType, TtsModel, VoiceGender, VoiceProfile, VoiceRegion, VoiceStyle,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Partial update of an agent's editable profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AgentProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backstory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_profile: Option<VoiceProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts_model: Option<TtsModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<Capability>>,
}

impl AgentProfileUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = Some(personality.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = Some(backstory.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_voice_profile(mut self, voice: VoiceProfile) -> Self {
        self.voice_profile = Some(voice);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_tts_model(mut self, model: TtsModel) -> Self {
        self.tts_model = Some(model);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_monthly_budget(mut self, budget: f64) -> Self {
        self.monthly_budget = Some(budget);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the present fields into `agent`, then re-apply the
    /// deployment's TTS constraint.
    pub fn apply_to(&self, agent: &mut Agent) {
        if let Some(v) = &self.personality {
            agent.personality.clone_from(v);
        }
        if let Some(v) = &self.backstory {
            agent.backstory.clone_from(v);
        }
        if let Some(v) = &self.greeting {
            agent.greeting.clone_from(v);
        }
        if let Some(v) = self.voice_profile {
            agent.voice_profile = v;
        }
        if let Some(v) = self.tts_model {
            agent.tts_model = v;
        }
        if let Some(v) = self.monthly_budget {
            agent.monthly_budget = v;
        }
        if let Some(v) = &self.capabilities {
            agent.capabilities.clone_from(v);
        }
        agent.enforce_deployment_tts();
    }
}

#[derive(Debug, Clone, PartialEq)]
struct EditableFields {
    personality: String,
    backstory: String,
    greeting: String,
    voice_profile: VoiceProfile,
    tts_model: TtsModel,
    monthly_budget: f64,
    capabilities: Vec<Capability>,
}

impl EditableFields {
    fn from_agent(agent: &Agent) -> Self {
        Self {
            personality: agent.personality.clone(),
            backstory: agent.backstory.clone(),
            greeting: agent.greeting.clone(),
            voice_profile: agent.voice_profile,
            tts_model: agent.tts_model,
            monthly_budget: agent.monthly_budget,
            capabilities: agent.capabilities.clone(),
        }
    }
}

/// Edit buffer for one agent
#[derive(Debug, Clone)]
pub struct AgentProfileEditor {
    deployment_type: DeploymentType,
    original: EditableFields,
    buffer: EditableFields,
}

impl AgentProfileEditor {
    #[must_use]
    pub fn open(agent: &Agent) -> Self {
        let fields = EditableFields::from_agent(agent);
        Self {
            deployment_type: agent.deployment_type,
            original: fields.clone(),
            buffer: fields,
        }
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.original != self.buffer
    }

    pub fn set_personality(&mut self, text: impl Into<String>) {
        self.buffer.personality = text.into();
    }

    pub fn set_backstory(&mut self, text: impl Into<String>) {
        self.buffer.backstory = text.into();
    }

    pub fn set_greeting(&mut self, text: impl Into<String>) {
        self.buffer.greeting = text.into();
    }

    pub fn set_voice_gender(&mut self, gender: VoiceGender) {
        self.buffer.voice_profile.gender = gender;
    }

    pub fn set_voice_region(&mut self, region: VoiceRegion) {
        self.buffer.voice_profile.region = region;
    }

    pub fn set_voice_style(&mut self, style: VoiceStyle) {
        self.buffer.voice_profile.style = style;
    }

    /// # Errors
    /// `WizardError::TtsLocked` for internally hosted agents.
    pub fn set_tts_model(&mut self, model: TtsModel) -> Result<(), WizardError> {
        if !self.deployment_type.is_external() {
            return Err(WizardError::TtsLocked);
        }
        self.buffer.tts_model = model;
        Ok(())
    }

    /// Budget text, coerced like the wizard's budget field
    pub fn set_monthly_budget(&mut self, text: &str) {
        self.buffer.monthly_budget = parse_budget(text);
    }

    pub fn toggle_capability(&mut self, capability: Capability) {
        toggle_capability(&mut self.buffer.capabilities, capability);
    }

    /// Discard edits
    pub fn cancel(&mut self) {
        self.buffer = self.original.clone();
    }

    /// Changed fields as an update; the buffer becomes the new baseline.
    #[allow(clippy::float_cmp)]
    pub fn save(&mut self) -> AgentProfileUpdate {
        let (old, new) = (&self.original, &self.buffer);

        let update = AgentProfileUpdate {
            personality: (old.personality != new.personality).then(|| new.personality.clone()),
            backstory: (old.backstory != new.backstory).then(|| new.backstory.clone()),
            greeting: (old.greeting != new.greeting).then(|| new.greeting.clone()),
            voice_profile: (old.voice_profile != new.voice_profile).then_some(new.voice_profile),
            tts_model: (old.tts_model != new.tts_model).then_some(new.tts_model),
            monthly_budget: (old.monthly_budget != new.monthly_budget).then_some(new.monthly_budget),
            capabilities: (old.capabilities != new.capabilities).then(|| new.capabilities.clone()),
        };
        self.original = self.buffer.clone();
        update
    }
}

/// One chart point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Vertical marker on the performance charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionMarker {
    pub date: NaiveDate,
    pub label: String,
}

/// FCR, escalation and AHT series with their version markers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceSeries {
    pub fcr: Vec<SeriesPoint>,
    pub escalation: Vec<SeriesPoint>,
    pub aht: Vec<SeriesPoint>,
    pub markers: Vec<VersionMarker>,
}

impl PerformanceSeries {
    #[must_use]
    pub fn from_history(history: &[AgentPerformanceHistory]) -> Self {
        let series = |value: fn(&AgentPerformanceHistory) -> f64| {
            history
                .iter()
                .map(|h| SeriesPoint {
                    date: h.date,
                    value: value(h),
                })
                .collect()
        };
        Self {
            fcr: series(|h| h.fcr),
            escalation: series(|h| h.escalation_rate),
            aht: series(|h| h.aht),
            markers: history
                .iter()
                .filter_map(|h| {
                    h.version_change.as_ref().map(|label| VersionMarker {
                        date: h.date,
                        label: label.clone(),
                    })
                })
                .collect(),
        }
    }
}

/// Grouped bar for one audience segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentBar {
    pub label: String,
    pub fcr: f64,
    /// Sentiment scaled to 0-100
    pub sentiment: f64,
}

/// Audience segmentation chart data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentBars(pub Vec<SegmentBar>);

impl SegmentBars {
    #[must_use]
    pub fn from_segments(segments: &[AgentAudienceSegment]) -> Self {
        Self(
            segments
                .iter()
                .map(|s| SegmentBar {
                    label: s.short_label(),
                    fcr: s.fcr,
                    sentiment: s.sentiment_score * 100.0,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_agents;

    fn athena() -> Agent {
        seed_agents().remove(0)
    }

    #[test]
    fn save_reports_only_changes() {
        let agent = athena();
        let mut editor = AgentProfileEditor::open(&agent);
        editor.set_backstory("Now handles refunds too.");
        editor.toggle_capability(Capability::MultiLanguage);

        let update = editor.save();
        assert_eq!(update.backstory.as_deref(), Some("Now handles refunds too."));
        assert!(update.personality.is_none());
        assert!(update.monthly_budget.is_none());
        assert_eq!(
            update.capabilities,
            Some(vec![
                Capability::SentimentAnalysis,
                Capability::RealTimeDataLookup,
                Capability::MultiLanguage
            ])
        );
        assert!(!editor.is_dirty());
    }

    #[test]
    fn cancel_reverts_buffer() {
        let mut editor = AgentProfileEditor::open(&athena());
        editor.set_greeting("Yo");
        editor.set_monthly_budget("abc");
        assert!(editor.is_dirty());

        editor.cancel();
        assert!(!editor.is_dirty());
        assert!(editor.save().is_empty());
    }

    #[test]
    fn internal_agent_tts_locked() {
        let mut editor = AgentProfileEditor::open(&athena());
        assert_eq!(
            editor.set_tts_model(TtsModel::ElevenLabsV2),
            Err(WizardError::TtsLocked)
        );
    }

    #[test]
    fn update_reapplies_tts_constraint() {
        let mut agent = athena();
        AgentProfileUpdate::new()
            .with_tts_model(TtsModel::ElevenLabsV2)
            .apply_to(&mut agent);
        assert_eq!(agent.tts_model, TtsModel::GeminiTts);
    }

    #[test]
    fn chart_series_follow_history() {
        let agent = athena();
        let series = PerformanceSeries::from_history(&agent.performance_history);
        assert_eq!(series.fcr.len(), 31);
        assert_eq!(series.markers.len(), 1);
        assert_eq!(series.markers[0].label, "v1.1");

        let bars = SegmentBars::from_segments(&agent.audience_segments);
        assert_eq!(bars.0[1].label, "US-West");
        assert!(bars.0.iter().all(|b| (60.0..95.0).contains(&b.sentiment)));
    }

    #[test]
    fn update_rejects_unknown_keys() {
        let update: AgentProfileUpdate =
            serde_json::from_str(r#"{"greeting":"Hi","monthlyBudget":1200.0}"#).unwrap();
        assert_eq!(update.greeting.as_deref(), Some("Hi"));
        assert_eq!(update.monthly_budget, Some(1200.0));

        let typo = serde_json::from_str::<AgentProfileUpdate>(r#"{"greting":"Hi"}"#);
        assert!(typo.is_err());
        let foreign = serde_json::from_str::<AgentProfileUpdate>(r#"{"interactions":5}"#);
        assert!(foreign.is_err());
    }
}
