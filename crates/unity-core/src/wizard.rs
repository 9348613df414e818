//! Agent creation wizard
//!
//! A five-step state machine:
//!
//! ```text
//! Platform -> [Config] -> Persona -> Knowledge -> Deploy
//! ```
//!
//! `Config` is only visited for external/hybrid deployments. Leaving
//! `Persona` requires a name, a prompt and a persona generated for the
//! current prompt. Generation calls are split into `begin_*` / `finish_*`
//! pairs so the owner decides how the async work is driven; see
//! [`crate::session::WizardSession`].

use crate::config::PlatformConfig;
use crate::error::{GenerationError, ValidationError, WizardError};
use crate::generation::{
    AvatarImage, GenerationKind, GenerationSlot, GenerationTicket, Resolution,
};
use crate::types::{
    parse_budget, toggle_capability, AgentDraft, AgentPersona, AgentStatus, Capability,
    DeploymentType, TtsModel, UseCase, VoiceProfile,
};
use tokio_util::sync::CancellationToken;

/// Message set when the persona service fails
pub const PERSONA_FAILED_MESSAGE: &str = "Failed to generate persona. Please try again.";
/// Message set when the avatar service fails
pub const AVATAR_FAILED_MESSAGE: &str = "Failed to generate avatar. Please try again.";

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Platform,
    Config,
    Persona,
    Knowledge,
    Deploy,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Platform,
        WizardStep::Config,
        WizardStep::Persona,
        WizardStep::Knowledge,
        WizardStep::Deploy,
    ];

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Platform => "Expertise & Platform",
            WizardStep::Config => "External Configuration",
            WizardStep::Persona => "Persona & Voice",
            WizardStep::Knowledge => "Knowledge & Data",
            WizardStep::Deploy => "Deployment & Budget",
        }
    }

    /// Completion percentage shown on the progress bar
    #[must_use]
    pub fn progress(&self) -> u8 {
        match self {
            WizardStep::Platform => 20,
            WizardStep::Config => 40,
            WizardStep::Persona => 60,
            WizardStep::Knowledge => 80,
            WizardStep::Deploy => 100,
        }
    }
}

fn forward_target(from: WizardStep, deployment: DeploymentType) -> Option<WizardStep> {
    match from {
        WizardStep::Platform if deployment.is_external() => Some(WizardStep::Config),
        WizardStep::Platform | WizardStep::Config => Some(WizardStep::Persona),
        WizardStep::Persona => Some(WizardStep::Knowledge),
        WizardStep::Knowledge => Some(WizardStep::Deploy),
        WizardStep::Deploy => None,
    }
}

fn backward_target(from: WizardStep, deployment: DeploymentType) -> Option<WizardStep> {
    match from {
        WizardStep::Platform => None,
        WizardStep::Config => Some(WizardStep::Platform),
        WizardStep::Persona if deployment.is_external() => Some(WizardStep::Config),
        WizardStep::Persona => Some(WizardStep::Platform),
        WizardStep::Knowledge => Some(WizardStep::Persona),
        WizardStep::Deploy => Some(WizardStep::Knowledge),
    }
}

/// Steps reachable from `from` in one move, forward target first.
#[must_use]
pub fn allowed_transitions(from: WizardStep, deployment: DeploymentType) -> Vec<WizardStep> {
    forward_target(from, deployment)
        .into_iter()
        .chain(backward_target(from, deployment))
        .collect()
}

/// Check that `from -> to` is a single legal move.
///
/// # Errors
/// `WizardError::IllegalTransition` otherwise.
pub fn validate_transition(
    from: WizardStep,
    to: WizardStep,
    deployment: DeploymentType,
) -> Result<(), WizardError> {
    if allowed_transitions(from, deployment).contains(&to) {
        Ok(())
    } else {
        Err(WizardError::IllegalTransition { from, to })
    }
}

/// Outcome of [`CreateAgentWizard::back`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Moved to this step
    Moved(WizardStep),
    /// Already at the first step; the caller leaves the wizard
    Exit,
}

/// Canned personality prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamplePrompt {
    Fashion,
    Finance,
    Travel,
}

impl ExamplePrompt {
    pub const ALL: [ExamplePrompt; 3] = [
        ExamplePrompt::Fashion,
        ExamplePrompt::Finance,
        ExamplePrompt::Travel,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ExamplePrompt::Fashion => "Fashion",
            ExamplePrompt::Finance => "Finance",
            ExamplePrompt::Travel => "Travel",
        }
    }

    #[must_use]
    pub fn text(&self) -> &'static str {
        match self {
            ExamplePrompt::Fashion => "A friendly and empathetic agent for a high-end fashion brand. The agent should be knowledgeable about current trends and provide styling advice.",
            ExamplePrompt::Finance => "A professional and direct agent for a financial services company. The agent must prioritize security, be accurate with information, and never sound uncertain.",
            ExamplePrompt::Travel => "An enthusiastic and adventurous agent for a travel agency. The agent should be an expert in exotic destinations and inspire customers to book unique experiences.",
        }
    }
}

/// A persona request handed to whoever runs the generator
#[derive(Debug, Clone)]
pub struct PersonaRequest {
    pub ticket: GenerationTicket,
    pub token: CancellationToken,
    pub prompt: String,
}

/// An avatar request handed to whoever runs the generator
#[derive(Debug, Clone)]
pub struct AvatarRequest {
    pub ticket: GenerationTicket,
    pub token: CancellationToken,
    pub name: String,
    pub prompt: String,
}

/// Credentials and provider names for external/hybrid deployments.
///
/// All optional; only collected, never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalConfig {
    pub platform: String,
    pub voice_provider: String,
    pub platform_api_key: String,
    pub voice_api_key: String,
}

/// The wizard's transient state
#[derive(Debug)]
pub struct CreateAgentWizard {
    step: WizardStep,
    deployment_type: DeploymentType,
    external: ExternalConfig,
    name: String,
    use_case: UseCase,
    prompt: String,
    prompt_max_chars: usize,
    tts_model: TtsModel,
    capabilities: Vec<Capability>,
    monthly_budget: String,
    persona: GenerationSlot<AgentPersona>,
    avatar_slot: GenerationSlot<AvatarImage>,
    avatar: Option<AvatarImage>,
    message: Option<String>,
    lifetime: CancellationToken,
}

impl CreateAgentWizard {
    /// Fresh wizard at the `Platform` step
    #[must_use]
    pub fn new(config: &PlatformConfig) -> Self {
        let deployment_type = DeploymentType::default();
        Self {
            step: WizardStep::Platform,
            deployment_type,
            external: ExternalConfig::default(),
            name: String::new(),
            use_case: UseCase::default(),
            prompt: String::new(),
            prompt_max_chars: config.persona_prompt_max_chars,
            tts_model: deployment_type.default_tts_model(),
            capabilities: Vec::new(),
            monthly_budget: config.default_monthly_budget.clone(),
            persona: GenerationSlot::new(GenerationKind::Persona),
            avatar_slot: GenerationSlot::new(GenerationKind::Avatar),
            avatar: None,
            message: None,
            lifetime: CancellationToken::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[inline]
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    #[inline]
    #[must_use]
    pub fn deployment_type(&self) -> DeploymentType {
        self.deployment_type
    }

    #[inline]
    #[must_use]
    pub fn external(&self) -> &ExternalConfig {
        &self.external
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn use_case(&self) -> UseCase {
        self.use_case
    }

    #[inline]
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[inline]
    #[must_use]
    pub fn prompt_max_chars(&self) -> usize {
        self.prompt_max_chars
    }

    #[inline]
    #[must_use]
    pub fn tts_model(&self) -> TtsModel {
        self.tts_model
    }

    #[inline]
    #[must_use]
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    #[inline]
    #[must_use]
    pub fn monthly_budget(&self) -> &str {
        &self.monthly_budget
    }

    /// Persona generated for the current prompt
    #[inline]
    #[must_use]
    pub fn persona(&self) -> Option<&AgentPersona> {
        self.persona.value()
    }

    #[inline]
    #[must_use]
    pub fn avatar(&self) -> Option<&AvatarImage> {
        self.avatar.as_ref()
    }

    #[must_use]
    pub fn is_generating(&self, kind: GenerationKind) -> bool {
        match kind {
            GenerationKind::Persona => self.persona.is_pending(),
            GenerationKind::Avatar => self.avatar_slot.is_pending(),
        }
    }

    /// Token cancelled when the wizard is dropped
    #[must_use]
    pub fn lifetime(&self) -> &CancellationToken {
        &self.lifetime
    }

    // ---- navigation ----

    /// Advance one step.
    ///
    /// Leaving `Persona` needs a name that is not blank after trimming, a
    /// non-empty prompt and a persona for that prompt.
    ///
    /// # Errors
    /// `WizardError::Validation` when leaving `Persona` without a name,
    /// prompt and persona (the message is also set), and
    /// `WizardError::IllegalTransition` at `Deploy`.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        self.message = None;
        let from = self.step;

        if from == WizardStep::Persona {
            self.check_persona_step()?;
        }

        let to = forward_target(from, self.deployment_type)
            .ok_or(WizardError::IllegalTransition { from, to: from })?;
        validate_transition(from, to, self.deployment_type)?;

        tracing::debug!(?from, ?to, "Wizard advanced");
        self.step = to;
        Ok(to)
    }

    /// Step back, or report that the caller should leave the wizard.
    pub fn back(&mut self) -> BackOutcome {
        self.message = None;
        let from = self.step;
        match backward_target(from, self.deployment_type) {
            Some(to) => {
                tracing::debug!(?from, ?to, "Wizard stepped back");
                self.step = to;
                BackOutcome::Moved(to)
            }
            None => BackOutcome::Exit,
        }
    }

    fn check_persona_step(&mut self) -> Result<(), WizardError> {
        let failure = if self.name.trim().is_empty() || self.prompt.is_empty() {
            Some(ValidationError::MissingNameOrPersonality)
        } else if self.persona.value().is_none() {
            Some(ValidationError::PersonaNotGenerated)
        } else {
            None
        };
        match failure {
            Some(err) => Err(self.reject(err)),
            None => Ok(()),
        }
    }

    fn reject(&mut self, err: ValidationError) -> WizardError {
        self.message = Some(err.to_string());
        WizardError::Validation(err)
    }

    // ---- inputs ----

    /// Select the deployment mode; resets the TTS model to its default.
    pub fn set_deployment_type(&mut self, deployment_type: DeploymentType) {
        self.deployment_type = deployment_type;
        self.tts_model = deployment_type.default_tts_model();
    }

    pub fn set_external_platform(&mut self, platform: impl Into<String>) {
        self.external.platform = platform.into();
    }

    pub fn set_external_voice_provider(&mut self, provider: impl Into<String>) {
        self.external.voice_provider = provider.into();
    }

    pub fn set_platform_api_key(&mut self, key: impl Into<String>) {
        self.external.platform_api_key = key.into();
    }

    pub fn set_voice_api_key(&mut self, key: impl Into<String>) {
        self.external.voice_api_key = key.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_use_case(&mut self, use_case: UseCase) {
        self.use_case = use_case;
    }

    /// Replace the personality prompt, truncated to the configured cap.
    ///
    /// Invalidates any generated persona and cancels a pending persona call.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        let prompt = prompt.into();
        self.prompt = if prompt.chars().count() > self.prompt_max_chars {
            prompt.chars().take(self.prompt_max_chars).collect()
        } else {
            prompt
        };
        if self.persona.is_pending() {
            tracing::debug!("Prompt edited; cancelling pending persona generation");
        }
        self.persona.reset();
    }

    pub fn apply_example_prompt(&mut self, example: ExamplePrompt) {
        self.set_prompt(example.text());
    }

    /// Choose the TTS model.
    ///
    /// # Errors
    /// `WizardError::TtsLocked` for internal deployments.
    pub fn set_tts_model(&mut self, model: TtsModel) -> Result<(), WizardError> {
        if !self.deployment_type.is_external() {
            return Err(WizardError::TtsLocked);
        }
        self.tts_model = model;
        Ok(())
    }

    pub fn toggle_capability(&mut self, capability: Capability) {
        toggle_capability(&mut self.capabilities, capability);
    }

    /// Raw budget text; parsed on submit
    pub fn set_monthly_budget(&mut self, budget: impl Into<String>) {
        self.monthly_budget = budget.into();
    }

    // ---- generation ----

    /// Start a persona generation for the current prompt.
    ///
    /// # Errors
    /// `WizardError::Busy` while one is pending, `WizardError::Validation`
    /// when the prompt is empty.
    pub fn begin_persona(&mut self) -> Result<PersonaRequest, WizardError> {
        if self.persona.is_pending() {
            return Err(WizardError::Busy(GenerationKind::Persona));
        }
        if self.prompt.is_empty() {
            return Err(self.reject(ValidationError::MissingPrompt));
        }
        let (ticket, token) = self
            .persona
            .begin(&self.lifetime)
            .ok_or(WizardError::Busy(GenerationKind::Persona))?;
        self.message = None;
        tracing::debug!(?ticket, "Persona generation started");
        Ok(PersonaRequest {
            ticket,
            token,
            prompt: self.prompt.clone(),
        })
    }

    /// Apply a persona result. Failures clear the persona and set a message.
    pub fn finish_persona(
        &mut self,
        ticket: GenerationTicket,
        result: Result<AgentPersona, GenerationError>,
    ) -> Resolution {
        let failure = result.as_ref().err().cloned();
        let resolution = self.persona.resolve(ticket, result);
        match resolution {
            Resolution::Applied => tracing::debug!(?ticket, "Persona generated"),
            Resolution::Failed => {
                if let Some(err) = failure {
                    tracing::warn!(error = %err, "Persona generation failed");
                }
                self.message = Some(PERSONA_FAILED_MESSAGE.to_string());
            }
            Resolution::Stale => tracing::debug!(?ticket, "Discarded stale persona result"),
        }
        resolution
    }

    /// Start an avatar generation for the current name and prompt.
    ///
    /// # Errors
    /// `WizardError::Busy` while one is pending, `WizardError::Validation`
    /// when the name is blank (whitespace only counts as blank) or the
    /// prompt is empty.
    pub fn begin_avatar(&mut self) -> Result<AvatarRequest, WizardError> {
        if self.avatar_slot.is_pending() {
            return Err(WizardError::Busy(GenerationKind::Avatar));
        }
        if self.name.trim().is_empty() || self.prompt.is_empty() {
            return Err(self.reject(ValidationError::MissingAvatarInputs));
        }
        let (ticket, token) = self
            .avatar_slot
            .begin(&self.lifetime)
            .ok_or(WizardError::Busy(GenerationKind::Avatar))?;
        self.message = None;
        tracing::debug!(?ticket, "Avatar generation started");
        Ok(AvatarRequest {
            ticket,
            token,
            name: self.name.clone(),
            prompt: self.prompt.clone(),
        })
    }

    /// Apply an avatar result. Failures keep the previous avatar.
    pub fn finish_avatar(
        &mut self,
        ticket: GenerationTicket,
        result: Result<AvatarImage, GenerationError>,
    ) -> Resolution {
        let failure = result.as_ref().err().cloned();
        let resolution = self.avatar_slot.resolve(ticket, result);
        match resolution {
            Resolution::Applied => {
                self.avatar = self.avatar_slot.value().cloned();
                tracing::debug!(?ticket, "Avatar generated");
            }
            Resolution::Failed => {
                if let Some(err) = failure {
                    tracing::warn!(error = %err, "Avatar generation failed");
                }
                self.message = Some(AVATAR_FAILED_MESSAGE.to_string());
            }
            Resolution::Stale => tracing::debug!(?ticket, "Discarded stale avatar result"),
        }
        resolution
    }

    // ---- submission ----

    /// Build the draft agent.
    ///
    /// # Errors
    /// `WizardError::NotAtStep` before `Deploy`, `WizardError::Busy` while a
    /// generation is pending, `WizardError::Validation` without a persona.
    pub fn submit(&mut self) -> Result<AgentDraft, WizardError> {
        if self.step != WizardStep::Deploy {
            return Err(WizardError::NotAtStep {
                expected: WizardStep::Deploy,
                actual: self.step,
            });
        }
        for slot_kind in [GenerationKind::Persona, GenerationKind::Avatar] {
            if self.is_generating(slot_kind) {
                return Err(WizardError::Busy(slot_kind));
            }
        }
        let Some(persona) = self.persona.value().cloned() else {
            return Err(self.reject(ValidationError::PersonaRequiredForSubmit));
        };
        self.message = None;

        let tts_model = if self.deployment_type.is_external() {
            self.tts_model
        } else {
            self.deployment_type.default_tts_model()
        };

        let draft = AgentDraft {
            name: self.name.clone(),
            use_case: self.use_case,
            status: AgentStatus::Training,
            personality: persona.personality,
            backstory: persona.backstory,
            greeting: persona.greeting,
            avatar_url: self.avatar.as_ref().map(AvatarImage::data_uri).unwrap_or_default(),
            deployment_type: self.deployment_type,
            voice_profile: VoiceProfile::default(),
            tts_model,
            monthly_budget: parse_budget(&self.monthly_budget),
            capabilities: self.capabilities.clone(),
        };
        tracing::info!(name = %draft.name, deployment = ?draft.deployment_type, "Agent draft submitted");
        Ok(draft)
    }
}

impl Default for CreateAgentWizard {
    fn default() -> Self {
        Self::new(&PlatformConfig::default())
    }
}

impl Drop for CreateAgentWizard {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}
