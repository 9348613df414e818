//! Error types for UNITY Core
//!
//! Provides error handling for:
//! - Client-side wizard validation (recoverable, surfaced as messages)
//! - Persona / avatar generation failures
//! - Platform controller mutations
//! - Configuration loading

use crate::generation::GenerationKind;
use crate::types::{AgentId, ProjectId};
use crate::wizard::WizardStep;

/// Main UNITY error type
#[derive(Debug, thiserror::Error)]
pub enum UnityError {
    /// Wizard rejected an action
    #[error("wizard error: {0}")]
    Wizard(#[from] WizardError),

    /// Generation service failed
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Platform controller rejected a mutation
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl UnityError {
    /// Whether the caller can correct the input and try again.
    ///
    /// Every wizard and generation failure leaves the wizard interactive.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Wizard(_) | Self::Generation(_) => true,
            Self::Platform(e) => matches!(
                e,
                PlatformError::NoProjectSelected | PlatformError::ProjectNotFound(_)
            ),
            Self::Config(_) => false,
        }
    }
}

/// Client-side validation failures.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in Agent Name and Personality.")]
    MissingNameOrPersonality,

    #[error("Please generate the agent persona before proceeding.")]
    PersonaNotGenerated,

    #[error("Please provide a personality description first.")]
    MissingPrompt,

    #[error("Please provide a name and personality before generating an avatar.")]
    MissingAvatarInputs,

    #[error("Please generate a persona before creating the agent.")]
    PersonaRequiredForSubmit,
}

/// Wizard action errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// Input failed validation; the same text is set as the wizard message
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A generation call of this kind is already outstanding
    #[error("{0} generation already in progress")]
    Busy(GenerationKind),

    /// TTS model is fixed for internally hosted agents
    #[error("TTS model is fixed for UNITY internal deployments")]
    TtsLocked,

    /// Action is only valid at a different step
    #[error("action requires step {expected:?}, wizard is at {actual:?}")]
    NotAtStep {
        expected: WizardStep,
        actual: WizardStep,
    },

    /// No legal transition between the two steps
    #[error("illegal wizard transition: {from:?} -> {to:?}")]
    IllegalTransition { from: WizardStep, to: WizardStep },
}

impl WizardError {
    /// Message suitable for the wizard's message line.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Generation service errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The service rejected or failed the request
    #[error("generation rejected: {0}")]
    Rejected(String),

    /// The call was cancelled before it completed
    #[error("generation cancelled")]
    Cancelled,

    /// Avatar payload was not valid base64
    #[error("invalid avatar image: {0}")]
    InvalidImage(String),
}

impl GenerationError {
    /// All generation failures may be retried by the user.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Platform controller errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlatformError {
    /// `add_agent` requires a selected project
    #[error("no project selected")]
    NoProjectSelected,

    /// Referenced project does not exist
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Agent references a project that does not exist
    #[error("agent {agent} references unknown project {project}")]
    OrphanAgent { agent: AgentId, project: ProjectId },

    /// A percentage field is outside [0, 100]
    #[error("{field} out of range: {value}")]
    InvalidPercentage { field: &'static str, value: f64 },
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not read the config file
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for `PlatformConfig`
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed values are inconsistent
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_text() {
        let err = WizardError::from(ValidationError::MissingNameOrPersonality);
        assert_eq!(err.user_message(), "Please fill in Agent Name and Personality.");
    }

    #[test]
    fn unity_error_recoverable() {
        let err = UnityError::from(GenerationError::Rejected("quota".to_string()));
        assert!(err.is_recoverable());

        let err = UnityError::from(ConfigError::Invalid("zero interval".to_string()));
        assert!(!err.is_recoverable());

        let err = UnityError::from(PlatformError::NoProjectSelected);
        assert!(err.is_recoverable());
    }

    #[test]
    fn generation_error_retryable() {
        assert!(GenerationError::Rejected("x".to_string()).is_retryable());
        assert!(!GenerationError::Cancelled.is_retryable());
    }

    #[test]
    fn busy_display() {
        let err = WizardError::Busy(GenerationKind::Avatar);
        assert!(err.to_string().contains("avatar"));
    }
}
