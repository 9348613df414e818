//! Persona and avatar generation
//!
//! The two generation services are opaque async collaborators. Each wizard
//! call site owns a [`GenerationSlot`], which tags the call as
//! `Idle | Pending | Succeeded | Failed`, hands out a ticket per request and
//! a cancellation token scoped to the owner. A result is applied only if it
//! carries the ticket of the currently pending request.

use crate::error::GenerationError;
use crate::types::AgentPersona;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio_util::sync::CancellationToken;

/// Which generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationKind {
    Persona,
    Avatar,
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationKind::Persona => f.write_str("persona"),
            GenerationKind::Avatar => f.write_str("avatar"),
        }
    }
}

/// Generates a persona from a free-text description
#[async_trait]
pub trait PersonaGenerator: Send + Sync {
    async fn generate_persona(&self, prompt: &str) -> Result<AgentPersona, GenerationError>;
}

/// Generates an avatar image for a named agent
#[async_trait]
pub trait AvatarGenerator: Send + Sync {
    async fn generate_avatar(&self, name: &str, prompt: &str) -> Result<AvatarImage, GenerationError>;
}

/// Base64-encoded PNG bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    base64: String,
}

impl AvatarImage {
    /// Wrap a base64 payload, checking that it decodes.
    ///
    /// # Errors
    /// `GenerationError::InvalidImage` if the payload is not valid base64.
    pub fn from_base64(payload: impl Into<String>) -> Result<Self, GenerationError> {
        let base64 = payload.into();
        STANDARD
            .decode(base64.as_bytes())
            .map_err(|e| GenerationError::InvalidImage(e.to_string()))?;
        Ok(Self { base64 })
    }

    /// Encode raw image bytes
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            base64: STANDARD.encode(bytes),
        }
    }

    #[inline]
    #[must_use]
    pub fn as_base64(&self) -> &str {
        &self.base64
    }

    /// `data:image/png;base64,...` for use as an avatar URL
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.base64)
    }
}

/// Identifies one request on a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationTicket(u64);

/// State tag of a generation slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationState<T> {
    Idle,
    Pending(GenerationTicket),
    Succeeded(T),
    Failed(String),
}

/// How a returned result was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Result stored in the slot
    Applied,
    /// Failure recorded in the slot
    Failed,
    /// Ticket no longer current; result dropped
    Stale,
}

/// One independently gated generation call site
#[derive(Debug)]
pub struct GenerationSlot<T> {
    kind: GenerationKind,
    state: GenerationState<T>,
    issued: u64,
    cancel: Option<CancellationToken>,
}

impl<T> GenerationSlot<T> {
    #[must_use]
    pub fn new(kind: GenerationKind) -> Self {
        Self {
            kind,
            state: GenerationState::Idle,
            issued: 0,
            cancel: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> GenerationKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &GenerationState<T> {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, GenerationState::Pending(_))
    }

    /// Successful value, if any
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match &self.state {
            GenerationState::Succeeded(v) => Some(v),
            _ => None,
        }
    }

    /// Start a request. Returns `None` while another is pending.
    ///
    /// The returned token is a child of `scope`, so cancelling the owner's
    /// scope cancels the request too.
    pub fn begin(&mut self, scope: &CancellationToken) -> Option<(GenerationTicket, CancellationToken)> {
        if self.is_pending() {
            return None;
        }
        self.issued += 1;
        let ticket = GenerationTicket(self.issued);
        let token = scope.child_token();
        self.cancel = Some(token.clone());
        self.state = GenerationState::Pending(ticket);
        Some((ticket, token))
    }

    /// Apply a result if `ticket` is still the pending request.
    pub fn resolve(&mut self, ticket: GenerationTicket, result: Result<T, GenerationError>) -> Resolution {
        if !matches!(self.state, GenerationState::Pending(current) if current == ticket) {
            return Resolution::Stale;
        }
        self.cancel = None;
        match result {
            Ok(value) => {
                self.state = GenerationState::Succeeded(value);
                Resolution::Applied
            }
            Err(e) => {
                self.state = GenerationState::Failed(e.to_string());
                Resolution::Failed
            }
        }
    }

    /// Drop any value and cancel any pending request.
    pub fn reset(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.state = GenerationState::Idle;
    }
}

/// Offline persona generator: derives a persona from the prompt text.
#[derive(Debug, Clone, Default)]
pub struct TemplatePersonaGenerator;

#[async_trait]
impl PersonaGenerator for TemplatePersonaGenerator {
    async fn generate_persona(&self, prompt: &str) -> Result<AgentPersona, GenerationError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerationError::Rejected("empty prompt".to_string()));
        }
        let summary: String = prompt
            .split(['.', '\n'])
            .next()
            .unwrap_or(prompt)
            .trim()
            .to_string();
        Ok(AgentPersona::new(
            summary.clone(),
            format!("Created to serve customers as {}.", lowercase_first(&summary)),
            "Hello! How can I help you today?".to_string(),
        ))
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Offline avatar generator: a fixed 1x1 PNG.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderAvatarGenerator;

const PLACEHOLDER_PNG: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

#[async_trait]
impl AvatarGenerator for PlaceholderAvatarGenerator {
    async fn generate_avatar(&self, name: &str, _prompt: &str) -> Result<AvatarImage, GenerationError> {
        if name.trim().is_empty() {
            return Err(GenerationError::Rejected("empty name".to_string()));
        }
        AvatarImage::from_base64(PLACEHOLDER_PNG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_rejects_second_begin_while_pending() {
        let scope = CancellationToken::new();
        let mut slot: GenerationSlot<u32> = GenerationSlot::new(GenerationKind::Persona);

        assert!(slot.begin(&scope).is_some());
        assert!(slot.begin(&scope).is_none());
    }

    #[test]
    fn slot_discards_stale_ticket() {
        let scope = CancellationToken::new();
        let mut slot: GenerationSlot<u32> = GenerationSlot::new(GenerationKind::Persona);

        let (first, token) = slot.begin(&scope).unwrap();
        slot.reset();
        assert!(token.is_cancelled());

        let (second, _) = slot.begin(&scope).unwrap();
        assert_eq!(slot.resolve(first, Ok(1)), Resolution::Stale);
        assert!(slot.is_pending());
        assert_eq!(slot.resolve(second, Ok(2)), Resolution::Applied);
        assert_eq!(slot.value(), Some(&2));
    }

    #[test]
    fn slot_records_failure() {
        let scope = CancellationToken::new();
        let mut slot: GenerationSlot<u32> = GenerationSlot::new(GenerationKind::Avatar);
        let (ticket, _) = slot.begin(&scope).unwrap();

        let resolution = slot.resolve(ticket, Err(GenerationError::Rejected("down".to_string())));
        assert_eq!(resolution, Resolution::Failed);
        assert!(matches!(slot.state(), GenerationState::Failed(_)));
        assert!(slot.value().is_none());
    }

    #[test]
    fn scope_cancellation_reaches_request() {
        let scope = CancellationToken::new();
        let mut slot: GenerationSlot<u32> = GenerationSlot::new(GenerationKind::Avatar);
        let (_, token) = slot.begin(&scope).unwrap();

        scope.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn avatar_image_validation() {
        assert!(AvatarImage::from_base64("not base64!!").is_err());
        let image = AvatarImage::from_bytes(b"png");
        assert_eq!(image.data_uri(), format!("data:image/png;base64,{}", image.as_base64()));
    }

    #[tokio::test]
    async fn template_persona_uses_first_sentence() {
        let persona = TemplatePersonaGenerator
            .generate_persona("Friendly and upbeat. Knows fashion trends.")
            .await
            .unwrap();
        assert_eq!(persona.personality, "Friendly and upbeat");
        assert!(persona.backstory.contains("friendly and upbeat"));
    }

    #[tokio::test]
    async fn placeholder_avatar_decodes() {
        let image = PlaceholderAvatarGenerator
            .generate_avatar("Athena", "prompt")
            .await
            .unwrap();
        assert!(image.data_uri().starts_with("data:image/png;base64,"));
    }
}
