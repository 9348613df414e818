//! Async wizard session
//!
//! Runs persona and avatar generation as tokio tasks on behalf of a
//! [`CreateAgentWizard`]. Results come back over a channel and are applied
//! by the owner, one at a time, the same way a UI event loop would.

use crate::config::PlatformConfig;
use crate::error::{GenerationError, WizardError};
use crate::generation::{
    AvatarGenerator, AvatarImage, GenerationKind, GenerationTicket, PersonaGenerator, Resolution,
};
use crate::types::{AgentDraft, AgentPersona};
use crate::wizard::CreateAgentWizard;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A finished generation task
#[derive(Debug)]
pub enum GenerationOutcome {
    Persona {
        ticket: GenerationTicket,
        result: Result<AgentPersona, GenerationError>,
    },
    Avatar {
        ticket: GenerationTicket,
        result: Result<AvatarImage, GenerationError>,
    },
}

impl GenerationOutcome {
    #[must_use]
    pub fn kind(&self) -> GenerationKind {
        match self {
            GenerationOutcome::Persona { .. } => GenerationKind::Persona,
            GenerationOutcome::Avatar { .. } => GenerationKind::Avatar,
        }
    }
}

/// A wizard plus the generators and channel that drive it
pub struct WizardSession {
    wizard: CreateAgentWizard,
    persona_generator: Arc<dyn PersonaGenerator>,
    avatar_generator: Arc<dyn AvatarGenerator>,
    tx: mpsc::UnboundedSender<GenerationOutcome>,
    rx: mpsc::UnboundedReceiver<GenerationOutcome>,
}

impl std::fmt::Debug for WizardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardSession")
            .field("wizard", &self.wizard)
            .finish_non_exhaustive()
    }
}

impl WizardSession {
    #[must_use]
    pub fn new(
        config: &PlatformConfig,
        persona_generator: Arc<dyn PersonaGenerator>,
        avatar_generator: Arc<dyn AvatarGenerator>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            wizard: CreateAgentWizard::new(config),
            persona_generator,
            avatar_generator,
            tx,
            rx,
        }
    }

    #[inline]
    #[must_use]
    pub fn wizard(&self) -> &CreateAgentWizard {
        &self.wizard
    }

    /// Mutable access for inputs and navigation
    #[inline]
    pub fn wizard_mut(&mut self) -> &mut CreateAgentWizard {
        &mut self.wizard
    }

    /// Spawn a persona generation for the current prompt.
    ///
    /// # Errors
    /// As [`CreateAgentWizard::begin_persona`].
    pub fn generate_persona(&mut self) -> Result<GenerationTicket, WizardError> {
        let request = self.wizard.begin_persona()?;
        let generator = Arc::clone(&self.persona_generator);
        let tx = self.tx.clone();
        let ticket = request.ticket;

        tokio::spawn(async move {
            let prompt = request.prompt;
            let result = run_guarded(request.token, async move {
                generator.generate_persona(&prompt).await
            })
            .await;
            // Receiver gone means the session was dropped.
            let _ = tx.send(GenerationOutcome::Persona { ticket, result });
        });

        Ok(ticket)
    }

    /// Spawn an avatar generation for the current name and prompt.
    ///
    /// # Errors
    /// As [`CreateAgentWizard::begin_avatar`].
    pub fn generate_avatar(&mut self) -> Result<GenerationTicket, WizardError> {
        let request = self.wizard.begin_avatar()?;
        let generator = Arc::clone(&self.avatar_generator);
        let tx = self.tx.clone();
        let ticket = request.ticket;

        tokio::spawn(async move {
            let (name, prompt) = (request.name, request.prompt);
            let result = run_guarded(request.token, async move {
                generator.generate_avatar(&name, &prompt).await
            })
            .await;
            let _ = tx.send(GenerationOutcome::Avatar { ticket, result });
        });

        Ok(ticket)
    }

    /// Whether any generation is outstanding
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.wizard.is_generating(GenerationKind::Persona)
            || self.wizard.is_generating(GenerationKind::Avatar)
    }

    /// Wait for the next finished task and apply it.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn next_outcome(&mut self) -> Option<(GenerationKind, Resolution)> {
        if !self.has_pending() {
            return None;
        }
        let outcome = self.rx.recv().await?;
        Some(self.apply(outcome))
    }

    /// Wait until no generation is pending, applying every outcome.
    pub async fn settle(&mut self) -> Vec<(GenerationKind, Resolution)> {
        let mut applied = Vec::new();
        while let Some(resolution) = self.next_outcome().await {
            applied.push(resolution);
        }
        applied
    }

    /// Apply every outcome that has already arrived, without waiting.
    pub fn drain_outcomes(&mut self) -> Vec<(GenerationKind, Resolution)> {
        let mut applied = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            applied.push(self.apply(outcome));
        }
        applied
    }

    fn apply(&mut self, outcome: GenerationOutcome) -> (GenerationKind, Resolution) {
        let kind = outcome.kind();
        let resolution = match outcome {
            GenerationOutcome::Persona { ticket, result } => self.wizard.finish_persona(ticket, result),
            GenerationOutcome::Avatar { ticket, result } => self.wizard.finish_avatar(ticket, result),
        };
        (kind, resolution)
    }

    /// Submit the wizard, consuming the session.
    ///
    /// On success the wizard is dropped, cancelling anything still in
    /// flight. On rejection the session is handed back intact.
    ///
    /// # Errors
    /// [`SubmitRejected`] wrapping the wizard's error.
    pub fn submit(mut self) -> Result<AgentDraft, SubmitRejected> {
        match self.wizard.submit() {
            Ok(draft) => Ok(draft),
            Err(error) => Err(SubmitRejected {
                session: Box::new(self),
                error,
            }),
        }
    }
}

/// Run a generator call on its own task so that a panic still yields an
/// outcome. Cancelling `token` aborts the call.
async fn run_guarded<T, F>(token: CancellationToken, call: F) -> Result<T, GenerationError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, GenerationError>> + Send + 'static,
{
    let handle = tokio::spawn(call);
    let abort = handle.abort_handle();
    tokio::select! {
        () = token.cancelled() => {
            abort.abort();
            Err(GenerationError::Cancelled)
        }
        joined = handle => joined.unwrap_or_else(|err| {
            tracing::error!(error = %err, "Generator task died");
            Err(GenerationError::Rejected(format!("generator task failed: {err}")))
        }),
    }
}

/// A rejected submission; carries the session back to the caller.
pub struct SubmitRejected {
    pub session: Box<WizardSession>,
    pub error: WizardError,
}

impl SubmitRejected {
    #[must_use]
    pub fn into_parts(self) -> (WizardSession, WizardError) {
        (*self.session, self.error)
    }
}

impl std::fmt::Debug for SubmitRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitRejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "submission rejected: {}", self.error)
    }
}

impl std::error::Error for SubmitRejected {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
