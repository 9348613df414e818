//! Testing utilities for UNITY workspace
//!
//! Shared fixtures, scripted generators and wizard drivers.

#![allow(missing_docs)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use unity_core::error::GenerationError;
use unity_core::generation::{AvatarGenerator, AvatarImage, PersonaGenerator};
use unity_core::types::{AgentPersona, DeploymentType};
use unity_core::wizard::CreateAgentWizard;
use unity_core::{Platform, PlatformConfig, WizardSession, WizardStep};

pub const ATHENA_PROMPT: &str = "Friendly and empathetic billing assistant.";

pub fn athena_persona() -> AgentPersona {
    AgentPersona::new(
        "Friendly and empathetic",
        "Designed to assist users with billing inquiries.",
        "Hello! My name is Athena, how can I help you with your account today?",
    )
}

pub fn test_config() -> PlatformConfig {
    PlatformConfig::new()
}

pub fn seeded_platform() -> Platform {
    Platform::seeded()
}

/// Persona generator returning a fixed result and recording prompts
#[derive(Debug)]
pub struct ScriptedPersonaGenerator {
    response: Result<AgentPersona, GenerationError>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedPersonaGenerator {
    pub fn succeeding(persona: AgentPersona) -> Self {
        Self {
            response: Ok(persona),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            response: Err(GenerationError::Rejected(reason.to_string())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl PersonaGenerator for ScriptedPersonaGenerator {
    async fn generate_persona(&self, prompt: &str) -> Result<AgentPersona, GenerationError> {
        self.prompts.lock().await.push(prompt.to_string());
        self.response.clone()
    }
}

/// Avatar generator returning fixed bytes, or always failing
#[derive(Debug)]
pub struct ScriptedAvatarGenerator {
    response: Result<AvatarImage, GenerationError>,
    calls: AtomicUsize,
}

impl ScriptedAvatarGenerator {
    pub fn succeeding(bytes: &[u8]) -> Self {
        Self {
            response: Ok(AvatarImage::from_bytes(bytes)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            response: Err(GenerationError::Rejected(reason.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvatarGenerator for ScriptedAvatarGenerator {
    async fn generate_avatar(&self, _name: &str, _prompt: &str) -> Result<AvatarImage, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// Persona generator that blocks until released, then echoes the prompt
/// into the personality field.
#[derive(Debug)]
pub struct GatedPersonaGenerator {
    gate: Semaphore,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl GatedPersonaGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(0),
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        })
    }

    /// Let `n` blocked calls complete.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    /// Calls that have entered the generator
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Calls that got through the gate
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PersonaGenerator for GatedPersonaGenerator {
    async fn generate_persona(&self, prompt: &str) -> Result<AgentPersona, GenerationError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| GenerationError::Cancelled)?;
        permit.forget();
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(AgentPersona::new(prompt, "Gated backstory", "Gated greeting"))
    }
}

/// Avatar generator that blocks until released
#[derive(Debug)]
pub struct GatedAvatarGenerator {
    gate: Semaphore,
}

impl GatedAvatarGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(0),
        })
    }

    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }
}

#[async_trait]
impl AvatarGenerator for GatedAvatarGenerator {
    async fn generate_avatar(&self, name: &str, _prompt: &str) -> Result<AvatarImage, GenerationError> {
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| GenerationError::Cancelled)?;
        permit.forget();
        Ok(AvatarImage::from_bytes(name.as_bytes()))
    }
}

/// Generator whose every call panics
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingGenerator;

#[async_trait]
impl PersonaGenerator for PanickingGenerator {
    async fn generate_persona(&self, _prompt: &str) -> Result<AgentPersona, GenerationError> {
        panic!("persona backend crashed")
    }
}

#[async_trait]
impl AvatarGenerator for PanickingGenerator {
    async fn generate_avatar(&self, _name: &str, _prompt: &str) -> Result<AvatarImage, GenerationError> {
        panic!("avatar backend crashed")
    }
}

pub fn session_with(
    persona: Arc<dyn PersonaGenerator>,
    avatar: Arc<dyn AvatarGenerator>,
) -> WizardSession {
    WizardSession::new(&test_config(), persona, avatar)
}

/// Move a fresh internal wizard to `Persona` and fill name and prompt.
pub fn fill_persona_step(wizard: &mut CreateAgentWizard, name: &str, prompt: &str) {
    assert_eq!(wizard.step(), WizardStep::Platform);
    wizard.set_deployment_type(DeploymentType::UnityInternal);
    wizard.next().unwrap();
    wizard.set_name(name);
    wizard.set_prompt(prompt);
}

/// Run a persona generation synchronously with a fixed result.
pub fn generate_persona_now(wizard: &mut CreateAgentWizard, persona: AgentPersona) {
    let request = wizard.begin_persona().unwrap();
    wizard.finish_persona(request.ticket, Ok(persona));
}

/// An internal wizard at `Deploy` with a generated persona
pub fn wizard_at_deploy(name: &str, prompt: &str) -> CreateAgentWizard {
    let mut wizard = CreateAgentWizard::new(&test_config());
    fill_persona_step(&mut wizard, name, prompt);
    generate_persona_now(&mut wizard, athena_persona());
    wizard.next().unwrap();
    wizard.next().unwrap();
    assert_eq!(wizard.step(), WizardStep::Deploy);
    wizard
}
