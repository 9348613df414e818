//! UNITY Core - agent-management platform state
//!
//! In-memory model of the LiveOps UNITY dashboard:
//! - Seeded projects and agents with generated mock analytics
//! - Interaction-weighted dashboard aggregation and agent health
//! - The multi-step agent creation wizard with async persona/avatar generation
//! - The root platform controller, profile editing and the workflow canvas
//! - Landing page timers
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use unity_core::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PlatformConfig::new();
//! let mut platform = Platform::seeded();
//! let mut session = WizardSession::new(
//!     &config,
//!     Arc::new(TemplatePersonaGenerator),
//!     Arc::new(PlaceholderAvatarGenerator),
//! );
//!
//! let wizard = session.wizard_mut();
//! wizard.next()?;
//! wizard.set_name("Athena");
//! wizard.set_prompt("Friendly billing assistant");
//! session.generate_persona()?;
//! session.settle().await;
//!
//! let wizard = session.wizard_mut();
//! wizard.next()?;
//! wizard.next()?;
//! let draft = session.submit()?;
//! let id = platform.add_agent(draft)?;
//! println!("Created {id}");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod config;
pub mod dashboard;
pub mod error;
pub mod generation;
pub mod landing;
pub mod mock;
pub mod platform;
pub mod profile;
pub mod seed;
pub mod session;
pub mod ticker;
pub mod types;
pub mod wizard;
pub mod workflow;

// Re-exports for convenience
pub use config::{LandingConfig, PlatformConfig};
pub use dashboard::{health_score, AgentCardSummary, DashboardSummary, HealthBand};
pub use error::{
    ConfigError, GenerationError, PlatformError, UnityError, ValidationError, WizardError,
};
pub use generation::{
    AvatarGenerator, AvatarImage, GenerationKind, GenerationSlot, GenerationState,
    GenerationTicket, PersonaGenerator, PlaceholderAvatarGenerator, Resolution,
    TemplatePersonaGenerator,
};
pub use landing::{GenerationShowcase, TourBanner, Typewriter};
pub use mock::{BaseRates, HistoryWindow};
pub use platform::{NavItem, Platform, View};
pub use profile::{AgentProfileEditor, AgentProfileUpdate, PerformanceSeries, SegmentBars};
pub use session::{GenerationOutcome, SubmitRejected, WizardSession};
pub use ticker::ScopedTicker;
pub use types::{
    Agent, AgentAudienceSegment, AgentDraft, AgentId, AgentPerformanceHistory, AgentPersona,
    AgentStatus, Capability, DeploymentType, Project, ProjectId, ProjectStatus, TtsModel, UseCase,
    VoiceProfile,
};
pub use wizard::{BackOutcome, CreateAgentWizard, ExamplePrompt, WizardStep};
pub use workflow::{CanvasNode, NodeKind, Point, WorkflowCanvas};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with UNITY Core
    pub use crate::{
        Agent, AgentDraft, AgentId, AgentProfileUpdate, BackOutcome, CreateAgentWizard,
        DashboardSummary, DeploymentType, PlaceholderAvatarGenerator, Platform, PlatformConfig,
        Project, ProjectId, TemplatePersonaGenerator, View, WizardSession, WizardStep,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
