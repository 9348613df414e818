//! Seed data for the platform
//!
//! Three demo projects and six agents. Agent histories and segments are
//! generated on construction.

use crate::mock::{generate_audience_segments, generate_performance_history, BaseRates};
use crate::types::{
    Agent, AgentId, AgentStatus, Capability, DeploymentType, Project, ProjectId, ProjectStatus,
    TtsModel, UseCase, VoiceGender, VoiceProfile, VoiceRegion, VoiceStyle,
};
use chrono::{Local, NaiveDate};
use rand::Rng;

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    name: &str,
    status: ProjectStatus,
    budget_usage: f64,
    fcr: f64,
    escalation_rate: f64,
    total_agents: u32,
    total_interactions: u64,
    estimated_roi: f64,
) -> Project {
    Project {
        id: ProjectId::new(id),
        name: name.to_string(),
        status,
        budget_usage,
        fcr,
        escalation_rate,
        total_agents,
        total_interactions,
        estimated_roi,
    }
}

/// Demo projects
#[must_use]
pub fn seed_projects() -> Vec<Project> {
    vec![
        project("proj-01", "Retail Support Q4", ProjectStatus::Active, 75.0, 82.0, 12.0, 3, 2130, 12500.0),
        project("proj-02", "Insurance Onboarding", ProjectStatus::Optimizing, 45.0, 76.0, 18.0, 2, 980, 8700.0),
        project("proj-03", "Winter Sale Campaign", ProjectStatus::Error, 98.0, 65.0, 25.0, 1, 540, -500.0),
    ]
}

/// Static part of a seeded agent
struct AgentSeed {
    id: &'static str,
    project: &'static str,
    name: &'static str,
    use_case: UseCase,
    status: AgentStatus,
    deployment: DeploymentType,
    interactions: u64,
    fcr: f64,
    escalation: f64,
    sentiment: f64,
    workflows: u64,
    value: f64,
    created: (i32, u32, u32),
    personality: &'static str,
    backstory: &'static str,
    greeting: &'static str,
    voice: VoiceProfile,
    tts: TtsModel,
    budget: f64,
    capabilities: &'static [Capability],
    aht: f64,
}

const AGENT_SEEDS: [AgentSeed; 6] = [
    AgentSeed {
        id: "agent-001",
        project: "proj-01",
        name: "Athena",
        use_case: UseCase::CustomerService,
        status: AgentStatus::Active,
        deployment: DeploymentType::UnityInternal,
        interactions: 1250,
        fcr: 85.0,
        escalation: 10.0,
        sentiment: 0.9,
        workflows: 1100,
        value: 9800.0,
        created: (2023, 10, 26),
        personality: "Friendly and empathetic",
        backstory: "Designed to assist users with billing inquiries.",
        greeting: "Hello! My name is Athena, how can I help you with your account today?",
        voice: VoiceProfile { gender: VoiceGender::Female, region: VoiceRegion::UsEast, style: VoiceStyle::Enthusiastic },
        tts: TtsModel::GeminiTts,
        budget: 10000.0,
        capabilities: &[Capability::SentimentAnalysis, Capability::RealTimeDataLookup],
        aht: 180.0,
    },
    AgentSeed {
        id: "agent-002",
        project: "proj-01",
        name: "Orion",
        use_case: UseCase::Sales,
        status: AgentStatus::Active,
        deployment: DeploymentType::UnityInternal,
        interactions: 830,
        fcr: 72.0,
        escalation: 20.0,
        sentiment: 0.8,
        workflows: 650,
        value: 15500.0,
        created: (2023, 9, 15),
        personality: "Persuasive and knowledgeable",
        backstory: "Expert in product features and benefits.",
        greeting: "Hi there! I'm Orion. I can help you find the perfect product for your needs.",
        voice: VoiceProfile { gender: VoiceGender::Male, region: VoiceRegion::UsWest, style: VoiceStyle::Professional },
        tts: TtsModel::GeminiTts,
        budget: 15000.0,
        capabilities: &[Capability::ProactiveEngagement],
        aht: 220.0,
    },
    AgentSeed {
        id: "agent-003",
        project: "proj-01",
        name: "Helios",
        use_case: UseCase::TechnicalSupport,
        status: AgentStatus::Training,
        deployment: DeploymentType::ExternalHybrid,
        interactions: 50,
        fcr: 95.0,
        escalation: 2.0,
        sentiment: 0.95,
        workflows: 48,
        value: 1200.0,
        created: (2023, 11, 1),
        personality: "Patient and methodical",
        backstory: "Specializes in troubleshooting complex technical issues.",
        greeting: "Greetings. I am Helios. Please describe the technical issue you are experiencing.",
        voice: VoiceProfile { gender: VoiceGender::Male, region: VoiceRegion::Uk, style: VoiceStyle::Calm },
        tts: TtsModel::ElevenLabsV2,
        budget: 7500.0,
        capabilities: &[Capability::MultiLanguage, Capability::RealTimeDataLookup],
        aht: 300.0,
    },
    AgentSeed {
        id: "agent-004",
        project: "proj-02",
        name: "Lyra",
        use_case: UseCase::Onboarding,
        status: AgentStatus::Active,
        deployment: DeploymentType::UnityInternal,
        interactions: 600,
        fcr: 78.0,
        escalation: 15.0,
        sentiment: 0.88,
        workflows: 550,
        value: 7200.0,
        created: (2023, 10, 2),
        personality: "Clear and concise",
        backstory: "Guides new customers through the setup process.",
        greeting: "Welcome! I'm Lyra, and I'll be helping you get started today.",
        voice: VoiceProfile { gender: VoiceGender::Female, region: VoiceRegion::UsEast, style: VoiceStyle::Professional },
        tts: TtsModel::GeminiTts,
        budget: 8000.0,
        capabilities: &[],
        aht: 150.0,
    },
    AgentSeed {
        id: "agent-005",
        project: "proj-02",
        name: "Caelus",
        use_case: UseCase::CustomerService,
        status: AgentStatus::Inactive,
        deployment: DeploymentType::UnityInternal,
        interactions: 380,
        fcr: 74.0,
        escalation: 22.0,
        sentiment: 0.7,
        workflows: 300,
        value: 3100.0,
        created: (2023, 8, 20),
        personality: "Formal and direct",
        backstory: "Handles account verification and security.",
        greeting: "This is Caelus. I am here to assist with your account.",
        voice: VoiceProfile { gender: VoiceGender::Male, region: VoiceRegion::UsWest, style: VoiceStyle::Calm },
        tts: TtsModel::GeminiTts,
        budget: 5000.0,
        capabilities: &[Capability::SentimentAnalysis],
        aht: 200.0,
    },
    AgentSeed {
        id: "agent-006",
        project: "proj-03",
        name: "Nova",
        use_case: UseCase::Sales,
        status: AgentStatus::Active,
        deployment: DeploymentType::ExternalHybrid,
        interactions: 540,
        fcr: 65.0,
        escalation: 25.0,
        sentiment: 0.6,
        workflows: 350,
        value: 18000.0,
        created: (2023, 11, 5),
        personality: "Energetic and persuasive",
        backstory: "A high-stakes sales agent for limited-time offers.",
        greeting: "Hi! I'm Nova! Ready to hear about our best deal ever?",
        voice: VoiceProfile { gender: VoiceGender::Female, region: VoiceRegion::UsEast, style: VoiceStyle::Enthusiastic },
        tts: TtsModel::GeminiTts,
        budget: 12000.0,
        capabilities: &[Capability::ProactiveEngagement, Capability::RealTimeDataLookup],
        aht: 120.0,
    },
];

/// Demo agents with histories ending at `today`.
pub fn seed_agents_with<R: Rng>(today: NaiveDate, rng: &mut R) -> Vec<Agent> {
    AGENT_SEEDS
        .iter()
        .map(|seed| {
            let (y, m, d) = seed.created;
            Agent {
                id: AgentId::new(seed.id),
                project_id: ProjectId::new(seed.project),
                name: seed.name.to_string(),
                avatar_url: format!("https://i.pravatar.cc/150?u={}", seed.name.to_lowercase()),
                use_case: seed.use_case,
                status: seed.status,
                deployment_type: seed.deployment,
                interactions: seed.interactions,
                fcr: seed.fcr,
                escalation_rate: seed.escalation,
                sentiment_score: seed.sentiment,
                workflows_completed: seed.workflows,
                value_generated: seed.value,
                personality: seed.personality.to_string(),
                backstory: seed.backstory.to_string(),
                greeting: seed.greeting.to_string(),
                voice_profile: seed.voice,
                tts_model: seed.tts,
                monthly_budget: seed.budget,
                capabilities: seed.capabilities.to_vec(),
                created_at: NaiveDate::from_ymd_opt(y, m, d).unwrap_or(today),
                performance_history: generate_performance_history(
                    BaseRates::new(seed.fcr, seed.escalation, seed.aht),
                    today,
                    rng,
                ),
                audience_segments: generate_audience_segments(rng),
            }
        })
        .collect()
}

/// Demo agents with histories ending today.
#[must_use]
pub fn seed_agents() -> Vec<Agent> {
    seed_agents_with(Local::now().date_naive(), &mut rand::rng())
}
