use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use unity_core::error::PlatformError;
use unity_core::platform::{NavItem, Platform, View};
use unity_core::profile::{AgentProfileEditor, AgentProfileUpdate};
use unity_core::seed::{seed_agents, seed_projects};
use unity_core::types::{AgentId, DeploymentType, ProjectId, TtsModel, VoiceRegion};
use unity_core::workflow::{Point, WorkflowCanvas};
use unity_test_utils::{seeded_platform, wizard_at_deploy, ATHENA_PROMPT};

#[test]
fn test_add_agent_defaults() {
    let mut platform = seeded_platform();
    platform.select_project(&ProjectId::new("proj-02")).unwrap();
    let draft = wizard_at_deploy("Athena", ATHENA_PROMPT).submit().unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

    let id = platform.add_agent_on(draft, today).unwrap();
    let agent = platform.agent(&id).unwrap();

    assert!(id.as_str().starts_with("agent-"));
    assert_eq!(agent.project_id, ProjectId::new("proj-02"));
    assert_eq!(agent.created_at, today);
    assert_eq!(agent.interactions, 0);
    assert_eq!(agent.fcr, 100.0);
    assert_eq!(agent.escalation_rate, 0.0);
    assert_eq!(agent.sentiment_score, 1.0);
    assert_eq!(agent.value_generated, 0.0);
    assert!(agent.audience_segments.is_empty());
    assert_eq!(agent.avatar_url, format!("https://i.pravatar.cc/150?u={id}"));
    assert_eq!(platform.view(), View::ProjectDetail);
    assert_eq!(platform.agents_for_selected().count(), 3);
}

#[test]
fn test_add_agent_requires_selection() {
    let mut platform = Platform::new(Vec::new(), Vec::new()).unwrap();
    let draft = wizard_at_deploy("Athena", ATHENA_PROMPT).submit().unwrap();
    assert_eq!(
        platform.add_agent(draft).unwrap_err(),
        PlatformError::NoProjectSelected
    );
    assert!(platform.agents().is_empty());
}

#[test]
fn test_add_agent_forces_internal_tts() {
    let mut platform = seeded_platform();
    let mut draft = wizard_at_deploy("Athena", ATHENA_PROMPT).submit().unwrap();
    draft.tts_model = TtsModel::ElevenLabsV2;

    let id = platform.add_agent(draft).unwrap();
    assert_eq!(platform.agent(&id).unwrap().tts_model, TtsModel::GeminiTts);
}

#[test]
fn test_new_rejects_orphan_agent() {
    let projects: Vec<_> = seed_projects().into_iter().take(1).collect();
    let err = Platform::new(projects, seed_agents()).unwrap_err();
    assert!(matches!(err, PlatformError::OrphanAgent { .. }));
}

#[test]
fn test_new_rejects_bad_percentage() {
    let mut projects = seed_projects();
    projects[2].budget_usage = 140.0;
    let err = Platform::new(projects, Vec::new()).unwrap_err();
    assert_eq!(
        err,
        PlatformError::InvalidPercentage {
            field: "budgetUsage",
            value: 140.0
        }
    );
}

#[test]
fn test_update_agent_unknown_is_noop() {
    let mut platform = seeded_platform();
    let before = platform.agents().to_vec();
    let update = AgentProfileUpdate::new().with_greeting("Hi");

    assert!(!platform.update_agent(&AgentId::new("agent-999"), &update));
    assert_eq!(platform.agents(), before.as_slice());
}

#[test]
fn test_profile_edit_applied_in_place() {
    let mut platform = seeded_platform();
    let helios_id = AgentId::new("agent-003");
    let helios = platform.agent(&helios_id).unwrap().clone();
    assert_eq!(helios.deployment_type, DeploymentType::ExternalHybrid);

    let mut editor = AgentProfileEditor::open(&helios);
    editor.set_voice_region(VoiceRegion::UsWest);
    editor.set_tts_model(TtsModel::GeminiTts).unwrap();
    editor.set_monthly_budget(" 9000 ");
    let update = editor.save();

    assert!(platform.update_agent(&helios_id, &update));
    let updated = platform.agent(&helios_id).unwrap();
    assert_eq!(updated.voice_profile.region, VoiceRegion::UsWest);
    assert_eq!(updated.tts_model, TtsModel::GeminiTts);
    assert_eq!(updated.monthly_budget, 9000.0);
    assert_eq!(updated.backstory, helios.backstory);
    assert_eq!(updated.performance_history, helios.performance_history);
}

#[test]
fn test_set_view_autoselects_first_project() {
    let projects = seed_projects();
    let mut platform = Platform::new(projects, Vec::new()).unwrap();
    platform.select_project(&ProjectId::new("proj-03")).unwrap();
    assert_eq!(platform.header_title(), "Project: Winter Sale Campaign");

    platform.set_view(View::Dashboard);
    assert_eq!(platform.selected_project_id(), Some(&ProjectId::new("proj-03")));
    assert!(NavItem::NerveCenter.is_active(platform.view()));
}

#[test]
fn test_workflow_canvas_from_project_agents() {
    let mut platform = seeded_platform();
    platform.set_view(View::WorkflowBuilder);
    let agents: Vec<_> = platform.agents_for_selected().cloned().collect();

    let mut canvas = WorkflowCanvas::new(Point::new(0.0, 0.0));
    for (i, agent) in agents.iter().enumerate() {
        canvas.drop_agent(agent, Point::new(200.0 * (i as f64 + 1.0), 100.0));
    }
    assert_eq!(canvas.nodes().len(), 3);
    assert_eq!(canvas.nodes()[0].x, 104.0);
    assert_eq!(canvas.nodes()[0].y, 74.0);
}
