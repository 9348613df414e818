//! Root platform controller
//!
//! `Platform` owns the canonical project and agent collections, the current
//! project selection and the active view. All mutation goes through its
//! named operations.

use crate::dashboard::DashboardSummary;
use crate::error::PlatformError;
use crate::profile::AgentProfileUpdate;
use crate::seed::{seed_agents, seed_projects};
use crate::types::{Agent, AgentDraft, AgentId, Project, ProjectId};
use chrono::{Local, NaiveDate};

/// Active top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Dashboard,
    ProjectDetail,
    CreateAgent,
    WorkflowBuilder,
}

/// Sidebar navigation entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    NerveCenter,
    ProjectAgents,
    WorkflowBuilder,
}

impl NavItem {
    pub const ALL: [NavItem; 3] = [
        NavItem::NerveCenter,
        NavItem::ProjectAgents,
        NavItem::WorkflowBuilder,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            NavItem::NerveCenter => "Nerve Center",
            NavItem::ProjectAgents => "Project Agents",
            NavItem::WorkflowBuilder => "Workflow Builder",
        }
    }

    /// View navigated to on click
    #[must_use]
    pub fn target(&self) -> View {
        match self {
            NavItem::NerveCenter => View::Dashboard,
            NavItem::ProjectAgents => View::ProjectDetail,
            NavItem::WorkflowBuilder => View::WorkflowBuilder,
        }
    }

    /// Whether this entry is highlighted for `view`.
    ///
    /// Agent creation lives under "Project Agents".
    #[must_use]
    pub fn is_active(&self, view: View) -> bool {
        match self {
            NavItem::NerveCenter => view == View::Dashboard,
            NavItem::ProjectAgents => matches!(view, View::ProjectDetail | View::CreateAgent),
            NavItem::WorkflowBuilder => view == View::WorkflowBuilder,
        }
    }
}

/// Application state
#[derive(Debug, Clone)]
pub struct Platform {
    projects: Vec<Project>,
    agents: Vec<Agent>,
    selected_project: Option<ProjectId>,
    view: View,
}

impl Platform {
    /// Build from explicit collections, selecting the first project.
    ///
    /// # Errors
    /// `PlatformError::InvalidPercentage` for a malformed project,
    /// `PlatformError::OrphanAgent` for an agent whose project is missing.
    pub fn new(projects: Vec<Project>, mut agents: Vec<Agent>) -> Result<Self, PlatformError> {
        for project in &projects {
            project.validate()?;
        }
        for agent in &mut agents {
            if !projects.iter().any(|p| p.id == agent.project_id) {
                return Err(PlatformError::OrphanAgent {
                    agent: agent.id.clone(),
                    project: agent.project_id.clone(),
                });
            }
            agent.enforce_deployment_tts();
        }
        let selected_project = projects.first().map(|p| p.id.clone());
        tracing::info!(
            projects = projects.len(),
            agents = agents.len(),
            "Platform initialised"
        );
        Ok(Self {
            projects,
            agents,
            selected_project,
            view: View::Dashboard,
        })
    }

    /// Platform over the demo seed data
    #[must_use]
    pub fn seeded() -> Self {
        let projects = seed_projects();
        let selected_project = projects.first().map(|p| p.id.clone());
        Self {
            projects,
            agents: seed_agents(),
            selected_project,
            view: View::Dashboard,
        }
    }

    #[inline]
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[inline]
    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[inline]
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn agent(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| &a.id == id)
    }

    #[must_use]
    pub fn selected_project_id(&self) -> Option<&ProjectId> {
        self.selected_project.as_ref()
    }

    #[must_use]
    pub fn selected_project(&self) -> Option<&Project> {
        let id = self.selected_project.as_ref()?;
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Agents owned by the selected project
    pub fn agents_for_selected(&self) -> impl Iterator<Item = &Agent> + '_ {
        let selected = self.selected_project.as_ref();
        self.agents
            .iter()
            .filter(move |a| selected == Some(&a.project_id))
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::from_projects(&self.projects)
    }

    /// Header text for the current view and selection
    #[must_use]
    pub fn header_title(&self) -> String {
        let project_name = self.selected_project().map(|p| p.name.as_str());
        match self.view {
            View::Dashboard => "Global Nerve Center".to_string(),
            View::WorkflowBuilder => {
                format!("Workflow Builder: {}", project_name.unwrap_or("Project"))
            }
            View::CreateAgent => format!("Create Agent for {}", project_name.unwrap_or("Project")),
            View::ProjectDetail => match project_name {
                Some(name) => format!("Project: {name}"),
                None => "Welcome".to_string(),
            },
        }
    }

    /// Navigate. Project-scoped views select the first project when none is
    /// selected.
    pub fn set_view(&mut self, view: View) {
        if matches!(view, View::ProjectDetail | View::WorkflowBuilder)
            && self.selected_project.is_none()
        {
            self.selected_project = self.projects.first().map(|p| p.id.clone());
        }
        tracing::debug!(from = ?self.view, to = ?view, "View changed");
        self.view = view;
    }

    /// Select a project and show its detail view.
    ///
    /// # Errors
    /// `PlatformError::ProjectNotFound` for an unknown id.
    pub fn select_project(&mut self, id: &ProjectId) -> Result<(), PlatformError> {
        if !self.projects.iter().any(|p| &p.id == id) {
            return Err(PlatformError::ProjectNotFound(id.clone()));
        }
        tracing::info!(project = %id, "Project selected");
        self.selected_project = Some(id.clone());
        self.view = View::ProjectDetail;
        Ok(())
    }

    /// Create an agent from a wizard draft under the selected project.
    ///
    /// # Errors
    /// `PlatformError::NoProjectSelected` without a selection.
    pub fn add_agent(&mut self, draft: AgentDraft) -> Result<AgentId, PlatformError> {
        self.add_agent_on(draft, Local::now().date_naive())
    }

    /// [`add_agent`](Self::add_agent) with an explicit creation date.
    ///
    /// # Errors
    /// As [`add_agent`](Self::add_agent).
    pub fn add_agent_on(
        &mut self,
        draft: AgentDraft,
        created_at: NaiveDate,
    ) -> Result<AgentId, PlatformError> {
        let project_id = self
            .selected_project
            .clone()
            .ok_or(PlatformError::NoProjectSelected)?;
        let id = AgentId::generate();
        let avatar_url = if draft.avatar_url.is_empty() {
            format!("https://i.pravatar.cc/150?u={id}")
        } else {
            draft.avatar_url
        };

        let mut agent = Agent {
            id: id.clone(),
            project_id,
            name: draft.name,
            avatar_url,
            use_case: draft.use_case,
            status: draft.status,
            deployment_type: draft.deployment_type,
            interactions: 0,
            fcr: 100.0,
            escalation_rate: 0.0,
            sentiment_score: 1.0,
            workflows_completed: 0,
            value_generated: 0.0,
            personality: draft.personality,
            backstory: draft.backstory,
            greeting: draft.greeting,
            voice_profile: draft.voice_profile,
            tts_model: draft.tts_model,
            monthly_budget: draft.monthly_budget,
            capabilities: draft.capabilities,
            created_at,
            performance_history: Vec::new(),
            audience_segments: Vec::new(),
        };
        agent.enforce_deployment_tts();

        tracing::info!(agent = %id, project = %agent.project_id, name = %agent.name, "Agent created");
        self.agents.push(agent);
        self.view = View::ProjectDetail;
        Ok(id)
    }

    /// Apply a profile update in place. Returns `false` for an unknown id.
    pub fn update_agent(&mut self, id: &AgentId, update: &AgentProfileUpdate) -> bool {
        match self.agents.iter_mut().find(|a| &a.id == id) {
            Some(agent) => {
                update.apply_to(agent);
                tracing::info!(agent = %id, "Agent profile updated");
                true
            }
            None => {
                tracing::debug!(agent = %id, "Ignoring update for unknown agent");
                false
            }
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let platform = Platform::seeded();
        assert_eq!(platform.view(), View::Dashboard);
        assert_eq!(platform.selected_project_id(), Some(&ProjectId::new("proj-01")));
        assert_eq!(platform.agents_for_selected().count(), 3);
        assert_eq!(platform.header_title(), "Global Nerve Center");
    }

    #[test]
    fn nav_highlight() {
        assert!(NavItem::ProjectAgents.is_active(View::CreateAgent));
        assert!(NavItem::ProjectAgents.is_active(View::ProjectDetail));
        assert!(!NavItem::NerveCenter.is_active(View::CreateAgent));
        assert_eq!(NavItem::WorkflowBuilder.target(), View::WorkflowBuilder);
    }

    #[test]
    fn header_titles_follow_view() {
        let mut platform = Platform::seeded();
        platform.set_view(View::WorkflowBuilder);
        assert_eq!(platform.header_title(), "Workflow Builder: Retail Support Q4");
        platform.set_view(View::CreateAgent);
        assert_eq!(platform.header_title(), "Create Agent for Retail Support Q4");
        platform.set_view(View::ProjectDetail);
        assert_eq!(platform.header_title(), "Project: Retail Support Q4");
    }

    #[test]
    fn header_without_projects() {
        let mut platform = Platform::new(Vec::new(), Vec::new()).unwrap();
        platform.set_view(View::ProjectDetail);
        assert_eq!(platform.header_title(), "Welcome");
        platform.set_view(View::CreateAgent);
        assert_eq!(platform.header_title(), "Create Agent for Project");
    }

    #[test]
    fn select_unknown_project() {
        let mut platform = Platform::seeded();
        let err = platform.select_project(&ProjectId::new("proj-99")).unwrap_err();
        assert_eq!(err, PlatformError::ProjectNotFound(ProjectId::new("proj-99")));
        assert_eq!(platform.view(), View::Dashboard);
    }
}
