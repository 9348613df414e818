//! Workflow canvas
//!
//! Agents are dragged from the project list and dropped onto the canvas,
//! where each becomes a fixed-size node centred on the drop point.

use crate::types::{Agent, AgentId};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Rendered node width, px
pub const NODE_WIDTH: f64 = 192.0;
/// Rendered node height, px
pub const NODE_HEIGHT: f64 = 52.0;

/// Node category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Agent,
    Llm,
    Tool,
    Conditional,
    Data,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NodeKind::Agent => "agent",
            NodeKind::Llm => "llm",
            NodeKind::Tool => "tool",
            NodeKind::Conditional => "conditional",
            NodeKind::Data => "data",
        };
        f.write_str(s)
    }
}

/// Palette entry for a core node type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub kind: NodeKind,
    pub title: &'static str,
    pub description: &'static str,
}

/// Core node types offered beside the agent list
pub const PALETTE: [PaletteEntry; 4] = [
    PaletteEntry {
        kind: NodeKind::Llm,
        title: "LLM Node",
        description: "Executes a pure LLM turn.",
    },
    PaletteEntry {
        kind: NodeKind::Tool,
        title: "Tool Node",
        description: "Calls an external API.",
    },
    PaletteEntry {
        kind: NodeKind::Conditional,
        title: "Conditional Node",
        description: "Decision gate based on logic.",
    },
    PaletteEntry {
        kind: NodeKind::Data,
        title: "Data Node",
        description: "Reads/writes to state memory.",
    },
];

/// Point in client or canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Agent reference carried by an agent node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentNodeData {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub avatar_url: String,
}

impl AgentNodeData {
    #[must_use]
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            agent_id: agent.id.clone(),
            agent_name: agent.name.clone(),
            avatar_url: agent.avatar_url.clone(),
        }
    }
}

/// Drag payload, serialized as JSON while an agent is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(flatten)]
    pub agent: AgentNodeData,
}

impl DragPayload {
    #[must_use]
    pub fn for_agent(agent: &Agent) -> Self {
        Self {
            kind: NodeKind::Agent,
            agent: AgentNodeData::from_agent(agent),
        }
    }

    /// # Errors
    /// Propagates serialization failure.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// # Errors
    /// Malformed payload text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// A node placed on the canvas; `x`/`y` is its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    pub id: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub agent: Option<AgentNodeData>,
}

/// Canvas contents
#[derive(Debug, Clone, Default)]
pub struct WorkflowCanvas {
    origin: Point,
    nodes: Vec<CanvasNode>,
}

impl WorkflowCanvas {
    /// Empty canvas whose top-left corner sits at `origin` in client space
    #[must_use]
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            nodes: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[CanvasNode] {
        &self.nodes
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Place `agent` centred on the client-space `drop_point`.
    pub fn drop_agent(&mut self, agent: &Agent, drop_point: Point) -> &CanvasNode {
        self.place(NodeKind::Agent, Some(AgentNodeData::from_agent(agent)), drop_point)
    }

    /// Place a node from a serialized drag payload.
    ///
    /// # Errors
    /// Malformed payload text.
    pub fn drop_payload(
        &mut self,
        payload: &str,
        drop_point: Point,
    ) -> Result<&CanvasNode, serde_json::Error> {
        let payload = DragPayload::from_json(payload)?;
        Ok(self.place(payload.kind, Some(payload.agent), drop_point))
    }

    fn place(&mut self, kind: NodeKind, agent: Option<AgentNodeData>, drop_point: Point) -> &CanvasNode {
        let node = CanvasNode {
            id: format!("{kind}-{}", Ulid::new()),
            kind,
            x: drop_point.x - self.origin.x - NODE_WIDTH / 2.0,
            y: drop_point.y - self.origin.y - NODE_HEIGHT / 2.0,
            agent,
        };
        tracing::debug!(id = %node.id, x = node.x, y = node.y, "Node dropped");
        self.nodes.push(node);
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_agents;

    #[test]
    fn drop_centres_node() {
        let agent = seed_agents().remove(0);
        let mut canvas = WorkflowCanvas::new(Point::new(100.0, 50.0));

        let node = canvas.drop_agent(&agent, Point::new(400.0, 300.0));
        assert_eq!(node.kind, NodeKind::Agent);
        assert_eq!(node.x, 400.0 - 100.0 - 96.0);
        assert_eq!(node.y, 300.0 - 50.0 - 26.0);
        assert!(node.id.starts_with("agent-"));
        assert_eq!(node.agent.as_ref().map(|a| a.agent_name.as_str()), Some("Athena"));
    }

    #[test]
    fn payload_json_shape() {
        let agent = seed_agents().remove(1);
        let json = DragPayload::for_agent(&agent).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "agent");
        assert_eq!(value["agentId"], "agent-002");
        assert_eq!(value["agentName"], "Orion");

        let mut canvas = WorkflowCanvas::default();
        let node = canvas.drop_payload(&json, Point::new(96.0, 26.0)).unwrap();
        assert_eq!((node.x, node.y), (0.0, 0.0));
    }

    #[test]
    fn malformed_payload_rejected() {
        let mut canvas = WorkflowCanvas::default();
        assert!(canvas.drop_payload("{not json", Point::default()).is_err());
        assert!(canvas.is_empty());
    }

    #[test]
    fn palette_entries() {
        let titles: Vec<&str> = PALETTE.iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["LLM Node", "Tool Node", "Conditional Node", "Data Node"]);
    }
}
