use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a state label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelCategory {
    Intent,
    Branch,
}

impl fmt::Display for LabelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelCategory::Intent => write!(f, "Intent"),
            LabelCategory::Branch => write!(f, "Branch"),
        }
    }
}

/// A classified (category, value) pair derived from one event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateLabel {
    pub category: LabelCategory,
    pub value: String,
}

impl StateLabel {
    pub fn intent(value: impl Into<String>) -> Self {
        Self {
            category: LabelCategory::Intent,
            value: value.into(),
        }
    }

    pub fn branch(value: impl Into<String>) -> Self {
        Self {
            category: LabelCategory::Branch,
            value: value.into(),
        }
    }

    /// Node display string: `"<category>: <value>"`
    pub fn display_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.value)
    }
}

/// Verdict of one classification rule for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventClass {
    Intent(String),
    Branch(String),
    Ignored,
}

impl EventClass {
    pub fn into_label(self) -> Option<StateLabel> {
        match self {
            EventClass::Intent(value) => Some(StateLabel::intent(value)),
            EventClass::Branch(value) => Some(StateLabel::branch(value)),
            EventClass::Ignored => None,
        }
    }
}

/// Ordered labels of one conversation.
pub type LabelSequence = Vec<StateLabel>;

/// One weighted directed edge between node indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub weight: u64,
}

/// Aggregated transition graph for a batch of conversations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<FlowEdge>,
    pub conversation_count: usize,
    pub node_count: usize,
    pub total_transitions: u64,
}

/// Edge row with its share of the source node's outgoing weight
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionEntry {
    pub from: String,
    pub to: String,
    pub count: u64,
    pub probability: f64,
}

/// Plotly-style Sankey payload: parallel `source`/`target`/`value` arrays.
#[derive(Debug, Clone, Serialize)]
pub struct SankeyPayload {
    pub node: SankeyNodes,
    pub link: SankeyLinks,
}

#[derive(Debug, Clone, Serialize)]
pub struct SankeyNodes {
    pub label: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SankeyLinks {
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<u64>,
}

impl FlowGraph {
    /// True when there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node_index(&self, display: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == display)
    }

    pub fn edge_weight(&self, source: &str, target: &str) -> Option<u64> {
        let s = self.node_index(source)?;
        let t = self.node_index(target)?;
        self.edges
            .iter()
            .find(|e| e.source == s && e.target == t)
            .map(|e| e.weight)
    }

    /// Edge rows with outgoing probabilities, sorted by count descending.
    /// Edges naming a node index outside `nodes` are left out.
    pub fn transitions(&self) -> Vec<TransitionEntry> {
        let mut outgoing = vec![0u64; self.nodes.len()];
        for edge in self.edges.iter().filter(|e| e.target < self.nodes.len()) {
            if let Some(total) = outgoing.get_mut(edge.source) {
                *total += edge.weight;
            }
        }

        let mut rows: Vec<TransitionEntry> = self
            .edges
            .iter()
            .filter_map(|edge| {
                let from = self.nodes.get(edge.source)?;
                let to = self.nodes.get(edge.target)?;
                let from_total = outgoing[edge.source] as f64;
                Some(TransitionEntry {
                    from: from.clone(),
                    to: to.clone(),
                    count: edge.weight,
                    probability: if from_total > 0.0 {
                        edge.weight as f64 / from_total
                    } else {
                        0.0
                    },
                })
            })
            .collect();

        // Stable sort: equal counts keep first-seen edge order
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    pub fn to_plotly(&self) -> SankeyPayload {
        SankeyPayload {
            node: SankeyNodes {
                label: self.nodes.clone(),
            },
            link: SankeyLinks {
                source: self.edges.iter().map(|e| e.source).collect(),
                target: self.edges.iter().map(|e| e.target).collect(),
                value: self.edges.iter().map(|e| e.weight).collect(),
            },
        }
    }
}
