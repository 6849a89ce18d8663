use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::timeline::Source;

/// Pipeline node names emitted by the research agent.
pub mod nodes {
    pub const GENERATE_QUERY: &str = "generate_query";
    pub const WEB_RESEARCH: &str = "web_research";
    pub const REFLECTION: &str = "reflection";
    pub const FINALIZE_ANSWER: &str = "finalize_answer";
}

/// One update tick from the stream: node name → partial state for that node.
/// Node order is the order the nodes appeared on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeUpdate(Map<String, Value>);

impl NodeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: impl Into<String>, payload: Value) -> Self {
        self.0.insert(node.into(), payload);
        self
    }

    /// Nodes in arrival order. A JSON `null` payload is reported as `None`.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.0
            .iter()
            .map(|(name, payload)| (name.as_str(), Some(payload).filter(|v| !v.is_null())))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Closed set of payload shapes the activity timeline understands.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    QueryGeneration {
        queries: Vec<String>,
    },
    WebResearch {
        sources: Vec<Source>,
    },
    Reflection {
        is_sufficient: bool,
        follow_up_queries: Vec<String>,
    },
    /// Terminal stage; its payload shape is irrelevant.
    Finalize,
    /// Unknown node or malformed payload.
    Unrecognized,
}

#[derive(Deserialize)]
struct QueryGenerationState {
    #[serde(alias = "query_list")]
    search_query: Vec<String>,
}

#[derive(Deserialize)]
struct WebResearchState {
    #[serde(default)]
    sources_gathered: Option<Vec<SourceState>>,
}

#[derive(Deserialize)]
struct SourceState {
    #[serde(default)]
    label: Option<String>,
    #[serde(default, alias = "value")]
    url: Option<String>,
}

#[derive(Deserialize)]
struct ReflectionState {
    is_sufficient: bool,
    #[serde(default)]
    follow_up_queries: Option<Vec<String>>,
}

impl NodePayload {
    /// Classify a node's partial state by node name, then by payload shape.
    pub fn from_node(node: &str, payload: Option<&Value>) -> Self {
        if node == nodes::FINALIZE_ANSWER {
            return NodePayload::Finalize;
        }

        let Some(payload) = payload else {
            return NodePayload::Unrecognized;
        };

        match node {
            nodes::GENERATE_QUERY => parse::<QueryGenerationState>(payload)
                .map(|s| NodePayload::QueryGeneration {
                    queries: s.search_query,
                })
                .unwrap_or(NodePayload::Unrecognized),
            nodes::WEB_RESEARCH => parse::<WebResearchState>(payload)
                .map(|s| NodePayload::WebResearch {
                    sources: s
                        .sources_gathered
                        .unwrap_or_default()
                        .into_iter()
                        .map(|src| {
                            Source::new(src.label.unwrap_or_default(), src.url.unwrap_or_default())
                        })
                        .collect(),
                })
                .unwrap_or(NodePayload::Unrecognized),
            nodes::REFLECTION => parse::<ReflectionState>(payload)
                .map(|s| NodePayload::Reflection {
                    is_sufficient: s.is_sufficient,
                    follow_up_queries: s.follow_up_queries.unwrap_or_default(),
                })
                .unwrap_or(NodePayload::Unrecognized),
            _ => NodePayload::Unrecognized,
        }
    }
}

fn parse<T: DeserializeOwned>(payload: &Value) -> Option<T> {
    match serde_json::from_value(payload.clone()) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed node payload");
            None
        }
    }
}
