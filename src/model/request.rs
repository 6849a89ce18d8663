use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::effort::EffortConfig;
use super::message::Message;

/// Everything the agent needs to run one turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRequest {
    pub messages: Vec<Message>,
    #[serde(rename = "initial_search_query_count")]
    pub query_count: u32,
    #[serde(rename = "max_research_loops")]
    pub loop_count: u32,
    pub reasoning_model: String,
}

impl SessionRequest {
    pub fn new(messages: Vec<Message>, effort: EffortConfig, reasoning_model: impl Into<String>) -> Self {
        Self {
            messages,
            query_count: effort.query_count,
            loop_count: effort.loop_count,
            reasoning_model: reasoning_model.into(),
        }
    }

    /// Body for a stateless streaming run on the agent server.
    pub fn run_payload(&self, assistant_id: &str) -> Value {
        json!({
            "assistant_id": assistant_id,
            "input": self,
            "stream_mode": ["updates", "values"],
        })
    }
}
