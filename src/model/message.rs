use serde::{Deserialize, Serialize};

use super::ids::MessageId;
use super::serde_utils::{message_content, non_empty_id};

/// Author of a conversation message. Serialized with the agent server's
/// message `type` tags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "human", alias = "user")]
    Human,
    #[serde(rename = "ai", alias = "assistant")]
    Assistant,
    /// Tool, system and other server-side messages; shown but never archived against.
    #[serde(other, rename = "other")]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    #[serde(rename = "type")]
    pub role: Role,
    #[serde(default, deserialize_with = "message_content::deserialize")]
    pub content: String,
    #[serde(default, with = "non_empty_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
}

impl Message {
    /// Human message with a freshly generated local id.
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
            id: Some(MessageId::generate()),
        }
    }

    pub fn assistant(id: Option<MessageId>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            id,
        }
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self.role, Role::Assistant)
    }
}
