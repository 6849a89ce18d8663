/// Shared serde utilities for domain models
/// Message content as sent by the agent server: either a plain string or a
/// list of content parts, of which only the text parts are kept.
pub mod message_content {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Content {
        Text(String),
        Parts(Vec<Part>),
    }

    #[derive(Deserialize)]
    struct Part {
        #[serde(default)]
        text: Option<String>,
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content: Option<Content> = Option::deserialize(deserializer)?;
        Ok(match content {
            None => String::new(),
            Some(Content::Text(text)) => text,
            Some(Content::Parts(parts)) => parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join(""),
        })
    }
}

/// Optional id where an empty string means "not assigned yet".
pub mod non_empty_id {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::model::MessageId;

    pub fn serialize<S>(id: &Option<MessageId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<MessageId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.filter(|s| !s.is_empty()).map(MessageId::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MessageId;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct TestStruct {
        #[serde(default, deserialize_with = "message_content::deserialize")]
        content: String,
        #[serde(default, with = "non_empty_id", skip_serializing_if = "Option::is_none")]
        id: Option<MessageId>,
    }

    #[test]
    fn content_from_plain_string() {
        let obj: TestStruct = serde_json::from_str(r#"{"content":"hello"}"#).unwrap();
        assert_eq!(obj.content, "hello");
    }

    #[test]
    fn content_from_parts_keeps_text_only() {
        let json = r#"{"content":[{"type":"text","text":"a"},{"type":"image_url"},{"type":"text","text":"b"}]}"#;
        let obj: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(obj.content, "ab");
    }

    #[test]
    fn null_content_is_empty() {
        let obj: TestStruct = serde_json::from_str(r#"{"content":null}"#).unwrap();
        assert_eq!(obj.content, "");
    }

    #[test]
    fn empty_id_is_unassigned() {
        let obj: TestStruct = serde_json::from_str(r#"{"content":"x","id":""}"#).unwrap();
        assert!(obj.id.is_none());
    }

    #[test]
    fn none_id_omitted_from_json() {
        let obj = TestStruct {
            content: "x".into(),
            id: None,
        };
        assert_eq!(serde_json::to_string(&obj).unwrap(), r#"{"content":"x"}"#);
    }
}
