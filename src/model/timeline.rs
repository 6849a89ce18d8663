use serde::{Deserialize, Serialize};

/// A citation gathered during web research.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
}

impl Source {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// One line of the activity timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineEntry {
    pub title: String,
    pub data: String,
}

impl TimelineEntry {
    pub const GENERATING_QUERIES: &'static str = "Generating Search Queries";
    pub const WEB_RESEARCH: &'static str = "Web Research";
    pub const REFLECTION: &'static str = "Reflection";
    pub const FINALIZING: &'static str = "Finalizing Answer";

    pub fn new(title: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            data: data.into(),
        }
    }
}
