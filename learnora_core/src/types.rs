use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Result of one completed assessment, as stored by the server.
///
/// `mastery_scores` keeps the key order the server sent, which is the order
/// the dashboard renders them in.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Assessment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub theta: Option<f64>,
    #[serde(default)]
    pub mastery_scores: IndexMap<String, f64>,
    #[serde(default)]
    pub learning_gaps: Vec<LearningGap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_content: Vec<serde_json::Value>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn is_high(&self) -> bool {
        matches!(self, Priority::High)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LearningGap {
    pub skill: String,
    pub priority: Priority,
    pub mastery_level: f64,
    pub recommended_difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_study_time: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct LearningPath {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Minutes.
    #[serde(default)]
    pub estimated_time: Option<u32>,
    /// Integer percent, 0..=100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
}

impl LearningPath {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One entry of the local chat transcript.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Assistant,
        }
    }
}

/// A stored message/response pair from `/api/chat/history`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatExchange {
    pub message: String,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}

impl ChatExchange {
    /// Expand into the two transcript entries it stands for, user first.
    pub fn into_transcript(self) -> [ChatMessage; 2] {
        [
            ChatMessage::user(self.message),
            ChatMessage::assistant(self.response),
        ]
    }
}
