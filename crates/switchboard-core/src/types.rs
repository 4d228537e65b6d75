// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the routers, the dispatching agent, and collaborators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Closed set of telecom issue categories a conversation can be routed to.
///
/// Adding a category means adding a variant here plus one keyword set and one
/// policy text in the taxonomy; routing signatures stay unchanged.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IssueCategory {
    /// No cellular service: no signal, cannot call or text.
    ServiceIssue,
    /// Mobile data missing or slow.
    MobileDataIssue,
    /// Picture, video, or group messaging failures.
    MmsIssue,
}

impl IssueCategory {
    /// The wire label of this category (e.g. `mms_issue`).
    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::ServiceIssue => "service_issue",
            IssueCategory::MobileDataIssue => "mobile_data_issue",
            IssueCategory::MmsIssue => "mms_issue",
        }
    }

    /// Looks up a category by exact label after trimming and lowercasing.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        IssueCategory::iter().find(|c| c.label() == normalized)
    }
}

/// Which router produced a [`RoutingDecision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoutingSource {
    Heuristic,
    Model,
}

/// The category chosen for a conversation. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// The chosen category.
    pub category: IssueCategory,
    /// Which router made the decision.
    pub source: RoutingSource,
    /// Heuristic confidence (0.0-1.0); `None` for model decisions.
    pub confidence: Option<f32>,
    /// True when the category is the taxonomy default reached by fallback.
    pub fallback: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
}

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A tool invocation requested by the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// A single message in a conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    /// Text content. Assistant turns that only call tools carry `None`.
    pub content: Option<String>,
    /// Tool calls made by an assistant turn.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// For tool results: the id of the call being answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    pub created_at: String,
}

impl Message {
    fn new(role: Role, content: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            tool_calls: Vec::new(),
            tool_call_id: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, Some(content.into()))
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, Some(content.into()))
    }

    /// An assistant turn that only requests tool calls.
    pub fn assistant_tool_calls(calls: Vec<ToolCall>) -> Self {
        let mut msg = Self::new(Role::Assistant, None);
        msg.tool_calls = calls;
        msg
    }

    /// The result of a tool call, answering `tool_call_id`.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        let mut msg = Self::new(Role::Tool, Some(content.into()));
        msg.tool_call_id = Some(tool_call_id.into());
        msg
    }

    /// Text content, or an empty string when absent.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Description of a tool exposed to the conversational engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the tool's input.
    pub parameters: serde_json::Value,
}

/// Model selection and sampling parameters. Passed through to the engine
/// untouched; the routing logic never interprets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub seed: Option<u64>,
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Everything the conversational engine needs to produce the next assistant turn.
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// Bound system instructions for the conversation.
    pub instructions: String,
    /// Tool catalog. Identical for every specialist.
    pub tools: Vec<ToolDefinition>,
    /// Full turn history, oldest first.
    pub history: Vec<Message>,
    pub settings: EngineSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_labels_match_display_and_serde() {
        for category in IssueCategory::iter() {
            assert_eq!(category.to_string(), category.label());
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
            assert_eq!(IssueCategory::from_str(category.label()).unwrap(), category);
        }
    }

    #[test]
    fn from_label_trims_and_ignores_case() {
        assert_eq!(
            IssueCategory::from_label("  MMS_Issue\n"),
            Some(IssueCategory::MmsIssue)
        );
        assert_eq!(IssueCategory::from_label("mms"), None);
        assert_eq!(IssueCategory::from_label("the answer is mms_issue"), None);
    }

    #[test]
    fn tool_result_carries_call_id() {
        let msg = Message::tool_result("call-1", "{\"ok\":true}");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call-1"));
        assert_eq!(msg.text(), "{\"ok\":true}");
    }

    #[test]
    fn assistant_tool_call_turn_has_no_text() {
        let msg = Message::assistant_tool_calls(vec![ToolCall {
            id: "call-1".into(),
            name: "check_status_bar".into(),
            arguments: serde_json::json!({}),
        }]);
        assert!(msg.content.is_none());
        assert_eq!(msg.text(), "");
        assert_eq!(msg.tool_calls.len(), 1);
    }
}
