// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation state: routing status and turn history.
//!
//! A conversation starts `Unrouted` and moves to `Routed` exactly once. The
//! only way to enter `Routed` is [`ConversationState::bind`], which refuses a
//! second transition.

use switchboard_core::{IssueCategory, Message, Role, RoutingDecision, SwitchboardError};

/// The specialist a conversation is bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundSpecialist {
    pub decision: RoutingDecision,
    /// Composed instructions sent with every turn from here on.
    pub instructions: String,
}

/// Routing status of a conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchState {
    Unrouted,
    Routed(BoundSpecialist),
}

impl std::fmt::Display for DispatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchState::Unrouted => write!(f, "unrouted"),
            DispatchState::Routed(bound) => write!(f, "routed({})", bound.decision.category),
        }
    }
}

/// State owned by a single conversation. Never shared between agents.
#[derive(Debug, Clone)]
pub struct ConversationState {
    id: String,
    dispatch: DispatchState,
    history: Vec<Message>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            dispatch: DispatchState::Unrouted,
            history: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Starts from restored history. Only user, assistant and tool messages are accepted.
    pub fn with_history(history: Vec<Message>) -> Result<Self, SwitchboardError> {
        validate_history(&history)?;
        Ok(Self {
            history,
            ..Self::new()
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }

    pub fn dispatch(&self) -> &DispatchState {
        &self.dispatch
    }

    pub fn is_routed(&self) -> bool {
        matches!(self.dispatch, DispatchState::Routed(_))
    }

    pub fn bound(&self) -> Option<&BoundSpecialist> {
        match &self.dispatch {
            DispatchState::Routed(bound) => Some(bound),
            DispatchState::Unrouted => None,
        }
    }

    pub fn bound_category(&self) -> Option<IssueCategory> {
        self.bound().map(|b| b.decision.category)
    }

    pub fn bound_instructions(&self) -> Option<&str> {
        self.bound().map(|b| b.instructions.as_str())
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// The `Unrouted -> Routed` transition.
    ///
    /// Fails with [`SwitchboardError::Internal`] if the conversation is already routed.
    pub fn bind(&mut self, specialist: BoundSpecialist) -> Result<(), SwitchboardError> {
        if let DispatchState::Routed(bound) = &self.dispatch {
            return Err(SwitchboardError::Internal(format!(
                "conversation {} is already routed to {}",
                self.id, bound.decision.category
            )));
        }
        self.dispatch = DispatchState::Routed(specialist);
        Ok(())
    }

    pub fn push(&mut self, message: Message) {
        self.history.push(message);
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.history.extend(messages);
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejects system messages: instructions come only from the bound specialist.
pub fn validate_history(history: &[Message]) -> Result<(), SwitchboardError> {
    match history.iter().position(|m| m.role == Role::System) {
        Some(index) => Err(SwitchboardError::InvalidHistory(format!(
            "message {index} has role `system`; only user, assistant and tool messages are accepted"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use switchboard_core::RoutingSource;

    use super::*;

    fn specialist(category: IssueCategory) -> BoundSpecialist {
        BoundSpecialist {
            decision: RoutingDecision {
                category,
                source: RoutingSource::Heuristic,
                confidence: Some(0.8),
                fallback: false,
                reason: "test".into(),
            },
            instructions: format!("{category} instructions"),
        }
    }

    #[test]
    fn starts_unrouted_and_empty() {
        let state = ConversationState::new();
        assert_eq!(state.dispatch(), &DispatchState::Unrouted);
        assert!(state.history().is_empty());
        assert!(state.bound_category().is_none());
        assert_eq!(state.dispatch().to_string(), "unrouted");
    }

    #[test]
    fn bind_transitions_once() {
        let mut state = ConversationState::new();
        state.bind(specialist(IssueCategory::MmsIssue)).unwrap();
        assert!(state.is_routed());
        assert_eq!(state.bound_category(), Some(IssueCategory::MmsIssue));
        assert_eq!(state.bound_instructions(), Some("mms_issue instructions"));

        let err = state.bind(specialist(IssueCategory::ServiceIssue)).unwrap_err();
        assert!(matches!(err, SwitchboardError::Internal(_)));
        assert_eq!(state.bound_category(), Some(IssueCategory::MmsIssue));
    }

    #[test]
    fn each_conversation_gets_its_own_id() {
        assert_ne!(ConversationState::new().id(), ConversationState::new().id());
    }

    #[test]
    fn restored_history_rejects_system_messages() {
        let mut system = Message::user("be nice");
        system.role = Role::System;
        let err = ConversationState::with_history(vec![Message::user("hi"), system]).unwrap_err();
        assert!(err.to_string().contains("message 1"));
    }

    #[test]
    fn restored_history_accepts_tool_traffic() {
        let history = vec![
            Message::user("no signal"),
            Message::assistant_tool_calls(vec![]),
            Message::tool_result("call-1", "{\"bars\": 0}"),
            Message::assistant("Let's check airplane mode."),
        ];
        let state = ConversationState::with_history(history).unwrap();
        assert_eq!(state.history().len(), 4);
        assert!(!state.is_routed());
    }
}
