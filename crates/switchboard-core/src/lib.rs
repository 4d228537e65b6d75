// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Switchboard, the telecom support conversation router.
//!
//! This crate provides the error type, the shared domain types (issue
//! categories, routing decisions, messages, engine requests), and the two
//! collaborator traits the routing core depends on: the conversational
//! engine and the external issue classifier.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SwitchboardError;
pub use traits::{ConversationEngine, IssueClassifier};
pub use types::{
    EngineRequest, EngineSettings, IssueCategory, Message, Role, RoutingDecision,
    RoutingSource, ToolCall, ToolDefinition,
};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoEngine;

    #[async_trait]
    impl ConversationEngine for EchoEngine {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, request: EngineRequest) -> Result<Message, SwitchboardError> {
            let last = request.history.last().map(|m| m.text().to_string());
            Ok(Message::assistant(last.unwrap_or_default()))
        }
    }

    struct FixedClassifier(&'static str);

    #[async_trait]
    impl IssueClassifier for FixedClassifier {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn classify(&self, _prompt: &str, _message: &str) -> Result<String, SwitchboardError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn switchboard_error_has_all_variants() {
        let _config = SwitchboardError::Config("test".into());
        let _classification = SwitchboardError::Classification {
            response: "test".into(),
        };
        let _classifier = SwitchboardError::Classifier {
            message: "test".into(),
            source: None,
        };
        let _timeout = SwitchboardError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _engine = SwitchboardError::Engine {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _history = SwitchboardError::InvalidHistory("test".into());
        let _not_found = SwitchboardError::AgentNotFound {
            name: "test".into(),
        };
        let _internal = SwitchboardError::Internal("test".into());
    }

    #[test]
    fn only_classifier_failures_are_recoverable() {
        assert!(SwitchboardError::Classification {
            response: "x".into()
        }
        .is_recoverable_routing_error());
        assert!(SwitchboardError::Timeout {
            duration: std::time::Duration::from_secs(1)
        }
        .is_recoverable_routing_error());
        assert!(!SwitchboardError::Config("missing policy".into()).is_recoverable_routing_error());
        assert!(!SwitchboardError::Engine {
            message: "down".into(),
            source: None
        }
        .is_recoverable_routing_error());
    }

    #[test]
    fn config_error_display_names_the_problem() {
        let err = SwitchboardError::Config("no policy registered for `mms_issue`".into());
        assert_eq!(
            err.to_string(),
            "configuration error: no policy registered for `mms_issue`"
        );
    }

    #[tokio::test]
    async fn traits_are_object_safe_and_shareable() {
        let engine: Arc<dyn ConversationEngine> = Arc::new(EchoEngine);
        let classifier: Arc<dyn IssueClassifier> = Arc::new(FixedClassifier("mms_issue"));

        let reply = engine
            .generate(EngineRequest {
                instructions: String::new(),
                tools: vec![],
                history: vec![Message::user("ping")],
                settings: EngineSettings::default(),
            })
            .await
            .unwrap();
        assert_eq!(reply.text(), "ping");
        assert_eq!(reply.role, Role::Assistant);

        let label = classifier.classify("prompt", "message").await.unwrap();
        assert_eq!(IssueCategory::from_label(&label), Some(IssueCategory::MmsIssue));
    }
}
