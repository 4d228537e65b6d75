// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-based issue routing.
//!
//! One classifier attempt per conversation, bounded by a timeout. Anything
//! other than an exact category label (an unknown answer, an error, a timeout)
//! degrades to the taxonomy's default category instead of failing the turn.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use switchboard_core::{
    ConversationEngine, EngineRequest, EngineSettings, IssueCategory, IssueClassifier, Message,
    RoutingDecision, RoutingSource, SwitchboardError,
};
use tracing::{debug, warn};

use crate::IssueRouter;
use crate::builtin;
use crate::taxonomy::IssueTaxonomy;

/// Default bound on the classifier call.
pub const DEFAULT_CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(30);

/// Routes by asking an external classifier for a category label.
pub struct ModelRouter {
    classifier: Arc<dyn IssueClassifier>,
    taxonomy: Arc<IssueTaxonomy>,
    instructions: String,
    timeout: Duration,
}

impl ModelRouter {
    /// Creates a router with the bundled instructions and the default timeout.
    pub fn new(classifier: Arc<dyn IssueClassifier>, taxonomy: Arc<IssueTaxonomy>) -> Self {
        Self {
            classifier,
            taxonomy,
            instructions: builtin::ROUTER_INSTRUCTIONS.trim().to_string(),
            timeout: DEFAULT_CLASSIFIER_TIMEOUT,
        }
    }

    /// Replaces the classifier instructions.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The user-side message sent to the classifier for `message`.
    pub fn classifier_message(&self, message: &str) -> String {
        format!(
            "User's issue: {message}\n\nClassify this as one of: {}",
            self.taxonomy.labels()
        )
    }

    /// Maps a raw classifier answer onto a category of this taxonomy.
    pub fn parse_label(&self, response: &str) -> Result<IssueCategory, SwitchboardError> {
        IssueCategory::from_label(response)
            .filter(|c| self.taxonomy.contains(*c))
            .ok_or_else(|| SwitchboardError::Classification {
                response: response.trim().to_string(),
            })
    }

    /// Makes the single classifier attempt without any fallback.
    pub async fn try_classify(&self, message: &str) -> Result<IssueCategory, SwitchboardError> {
        let request = self.classifier_message(message);
        let response = tokio::time::timeout(
            self.timeout,
            self.classifier.classify(&self.instructions, &request),
        )
        .await
        .map_err(|_| SwitchboardError::Timeout {
            duration: self.timeout,
        })??;
        debug!(classifier = self.classifier.name(), response = %response.trim(), "classifier answered");
        self.parse_label(&response)
    }
}

#[async_trait]
impl IssueRouter for ModelRouter {
    fn source(&self) -> RoutingSource {
        RoutingSource::Model
    }

    async fn route(&self, message: &str) -> RoutingDecision {
        match self.try_classify(message).await {
            Ok(category) => RoutingDecision {
                category,
                source: RoutingSource::Model,
                confidence: None,
                fallback: false,
                reason: format!("classifier answered `{category}`"),
            },
            Err(e) => {
                let default = self.taxonomy.default_category();
                warn!(
                    classifier = self.classifier.name(),
                    error = %e,
                    fallback = %default,
                    "issue classification failed, using default category"
                );
                RoutingDecision {
                    category: default,
                    source: RoutingSource::Model,
                    confidence: None,
                    fallback: true,
                    reason: format!("fell back to default: {e}"),
                }
            }
        }
    }
}

/// Adapts a [`ConversationEngine`] into an [`IssueClassifier`].
///
/// The classifier prompt becomes the request instructions and the message a
/// single user turn. No tools are offered.
pub struct EngineClassifier {
    engine: Arc<dyn ConversationEngine>,
    settings: EngineSettings,
}

impl EngineClassifier {
    pub fn new(engine: Arc<dyn ConversationEngine>, settings: EngineSettings) -> Self {
        Self { engine, settings }
    }
}

#[async_trait]
impl IssueClassifier for EngineClassifier {
    fn name(&self) -> &str {
        self.engine.name()
    }

    async fn classify(&self, prompt: &str, message: &str) -> Result<String, SwitchboardError> {
        let request = EngineRequest {
            instructions: prompt.to_string(),
            tools: Vec::new(),
            history: vec![Message::user(message)],
            settings: self.settings.clone(),
        };
        let reply = self
            .engine
            .generate(request)
            .await
            .map_err(|e| SwitchboardError::Classifier {
                message: format!("engine `{}` failed", self.engine.name()),
                source: Some(Box::new(e)),
            })?;
        reply
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| SwitchboardError::Classifier {
                message: "engine returned no text".to_string(),
                source: None,
            })
    }
}
