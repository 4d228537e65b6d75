// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock issue classifier with scripted outcomes.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use switchboard_core::{IssueClassifier, SwitchboardError};

/// One scripted classifier outcome.
#[derive(Debug, Clone)]
pub enum MockClassification {
    /// Answer with this raw text.
    Label(String),
    /// Fail with a classifier error.
    Error(String),
    /// Never answer. Pair with a timeout.
    Stall,
}

/// A classifier that plays back scripted outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty the
/// classifier answers with an error, which routers treat as a fallback.
pub struct MockClassifier {
    script: Arc<Mutex<VecDeque<MockClassification>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_script(script: Vec<MockClassification>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            ..Self::new()
        }
    }

    /// Shorthand for a script of text answers.
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_script(
            labels
                .into_iter()
                .map(|l| MockClassification::Label(l.into()))
                .collect(),
        )
    }

    pub async fn push(&self, outcome: MockClassification) {
        self.script.lock().await.push_back(outcome);
    }

    /// (prompt, message) pairs received so far.
    pub async fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IssueClassifier for MockClassifier {
    fn name(&self) -> &str {
        "mock-classifier"
    }

    async fn classify(&self, prompt: &str, message: &str) -> Result<String, SwitchboardError> {
        self.calls
            .lock()
            .await
            .push((prompt.to_string(), message.to_string()));
        let next = self.script.lock().await.pop_front();
        match next {
            Some(MockClassification::Label(label)) => Ok(label),
            Some(MockClassification::Error(message)) => Err(SwitchboardError::Classifier {
                message,
                source: None,
            }),
            Some(MockClassification::Stall) => std::future::pending().await,
            None => Err(SwitchboardError::Classifier {
                message: "mock classifier script exhausted".to_string(),
                source: None,
            }),
        }
    }
}
