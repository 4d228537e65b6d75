// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock conversational engine for deterministic testing.
//!
//! `MockEngine` implements `ConversationEngine` with pre-configured replies
//! and records every request it receives.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use switchboard_core::{ConversationEngine, EngineRequest, Message, SwitchboardError};

/// A scripted engine reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// An assistant message.
    Message(Message),
    /// An engine failure with this message.
    Error(String),
}

/// A mock engine that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" assistant message is returned.
pub struct MockEngine {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<EngineRequest>>>,
}

impl MockEngine {
    /// Create a new mock engine with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock engine pre-loaded with text replies.
    pub fn with_replies(replies: Vec<String>) -> Self {
        let engine = Self::new();
        let queue = replies
            .into_iter()
            .map(|text| MockReply::Message(Message::assistant(text)))
            .collect();
        Self {
            replies: Arc::new(Mutex::new(queue)),
            ..engine
        }
    }

    /// Queue a reply at the end.
    pub async fn push_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Queue a text reply at the end.
    pub async fn add_reply(&self, text: impl Into<String>) {
        self.push_reply(MockReply::Message(Message::assistant(text)))
            .await;
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<EngineRequest> {
        self.requests.lock().await.clone()
    }

    /// The most recent request, if any.
    pub async fn last_request(&self) -> Option<EngineRequest> {
        self.requests.lock().await.last().cloned()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Message(Message::assistant("mock response")))
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationEngine for MockEngine {
    fn name(&self) -> &str {
        "mock-engine"
    }

    async fn generate(&self, request: EngineRequest) -> Result<Message, SwitchboardError> {
        self.requests.lock().await.push(request);
        match self.next_reply().await {
            MockReply::Message(message) => Ok(message),
            MockReply::Error(message) => Err(SwitchboardError::Engine {
                message,
                source: None,
            }),
        }
    }
}
