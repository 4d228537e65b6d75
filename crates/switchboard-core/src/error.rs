// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Switchboard routing core.

use thiserror::Error;

/// The primary error type used across Switchboard crates.
///
/// Only [`SwitchboardError::Config`] is fatal to a conversation. Classifier
/// failures and timeouts are absorbed by the model router, which falls back to
/// the taxonomy's default category.
#[derive(Debug, Error)]
pub enum SwitchboardError {
    /// Structural misconfiguration (missing policy, empty taxonomy, unreadable policy file).
    #[error("configuration error: {0}")]
    Config(String),

    /// The classifier answered with something that is not a known category label.
    #[error("classification failed: unrecognized label `{response}`")]
    Classification { response: String },

    /// The external classification capability returned an error.
    #[error("classifier error: {message}")]
    Classifier {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An external call did not complete within its bound.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// The conversational engine failed to produce the next assistant turn.
    #[error("engine error: {message}")]
    Engine {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Restored history or turn input contained a message the agent cannot accept.
    #[error("invalid history: {0}")]
    InvalidHistory(String),

    /// No agent is registered under the requested name.
    #[error("agent not found: {name}")]
    AgentNotFound { name: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SwitchboardError {
    /// Returns true for errors the routing layer recovers from by falling back
    /// to the default category.
    pub fn is_recoverable_routing_error(&self) -> bool {
        matches!(
            self,
            SwitchboardError::Classification { .. }
                | SwitchboardError::Classifier { .. }
                | SwitchboardError::Timeout { .. }
        )
    }
}
