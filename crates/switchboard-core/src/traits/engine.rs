// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversational engine trait: the LLM-backed collaborator that produces assistant turns.

use async_trait::async_trait;

use crate::error::SwitchboardError;
use crate::types::{EngineRequest, Message};

/// Produces the next assistant turn from bound instructions, the tool catalog,
/// and the turn history.
///
/// Implementations own the model invocation protocol. The dispatching agent
/// only depends on this input/output contract.
#[async_trait]
pub trait ConversationEngine: Send + Sync {
    /// Returns the human-readable name of this engine.
    fn name(&self) -> &str;

    /// Generates the next assistant message for the given request.
    async fn generate(&self, request: EngineRequest) -> Result<Message, SwitchboardError>;
}
