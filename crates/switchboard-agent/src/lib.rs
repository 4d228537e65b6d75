// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation dispatch for Switchboard.
//!
//! A [`DispatchingAgent`] routes its conversation once, on the first turn,
//! binds the chosen specialist's instructions, and forwards every turn to the
//! conversational engine with those instructions and the shared tool catalog.
//! The [`AgentRegistry`] hands out one agent per conversation by name.

pub mod dispatch;
pub mod registry;
pub mod state;

pub use dispatch::{AgentInput, DispatchingAgent};
pub use registry::{
    AgentDeps, AgentFactory, AgentRegistry, HEURISTIC_ROUTED_AGENT, MODEL_ROUTED_AGENT,
    RoutedAgentFactory, default_agent_name, register_builtin_agents,
};
pub use state::{BoundSpecialist, ConversationState, DispatchState};
