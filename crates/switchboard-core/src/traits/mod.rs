// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits for the Switchboard routing core.
//!
//! Both traits use `#[async_trait]` so implementations can be held as
//! `Arc<dyn ...>` and shared across concurrent conversations.

pub mod classifier;
pub mod engine;

pub use classifier::IssueClassifier;
pub use engine::ConversationEngine;
