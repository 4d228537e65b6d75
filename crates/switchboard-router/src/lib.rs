// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Issue routing for Switchboard.
//!
//! This crate provides:
//! - [`IssueTaxonomy`]: category priority, keyword sets and specialist policies
//! - [`HeuristicRouter`]: deterministic keyword routing (zero-cost, zero-latency)
//! - [`ModelRouter`]: a single bounded classifier call with fallback to the default category
//! - [`SpecialistPromptBuilder`]: composes the instructions bound to a routed conversation
//!
//! Both routers sit behind [`IssueRouter`], so the dispatching agent picks one
//! at construction time and never inspects which it holds.

pub mod builtin;
pub mod heuristic;
pub mod model;
pub mod prompt;
pub mod taxonomy;

use async_trait::async_trait;
use switchboard_core::{RoutingDecision, RoutingSource};

pub use heuristic::HeuristicRouter;
pub use model::{EngineClassifier, ModelRouter};
pub use prompt::SpecialistPromptBuilder;
pub use taxonomy::{IssueTaxonomy, KeywordSet, SpecialistPolicy, TaxonomyBuilder};

/// Picks a category for a conversation's first message.
///
/// Routing never fails: a router that cannot decide returns the taxonomy's
/// default category with `fallback` set.
#[async_trait]
pub trait IssueRouter: Send + Sync {
    /// Which kind of router this is.
    fn source(&self) -> RoutingSource;

    /// Decides the category for `message`.
    async fn route(&self, message: &str) -> RoutingDecision;
}
