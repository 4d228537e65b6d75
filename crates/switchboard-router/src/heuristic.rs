// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based issue routing.
//!
//! Zero-cost classification: no model call, no network, no latency. Categories
//! are tested in the taxonomy's priority order and the first one with a
//! keyword contained in the message wins.

use std::sync::Arc;

use async_trait::async_trait;
use switchboard_core::{IssueCategory, RoutingDecision, RoutingSource};
use tracing::debug;

use crate::IssueRouter;
use crate::taxonomy::IssueTaxonomy;

/// Confidence reported when a keyword matched.
pub const KEYWORD_MATCH_CONFIDENCE: f32 = 0.8;

/// Confidence reported when nothing matched and the default category was used.
pub const DEFAULT_CONFIDENCE: f32 = 0.2;

/// Deterministic keyword router over a shared taxonomy.
#[derive(Debug, Clone)]
pub struct HeuristicRouter {
    taxonomy: Arc<IssueTaxonomy>,
}

impl HeuristicRouter {
    pub fn new(taxonomy: Arc<IssueTaxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Classifies `message`. Total and pure: the same message always yields
    /// the same decision for a given taxonomy.
    pub fn classify(&self, message: &str) -> RoutingDecision {
        let lowered = message.to_lowercase();

        for set in self.taxonomy.keyword_sets() {
            if let Some(keyword) = set.first_match(&lowered) {
                debug!(category = %set.category, keyword, "heuristic keyword hit");
                return RoutingDecision {
                    category: set.category,
                    source: RoutingSource::Heuristic,
                    confidence: Some(KEYWORD_MATCH_CONFIDENCE),
                    fallback: false,
                    reason: format!("matched keyword `{keyword}`"),
                };
            }
        }

        RoutingDecision {
            category: self.taxonomy.default_category(),
            source: RoutingSource::Heuristic,
            confidence: Some(DEFAULT_CONFIDENCE),
            fallback: true,
            reason: "no keyword matched".to_string(),
        }
    }

    /// Shorthand for `classify(message).category`.
    pub fn category_for(&self, message: &str) -> IssueCategory {
        self.classify(message).category
    }
}

#[async_trait]
impl IssueRouter for HeuristicRouter {
    fn source(&self) -> RoutingSource {
        RoutingSource::Heuristic
    }

    async fn route(&self, message: &str) -> RoutingDecision {
        self.classify(message)
    }
}
