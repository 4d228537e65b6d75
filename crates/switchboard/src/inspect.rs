// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only inspection commands: `check`, `categories`, `classify`, `prompt`.
//!
//! Each command builds its output as a string so it can be tested without
//! capturing stdout. Colour is only applied when the caller asks for it.

use std::sync::Arc;

use colored::Colorize;
use strum::IntoEnumIterator;
use switchboard_config::SwitchboardConfig;
use switchboard_core::{IssueCategory, RoutingDecision, SwitchboardError};
use switchboard_router::{HeuristicRouter, IssueTaxonomy, SpecialistPromptBuilder};

/// Builds the taxonomy exactly as the agents would, reading policy files.
pub async fn load_taxonomy(config: &SwitchboardConfig) -> Result<Arc<IssueTaxonomy>, SwitchboardError> {
    let taxonomy = IssueTaxonomy::from_config(&config.taxonomy, &config.policies).await?;
    Ok(Arc::new(taxonomy))
}

/// `switchboard check`: confirms every policy and prompt source resolves.
pub async fn run_check(config: &SwitchboardConfig, color: bool) -> Result<String, SwitchboardError> {
    let taxonomy = load_taxonomy(config).await?;
    let prompts = SpecialistPromptBuilder::new(taxonomy.clone());
    for category in taxonomy.categories_in_priority_order() {
        prompts.build(category)?;
    }

    if let Some(path) = &config.routing.classifier_prompt_file {
        tokio::fs::read_to_string(path).await.map_err(|e| {
            SwitchboardError::Config(format!("cannot read classifier prompt file `{path}`: {e}"))
        })?;
    }

    let ok = if color {
        "✓".green().to_string()
    } else {
        "ok".to_string()
    };
    let mut out = String::new();
    out.push_str(&format!("{ok} configuration is valid\n"));
    out.push_str(&format!("  agent:      {}\n", config.agent.name));
    out.push_str(&format!("  strategy:   {:?}\n", config.routing.strategy));
    out.push_str(&format!(
        "  timeout:    {}s\n",
        config.routing.classifier_timeout_secs
    ));
    out.push_str(&format!("  categories: {}\n", taxonomy.labels()));
    out.push_str(&format!("  default:    {}\n", taxonomy.default_category()));
    Ok(out)
}

/// `switchboard categories`: priority order, default marker, keywords.
pub fn render_categories(taxonomy: &IssueTaxonomy, color: bool) -> String {
    let mut out = String::new();
    for (rank, set) in taxonomy.keyword_sets().iter().enumerate() {
        let label = if color {
            set.category.label().bold().to_string()
        } else {
            set.category.label().to_string()
        };
        let marker = if set.category == taxonomy.default_category() {
            " (default)"
        } else {
            ""
        };
        out.push_str(&format!("{}. {label}{marker}\n", rank + 1));
        out.push_str(&format!("   keywords: {}\n", set.keywords.join(", ")));
    }
    out
}

/// `switchboard classify`: keyword routing only, no engine involved.
pub fn classify(taxonomy: Arc<IssueTaxonomy>, message: &str) -> RoutingDecision {
    HeuristicRouter::new(taxonomy).classify(message)
}

pub fn render_decision(decision: &RoutingDecision, color: bool) -> String {
    let category = if color {
        decision.category.label().green().to_string()
    } else {
        decision.category.label().to_string()
    };
    let confidence = decision
        .confidence
        .map(|c| format!("{c:.2}"))
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "category:   {category}\nconfidence: {confidence}\nreason:     {}\n",
        decision.reason
    )
}

/// `switchboard prompt`: the full instructions a specialist would receive.
pub fn render_prompt(
    taxonomy: Arc<IssueTaxonomy>,
    category: IssueCategory,
) -> Result<String, SwitchboardError> {
    SpecialistPromptBuilder::new(taxonomy).build(category)
}

/// Clap value parser for category labels.
pub fn parse_category(raw: &str) -> Result<IssueCategory, String> {
    IssueCategory::from_label(raw).ok_or_else(|| {
        let known = IssueCategory::iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown category `{raw}` (expected one of: {known})")
    })
}
