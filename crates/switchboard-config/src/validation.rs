// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express: taxonomy consistency, positive
//! timeouts, and sane sampling settings.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::SwitchboardConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &SwitchboardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.name must not be empty".to_string(),
        });
    }

    if config.routing.classifier_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "routing.classifier_timeout_secs must be greater than 0".to_string(),
        });
    }

    let taxonomy = &config.taxonomy;
    if taxonomy.priority.is_empty() {
        errors.push(ConfigError::Validation {
            message: "taxonomy.priority must list at least one category".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for category in &taxonomy.priority {
        if !seen.insert(category) {
            errors.push(ConfigError::Validation {
                message: format!("taxonomy.priority lists `{category}` more than once"),
            });
        }
    }

    if !taxonomy.priority.contains(&taxonomy.default_category) {
        errors.push(ConfigError::Validation {
            message: format!(
                "taxonomy.default_category `{}` must appear in taxonomy.priority",
                taxonomy.default_category
            ),
        });
    }

    for (category, words) in &taxonomy.keywords {
        if words.iter().any(|w| w.trim().is_empty()) {
            errors.push(ConfigError::Validation {
                message: format!("taxonomy.keywords.{category} contains an empty keyword"),
            });
        }
    }

    let policies = &config.policies;
    for category in policies
        .specialized
        .keys()
        .chain(policies.specialized_files.keys())
    {
        if !taxonomy.priority.contains(category) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "policies for `{category}` are set but `{category}` is not in taxonomy.priority"
                ),
            });
        }
    }

    if let Some(temperature) = config.engine.temperature
        && !(0.0..=2.0).contains(&temperature)
    {
        errors.push(ConfigError::Validation {
            message: format!("engine.temperature must be within 0.0..=2.0, got {temperature}"),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use switchboard_core::IssueCategory;

    use super::*;

    fn messages(errors: &[ConfigError]) -> Vec<String> {
        errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&SwitchboardConfig::default()).is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = SwitchboardConfig::default();
        config.routing.classifier_timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors)[0].contains("classifier_timeout_secs"));
    }

    #[test]
    fn default_category_must_be_prioritized() {
        let mut config = SwitchboardConfig::default();
        config.taxonomy.priority = vec![IssueCategory::MmsIssue];
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors).iter().any(|m| m.contains("default_category")));
    }

    #[test]
    fn duplicate_priority_rejected() {
        let mut config = SwitchboardConfig::default();
        config.taxonomy.priority.push(IssueCategory::MmsIssue);
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors).iter().any(|m| m.contains("more than once")));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = SwitchboardConfig::default();
        config.agent.name = "  ".into();
        config.routing.classifier_timeout_secs = 0;
        config.engine.temperature = Some(3.5);
        config
            .taxonomy
            .keywords
            .insert(IssueCategory::MmsIssue, vec![String::new()]);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn specialized_policy_for_unprioritized_category_rejected() {
        let mut config = SwitchboardConfig::default();
        config.taxonomy.priority = vec![IssueCategory::ServiceIssue];
        config
            .policies
            .specialized
            .insert(IssueCategory::MmsIssue, "mms text".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(messages(&errors)[0].contains("mms_issue"));
    }
}
