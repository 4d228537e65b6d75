// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Switchboard.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use switchboard_core::{EngineSettings, IssueCategory};

/// Top-level Switchboard configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to a working telecom setup.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchboardConfig {
    /// Agent identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Router selection and classifier call settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Category priority, default category, and keyword sets.
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,

    /// Policy text overrides.
    #[serde(default)]
    pub policies: PolicyConfig,

    /// Opaque settings passed through to the conversational engine.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Agent identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in logs.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "switchboard".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which router a conversation is dispatched with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingStrategy {
    /// Deterministic keyword matching, no extra model call.
    #[default]
    Heuristic,
    /// External classifier call with fallback to the default category.
    Model,
}

/// Routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Router used by the default agent.
    #[serde(default)]
    pub strategy: RoutingStrategy,

    /// Upper bound on the single classifier attempt, in seconds.
    #[serde(default = "default_classifier_timeout_secs")]
    pub classifier_timeout_secs: u64,

    /// Inline classifier instructions. Overridden by `classifier_prompt_file` if both set.
    #[serde(default)]
    pub classifier_prompt: Option<String>,

    /// Path to a file containing the classifier instructions.
    #[serde(default)]
    pub classifier_prompt_file: Option<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            strategy: RoutingStrategy::default(),
            classifier_timeout_secs: default_classifier_timeout_secs(),
            classifier_prompt: None,
            classifier_prompt_file: None,
        }
    }
}

fn default_classifier_timeout_secs() -> u64 {
    30
}

/// Issue taxonomy configuration.
///
/// `priority` fixes the order in which categories are tested by the heuristic
/// router; earlier categories win when keywords overlap.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaxonomyConfig {
    /// Fallback category when no router produces a confident decision.
    #[serde(default = "default_category")]
    pub default_category: IssueCategory,

    /// Categories in match priority order, most specific first.
    #[serde(default = "default_priority")]
    pub priority: Vec<IssueCategory>,

    /// Case-insensitive substrings that select each category.
    #[serde(default = "default_keywords")]
    pub keywords: BTreeMap<IssueCategory, Vec<String>>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            priority: default_priority(),
            keywords: default_keywords(),
        }
    }
}

fn default_category() -> IssueCategory {
    IssueCategory::ServiceIssue
}

fn default_priority() -> Vec<IssueCategory> {
    vec![
        IssueCategory::MmsIssue,
        IssueCategory::MobileDataIssue,
        IssueCategory::ServiceIssue,
    ]
}

const MMS_KEYWORDS: &[&str] = &[
    "mms",
    "picture message",
    "picture",
    "photo",
    "image",
    "video message",
    "multimedia",
    "group text",
    "group chat",
    "group message",
];

const MOBILE_DATA_KEYWORDS: &[&str] = &[
    "mobile data",
    "data",
    "internet",
    "browse",
    "browsing",
    "web page",
    "website",
    "slow",
    "speed",
    "roaming",
    "abroad",
    "traveling",
    "travelling",
    "hotspot",
    "vpn",
    "4g",
    "5g",
];

const SERVICE_KEYWORDS: &[&str] = &[
    "no service",
    "signal",
    "bars",
    "call",
    "text message",
    "sms",
    "sim card",
    "airplane mode",
    "suspended",
    "network",
    "emergency only",
];

fn default_keywords() -> BTreeMap<IssueCategory, Vec<String>> {
    let to_vec = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
    BTreeMap::from([
        (IssueCategory::MmsIssue, to_vec(MMS_KEYWORDS)),
        (IssueCategory::MobileDataIssue, to_vec(MOBILE_DATA_KEYWORDS)),
        (IssueCategory::ServiceIssue, to_vec(SERVICE_KEYWORDS)),
    ])
}

/// Policy text overrides. Anything left unset uses the bundled telecom policies.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Inline base policy shared by every specialist.
    #[serde(default)]
    pub base: Option<String>,

    /// Path to the base policy. Takes precedence over `base`.
    #[serde(default)]
    pub base_file: Option<String>,

    /// Inline trailer appended after the specialized text. An empty string disables it.
    #[serde(default)]
    pub appendix: Option<String>,

    /// Path to the trailer. Takes precedence over `appendix`.
    #[serde(default)]
    pub appendix_file: Option<String>,

    /// Inline specialized policy per category.
    #[serde(default)]
    pub specialized: BTreeMap<IssueCategory, String>,

    /// Specialized policy file per category. Takes precedence over `specialized`.
    #[serde(default)]
    pub specialized_files: BTreeMap<IssueCategory, String>,
}

/// Conversational engine settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Model identifier understood by the engine.
    #[serde(default)]
    pub model: Option<String>,

    /// Sampling temperature.
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Sampling seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Response length cap.
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl EngineConfig {
    /// Convert into the settings struct handed to the engine.
    pub fn to_settings(&self) -> EngineSettings {
        EngineSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            seed: self.seed,
            max_tokens: self.max_tokens,
            extra: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_priority_is_most_specific_first() {
        let config = TaxonomyConfig::default();
        assert_eq!(
            config.priority,
            vec![
                IssueCategory::MmsIssue,
                IssueCategory::MobileDataIssue,
                IssueCategory::ServiceIssue
            ]
        );
        assert_eq!(config.default_category, IssueCategory::ServiceIssue);
    }

    #[test]
    fn every_default_category_has_keywords() {
        let config = TaxonomyConfig::default();
        for category in &config.priority {
            let keywords = config.keywords.get(category).expect("keywords present");
            assert!(!keywords.is_empty(), "{category} has no keywords");
        }
    }

    #[test]
    fn default_keywords_are_lowercase() {
        for words in default_keywords().values() {
            for w in words {
                assert_eq!(w, &w.to_lowercase());
            }
        }
    }

    #[test]
    fn strategy_parses_lowercase() {
        let config: RoutingConfig = toml::from_str("strategy = \"model\"").unwrap();
        assert_eq!(config.strategy, RoutingStrategy::Model);
        assert_eq!(config.classifier_timeout_secs, 30);
    }

    #[test]
    fn keywords_reject_unknown_category() {
        let toml_str = r#"
[keywords]
billing_issue = ["invoice"]
"#;
        assert!(toml::from_str::<TaxonomyConfig>(toml_str).is_err());
    }

    #[test]
    fn engine_config_maps_to_settings() {
        let engine = EngineConfig {
            model: Some("gpt-oss-120b".into()),
            temperature: Some(0.0),
            seed: Some(300),
            max_tokens: None,
        };
        let settings = engine.to_settings();
        assert_eq!(settings.model.as_deref(), Some("gpt-oss-120b"));
        assert_eq!(settings.temperature, Some(0.0));
        assert_eq!(settings.seed, Some(300));
        assert!(settings.extra.is_empty());
    }
}
