// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The issue taxonomy: category priority, keyword sets, and specialist policies.
//!
//! A taxonomy is built once and is read-only afterwards, so a single
//! `Arc<IssueTaxonomy>` can be shared by every concurrent conversation.

use std::collections::{BTreeMap, HashSet};

use switchboard_config::model::{PolicyConfig, TaxonomyConfig};
use switchboard_core::{IssueCategory, SwitchboardError};
use tracing::{debug, info};

use crate::builtin;

/// Keywords that select one category, lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    pub category: IssueCategory,
    pub keywords: Vec<String>,
}

impl KeywordSet {
    /// Returns the first keyword contained in `lowered`, which must already be lowercase.
    pub fn first_match(&self, lowered: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| lowered.contains(k.as_str()))
            .map(String::as_str)
    }
}

/// The instruction texts owned by one specialist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialistPolicy {
    pub category: IssueCategory,
    pub base_policy_text: String,
    pub specific_policy_text: String,
}

/// Category priority, keyword sets and policies for a deployment.
#[derive(Debug, Clone)]
pub struct IssueTaxonomy {
    keyword_sets: Vec<KeywordSet>,
    policies: BTreeMap<IssueCategory, SpecialistPolicy>,
    default_category: IssueCategory,
    appendix: Option<String>,
}

impl IssueTaxonomy {
    pub fn builder() -> TaxonomyBuilder {
        TaxonomyBuilder::default()
    }

    /// The bundled telecom taxonomy with default keywords and policies.
    pub fn telecom() -> Result<Self, SwitchboardError> {
        let taxonomy = TaxonomyConfig::default();
        let mut builder = Self::builder()
            .default_category(taxonomy.default_category)
            .base_policy(builtin::BASE_POLICY)
            .appendix(builtin::DEVICE_CAPABILITIES);
        for category in taxonomy.priority {
            let keywords = taxonomy.keywords.get(&category).cloned().unwrap_or_default();
            builder = builder
                .category(category, keywords)
                .policy(category, builtin::specialized_policy(category));
        }
        builder.build()
    }

    /// Builds a taxonomy from configuration, reading any policy files it names.
    ///
    /// For each text slot the file wins over the inline value, which wins over
    /// the bundled text. An unreadable policy file is a configuration error.
    pub async fn from_config(
        taxonomy: &TaxonomyConfig,
        policies: &PolicyConfig,
    ) -> Result<Self, SwitchboardError> {
        let base = resolve_text(
            policies.base_file.as_deref(),
            policies.base.as_deref(),
            builtin::BASE_POLICY,
        )
        .await?;
        let appendix = resolve_text(
            policies.appendix_file.as_deref(),
            policies.appendix.as_deref(),
            builtin::DEVICE_CAPABILITIES,
        )
        .await?;

        let mut builder = Self::builder()
            .default_category(taxonomy.default_category)
            .base_policy(base)
            .appendix(appendix);

        for &category in &taxonomy.priority {
            let keywords = taxonomy.keywords.get(&category).cloned().unwrap_or_default();
            let text = resolve_text(
                policies.specialized_files.get(&category).map(String::as_str),
                policies.specialized.get(&category).map(String::as_str),
                builtin::specialized_policy(category),
            )
            .await?;
            builder = builder.category(category, keywords).policy(category, text);
        }

        for category in taxonomy.keywords.keys() {
            if !taxonomy.priority.contains(category) {
                debug!(%category, "ignoring keywords for category outside taxonomy.priority");
            }
        }

        let built = builder.build()?;
        info!(
            categories = built.keyword_sets.len(),
            default = %built.default_category,
            "issue taxonomy loaded"
        );
        Ok(built)
    }

    /// Categories in match priority order, most specific first.
    pub fn categories_in_priority_order(&self) -> Vec<IssueCategory> {
        self.keyword_sets.iter().map(|s| s.category).collect()
    }

    /// Keyword sets in priority order.
    pub fn keyword_sets(&self) -> &[KeywordSet] {
        &self.keyword_sets
    }

    /// Keywords for `category`; empty if the category is not part of this taxonomy.
    pub fn keywords_for(&self, category: IssueCategory) -> &[String] {
        self.keyword_sets
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.keywords.as_slice())
            .unwrap_or_default()
    }

    /// The policy for `category`.
    ///
    /// Fails with [`SwitchboardError::Config`] naming the category when no
    /// policy is registered for it.
    pub fn policy_for(&self, category: IssueCategory) -> Result<&SpecialistPolicy, SwitchboardError> {
        self.policies.get(&category).ok_or_else(|| {
            SwitchboardError::Config(format!(
                "no specialist policy registered for category `{category}`"
            ))
        })
    }

    pub fn default_category(&self) -> IssueCategory {
        self.default_category
    }

    /// Shared trailer appended after the specialised text, if any.
    pub fn appendix(&self) -> Option<&str> {
        self.appendix.as_deref()
    }

    pub fn contains(&self, category: IssueCategory) -> bool {
        self.policies.contains_key(&category)
    }

    /// Category labels in priority order, joined with `", "`.
    pub fn labels(&self) -> String {
        self.keyword_sets
            .iter()
            .map(|s| s.category.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Picks file > inline > bundled, trimming the result.
async fn resolve_text(
    file: Option<&str>,
    inline: Option<&str>,
    bundled: &str,
) -> Result<String, SwitchboardError> {
    if let Some(path) = file {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            SwitchboardError::Config(format!("cannot read policy file `{path}`: {e}"))
        })?;
        debug!(path, "loaded policy text from file");
        return Ok(content.trim().to_string());
    }
    Ok(inline.unwrap_or(bundled).trim().to_string())
}

/// Builder for [`IssueTaxonomy`].
///
/// Categories are prioritised in the order [`category`](Self::category) is called.
#[derive(Debug, Default)]
pub struct TaxonomyBuilder {
    categories: Vec<(IssueCategory, Vec<String>)>,
    policies: BTreeMap<IssueCategory, String>,
    base_policy: String,
    appendix: Option<String>,
    default_category: Option<IssueCategory>,
}

impl TaxonomyBuilder {
    /// Registers `category` at the next priority slot with its keywords.
    pub fn category<I, S>(mut self, category: IssueCategory, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords = keywords.into_iter().map(Into::into).collect();
        self.categories.push((category, keywords));
        self
    }

    /// Sets the specialised policy text for `category`.
    pub fn policy(mut self, category: IssueCategory, text: impl Into<String>) -> Self {
        self.policies.insert(category, text.into());
        self
    }

    pub fn base_policy(mut self, text: impl Into<String>) -> Self {
        self.base_policy = text.into();
        self
    }

    /// Sets the shared trailer. Blank text means no trailer.
    pub fn appendix(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.appendix = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    pub fn default_category(mut self, category: IssueCategory) -> Self {
        self.default_category = Some(category);
        self
    }

    /// Validates and freezes the taxonomy.
    pub fn build(self) -> Result<IssueTaxonomy, SwitchboardError> {
        if self.categories.is_empty() {
            return Err(SwitchboardError::Config(
                "taxonomy has no categories configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut keyword_sets = Vec::with_capacity(self.categories.len());
        for (category, keywords) in self.categories {
            if !seen.insert(category) {
                return Err(SwitchboardError::Config(format!(
                    "category `{category}` is registered more than once"
                )));
            }
            let mut lowered = Vec::with_capacity(keywords.len());
            for keyword in keywords {
                let keyword = keyword.trim().to_lowercase();
                if keyword.is_empty() {
                    return Err(SwitchboardError::Config(format!(
                        "category `{category}` has an empty keyword"
                    )));
                }
                lowered.push(keyword);
            }
            keyword_sets.push(KeywordSet {
                category,
                keywords: lowered,
            });
        }

        let default_category = self.default_category.ok_or_else(|| {
            SwitchboardError::Config("taxonomy has no default category".to_string())
        })?;
        if !seen.contains(&default_category) {
            return Err(SwitchboardError::Config(format!(
                "default category `{default_category}` is not a registered category"
            )));
        }

        if let Some(orphan) = self.policies.keys().find(|c| !seen.contains(*c)) {
            return Err(SwitchboardError::Config(format!(
                "policy given for `{orphan}`, which is not a registered category"
            )));
        }

        let base = self.base_policy.trim().to_string();
        let mut policies = BTreeMap::new();
        for set in &keyword_sets {
            let text = self.policies.get(&set.category).ok_or_else(|| {
                SwitchboardError::Config(format!(
                    "no specialist policy registered for category `{}`",
                    set.category
                ))
            })?;
            policies.insert(
                set.category,
                SpecialistPolicy {
                    category: set.category,
                    base_policy_text: base.clone(),
                    specific_policy_text: text.trim().to_string(),
                },
            );
        }

        Ok(IssueTaxonomy {
            keyword_sets,
            policies,
            default_category,
            appendix: self.appendix.map(|a| a.trim().to_string()),
        })
    }
}
