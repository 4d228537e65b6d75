// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Specialist instruction composition.

use std::sync::Arc;

use switchboard_core::{IssueCategory, SwitchboardError};

use crate::taxonomy::IssueTaxonomy;

const SECTION_SEPARATOR: &str = "\n\n";

/// Composes the full instruction text for a specialist.
///
/// Layout: base policy, then the category's policy, then the shared appendix
/// when the taxonomy has one. The text is final; nothing is templated later.
#[derive(Debug, Clone)]
pub struct SpecialistPromptBuilder {
    taxonomy: Arc<IssueTaxonomy>,
}

impl SpecialistPromptBuilder {
    pub fn new(taxonomy: Arc<IssueTaxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Builds the instructions for `category`.
    ///
    /// Fails with a configuration error if the taxonomy has no policy for it.
    pub fn build(&self, category: IssueCategory) -> Result<String, SwitchboardError> {
        let policy = self.taxonomy.policy_for(category)?;
        let mut text = String::with_capacity(
            policy.base_policy_text.len()
                + policy.specific_policy_text.len()
                + self.taxonomy.appendix().map_or(0, str::len)
                + 2 * SECTION_SEPARATOR.len(),
        );
        text.push_str(&policy.base_policy_text);
        text.push_str(SECTION_SEPARATOR);
        text.push_str(&policy.specific_policy_text);
        if let Some(appendix) = self.taxonomy.appendix() {
            text.push_str(SECTION_SEPARATOR);
            text.push_str(appendix);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    fn small_taxonomy(appendix: &str) -> Arc<IssueTaxonomy> {
        Arc::new(
            IssueTaxonomy::builder()
                .default_category(IssueCategory::ServiceIssue)
                .base_policy("BASE\n")
                .appendix(appendix)
                .category(IssueCategory::ServiceIssue, ["signal"])
                .policy(IssueCategory::ServiceIssue, "SERVICE")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn base_then_specific_then_appendix() {
        let builder = SpecialistPromptBuilder::new(small_taxonomy("DEVICE"));
        assert_eq!(
            builder.build(IssueCategory::ServiceIssue).unwrap(),
            "BASE\n\nSERVICE\n\nDEVICE"
        );
    }

    #[test]
    fn no_appendix_section_when_disabled() {
        let builder = SpecialistPromptBuilder::new(small_taxonomy(""));
        assert_eq!(builder.build(IssueCategory::ServiceIssue).unwrap(), "BASE\n\nSERVICE");
    }

    #[test]
    fn build_is_idempotent() {
        let builder = SpecialistPromptBuilder::new(Arc::new(IssueTaxonomy::telecom().unwrap()));
        for category in [
            IssueCategory::MmsIssue,
            IssueCategory::MobileDataIssue,
            IssueCategory::ServiceIssue,
        ] {
            assert_eq!(builder.build(category).unwrap(), builder.build(category).unwrap());
        }
    }

    #[test]
    fn telecom_prompt_starts_with_base_followed_by_specialist() {
        let builder = SpecialistPromptBuilder::new(Arc::new(IssueTaxonomy::telecom().unwrap()));
        let text = builder.build(IssueCategory::MmsIssue).unwrap();
        let base = builtin::BASE_POLICY.trim();
        let specific = builtin::specialized_policy(IssueCategory::MmsIssue).trim();
        assert!(text.starts_with(base));
        assert!(text[base.len()..].starts_with(&format!("\n\n{specific}")));
        assert!(text.ends_with(builtin::DEVICE_CAPABILITIES.trim()));
    }

    #[test]
    fn specialists_differ_only_in_policy_text() {
        let builder = SpecialistPromptBuilder::new(Arc::new(IssueTaxonomy::telecom().unwrap()));
        let mms = builder.build(IssueCategory::MmsIssue).unwrap();
        let data = builder.build(IssueCategory::MobileDataIssue).unwrap();
        assert_ne!(mms, data);
        assert!(data.contains("Specialist: Mobile Data"));
    }

    #[test]
    fn missing_policy_is_config_error() {
        let builder = SpecialistPromptBuilder::new(small_taxonomy(""));
        let err = builder.build(IssueCategory::MmsIssue).unwrap_err();
        assert!(matches!(err, SwitchboardError::Config(ref m) if m.contains("mms_issue")));
    }
}
