// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bundled telecom policy texts, used wherever configuration leaves a slot empty.

use switchboard_core::IssueCategory;

/// Conduct, tool-usage and escalation rules shared by every specialist.
pub const BASE_POLICY: &str = include_str!("../policies/base.md");

/// Catalogue of actions the customer can perform on their phone.
pub const DEVICE_CAPABILITIES: &str = include_str!("../policies/device_capabilities.md");

/// Instructions given to the classifier by the model-based router.
pub const ROUTER_INSTRUCTIONS: &str = include_str!("../policies/router.md");

const SERVICE_ISSUE_POLICY: &str = include_str!("../policies/service_issue.md");
const MOBILE_DATA_ISSUE_POLICY: &str = include_str!("../policies/mobile_data_issue.md");
const MMS_ISSUE_POLICY: &str = include_str!("../policies/mms_issue.md");

/// The bundled specialist policy for `category`.
pub fn specialized_policy(category: IssueCategory) -> &'static str {
    match category {
        IssueCategory::ServiceIssue => SERVICE_ISSUE_POLICY,
        IssueCategory::MobileDataIssue => MOBILE_DATA_ISSUE_POLICY,
        IssueCategory::MmsIssue => MMS_ISSUE_POLICY,
    }
}
