// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External text-classification capability used by the model-based router.

use async_trait::async_trait;

use crate::error::SwitchboardError;

/// Classifies a message given a fixed instructional prompt and returns the raw
/// text response.
///
/// Mapping the response onto a category, and recovering from errors, is the
/// caller's job.
#[async_trait]
pub trait IssueClassifier: Send + Sync {
    /// Returns the human-readable name of this classifier.
    fn name(&self) -> &str;

    /// Sends `prompt` and `message` to the classifier and returns its raw answer.
    async fn classify(&self, prompt: &str, message: &str) -> Result<String, SwitchboardError>;
}
