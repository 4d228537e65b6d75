// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Switchboard integration tests.
//!
//! Provides mock collaborators and harness infrastructure for fast,
//! deterministic tests without a real language model.
//!
//! # Components
//!
//! - [`MockEngine`] - Mock conversational engine with scripted replies
//! - [`MockClassifier`] - Mock classifier with scripted labels, errors, or stalls
//! - [`TestHarness`] - Registry of built-in agents wired to the mocks

pub mod harness;
pub mod mock_classifier;
pub mod mock_engine;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_classifier::{MockClassification, MockClassifier};
pub use mock_engine::{MockEngine, MockReply};
