// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end dispatch tests.
//!
//! `TestHarness` assembles the agent registry from configuration with a
//! [`MockEngine`] and a [`MockClassifier`], so tests can create registered
//! agents and drive whole conversations.

use std::sync::Arc;

use switchboard_agent::{
    AgentDeps, AgentRegistry, DispatchingAgent, default_agent_name, register_builtin_agents,
};
use switchboard_config::{SwitchboardConfig, load_and_validate_str};
use switchboard_core::SwitchboardError;
use switchboard_tools::{StaticTool, ToolRegistry};

use crate::mock_classifier::{MockClassification, MockClassifier};
use crate::mock_engine::MockEngine;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    replies: Vec<String>,
    classifications: Vec<MockClassification>,
    config_toml: String,
    tools: Vec<StaticTool>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            classifications: Vec::new(),
            config_toml: String::new(),
            tools: default_tools(),
        }
    }

    /// Set mock engine replies.
    pub fn with_engine_replies(mut self, replies: Vec<String>) -> Self {
        self.replies = replies;
        self
    }

    /// Set the mock classifier's script.
    pub fn with_classifications(mut self, script: Vec<MockClassification>) -> Self {
        self.classifications = script;
        self
    }

    /// Use this TOML instead of the compiled defaults. It is validated as usual.
    pub fn with_config_toml(mut self, toml: impl Into<String>) -> Self {
        self.config_toml = toml.into();
        self
    }

    /// Replace the default tool catalog.
    pub fn with_tools(mut self, tools: Vec<StaticTool>) -> Self {
        self.tools = tools;
        self
    }

    /// Build the harness, registering both built-in agents.
    pub async fn build(self) -> Result<TestHarness, SwitchboardError> {
        let config = load_and_validate_str(&self.config_toml).map_err(|errors| {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            SwitchboardError::Config(joined)
        })?;

        let engine = Arc::new(MockEngine::with_replies(self.replies));
        let classifier = Arc::new(MockClassifier::with_script(self.classifications));

        let mut tools = ToolRegistry::new();
        for tool in self.tools {
            tools.register(Arc::new(tool));
        }

        let deps = AgentDeps::from_config(
            &config,
            engine.clone(),
            Some(classifier.clone()),
            Arc::new(tools),
        )
        .await?;

        let mut registry = AgentRegistry::new();
        register_builtin_agents(&mut registry, &deps);

        Ok(TestHarness {
            engine,
            classifier,
            registry,
            deps,
            config,
        })
    }
}

/// A complete test environment with mock collaborators.
pub struct TestHarness {
    /// The mock conversational engine.
    pub engine: Arc<MockEngine>,
    /// The mock classifier used by the model-routed agent.
    pub classifier: Arc<MockClassifier>,
    /// Registry holding both built-in agents.
    pub registry: AgentRegistry,
    /// Shared dependencies the agents were built from.
    pub deps: AgentDeps,
    /// Validated configuration.
    pub config: SwitchboardConfig,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A fresh agent from the registry.
    pub fn agent(&self, name: &str) -> Result<DispatchingAgent, SwitchboardError> {
        self.registry.create(name)
    }

    /// A fresh agent of the kind selected by `routing.strategy`.
    pub fn default_agent(&self) -> Result<DispatchingAgent, SwitchboardError> {
        self.registry.create(default_agent_name(&self.config.routing))
    }
}

/// A small telecom-flavoured catalog shared by every specialist.
fn default_tools() -> Vec<StaticTool> {
    let toggle = serde_json::json!({
        "type": "object",
        "properties": { "enabled": { "type": "boolean" } },
        "required": ["enabled"]
    });
    let empty = serde_json::json!({ "type": "object", "properties": {} });
    vec![
        StaticTool::new(
            "check_network_status",
            "Reports cellular and Wi-Fi connection state",
            empty.clone(),
        ),
        StaticTool::new("toggle_airplane_mode", "Turns airplane mode on or off", toggle.clone()),
        StaticTool::new("toggle_roaming", "Turns data roaming on or off", toggle),
        StaticTool::new("can_send_mms", "Checks whether MMS can be sent", empty),
    ]
}
