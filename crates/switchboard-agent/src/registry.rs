// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named agent factories.
//!
//! Each factory produces a fresh, unrouted [`DispatchingAgent`] per
//! conversation. The built-in factories differ only in their router.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use switchboard_config::model::{RoutingConfig, RoutingStrategy, SwitchboardConfig};
use switchboard_core::{ConversationEngine, EngineSettings, IssueClassifier, SwitchboardError};
use switchboard_router::{
    EngineClassifier, HeuristicRouter, IssueRouter, IssueTaxonomy, ModelRouter,
    SpecialistPromptBuilder,
};
use switchboard_tools::ToolRegistry;
use tracing::{debug, info};

use crate::dispatch::DispatchingAgent;

/// Registry name of the agent routed by the external classifier.
pub const MODEL_ROUTED_AGENT: &str = "telecom_multi_agent";

/// Registry name of the agent routed by keyword matching.
pub const HEURISTIC_ROUTED_AGENT: &str = "telecom_heuristic_multi_agent";

/// Creates agents for new conversations.
pub trait AgentFactory: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// A new agent with its own, unrouted conversation state.
    fn create(&self) -> DispatchingAgent;
}

/// Factory for a [`DispatchingAgent`] with a fixed router.
pub struct RoutedAgentFactory {
    name: String,
    description: String,
    router: Arc<dyn IssueRouter>,
    prompts: SpecialistPromptBuilder,
    engine: Arc<dyn ConversationEngine>,
    tools: Arc<ToolRegistry>,
    settings: EngineSettings,
}

impl RoutedAgentFactory {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        router: Arc<dyn IssueRouter>,
        deps: &AgentDeps,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            router,
            prompts: SpecialistPromptBuilder::new(deps.taxonomy.clone()),
            engine: deps.engine.clone(),
            tools: deps.tools.clone(),
            settings: deps.settings.clone(),
        }
    }

    /// The classifier-routed telecom agent.
    pub fn model(deps: &AgentDeps) -> Self {
        let mut router = ModelRouter::new(deps.classifier.clone(), deps.taxonomy.clone())
            .with_timeout(deps.classifier_timeout);
        if let Some(instructions) = &deps.classifier_instructions {
            router = router.with_instructions(instructions.clone());
        }
        Self::new(
            MODEL_ROUTED_AGENT,
            "Telecom support agent routed by a model classifier",
            Arc::new(router),
            deps,
        )
    }

    /// The keyword-routed telecom agent.
    pub fn heuristic(deps: &AgentDeps) -> Self {
        Self::new(
            HEURISTIC_ROUTED_AGENT,
            "Telecom support agent routed by keyword matching",
            Arc::new(HeuristicRouter::new(deps.taxonomy.clone())),
            deps,
        )
    }
}

impl AgentFactory for RoutedAgentFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn create(&self) -> DispatchingAgent {
        DispatchingAgent::new(
            self.router.clone(),
            self.prompts.clone(),
            self.engine.clone(),
            self.tools.clone(),
            self.settings.clone(),
        )
    }
}

/// Shared, read-only collaborators handed to every built-in factory.
#[derive(Clone)]
pub struct AgentDeps {
    pub taxonomy: Arc<IssueTaxonomy>,
    pub engine: Arc<dyn ConversationEngine>,
    pub classifier: Arc<dyn IssueClassifier>,
    pub tools: Arc<ToolRegistry>,
    pub settings: EngineSettings,
    pub classifier_timeout: Duration,
    /// Overrides the bundled classifier instructions when set.
    pub classifier_instructions: Option<String>,
}

impl AgentDeps {
    /// Assembles dependencies from configuration.
    ///
    /// Without an explicit classifier, the engine itself classifies, using the
    /// same model settings.
    pub async fn from_config(
        config: &SwitchboardConfig,
        engine: Arc<dyn ConversationEngine>,
        classifier: Option<Arc<dyn IssueClassifier>>,
        tools: Arc<ToolRegistry>,
    ) -> Result<Self, SwitchboardError> {
        let taxonomy = Arc::new(IssueTaxonomy::from_config(&config.taxonomy, &config.policies).await?);
        let settings = config.engine.to_settings();
        let classifier: Arc<dyn IssueClassifier> = match classifier {
            Some(classifier) => classifier,
            None => Arc::new(EngineClassifier::new(engine.clone(), settings.clone())),
        };
        let classifier_instructions = load_classifier_instructions(&config.routing).await?;

        Ok(Self {
            taxonomy,
            engine,
            classifier,
            tools,
            settings,
            classifier_timeout: Duration::from_secs(config.routing.classifier_timeout_secs),
            classifier_instructions,
        })
    }
}

/// File > inline > none (bundled instructions).
async fn load_classifier_instructions(
    routing: &RoutingConfig,
) -> Result<Option<String>, SwitchboardError> {
    if let Some(path) = &routing.classifier_prompt_file {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            SwitchboardError::Config(format!("cannot read classifier prompt file `{path}`: {e}"))
        })?;
        debug!(path = path.as_str(), "loaded classifier instructions from file");
        return Ok(Some(content.trim().to_string()));
    }
    Ok(routing
        .classifier_prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string))
}

/// Agent factories indexed by name.
pub struct AgentRegistry {
    factories: HashMap<String, Arc<dyn AgentFactory>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory under its `name()`, replacing any previous one.
    pub fn register(&mut self, factory: Arc<dyn AgentFactory>) {
        let name = factory.name().to_string();
        debug!(agent = %name, "registering agent factory");
        self.factories.insert(name, factory);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn AgentFactory>> {
        self.factories.get(name).cloned()
    }

    /// Creates a fresh agent from the factory registered as `name`.
    pub fn create(&self, name: &str) -> Result<DispatchingAgent, SwitchboardError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SwitchboardError::AgentNotFound {
                name: name.to_string(),
            })?;
        let agent = factory.create();
        debug!(agent = name, conversation_id = agent.conversation_id(), "agent created");
        Ok(agent)
    }

    /// Registered (name, description) pairs, sorted by name.
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .factories
            .values()
            .map(|f| (f.name(), f.description()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registers both built-in telecom agents.
pub fn register_builtin_agents(registry: &mut AgentRegistry, deps: &AgentDeps) {
    registry.register(Arc::new(RoutedAgentFactory::model(deps)));
    registry.register(Arc::new(RoutedAgentFactory::heuristic(deps)));
    info!(
        agents = registry.len(),
        timeout_secs = deps.classifier_timeout.as_secs(),
        "built-in agents registered"
    );
}

/// The built-in agent matching the configured routing strategy.
pub fn default_agent_name(routing: &RoutingConfig) -> &'static str {
    match routing.strategy {
        RoutingStrategy::Model => MODEL_ROUTED_AGENT,
        RoutingStrategy::Heuristic => HEURISTIC_ROUTED_AGENT,
    }
}
