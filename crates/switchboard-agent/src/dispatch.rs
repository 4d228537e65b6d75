// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dispatching agent.
//!
//! On the first turn the agent asks its router for a category, composes that
//! specialist's instructions and binds them. Every later turn skips the router
//! and goes straight to the conversational engine with the bound instructions,
//! the full history and the shared tool catalog.
//!
//! One agent serves one conversation and takes `&mut self` per turn, so turns
//! against an agent are sequential. Separate conversations use separate agents
//! and share only read-only pieces (taxonomy, tools, engine).

use std::sync::Arc;

use switchboard_core::{
    ConversationEngine, EngineRequest, EngineSettings, IssueCategory, Message, Role,
    RoutingDecision, RoutingSource, SwitchboardError,
};
use switchboard_router::{IssueRouter, SpecialistPromptBuilder};
use switchboard_tools::ToolRegistry;
use tracing::{debug, info, warn};

use crate::state::{BoundSpecialist, ConversationState, DispatchState};

/// One incoming turn.
#[derive(Debug, Clone)]
pub enum AgentInput {
    /// A message typed by the customer.
    User(String),
    /// Results of the tool calls requested by the previous assistant turn.
    ToolResults(Vec<Message>),
}

impl AgentInput {
    /// Text used to route a conversation whose first turn is this input.
    fn routing_text(&self) -> String {
        match self {
            AgentInput::User(text) => text.clone(),
            AgentInput::ToolResults(results) => results
                .iter()
                .map(Message::text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn into_messages(self) -> Result<Vec<Message>, SwitchboardError> {
        match self {
            AgentInput::User(text) => Ok(vec![Message::user(text)]),
            AgentInput::ToolResults(results) => {
                if let Some(bad) = results.iter().find(|m| m.role != Role::Tool) {
                    return Err(SwitchboardError::InvalidHistory(format!(
                        "tool result batch contains a `{}` message",
                        bad.role
                    )));
                }
                Ok(results)
            }
        }
    }
}

impl From<&str> for AgentInput {
    fn from(text: &str) -> Self {
        AgentInput::User(text.to_string())
    }
}

impl From<String> for AgentInput {
    fn from(text: String) -> Self {
        AgentInput::User(text)
    }
}

/// Routes a conversation once, then forwards every turn to the engine.
pub struct DispatchingAgent {
    router: Arc<dyn IssueRouter>,
    prompts: SpecialistPromptBuilder,
    engine: Arc<dyn ConversationEngine>,
    tools: Arc<ToolRegistry>,
    settings: EngineSettings,
    state: ConversationState,
}

impl DispatchingAgent {
    /// Creates an unrouted agent. The router is fixed for the agent's lifetime.
    pub fn new(
        router: Arc<dyn IssueRouter>,
        prompts: SpecialistPromptBuilder,
        engine: Arc<dyn ConversationEngine>,
        tools: Arc<ToolRegistry>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            router,
            prompts,
            engine,
            tools,
            settings,
            state: ConversationState::new(),
        }
    }

    /// Replaces the conversation with restored history. The agent stays unrouted.
    pub fn with_history(mut self, history: Vec<Message>) -> Result<Self, SwitchboardError> {
        self.state = ConversationState::with_history(history)?;
        Ok(self)
    }

    pub fn conversation_id(&self) -> &str {
        self.state.id()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn dispatch_state(&self) -> &DispatchState {
        self.state.dispatch()
    }

    pub fn is_routed(&self) -> bool {
        self.state.is_routed()
    }

    pub fn bound_category(&self) -> Option<IssueCategory> {
        self.state.bound_category()
    }

    pub fn bound_instructions(&self) -> Option<&str> {
        self.state.bound_instructions()
    }

    pub fn routing_decision(&self) -> Option<&RoutingDecision> {
        self.state.bound().map(|b| &b.decision)
    }

    pub fn history(&self) -> &[Message] {
        self.state.history()
    }

    pub fn router_source(&self) -> RoutingSource {
        self.router.source()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Sets the engine's sampling seed.
    pub fn set_seed(&mut self, seed: u64) {
        if let Some(previous) = self.settings.seed.replace(seed) {
            warn!(
                conversation_id = self.state.id(),
                previous,
                seed,
                "replacing existing engine seed"
            );
        }
    }

    /// Routes the conversation on `message` if it is still unrouted.
    ///
    /// Once routed this is a no-op returning the bound category; the router
    /// is not consulted again. Fails only when the chosen category has no
    /// policy, in which case the conversation stays unrouted.
    pub async fn route(&mut self, message: &str) -> Result<IssueCategory, SwitchboardError> {
        if let Some(category) = self.state.bound_category() {
            debug!(conversation_id = self.state.id(), %category, "already routed");
            return Ok(category);
        }

        let decision = self.router.route(message).await;
        let instructions = self.prompts.build(decision.category)?;
        let category = decision.category;

        info!(
            conversation_id = self.state.id(),
            %category,
            source = %decision.source,
            fallback = decision.fallback,
            reason = %decision.reason,
            "conversation routed"
        );

        self.state.bind(BoundSpecialist {
            decision,
            instructions,
        })?;
        Ok(category)
    }

    /// Handles one turn and returns the assistant's reply.
    ///
    /// Routes first if needed, appends the input to history, asks the engine
    /// for the next message and appends that too.
    pub async fn generate_next_message(
        &mut self,
        input: impl Into<AgentInput>,
    ) -> Result<Message, SwitchboardError> {
        let input = input.into();
        let routing_text = input.routing_text();
        let messages = input.into_messages()?;

        if !self.state.is_routed() {
            self.route(&routing_text).await?;
        }
        self.state.extend(messages);

        let instructions = self
            .state
            .bound_instructions()
            .ok_or_else(|| SwitchboardError::Internal("turn reached engine unrouted".to_string()))?
            .to_string();
        let request = EngineRequest {
            instructions,
            tools: self.tools.definitions(),
            history: self.state.history().to_vec(),
            settings: self.settings.clone(),
        };
        debug!(
            conversation_id = self.state.id(),
            engine = self.engine.name(),
            history_len = request.history.len(),
            tools = request.tools.len(),
            "forwarding turn to engine"
        );

        let reply = self.engine.generate(request).await?;
        self.state.push(reply.clone());
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use switchboard_router::{HeuristicRouter, IssueTaxonomy};
    use switchboard_tools::StaticTool;
    use tracing_test::traced_test;

    use super::*;

    /// Answers every turn with the same text and keeps the requests.
    #[derive(Default)]
    struct RecordingEngine {
        requests: Mutex<Vec<EngineRequest>>,
    }

    #[async_trait]
    impl ConversationEngine for RecordingEngine {
        fn name(&self) -> &str {
            "recording"
        }

        async fn generate(&self, request: EngineRequest) -> Result<Message, SwitchboardError> {
            self.requests.lock().unwrap().push(request);
            Ok(Message::assistant("ok"))
        }
    }

    /// Counts calls and delegates to the heuristic router.
    struct CountingRouter {
        inner: HeuristicRouter,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IssueRouter for CountingRouter {
        fn source(&self) -> RoutingSource {
            RoutingSource::Heuristic
        }

        async fn route(&self, message: &str) -> RoutingDecision {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.classify(message)
        }
    }

    fn fixture() -> (DispatchingAgent, Arc<RecordingEngine>, Arc<CountingRouter>) {
        let taxonomy = Arc::new(IssueTaxonomy::telecom().unwrap());
        let router = Arc::new(CountingRouter {
            inner: HeuristicRouter::new(taxonomy.clone()),
            calls: AtomicUsize::new(0),
        });
        let engine = Arc::new(RecordingEngine::default());
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(StaticTool::new(
            "toggle_airplane_mode",
            "Airplane mode on or off",
            serde_json::json!({"type": "object"}),
        )));
        let agent = DispatchingAgent::new(
            router.clone(),
            SpecialistPromptBuilder::new(taxonomy),
            engine.clone(),
            Arc::new(tools),
            EngineSettings::default(),
        );
        (agent, engine, router)
    }

    #[tokio::test]
    async fn routes_once_then_bypasses_router() {
        let (mut agent, engine, router) = fixture();
        agent
            .generate_next_message("I can't send picture messages")
            .await
            .unwrap();
        agent
            .generate_next_message("my data is slow too")
            .await
            .unwrap();

        assert_eq!(router.calls.load(Ordering::SeqCst), 1);
        assert_eq!(agent.bound_category(), Some(IssueCategory::MmsIssue));

        let requests = engine.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].instructions, requests[1].instructions);
        assert_eq!(requests[1].history.len(), 3);
    }

    #[tokio::test]
    async fn second_route_is_noop() {
        let (mut agent, _engine, router) = fixture();
        assert_eq!(agent.route("no signal").await.unwrap(), IssueCategory::ServiceIssue);
        assert_eq!(agent.route("mms broken").await.unwrap(), IssueCategory::ServiceIssue);
        assert_eq!(router.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn tool_results_are_appended_and_validated() {
        let (mut agent, _engine, _router) = fixture();
        agent.generate_next_message("no service").await.unwrap();
        agent
            .generate_next_message(AgentInput::ToolResults(vec![
                Message::tool_result("c1", "airplane mode: on"),
                Message::tool_result("c2", "sim: active"),
            ]))
            .await
            .unwrap();
        assert_eq!(agent.history().len(), 5);

        let err = agent
            .generate_next_message(AgentInput::ToolResults(vec![Message::user("sneaky")]))
            .await
            .unwrap_err();
        assert!(matches!(err, SwitchboardError::InvalidHistory(_)));
        assert_eq!(agent.history().len(), 5);
    }

    #[tokio::test]
    #[traced_test]
    async fn set_seed_warns_on_overwrite() {
        let (mut agent, engine, _router) = fixture();
        agent.set_seed(1);
        assert!(!logs_contain("replacing existing engine seed"));
        agent.set_seed(300);
        assert!(logs_contain("replacing existing engine seed"));

        agent.generate_next_message("hello").await.unwrap();
        assert_eq!(engine.requests.lock().unwrap()[0].settings.seed, Some(300));
    }
}
