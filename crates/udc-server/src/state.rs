//! Shared application state, built once at startup.

use std::sync::Arc;
use udc_assistant::{ChatDispatcher, OpenAiCompatibleClient, ToolExecutor};
use udc_core::UdcConfig;
use udc_policy::PolicySet;
use udc_runtime::{ConnectorRegistry, QueryExecutor};

#[derive(Clone)]
pub struct AppState {
    pub executor: Arc<QueryExecutor>,
    pub tools: Arc<ToolExecutor>,
    /// `None` when no chat model is configured.
    pub dispatcher: Option<Arc<ChatDispatcher>>,
}

impl AppState {
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self {
            tools: Arc::new(ToolExecutor::new(executor.clone())),
            executor,
            dispatcher: None,
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: ChatDispatcher) -> Self {
        self.dispatcher = Some(Arc::new(dispatcher));
        self
    }

    /// JSON file connectors, built-in policies and, when possible, the configured chat model.
    pub fn from_config(config: &UdcConfig) -> Self {
        let registry = Arc::new(ConnectorRegistry::from_config(&config.data));
        let executor = Arc::new(QueryExecutor::new(registry, Arc::new(PolicySet::builtin())));
        let state = Self::new(executor.clone());

        match OpenAiCompatibleClient::from_config(&config.llm) {
            Ok(client) => {
                tracing::info!(model = %client.model(), "chat model configured");
                let dispatcher = ChatDispatcher::new(Arc::new(client), executor)
                    .with_system_prompt(config.llm.system_prompt.clone());
                state.with_dispatcher(dispatcher)
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat disabled");
                state
            }
        }
    }
}
