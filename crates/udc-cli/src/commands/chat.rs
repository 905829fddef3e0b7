//! `udc chat` - one chat turn against the configured model.

use anyhow::{Context, Result};
use std::sync::Arc;
use udc_assistant::{ChatDispatcher, OpenAiCompatibleClient};
use udc_core::UdcConfig;
use udc_policy::PolicySet;
use udc_runtime::{ConnectorRegistry, QueryExecutor};

pub async fn run(config: &UdcConfig, message: &str) -> Result<()> {
    let client = OpenAiCompatibleClient::from_config(&config.llm)
        .context("Chat model is not available")?;

    let executor = Arc::new(QueryExecutor::new(
        Arc::new(ConnectorRegistry::from_config(&config.data)),
        Arc::new(PolicySet::builtin()),
    ));
    let dispatcher = ChatDispatcher::new(Arc::new(client), executor)
        .with_system_prompt(config.llm.system_prompt.clone());

    let answer = dispatcher.respond(message).await?;
    println!("{}", answer);
    Ok(())
}
