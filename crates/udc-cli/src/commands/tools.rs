//! `udc tools` - print the tool definitions declared to the model.

use anyhow::{Context, Result};
use udc_assistant::ToolDefinition;

pub fn run() -> Result<()> {
    let tools = vec![ToolDefinition::query_data().to_openai()];
    let json = serde_json::to_string_pretty(&tools).context("Failed to serialize tool definitions")?;
    println!("{}", json);
    Ok(())
}
