//! `udc query` - run one query and print the envelope.

use anyhow::{Context, Result, bail};
use std::sync::Arc;
use udc_core::{QueryRequest, UdcConfig};
use udc_policy::PolicySet;
use udc_runtime::{ConnectorRegistry, QueryExecutor};

pub async fn run(
    config: &UdcConfig,
    source: String,
    filters: &[String],
    limit: i64,
    offset: i64,
    voice: bool,
) -> Result<()> {
    let request = build_request(source, filters, limit, offset, voice)?;
    let query = request.into_query()?;

    let executor = QueryExecutor::new(
        Arc::new(ConnectorRegistry::from_config(&config.data)),
        Arc::new(PolicySet::builtin()),
    );
    let response = executor.execute(&query).await?;

    let json = serde_json::to_string_pretty(&response).context("Failed to serialize response")?;
    println!("{}", json);
    Ok(())
}

/// Build a request from `field=value` filter arguments.
pub fn build_request(
    source: String,
    filters: &[String],
    limit: i64,
    offset: i64,
    voice: bool,
) -> Result<QueryRequest> {
    let mut request = QueryRequest::new(source)
        .with_limit(limit)
        .with_offset(offset)
        .with_voice_context(voice);

    for filter in filters {
        let Some((field, value)) = filter.split_once('=') else {
            bail!("Invalid filter '{}': expected FIELD=VALUE", filter);
        };
        if field.is_empty() {
            bail!("Invalid filter '{}': field name is empty", filter);
        }
        request = request.with_filter(field, value);
    }
    Ok(request)
}
