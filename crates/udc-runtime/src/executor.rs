//! Query pipeline.
//!
//! fetch → filter → business rules → page → voice (optional) → classify.
//! The executor owns no mutable state; one instance serves every request.

use crate::error::ExecuteError;
use crate::registry::ConnectorRegistry;
use std::sync::Arc;
use tracing::Instrument;
use udc_core::{DataResponse, Metadata, Query, VOICE_SUMMARY_HINT, apply_filters};
use udc_policy::{PolicySet, RulesEngine, VoiceOptimizer, classify};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct QueryExecutor {
    registry: Arc<ConnectorRegistry>,
    policies: Arc<PolicySet>,
}

impl QueryExecutor {
    pub fn new(registry: Arc<ConnectorRegistry>, policies: Arc<PolicySet>) -> Self {
        Self { registry, policies }
    }

    pub fn registry(&self) -> &ConnectorRegistry {
        &self.registry
    }

    pub fn policies(&self) -> &PolicySet {
        &self.policies
    }

    /// Run a validated query end to end.
    pub async fn execute(&self, query: &Query) -> Result<DataResponse, ExecuteError> {
        let query_id = Uuid::new_v4();
        let span = tracing::info_span!("query", %query_id, source = %query.source);
        self.run(query).instrument(span).await
    }

    async fn run(&self, query: &Query) -> Result<DataResponse, ExecuteError> {
        let connector = self
            .registry
            .get(query.source)
            .ok_or(ExecuteError::UnknownSource(query.source))?;

        let records = connector.fetch().await.map_err(ExecuteError::Fetch)?;
        tracing::info!(fetched = records.len(), "records fetched");

        tracing::debug!(filters = ?query.filters, "applying filters");
        let filtered = apply_filters(records, &query.filters);
        tracing::info!(matched = filtered.len(), "filters applied");

        let ruled = RulesEngine::new(&self.policies).apply(query.source, filtered);
        let total_results = ruled.len();
        tracing::info!(total_results, "business rules applied");

        let (start, end) = query.page_bounds(ruled.len());
        let page: Vec<_> = ruled.into_iter().skip(start).take(end - start).collect();
        tracing::info!(offset = query.offset, limit = query.limit, page = page.len(), "page sliced");

        let (data, context) = if query.voice_context {
            let (data, summary) = VoiceOptimizer::new(&self.policies).optimize(query.source, page);
            tracing::info!(returned = data.len(), "voice summary generated");
            (data, Some(summary))
        } else {
            (page, None)
        };

        let data_type = classify(&data);
        let metadata = Metadata {
            total_results,
            returned_results: data.len(),
            data_type,
            freshness: connector.freshness().to_string(),
            note: self.policies.get(query.source).map(|p| p.note.clone()),
            summary_hint: context.as_ref().map(|_| VOICE_SUMMARY_HINT.to_string()),
        };
        tracing::info!(
            returned_results = metadata.returned_results,
            data_type = %data_type,
            "query complete"
        );

        Ok(DataResponse {
            data,
            metadata,
            context,
        })
    }
}
