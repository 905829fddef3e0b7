//! Data-type classification of a result page.

use serde_json::Value;
use udc_core::{DataType, Record};

/// Classify records by inspecting the first one.
///
/// Checks run in order: empty, time series, single aggregate, nested, tabular.
pub fn classify(records: &[Record]) -> DataType {
    let Some(sample) = records.first() else {
        return DataType::Unknown;
    };

    if sample.contains_key("timestamp") && sample.contains_key("value") {
        return DataType::TimeSeries;
    }
    if records.len() == 1 && sample.contains_key("value") {
        return DataType::Aggregated;
    }
    if sample
        .values()
        .any(|v| matches!(v, Value::Object(_) | Value::Array(_)))
    {
        return DataType::Hierarchical;
    }
    DataType::Tabular
}
