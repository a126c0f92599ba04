use serde_json::Value;

use crate::analyzers::classifier::EventClassifier;
use crate::types::{EventClass, LabelSequence, StateLabel};

/// Lazily extract state labels from one conversation record.
///
/// Walks `turns[].events[]` in order. Anything missing or of the wrong shape
/// (non-object record, non-list `turns`/`events`, non-string `name`/`value`)
/// counts as empty, so partial logs never fail.
pub fn extract_labels<'a>(
    record: &'a Value,
    classifier: &'a dyn EventClassifier,
) -> impl Iterator<Item = StateLabel> + 'a {
    list_field(record, "turns")
        .flat_map(|turn| list_field(turn, "events"))
        .filter_map(|event| {
            let name = event.get("name")?.as_str()?;
            let value = event.get("value")?.as_str()?;
            Some((name, value))
        })
        .flat_map(move |(name, value)| classifier.classify(name, value))
        .filter_map(EventClass::into_label)
}

/// Collected form of [`extract_labels`].
pub fn extract_sequence(record: &Value, classifier: &dyn EventClassifier) -> LabelSequence {
    extract_labels(record, classifier).collect()
}

/// One sequence per record, input order preserved.
pub fn extract_sequences(records: &[Value], classifier: &dyn EventClassifier) -> Vec<LabelSequence> {
    records
        .iter()
        .map(|record| extract_sequence(record, classifier))
        .collect()
}

fn list_field<'a>(value: &'a Value, key: &str) -> std::slice::Iter<'a, Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
}
