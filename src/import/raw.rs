use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

// --- JSON Deserialization Structs (Import Format Specific) ---
// These mirror the user-authored journey document. Structural requirements are checked
// by `validation` before these are deserialized, so optional fields here are lenient.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJourney {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value_stream: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub metrics_start_date: Option<String>,
    #[serde(default)]
    pub analytics: Option<Value>,
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
pub struct RawStep {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detail: Option<String>,
    #[serde(default)]
    pub metrics: Option<Vec<RawMetric>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phase: Option<String>,
    #[serde(default)]
    pub signature: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawMetric {
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub trend: Option<String>,
}

/// Alternate spellings accepted for journey-level keys, canonical key first.
const JOURNEY_ALIASES: &[(&str, &[&str])] = &[
    ("valueStream", &["value_stream"]),
    ("metricsStartDate", &["metrics_start_date"]),
];

/// Alternate spellings accepted for step-level keys, canonical key first.
const STEP_ALIASES: &[(&str, &[&str])] = &[("detail", &["details", "longDescription"])];

/// Folds alternate key spellings into their canonical key so a document may carry
/// several of them at once. The canonical key wins; otherwise the first alias present,
/// in the order listed above. The other spellings are dropped.
pub fn normalize_aliases(document: &mut Value) {
    let Some(root) = document.as_object_mut() else {
        return;
    };
    fold_keys(root, JOURNEY_ALIASES);
    if let Some(Value::Array(steps)) = root.get_mut("steps") {
        for step in steps.iter_mut().filter_map(Value::as_object_mut) {
            fold_keys(step, STEP_ALIASES);
        }
    }
}

fn fold_keys(object: &mut Map<String, Value>, aliases: &[(&str, &[&str])]) {
    for (canonical, alternates) in aliases {
        let mut taken: Vec<Value> = alternates
            .iter()
            .filter_map(|alias| object.remove(*alias))
            .collect();
        if !object.contains_key(*canonical) && !taken.is_empty() {
            object.insert(canonical.to_string(), taken.remove(0));
        }
    }
}

/// Accepts strings, numbers and booleans as display text. Anything else reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
