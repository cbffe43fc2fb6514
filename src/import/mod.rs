//! Import of user-authored journey documents.
//!
//! A document is a JSON object with at least a `title` string and a `steps` array whose
//! entries each carry a `title` string. Validation collects every structural problem into
//! [`ImportError::Invalid`]; a valid document is converted into a [`Journey`] in which
//! every step has a stable identifier, even when the document omitted them.

use crate::error::{FieldError, ImportError};
use crate::journey::{IntoJourney, Journey, JourneyAnalytics, Metric, Signature, Step, Trend};
use ahash::AHashSet;
use serde_json::Value;
use std::fs;
use tracing::debug;

pub mod raw;
pub mod validation;

use raw::{RawJourney, RawStep, normalize_aliases};
pub use validation::validate_document;

/// Display value used when a metric has no usable value.
pub const MISSING_METRIC_VALUE: &str = "n/a";
/// Journey id used when the title does not produce a usable slug.
pub const FALLBACK_JOURNEY_ID: &str = "imported-journey";

/// Parses and validates a single journey document.
pub fn import_journey(json: &str) -> Result<Journey, ImportError> {
    let value: Value = serde_json::from_str(json).map_err(|e| ImportError::Json(e.to_string()))?;
    import_journey_value(value)
}

/// Validates an already-parsed document and converts it.
pub fn import_journey_value(value: Value) -> Result<Journey, ImportError> {
    let errors = validate_document(&value, "");
    if !errors.is_empty() {
        return Err(ImportError::Invalid { errors });
    }
    convert_document(value)
}

fn convert_document(mut value: Value) -> Result<Journey, ImportError> {
    normalize_aliases(&mut value);
    let raw: RawJourney =
        serde_json::from_value(value).map_err(|e| ImportError::Json(e.to_string()))?;
    raw.into_journey()
}

/// Parses either a single journey object or an array of them.
///
/// Field paths in errors are prefixed with the array index (`[1].steps[0].title`).
pub fn import_journeys(json: &str) -> Result<Vec<Journey>, ImportError> {
    let value: Value = serde_json::from_str(json).map_err(|e| ImportError::Json(e.to_string()))?;
    let Value::Array(entries) = value else {
        return import_journey_value(value).map(|j| vec![j]);
    };

    let errors: Vec<FieldError> = entries
        .iter()
        .enumerate()
        .flat_map(|(i, entry)| validate_document(entry, &format!("[{}]", i)))
        .collect();
    if !errors.is_empty() {
        return Err(ImportError::Invalid { errors });
    }

    entries.into_iter().map(convert_document).collect()
}

/// Reads a journey document (or an array of them) from disk.
pub fn import_journeys_file(path: &str) -> Result<Vec<Journey>, ImportError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ImportError::Json(format!("Could not read file '{}': {}", path, e)))?;
    import_journeys(&content)
}

// --- Converter Implementation ---

impl IntoJourney for RawJourney {
    fn into_journey(self) -> Result<Journey, ImportError> {
        let step_ids = assign_step_ids(&self.steps);
        let steps = self
            .steps
            .into_iter()
            .zip(step_ids)
            .map(|(raw, id)| convert_step(raw, id))
            .collect::<Vec<_>>();

        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| slugify(&self.title));

        let analytics = self
            .analytics
            .and_then(|v| serde_json::from_value::<JourneyAnalytics>(v).ok());

        debug!(journey = %id, steps = steps.len(), "imported journey");

        Ok(Journey {
            id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            value_stream: self.value_stream.filter(|s| !s.trim().is_empty()),
            metrics_start_date: self.metrics_start_date.filter(|s| !s.trim().is_empty()),
            analytics,
            steps,
        })
    }
}

fn convert_step(raw: RawStep, id: String) -> Step {
    let metrics = raw
        .metrics
        .unwrap_or_default()
        .into_iter()
        .map(|m| Metric {
            label: m.label,
            value: m
                .value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| MISSING_METRIC_VALUE.to_string()),
            trend: m
                .trend
                .as_deref()
                .map(Trend::parse_lenient)
                .unwrap_or_default(),
        })
        .collect();

    Step {
        id,
        title: raw.title,
        description: raw.description.unwrap_or_default(),
        detail: raw.detail.filter(|d| !d.trim().is_empty()),
        metrics,
        icon: raw.icon.filter(|i| !i.trim().is_empty()),
        phase: raw.phase.unwrap_or_default(),
        signature: raw
            .signature
            .and_then(|v| serde_json::from_value::<Signature>(v).ok()),
    }
}

/// Gives every step an identifier. Explicit ids are kept; missing ones become
/// `step-<position>` (1-based), skipping any id already taken.
fn assign_step_ids(steps: &[RawStep]) -> Vec<String> {
    let explicit: Vec<Option<String>> = steps
        .iter()
        .map(|s| {
            s.id.as_ref()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
        })
        .collect();

    let mut used: AHashSet<String> = explicit.iter().flatten().cloned().collect();

    explicit
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            id.unwrap_or_else(|| {
                let base = format!("step-{}", i + 1);
                let mut candidate = base.clone();
                let mut suffix = 2;
                while used.contains(&candidate) {
                    candidate = format!("{}-{}", base, suffix);
                    suffix += 1;
                }
                used.insert(candidate.clone());
                candidate
            })
        })
        .collect()
}

/// Lowercase ASCII slug of a title: `"Checkout Flow!"` becomes `checkout-flow`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        FALLBACK_JOURNEY_ID.to_string()
    } else {
        slug
    }
}
