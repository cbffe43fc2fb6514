use crate::error::FieldError;
use ahash::AHashMap;
use serde_json::Value;

/// Checks the structural requirements of a journey document.
///
/// Every problem found is reported rather than stopping at the first one, so the caller
/// can show a complete, itemized list. `prefix` is prepended to field paths when the
/// document is nested inside a larger one (e.g. `[3]` for the fourth entry of an array).
pub fn validate_document(value: &Value, prefix: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let Some(root) = value.as_object() else {
        let field = if prefix.is_empty() { "(root)" } else { prefix };
        errors.push(FieldError::new(field, "expected a JSON object"));
        return errors;
    };

    match root.get("title") {
        None => errors.push(FieldError::new(path(prefix, "title"), "is required")),
        Some(Value::String(_)) => {}
        Some(other) => errors.push(FieldError::new(
            path(prefix, "title"),
            format!("must be a string, found {}", type_name(other)),
        )),
    }

    let steps = match root.get("steps") {
        None => {
            errors.push(FieldError::new(path(prefix, "steps"), "is required"));
            return errors;
        }
        Some(Value::Array(steps)) => steps,
        Some(other) => {
            errors.push(FieldError::new(
                path(prefix, "steps"),
                format!("must be an array, found {}", type_name(other)),
            ));
            return errors;
        }
    };

    let mut seen_ids: AHashMap<String, usize> = AHashMap::new();
    for (i, step) in steps.iter().enumerate() {
        let step_path = format!("{}[{}]", path(prefix, "steps"), i);
        let Some(step_obj) = step.as_object() else {
            errors.push(FieldError::new(
                &step_path,
                format!("must be an object, found {}", type_name(step)),
            ));
            continue;
        };

        match step_obj.get("title") {
            None => errors.push(FieldError::new(format!("{}.title", step_path), "is required")),
            Some(Value::String(_)) => {}
            Some(other) => errors.push(FieldError::new(
                format!("{}.title", step_path),
                format!("must be a string, found {}", type_name(other)),
            )),
        }

        if let Some(id) = step_obj.get("id").and_then(explicit_id) {
            if let Some(first) = seen_ids.get(&id) {
                errors.push(FieldError::new(
                    format!("{}.id", step_path),
                    format!("duplicates the id of {}[{}] ('{}')", path(prefix, "steps"), first, id),
                ));
            } else {
                seen_ids.insert(id, i);
            }
        }

        match step_obj.get("metrics") {
            None | Some(Value::Null) => {}
            Some(Value::Array(metrics)) => {
                for (j, metric) in metrics.iter().enumerate() {
                    let metric_path = format!("{}.metrics[{}]", step_path, j);
                    match metric.get("label") {
                        Some(Value::String(_)) => {}
                        _ if !metric.is_object() => errors.push(FieldError::new(
                            &metric_path,
                            format!("must be an object, found {}", type_name(metric)),
                        )),
                        None => errors.push(FieldError::new(
                            format!("{}.label", metric_path),
                            "is required",
                        )),
                        Some(other) => errors.push(FieldError::new(
                            format!("{}.label", metric_path),
                            format!("must be a string, found {}", type_name(other)),
                        )),
                    }
                }
            }
            Some(other) => errors.push(FieldError::new(
                format!("{}.metrics", step_path),
                format!("must be an array, found {}", type_name(other)),
            )),
        }
    }

    errors
}

/// Reads an explicitly provided step id. Blank strings count as absent.
pub(crate) fn explicit_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_prefixing() {
        assert_eq!(path("", "title"), "title");
        assert_eq!(path("[2]", "steps"), "[2].steps");
    }

    #[test]
    fn test_explicit_id_accepts_numbers_and_skips_blank() {
        assert_eq!(explicit_id(&json!(7)), Some("7".to_string()));
        assert_eq!(explicit_id(&json!("  a ")), Some("a".to_string()));
        assert_eq!(explicit_id(&json!("   ")), None);
        assert_eq!(explicit_id(&json!(null)), None);
    }

    #[test]
    fn test_non_object_root() {
        let errors = validate_document(&json!([1, 2]), "");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "(root)");
    }
}
