use serde::{Deserialize, Serialize};
use std::fmt;

/// An analytics event matcher attached to a step. Only ever rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub event: String,
    #[serde(default)]
    pub matchers: Vec<SignatureMatcher>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureMatcher {
    pub field: String,
    #[serde(default = "default_operator")]
    pub operator: String,
    pub value: String,
}

fn default_operator() -> String {
    "=".to_string()
}

impl Signature {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            matchers: Vec::new(),
        }
    }

    pub fn with_matcher(
        mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.matchers.push(SignatureMatcher {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        });
        self
    }
}

/// `checkout_started where plan = pro and region != eu`
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event)?;
        for (i, m) in self.matchers.iter().enumerate() {
            let joiner = if i == 0 { "where" } else { "and" };
            write!(f, " {} {} {} {}", joiner, m.field, m.operator, m.value)?;
        }
        Ok(())
    }
}
