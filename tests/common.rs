//! Common test utilities for building journeys and journey documents.
use journeymap::prelude::*;

/// Three steps A -> B -> C with phases and a metric on the first two.
#[allow(dead_code)]
pub fn create_abc_journey() -> Journey {
    Journey::new("abc", "ABC Journey")
        .with_description("Three steps in a row.")
        .with_value_stream("Growth")
        .with_step(
            Step::new("a", "Step A")
                .with_phase("Discovery")
                .with_metric(Metric::new("Visits", "1,000", Trend::Up)),
        )
        .with_step(
            Step::new("b", "Step B")
                .with_phase("Signup")
                .with_metric(Metric::new("Signups", "250", Trend::Down)),
        )
        .with_step(Step::new("c", "Step C").with_phase("Activation"))
}

/// A journey whose single step carries enough text to spill onto continuation pages.
#[allow(dead_code)]
pub fn create_long_step_journey() -> Journey {
    let paragraph = "The customer reads through the terms, compares plans and asks a colleague \
                     before deciding. ";
    let mut step = Step::new("long", "Long Step")
        .with_phase("Research")
        .with_description(paragraph.repeat(40))
        .with_detail(paragraph.repeat(40));
    for i in 0..30 {
        step = step.with_metric(Metric::new(format!("Metric {}", i), format!("{}%", i), Trend::Neutral));
    }
    Journey::new("long", "Long Journey").with_step(step)
}

/// Valid document: ids omitted on two steps, one explicit.
#[allow(dead_code)]
pub const SIMPLE_JOURNEY_JSON: &str = r#"
{
    "title": "Newsletter Signup",
    "description": "From landing page to confirmed subscription.",
    "valueStream": "Marketing",
    "steps": [
        { "title": "Landing", "phase": "Discovery", "metrics": [{ "label": "Visits", "value": "12k", "trend": "up" }] },
        { "id": "form", "title": "Form", "phase": "Signup", "details": "Email and name only." },
        { "title": "Confirm", "phase": "Activation", "metrics": [{ "label": "Confirmed", "value": 840 }] }
    ]
}
"#;

/// Invalid document with several independent problems.
#[allow(dead_code)]
pub const BROKEN_JOURNEY_JSON: &str = r#"
{
    "description": "No title here",
    "steps": [
        { "title": "Fine" },
        { "phase": "Missing title" },
        "not an object",
        { "title": "Bad metrics", "metrics": [{ "value": "1" }] }
    ]
}
"#;
