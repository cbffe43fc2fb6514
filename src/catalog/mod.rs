//! An in-memory list of journeys with simple filtering.

use crate::journey::Journey;

pub mod samples;

pub use samples::sample_journeys;

/// Criteria for [`JourneyCatalog::filter`]. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JourneyFilter {
    /// Case-insensitive text matched against titles, descriptions and step titles.
    pub query: Option<String>,
    /// Exact (case-insensitive) value-stream name.
    pub value_stream: Option<String>,
    /// Journeys containing at least one step in this phase.
    pub phase: Option<String>,
}

impl JourneyFilter {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }

    pub fn with_value_stream(mut self, value_stream: impl Into<String>) -> Self {
        self.value_stream = Some(value_stream.into());
        self
    }

    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    pub fn matches(&self, journey: &Journey) -> bool {
        let query_ok = match non_blank(&self.query) {
            None => true,
            Some(q) => {
                let q = q.to_lowercase();
                journey.title.to_lowercase().contains(&q)
                    || journey.description.to_lowercase().contains(&q)
                    || journey
                        .steps
                        .iter()
                        .any(|s| s.title.to_lowercase().contains(&q))
            }
        };
        let stream_ok = match non_blank(&self.value_stream) {
            None => true,
            Some(vs) => journey
                .value_stream
                .as_deref()
                .is_some_and(|j| j.trim().eq_ignore_ascii_case(vs)),
        };
        let phase_ok = match non_blank(&self.phase) {
            None => true,
            Some(p) => journey
                .steps
                .iter()
                .any(|s| s.phase.trim().eq_ignore_ascii_case(p)),
        };
        query_ok && stream_ok && phase_ok
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Journeys in insertion order.
#[derive(Debug, Clone, Default)]
pub struct JourneyCatalog {
    journeys: Vec<Journey>,
}

impl JourneyCatalog {
    pub fn new(journeys: Vec<Journey>) -> Self {
        Self { journeys }
    }

    /// The built-in sample set.
    pub fn with_samples() -> Self {
        Self::new(sample_journeys())
    }

    /// Adds a journey, replacing any existing one with the same id.
    pub fn insert(&mut self, journey: Journey) {
        match self.journeys.iter_mut().find(|j| j.id == journey.id) {
            Some(existing) => *existing = journey,
            None => self.journeys.push(journey),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Journey> {
        self.journeys.iter().find(|j| j.id == id)
    }

    pub fn all(&self) -> &[Journey] {
        &self.journeys
    }

    pub fn filter(&self, filter: &JourneyFilter) -> Vec<&Journey> {
        self.journeys.iter().filter(|j| filter.matches(j)).collect()
    }

    /// Distinct value-stream names, in first-seen order.
    pub fn value_streams(&self) -> Vec<&str> {
        let mut streams: Vec<&str> = Vec::new();
        for vs in self.journeys.iter().filter_map(|j| j.value_stream.as_deref()) {
            if !streams.contains(&vs) {
                streams.push(vs);
            }
        }
        streams
    }

    pub fn len(&self) -> usize {
        self.journeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journeys.is_empty()
    }
}
