use super::definition::Journey;
use crate::error::ImportError;

/// A trait for custom data models that can be converted into a `Journey`.
///
/// This is the extension point for bringing journeys in from other sources: a
/// generation service response, a spreadsheet export or a hand-written config format.
/// The JSON import in [`crate::import`] is itself an implementation of this trait.
///
/// # Example
///
/// ```rust,no_run
/// use journeymap::prelude::*;
///
/// struct Funnel { name: String, stages: Vec<String> }
///
/// impl IntoJourney for Funnel {
///     fn into_journey(self) -> std::result::Result<Journey, ImportError> {
///         let mut journey = Journey::new(self.name.to_lowercase(), self.name);
///         for (i, stage) in self.stages.into_iter().enumerate() {
///             journey.steps.push(Step::new(format!("stage-{}", i + 1), stage));
///         }
///         Ok(journey)
///     }
/// }
/// ```
pub trait IntoJourney {
    /// Consumes the object and converts it into a journey.
    fn into_journey(self) -> Result<Journey, ImportError>;
}

impl IntoJourney for Journey {
    fn into_journey(self) -> Result<Journey, ImportError> {
        Ok(self)
    }
}
