use crate::error::ViewError;
use crate::journey::Journey;
use tracing::debug;

/// What the journey view is showing. Exactly one mode holds at a time, so combinations
/// like "metrics panel open while comparing" cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Nothing selected; every step is highlighted.
    #[default]
    Overview,
    /// One step selected.
    Focused { step_id: String },
    /// One step selected with its metrics panel open.
    Metrics { step_id: String },
    /// Two steps side by side.
    Comparison { primary: String, secondary: String },
    /// Presentation mode auto-advancing through the steps.
    Playback { index: usize },
}

/// View state for one journey.
///
/// Manual selection always wins over presentation playback: selecting, comparing or
/// clearing while playing stops playback, and playback never resumes on its own.
#[derive(Debug, Clone)]
pub struct ViewState {
    step_ids: Vec<String>,
    mode: ViewMode,
}

impl ViewState {
    pub fn new(journey: &Journey) -> Self {
        Self {
            step_ids: journey.steps.iter().map(|s| s.id.clone()).collect(),
            mode: ViewMode::Overview,
        }
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    /// The step that should be highlighted in the flow graph, if any.
    pub fn selected_step(&self) -> Option<&str> {
        match &self.mode {
            ViewMode::Overview | ViewMode::Comparison { .. } => None,
            ViewMode::Focused { step_id } | ViewMode::Metrics { step_id } => Some(step_id),
            ViewMode::Playback { index } => self.step_ids.get(*index).map(String::as_str),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.mode, ViewMode::Playback { .. })
    }

    fn require(&self, step_id: &str) -> Result<(), ViewError> {
        if self.step_ids.iter().any(|id| id == step_id) {
            Ok(())
        } else {
            Err(ViewError::UnknownStep(step_id.to_string()))
        }
    }

    fn transition(&mut self, mode: ViewMode) {
        debug!(from = ?self.mode, to = ?mode, "view transition");
        self.mode = mode;
    }

    /// Selects a step, e.g. from a node click. Selecting the already focused step
    /// toggles back to the overview.
    pub fn select(&mut self, step_id: &str) -> Result<(), ViewError> {
        self.require(step_id)?;
        let next = match &self.mode {
            ViewMode::Focused { step_id: current } if current == step_id => ViewMode::Overview,
            _ => ViewMode::Focused {
                step_id: step_id.to_string(),
            },
        };
        self.transition(next);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.transition(ViewMode::Overview);
    }

    /// Opens the metrics panel for the selected step, or for `step_id` if given.
    pub fn open_metrics(&mut self, step_id: Option<&str>) -> Result<(), ViewError> {
        let target = match step_id {
            Some(id) => id.to_string(),
            None => self
                .selected_step()
                .map(str::to_string)
                .or_else(|| self.step_ids.first().cloned())
                .ok_or(ViewError::EmptyJourney)?,
        };
        self.require(&target)?;
        self.transition(ViewMode::Metrics { step_id: target });
        Ok(())
    }

    /// Closes the metrics panel, keeping its step selected.
    pub fn close_metrics(&mut self) {
        if let ViewMode::Metrics { step_id } = &self.mode {
            let step_id = step_id.clone();
            self.transition(ViewMode::Focused { step_id });
        }
    }

    pub fn compare(&mut self, primary: &str, secondary: &str) -> Result<(), ViewError> {
        self.require(primary)?;
        self.require(secondary)?;
        self.transition(ViewMode::Comparison {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
        });
        Ok(())
    }

    /// Starts presentation mode at the selected step, or at the first one.
    pub fn start_playback(&mut self) -> Result<(), ViewError> {
        if self.step_ids.is_empty() {
            return Err(ViewError::EmptyJourney);
        }
        let index = self
            .selected_step()
            .and_then(|id| self.step_ids.iter().position(|s| s == id))
            .unwrap_or(0);
        self.transition(ViewMode::Playback { index });
        Ok(())
    }

    /// Auto-advance timer tick. Outside playback this does nothing. On the last step
    /// playback ends with that step focused.
    pub fn tick(&mut self) {
        let ViewMode::Playback { index } = self.mode else {
            return;
        };
        let next = index + 1;
        if next < self.step_ids.len() {
            self.transition(ViewMode::Playback { index: next });
        } else if let Some(last) = self.step_ids.get(index).cloned() {
            self.transition(ViewMode::Focused { step_id: last });
        }
    }

    /// Stops playback, leaving the current step focused.
    pub fn stop_playback(&mut self) {
        if let ViewMode::Playback { index } = self.mode {
            match self.step_ids.get(index).cloned() {
                Some(step_id) => self.transition(ViewMode::Focused { step_id }),
                None => self.transition(ViewMode::Overview),
            }
        }
    }
}
