use crate::error::ExportError;
use std::cell::Cell;

/// Busy flag for an export control: one export runs to completion before the next starts.
///
/// This is a guard, not a queue. A request made while busy is rejected with
/// [`ExportError::Busy`] rather than deferred.
#[derive(Debug, Default)]
pub struct ExportGate {
    busy: Cell<bool>,
}

/// Held for the duration of one export. Dropping it frees the gate, whether the export
/// succeeded or failed.
#[derive(Debug)]
pub struct ExportPermit<'a> {
    gate: &'a ExportGate,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn begin(&self) -> Result<ExportPermit<'_>, ExportError> {
        if self.busy.replace(true) {
            return Err(ExportError::Busy);
        }
        Ok(ExportPermit { gate: self })
    }

    /// Runs `export` while holding the gate.
    pub fn run<T>(
        &self,
        export: impl FnOnce() -> Result<T, ExportError>,
    ) -> Result<T, ExportError> {
        let _permit = self.begin()?;
        export()
    }
}

impl Drop for ExportPermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.set(false);
    }
}
