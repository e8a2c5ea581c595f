//! Per-step timing.

/// Timing collected for a single committed step.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole step, including the finite check
    /// and the commit.
    pub total_us: u64,
    /// Number of cells updated.
    pub cell_count: usize,
}

impl StepMetrics {
    /// Cell updates per second, or `None` if the step was too fast to time.
    pub fn cells_per_sec(&self) -> Option<f64> {
        if self.total_us == 0 {
            return None;
        }
        Some(self.cell_count as f64 * 1e6 / self.total_us as f64)
    }
}
