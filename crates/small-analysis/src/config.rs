use crate::widening::WideningStrategy;

/// Knobs of a fixpoint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Worklist iterations before the run is aborted.
    pub max_iterations: usize,
    /// When loop heads widen instead of join.
    pub widening: WideningStrategy,
    /// Record every rule that fires in [`AnalysisResult::steps`].
    ///
    /// [`AnalysisResult::steps`]: crate::AnalysisResult::steps
    pub record_steps: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            widening: WideningStrategy::LoopHeads,
            record_steps: false,
        }
    }
}

// -- Builder methods --------------------------------------------------------

impl AnalysisConfig {
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_widening(mut self, strategy: WideningStrategy) -> Self {
        self.widening = strategy;
        self
    }

    pub fn with_steps(mut self, record: bool) -> Self {
        self.record_steps = record;
        self
    }
}
