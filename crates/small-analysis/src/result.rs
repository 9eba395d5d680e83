use rustc_hash::FxHashMap;
use small_ast::ProgramPoint;
use small_cfg::EdgeCase;
use small_lattice::AbstractEnvironment;

/// What a recorded [`Step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// The control-flow function ran at the point.
    Transfer,
    /// A conditional edge into the point was narrowed.
    Condition {
        from_line: usize,
        case: EdgeCase,
        feasible: bool,
    },
    /// A variable at a loop head was widened.
    Widening { variable: String },
}

/// One rule application during a fixpoint run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub iteration: usize,
    pub line: usize,
    pub kind: StepKind,
    /// Debug rendering of the rule that fired.
    pub rule: String,
}

/// Result of a fixpoint run.
///
/// Points the analysis never reached have no environment; conceptually they
/// are bottom.
#[derive(Debug, Clone)]
pub struct AnalysisResult<V> {
    inputs: FxHashMap<ProgramPoint, AbstractEnvironment<V>>,
    outputs: FxHashMap<ProgramPoint, AbstractEnvironment<V>>,
    iterations: usize,
    steps: Vec<Step>,
}

impl<V> AnalysisResult<V> {
    pub fn new(
        inputs: FxHashMap<ProgramPoint, AbstractEnvironment<V>>,
        outputs: FxHashMap<ProgramPoint, AbstractEnvironment<V>>,
        iterations: usize,
        steps: Vec<Step>,
    ) -> Self {
        Self {
            inputs,
            outputs,
            iterations,
            steps,
        }
    }

    /// A result with no reached points.
    pub fn empty() -> Self {
        Self::new(FxHashMap::default(), FxHashMap::default(), 0, Vec::new())
    }

    /// The environment after `point` executes.
    pub fn environment(&self, point: &ProgramPoint) -> Option<&AbstractEnvironment<V>> {
        self.outputs.get(point)
    }

    /// The environment before `point` executes: the join of its feasible
    /// incoming edges.
    pub fn input(&self, point: &ProgramPoint) -> Option<&AbstractEnvironment<V>> {
        self.inputs.get(point)
    }

    /// The environment after the statement at `line`.
    pub fn at_line(&self, line: usize) -> Option<&AbstractEnvironment<V>> {
        self.outputs
            .iter()
            .find_map(|(point, env)| (point.line() == line).then_some(env))
    }

    /// The environment before the statement at `line`.
    pub fn input_at_line(&self, line: usize) -> Option<&AbstractEnvironment<V>> {
        self.inputs
            .iter()
            .find_map(|(point, env)| (point.line() == line).then_some(env))
    }

    pub fn is_reachable(&self, point: &ProgramPoint) -> bool {
        self.outputs.contains_key(point)
    }

    /// Reached points and their output environments, ordered by line.
    pub fn environments(&self) -> Vec<(&ProgramPoint, &AbstractEnvironment<V>)> {
        let mut entries: Vec<_> = self.outputs.iter().collect();
        entries.sort_by_key(|(point, _)| point.line());
        entries
    }

    /// Worklist iterations the run took.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Rule applications, when step recording was enabled.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}
