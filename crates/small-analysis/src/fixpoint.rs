use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use small_ast::{Function, ProgramPoint};
use small_cfg::{Cfg, CfgEdge};
use small_lattice::{AbstractEnvironment, Lattice};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::function::{ConditionUpdateFunction, ControlFlowFunction};
use crate::result::{AnalysisResult, Step, StepKind};
use crate::widening::{WideningOperator, WideningStrategy};

/// A complete abstract interpretation: lattice, transfer functions and
/// widening, plus the run configuration.
///
/// The engine is a FIFO worklist over the CFG. Each processed point joins the
/// outputs of its predecessors, each narrowed by its edge condition, applies
/// the control-flow function and re-queues its successors whenever its output
/// changed. Loop heads combine the new output with the previous one by
/// joining or widening, as the [`WideningStrategy`] dictates.
pub struct Analysis<L, C, U, W> {
    lattice: L,
    control_flow: C,
    condition_update: U,
    widening: W,
    config: AnalysisConfig,
}

// -- Constructors -----------------------------------------------------------

impl<L, C, U, W> Analysis<L, C, U, W> {
    pub fn new(lattice: L, control_flow: C, condition_update: U, widening: W) -> Self {
        Self {
            lattice,
            control_flow,
            condition_update,
            widening,
            config: AnalysisConfig::default(),
        }
    }

    pub fn lattice(&self) -> &L {
        &self.lattice
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

// -- Builder methods --------------------------------------------------------

impl<L, C, U, W> Analysis<L, C, U, W> {
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure the maximum worklist iterations of one run.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Configure when loop heads widen.
    pub fn with_widening(mut self, strategy: WideningStrategy) -> Self {
        self.config.widening = strategy;
        self
    }

    /// Record every rule application in the result.
    pub fn with_steps(mut self, record: bool) -> Self {
        self.config.record_steps = record;
        self
    }
}

// -- Execution engine -------------------------------------------------------

type Environments<V> = FxHashMap<ProgramPoint, AbstractEnvironment<V>>;

impl<L, C, U, W> Analysis<L, C, U, W>
where
    L: Lattice,
    C: ControlFlowFunction<Value = L::Value>,
    U: ConditionUpdateFunction<Value = L::Value>,
    W: WideningOperator<Value = L::Value>,
{
    /// Build the CFG of `function` and run the analysis over it.
    pub fn run(&self, function: &Function) -> Result<AnalysisResult<L::Value>, AnalysisError> {
        let cfg = Cfg::build(function);
        self.run_cfg(function, &cfg)
    }

    /// Run the analysis over a prebuilt graph of `function`.
    ///
    /// Every variable of the function starts at top on entry; all other
    /// points start unreached.
    pub fn run_cfg(
        &self,
        function: &Function,
        cfg: &Cfg,
    ) -> Result<AnalysisResult<L::Value>, AnalysisError> {
        let Some(entry) = cfg.entry() else {
            return Ok(AnalysisResult::empty());
        };
        let entry_env = AbstractEnvironment::uniform(function.variables(), self.lattice.top());

        let mut inputs: Environments<L::Value> = FxHashMap::default();
        let mut outputs: Environments<L::Value> = FxHashMap::default();
        let mut revisits: FxHashMap<ProgramPoint, usize> = FxHashMap::default();
        let mut steps = Vec::new();
        let mut worklist = VecDeque::from([entry.clone()]);
        let mut iterations = 0;

        while let Some(point) = worklist.pop_front() {
            iterations += 1;
            if iterations > self.config.max_iterations {
                tracing::warn!(
                    function = function.name(),
                    limit = self.config.max_iterations,
                    "iteration limit exceeded"
                );
                return Err(AnalysisError::IterationLimitExceeded {
                    limit: self.config.max_iterations,
                });
            }

            let seed = (&point == entry).then(|| entry_env.clone());
            let Some(input) = self.input(cfg, &point, seed, &outputs, iterations, &mut steps)
            else {
                tracing::trace!(line = point.line(), "no feasible incoming edge");
                continue;
            };

            let (bindings, rule) = self.control_flow.get_variables(&point, &input)?;
            tracing::trace!(iteration = iterations, line = point.line(), ?rule, "transfer");
            self.record(&mut steps, iterations, point.line(), StepKind::Transfer, &rule);
            let mut output = input.updated(bindings);

            if cfg.is_loop_head(&point)
                && let Some(previous) = outputs.get(&point)
            {
                let revisit = revisits.entry(point.clone()).or_insert(0);
                *revisit += 1;
                output = if self.config.widening.widens(*revisit) {
                    previous.combine(&output, |name, last, new| {
                        let (widened, rule) = self.widening.apply(last, new);
                        if widened != *new {
                            tracing::debug!(line = point.line(), variable = name, ?rule, "widened");
                        }
                        self.record(
                            &mut steps,
                            iterations,
                            point.line(),
                            StepKind::Widening {
                                variable: name.to_string(),
                            },
                            &rule,
                        );
                        widened
                    })
                } else {
                    previous.join(&output, &self.lattice)
                };
            }

            inputs.insert(point.clone(), input);
            if outputs.get(&point) != Some(&output) {
                outputs.insert(point.clone(), output);
                for successor in cfg.successors(&point) {
                    if !worklist.contains(successor) {
                        worklist.push_back(successor.clone());
                    }
                }
            }
        }

        tracing::debug!(
            function = function.name(),
            iterations,
            reached = outputs.len(),
            "fixpoint reached"
        );
        Ok(AnalysisResult::new(inputs, outputs, iterations, steps))
    }

    // -- Internal helpers ---------------------------------------------------

    /// Join the environments flowing into `point` along its feasible edges.
    fn input(
        &self,
        cfg: &Cfg,
        point: &ProgramPoint,
        seed: Option<AbstractEnvironment<L::Value>>,
        outputs: &Environments<L::Value>,
        iteration: usize,
        steps: &mut Vec<Step>,
    ) -> Option<AbstractEnvironment<L::Value>> {
        let mut input = seed;
        for (source, edge) in cfg.incoming(point) {
            let Some(source_env) = outputs.get(source) else {
                continue;
            };
            let Some(along) = self.traverse(source, source_env, edge, point, iteration, steps)
            else {
                continue;
            };
            input = Some(match input {
                Some(acc) => acc.join(&along, &self.lattice),
                None => along,
            });
        }
        input
    }

    /// The environment arriving at `target` over `edge`, or `None` when the
    /// edge is infeasible.
    fn traverse(
        &self,
        source: &ProgramPoint,
        env: &AbstractEnvironment<L::Value>,
        edge: &CfgEdge,
        target: &ProgramPoint,
        iteration: usize,
        steps: &mut Vec<Step>,
    ) -> Option<AbstractEnvironment<L::Value>> {
        if !edge.is_conditional() {
            return Some(env.clone());
        }
        let (bindings, rule) = self.condition_update.get_variables(&edge.condition, env);
        let narrowed = bindings.and_then(|bindings| env.refine(&bindings, &self.lattice));
        tracing::trace!(
            from = source.line(),
            to = target.line(),
            case = %edge.case,
            feasible = narrowed.is_some(),
            ?rule,
            "condition"
        );
        self.record(
            steps,
            iteration,
            target.line(),
            StepKind::Condition {
                from_line: source.line(),
                case: edge.case,
                feasible: narrowed.is_some(),
            },
            &rule,
        );
        narrowed
    }

    fn record(
        &self,
        steps: &mut Vec<Step>,
        iteration: usize,
        line: usize,
        kind: StepKind,
        rule: &impl std::fmt::Debug,
    ) {
        if self.config.record_steps {
            steps.push(Step {
                iteration,
                line,
                kind,
                rule: format!("{rule:?}"),
            });
        }
    }
}
