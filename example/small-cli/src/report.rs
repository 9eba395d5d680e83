use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use small::analysis::{AnalysisResult, Step, StepKind};
use small::ast::Function;
use small::cfg::Cfg;

/// Everything printed for one analyzed function.
#[derive(Debug, Serialize)]
pub struct FunctionReport {
    pub function: String,
    pub analysis: &'static str,
    pub iterations: usize,
    pub points: Vec<PointReport>,
    /// Lines no feasible path reaches.
    pub unreached: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepReport>,
}

#[derive(Debug, Serialize)]
pub struct PointReport {
    pub line: usize,
    pub statement: String,
    pub environment: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub iteration: usize,
    pub line: usize,
    pub kind: String,
    pub rule: String,
}

impl FunctionReport {
    pub fn new<V: fmt::Display + Clone + PartialEq>(
        analysis: &'static str,
        function: &Function,
        cfg: &Cfg,
        result: &AnalysisResult<V>,
    ) -> Self {
        let points = result
            .environments()
            .into_iter()
            .map(|(point, env)| PointReport {
                line: point.line(),
                statement: point.statement().header(),
                environment: env
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_string()))
                    .collect(),
            })
            .collect();

        let mut unreached: Vec<usize> = cfg
            .points()
            .filter(|point| !result.is_reachable(point))
            .map(|point| point.line())
            .collect();
        unreached.sort_unstable();

        Self {
            function: function.name().to_string(),
            analysis,
            iterations: result.iterations(),
            points,
            unreached,
            steps: result.steps().iter().map(StepReport::from).collect(),
        }
    }
}

impl From<&Step> for StepReport {
    fn from(step: &Step) -> Self {
        let kind = match &step.kind {
            StepKind::Transfer => "transfer".to_string(),
            StepKind::Condition {
                from_line,
                case,
                feasible: true,
            } => format!("{case} edge from {from_line}"),
            StepKind::Condition {
                from_line, case, ..
            } => format!("{case} edge from {from_line} (infeasible)"),
            StepKind::Widening { variable } => format!("widen {variable}"),
        };
        Self {
            iteration: step.iteration,
            line: step.line,
            kind,
            rule: step.rule.clone(),
        }
    }
}

impl fmt::Display for FunctionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "function {} ({} analysis, {} iterations)",
            self.function, self.analysis, self.iterations
        )?;
        for point in &self.points {
            let environment: Vec<String> = point
                .environment
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect();
            writeln!(
                f,
                "  {:>3}  {:<24} {{{}}}",
                point.line,
                point.statement,
                environment.join(", ")
            )?;
        }
        for line in &self.unreached {
            writeln!(f, "  {line:>3}  unreachable")?;
        }
        if !self.steps.is_empty() {
            writeln!(f, "steps:")?;
            for step in &self.steps {
                writeln!(
                    f,
                    "  #{:<4} line {:<3} {:<24} {}",
                    step.iteration, step.line, step.kind, step.rule
                )?;
            }
        }
        Ok(())
    }
}
