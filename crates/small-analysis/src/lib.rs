//! Worklist fixpoint engine for abstract interpretation of Small functions.
//!
//! An analysis is fully described by a [`Lattice`], a [`ControlFlowFunction`]
//! (usually a [`StatementDispatch`] over a [`FlowFunction`]), a
//! [`ConditionUpdateFunction`] and a [`WideningOperator`]. [`Analysis`] bundles
//! them with an [`AnalysisConfig`] and computes an environment for every
//! reachable program point.

mod config;
mod error;
mod fixpoint;
mod function;
mod result;
mod widening;

pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use fixpoint::Analysis;
pub use function::{
    ConditionUpdateFunction, ControlFlowFunction, ControlFlowRule, FlowFunction,
    StatementDispatch, unsupported,
};
pub use result::{AnalysisResult, Step, StepKind};
pub use widening::{JoinWidening, JoinWideningRule, WideningOperator, WideningStrategy};

pub use small_lattice::{AbstractEnvironment, Bindings, Lattice};
