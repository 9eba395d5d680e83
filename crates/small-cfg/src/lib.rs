//! Control-flow graphs over Small program points.
//!
//! Nodes are [`ProgramPoint`]s and every edge carries the branch condition
//! under which control moves along it. There is no synthetic exit node:
//! `return` statements simply have no successors.

mod builder;
mod edge;
mod graph;

pub use builder::{Frontier, sequence_cfg, statement_cfg};
pub use edge::{CfgEdge, EdgeCase, Exit};
pub use graph::Cfg;

pub use small_ast::ProgramPoint;
