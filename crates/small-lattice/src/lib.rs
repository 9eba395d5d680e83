//! Lattices of abstract values and the per-point environments built on them.

mod enumerate;
mod environment;
mod lattice;

pub use enumerate::enumerate;
pub use environment::{AbstractEnvironment, Bindings};
pub use lattice::Lattice;
