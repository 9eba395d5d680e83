pub mod lattice;

#[cfg(feature = "parser")]
pub mod programs;
