//! Abstract interpretation for the Small language.
//!
//! This crate re-exports the workspace members under short names. A typical
//! run parses a function, picks an analysis and reads the environment at each
//! program point:
//!
//! ```ignore
//! use small::prelude::*;
//!
//! let function = small::parser::parse_function(source)?;
//! let result = interval_analysis().run(&function)?;
//! println!("{}", result.at_line(8).unwrap());
//! ```

pub use small_analysis as analysis;
pub use small_ast as ast;
pub use small_cfg as cfg;
pub use small_interval as interval;
pub use small_lattice as lattice;
pub use small_zero as zero;

#[cfg(feature = "parser")]
pub use small_lexer as lexer;
#[cfg(feature = "parser")]
pub use small_parser as parser;

pub mod prelude {
    pub use small_analysis::{
        AbstractEnvironment, Analysis, AnalysisConfig, AnalysisError, AnalysisResult, Lattice,
        WideningStrategy,
    };
    pub use small_ast::*;
    pub use small_cfg::Cfg;
    pub use small_interval::{Bound, IntervalLattice, IntervalValue, interval_analysis};
    pub use small_zero::{ZeroLattice, ZeroValue, zero_analysis};
}
