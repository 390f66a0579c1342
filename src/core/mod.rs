//! Extraction and termbase analysis

pub mod extract;
pub mod gaps;
pub mod projector;
pub mod resolver;

pub use extract::{run_extract, ExtractMode, ExtractOutcome};
pub use gaps::{run_gaps, GapOptions, GapReport};
