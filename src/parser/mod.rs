//! Blacklist parsing for worldprotect
//!
//! Provides identifier resolution and the line-oriented blacklist format.

pub mod blacklist;
pub mod resolve;

pub use blacklist::{parse, parse_source, LoadReport, OptionKey};
pub use resolve::resolve;
