//! debug-scrub - Debug Print Stripper
//!
//! Removes known debug `print(...)` lines from a fixed set of game scripts.
//! Both the target files and the line patterns live in `debug_prints.toml`,
//! which is compiled into the binary; changing either means editing that file
//! and rebuilding.
//!
//! Matching is purely textual: a line is dropped when any pattern matches at
//! its start, and every other line is written back byte-for-byte.

pub mod logging;
pub mod patterns;
pub mod report;
pub mod stripper;

// Re-export commonly used items
pub use patterns::{Catalog, DebugPattern};
pub use report::{Outcome, RunSummary, COMPLETION_MESSAGE, DRY_RUN_MESSAGE};
pub use stripper::{filter_lines, process, run, FilteredLines, RemovedLine, StripOptions};
