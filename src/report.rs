//! Per-file outcomes and the status lines printed for them.

use std::fmt;

/// Result of processing a single target file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file existed and was rewritten without its debug prints
    Cleaned { filename: String, removed: usize },
    /// Dry run: the file existed and this many lines would be removed
    WouldClean { filename: String, removed: usize },
    /// The file does not exist; nothing was touched
    Skipped { filename: String },
}

impl Outcome {
    pub fn filename(&self) -> &str {
        match self {
            Outcome::Cleaned { filename, .. }
            | Outcome::WouldClean { filename, .. }
            | Outcome::Skipped { filename } => filename,
        }
    }

    /// Number of lines removed (or that would be removed in a dry run)
    pub fn removed(&self) -> usize {
        match self {
            Outcome::Cleaned { removed, .. } | Outcome::WouldClean { removed, .. } => *removed,
            Outcome::Skipped { .. } => 0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Cleaned { filename, removed } => {
                write!(f, "Cleaned {filename}: removed {removed} debug prints")
            }
            Outcome::WouldClean { filename, removed } => {
                write!(f, "Would clean {filename}: remove {removed} debug prints")
            }
            Outcome::Skipped { filename } => write!(f, "Skipping {filename} (not found)"),
        }
    }
}

/// Final line printed once every target has been processed
pub const COMPLETION_MESSAGE: &str = "Cleanup complete!";

/// Printed before the completion line when nothing was written
pub const DRY_RUN_MESSAGE: &str = "Dry run mode: No files were modified.";

/// Tally of a whole run, in target order
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<Outcome>,
}

impl RunSummary {
    pub fn total_removed(&self) -> usize {
        self.outcomes.iter().map(Outcome::removed).sum()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Skipped { .. }))
            .count()
    }
}
