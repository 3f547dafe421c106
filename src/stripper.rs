//! Reading, filtering and rewriting the target files.

use crate::patterns::Catalog;
use crate::report::{Outcome, RunSummary, COMPLETION_MESSAGE, DRY_RUN_MESSAGE};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use humansize::{format_size, BINARY};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Options controlling how files are processed (runtime flags)
#[derive(Debug, Clone, Copy, Default)]
pub struct StripOptions {
    /// Count what would be removed without writing anything
    pub dry_run: bool,
    /// Colour the dry-run notice; only set when `out` is a terminal
    pub color: bool,
}

/// A line that matched a debug print pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedLine<'a> {
    /// 1-based line number in the original file
    pub number: usize,
    pub group: &'a str,
    /// The catalog pattern that matched
    pub pattern: &'a str,
    pub text: &'a str,
}

/// The lines of a file split into kept and removed, both in original order
#[derive(Debug, Default)]
pub struct FilteredLines<'a> {
    pub kept: Vec<&'a str>,
    pub removed: Vec<RemovedLine<'a>>,
}

impl FilteredLines<'_> {
    pub fn total(&self) -> usize {
        self.kept.len() + self.removed.len()
    }

    /// The retained lines joined back together, terminators untouched
    pub fn contents(&self) -> String {
        self.kept.concat()
    }
}

/// Split `content` into lines (keeping `\n` / `\r\n`) and drop every debug print.
pub fn filter_lines<'a>(content: &'a str, catalog: &'a Catalog) -> FilteredLines<'a> {
    let mut filtered = FilteredLines::default();

    for (index, line) in content.split_inclusive('\n').enumerate() {
        match catalog.matching_pattern(line) {
            Some(pattern) => filtered.removed.push(RemovedLine {
                number: index + 1,
                group: &pattern.group,
                pattern: &pattern.source,
                text: line.trim_end_matches(['\r', '\n']),
            }),
            None => filtered.kept.push(line),
        }
    }

    filtered
}

/// Strip debug prints from a single target file.
///
/// `filename` is resolved against `root`. A missing file yields
/// [`Outcome::Skipped`]; every other I/O failure is returned as an error.
pub fn process(
    root: &Path,
    filename: &str,
    catalog: &Catalog,
    options: StripOptions,
) -> Result<Outcome> {
    let path = root.join(filename);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Target not found");
            return Ok(Outcome::Skipped {
                filename: filename.to_string(),
            });
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let filtered = filter_lines(&content, catalog);
    for line in &filtered.removed {
        debug!(
            file = filename,
            line = line.number,
            group = line.group,
            pattern = line.pattern,
            "Removing: {}",
            line.text
        );
    }

    let removed = filtered.total() - filtered.kept.len();

    if options.dry_run {
        return Ok(Outcome::WouldClean {
            filename: filename.to_string(),
            removed,
        });
    }

    let new_content = filtered.contents();
    replace_file(&path, &new_content)?;

    debug!(
        file = filename,
        before = %format_size(content.len(), BINARY),
        after = %format_size(new_content.len(), BINARY),
        "Rewrote file"
    );

    Ok(Outcome::Cleaned {
        filename: filename.to_string(),
        removed,
    })
}

/// Replace `path` with `contents` by writing a sibling temp file and renaming it into place.
///
/// The original file's permissions are carried over to the replacement.
fn replace_file(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let permissions = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?
        .permissions();

    // The rename only needs a writable directory, so check the target itself
    if permissions.readonly() {
        bail!(
            "Failed to replace {}: permission denied (file is read-only)",
            path.display()
        );
    }
    fs::OpenOptions::new()
        .write(true)
        .open(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write replacement for {}", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to flush replacement for {}", path.display()))?;
    fs::set_permissions(tmp.path(), permissions).with_context(|| {
        format!("Failed to set permissions on replacement for {}", path.display())
    })?;

    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

/// Process every catalog target in order, writing one status line per file to `out`.
///
/// Skipped files never stop the run; the first hard error does.
pub fn run<W: Write>(
    root: &Path,
    catalog: &Catalog,
    options: StripOptions,
    out: &mut W,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for filename in &catalog.targets {
        let outcome = process(root, filename, catalog, options)?;
        debug!(file = outcome.filename(), removed = outcome.removed(), "Processed target");
        writeln!(out, "{outcome}")?;
        summary.outcomes.push(outcome);
    }

    if options.dry_run {
        if options.color {
            writeln!(out, "{}", DRY_RUN_MESSAGE.yellow())?;
        } else {
            writeln!(out, "{DRY_RUN_MESSAGE}")?;
        }
    }
    writeln!(out, "{COMPLETION_MESSAGE}")?;

    info!(
        files = summary.outcomes.len(),
        skipped = summary.skipped(),
        removed = summary.total_removed(),
        dry_run = options.dry_run,
        "Cleanup finished"
    );

    Ok(summary)
}
