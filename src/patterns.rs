//! Debug print pattern loading and line matching from debug_prints.toml.

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;

/// A compiled debug print pattern
#[derive(Debug, Clone)]
pub struct DebugPattern {
    /// The pattern as written in the catalog
    pub source: String,
    /// The catalog group this pattern belongs to (e.g., "attack", "chat")
    pub group: String,
    regex: Regex,
}

impl DebugPattern {
    /// Compile a pattern so that it only ever matches from the first character of a line.
    pub fn new(source: &str, group: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{source})"))
            .with_context(|| format!("Invalid pattern in group '{group}': {source}"))?;

        Ok(DebugPattern {
            source: source.to_string(),
            group: group.to_string(),
            regex,
        })
    }

    /// Check whether this pattern matches a line (terminator already stripped)
    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// The fixed set of targets and patterns the stripper runs with
#[derive(Debug, Clone)]
pub struct Catalog {
    pub targets: Vec<String>,
    pub patterns: Vec<DebugPattern>,
}

/// Structure to deserialize the catalog from TOML
#[derive(Debug, Deserialize)]
struct CatalogConfig {
    targets: Vec<String>,
    #[serde(default, rename = "group")]
    groups: Vec<GroupConfig>,
}

#[derive(Debug, Deserialize)]
struct GroupConfig {
    name: String,
    patterns: Vec<String>,
}

// Embed the TOML file directly in the binary at compile time
const DEBUG_PRINTS_TOML: &str = include_str!("../debug_prints.toml");

impl Catalog {
    /// Build a catalog from explicit targets and `(group, pattern)` pairs.
    pub fn new<T, P, G, S>(targets: T, patterns: P) -> Result<Self>
    where
        T: IntoIterator,
        T::Item: Into<String>,
        P: IntoIterator<Item = (G, S)>,
        G: AsRef<str>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|(group, source)| DebugPattern::new(source.as_ref(), group.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Catalog {
            targets: targets.into_iter().map(Into::into).collect(),
            patterns,
        })
    }

    /// Parse a catalog from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CatalogConfig =
            toml::from_str(content).context("Failed to parse debug prints TOML")?;

        if config.targets.is_empty() {
            bail!("Debug prints catalog lists no target files");
        }

        let mut pairs = Vec::new();
        for group in &config.groups {
            for pattern in &group.patterns {
                pairs.push((group.name.as_str(), pattern.as_str()));
            }
        }

        Catalog::new(config.targets.iter().cloned(), pairs)
    }

    /// Load the catalog compiled into the binary
    pub fn builtin() -> Result<Self> {
        Catalog::from_toml(DEBUG_PRINTS_TOML)
            .context("Failed to load built-in debug prints catalog")
    }

    /// Return the first pattern matching `line`, if any.
    ///
    /// Any trailing `\n` or `\r\n` is ignored so `$` anchors at the end of the line.
    pub fn matching_pattern(&self, line: &str) -> Option<&DebugPattern> {
        let line = strip_line_ending(line);
        self.patterns.iter().find(|p| p.matches(line))
    }
}

/// Remove a single trailing line terminator (`\n` or `\r\n`)
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
