// Rust guideline compliant 2026-02-06

//! Identifier sources for CLI-driven runs.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

/// Where the full identifier list comes from.
///
/// Every invocation must read the same list; the progress record detects
/// a changed list and restarts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSource {
    /// One identifier per line; `-` reads stdin.
    File(PathBuf),
    /// The integers `1..=n`.
    Range(u64),
}

impl IdSource {
    /// Builds a source from the mutually exclusive CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly one of the two is given.
    pub fn from_args(ids_file: Option<String>, range: Option<u64>) -> Result<Self> {
        match (ids_file, range) {
            (Some(path), None) => Ok(IdSource::File(PathBuf::from(path))),
            (None, Some(n)) => Ok(IdSource::Range(n)),
            (Some(_), Some(_)) => anyhow::bail!("Use either --ids-file or --range, not both"),
            (None, None) => anyhow::bail!("One of --ids-file or --range is required"),
        }
    }

    /// Reads the ordered identifier list.
    ///
    /// Blank lines and lines starting with `#` are skipped; surrounding
    /// whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or stdin cannot be read.
    pub fn load(&self) -> Result<Vec<String>> {
        match self {
            IdSource::Range(n) => Ok((1..=*n).map(|i| i.to_string()).collect()),
            IdSource::File(path) => {
                let content = if path.as_os_str() == "-" {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read identifiers from stdin")?;
                    buffer
                } else {
                    std::fs::read_to_string(path).with_context(|| {
                        format!("Failed to read identifiers from {}", path.display())
                    })?
                };
                Ok(parse_ids(&content))
            }
        }
    }
}

/// Parses one identifier per line.
pub fn parse_ids(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids_skips_blank_and_comments() {
        let content = "# node ids\n12\n\n  15  \n#skip\n20\n";
        assert_eq!(parse_ids(content), vec!["12", "15", "20"]);
    }

    #[test]
    fn test_range_source() {
        let ids = IdSource::Range(3).load().unwrap();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(IdSource::Range(0).load().unwrap().is_empty());
    }

    #[test]
    fn test_from_args_requires_exactly_one() {
        assert!(IdSource::from_args(None, None).is_err());
        assert!(IdSource::from_args(Some("ids.txt".into()), Some(3)).is_err());
        assert_eq!(
            IdSource::from_args(None, Some(3)).unwrap(),
            IdSource::Range(3)
        );
    }
}
