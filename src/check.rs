//! Template authoring check.
//! Scans the text files of a template tree for `TEMPLATE_` tokens that are
//! not part of the placeholder vocabulary. Such tokens would be copied into
//! generated projects verbatim.

use crate::error::{Error, Result};
use crate::ignore::PathFilter;
use crate::loader::{SourceTree, Visit};
use crate::vars::{Placeholder, PLACEHOLDER_PREFIX};
use log::debug;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Extensions scanned for tokens.
pub const TEXT_EXTENSIONS: [&str; 16] = [
    "go", "proto", "sql", "yaml", "yml", "json", "toml", "md", "txt", "sh", "templ", "template", "mod",
    "html", "js", "css",
];

/// Extension-less file names scanned for tokens, lowercase.
pub const TEXT_FILE_NAMES: [&str; 2] = ["makefile", "dockerfile"];

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}[A-Z0-9_]*[A-Z0-9]", regex::escape(PLACEHOLDER_PREFIX)))
        .expect("placeholder token pattern is valid")
});

/// One unknown token found in a template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderIssue {
    pub path: String,
    /// 1-based.
    pub line: usize,
    pub token: String,
}

impl fmt::Display for PlaceholderIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: unknown placeholder {}", self.path, self.line, self.token)
    }
}

/// The tokens the generator replaces.
pub fn default_vocabulary() -> Vec<&'static str> {
    Placeholder::ALL.iter().map(|p| p.token()).collect()
}

/// Returns true for files with an extension in [`TEXT_EXTENSIONS`] and for
/// extension-less files named in [`TEXT_FILE_NAMES`].
pub fn is_text_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    match lower.rsplit_once('.') {
        Some((_, extension)) => TEXT_EXTENSIONS.contains(&extension),
        None => TEXT_FILE_NAMES.contains(&lower.as_str()),
    }
}

/// Finds unknown tokens in `content`, in order of appearance.
pub fn scan_text(path: &str, content: &str, vocabulary: &[&str]) -> Vec<PlaceholderIssue> {
    content
        .lines()
        .enumerate()
        .flat_map(move |(index, line)| {
            TOKEN
                .find_iter(line)
                .filter(move |m| !vocabulary.contains(&m.as_str()))
                .map(move |m| PlaceholderIssue {
                    path: path.to_string(),
                    line: index + 1,
                    token: m.as_str().to_string(),
                })
        })
        .collect()
}

/// Walks `source`, honouring `filter`, and scans every text file.
/// Files that are not valid UTF-8 are skipped.
pub fn scan_placeholders(
    source: &dyn SourceTree,
    filter: &PathFilter,
    vocabulary: &[&str],
) -> Result<Vec<PlaceholderIssue>> {
    let mut issues = Vec::new();
    source.walk(&mut |entry| {
        if filter.should_skip_entry(entry, source) {
            return Ok(Visit::SkipSubtree);
        }
        if entry.is_dir || !is_text_file(&entry.name) {
            return Ok(Visit::Continue);
        }
        let content = source.read(&entry.path)?;
        match std::str::from_utf8(&content) {
            Ok(text) => issues.extend(scan_text(&entry.path, text, vocabulary)),
            Err(_) => debug!("Skipping non UTF-8 file {}", entry.path),
        }
        Ok(Visit::Continue)
    })?;
    Ok(issues)
}

/// Turns a non-empty issue list into [`Error::UnknownPlaceholdersError`].
pub fn into_result(issues: Vec<PlaceholderIssue>) -> Result<()> {
    if issues.is_empty() {
        return Ok(());
    }
    let details = issues.iter().map(|issue| format!("  {issue}")).collect::<Vec<_>>().join("\n");
    Err(Error::UnknownPlaceholdersError { count: issues.len(), details })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_text_file() {
        assert!(is_text_file("main.go.template"));
        assert!(is_text_file("Dockerfile"));
        assert!(is_text_file("README.MD"));
        assert!(is_text_file("Makefile"));
        assert!(!is_text_file("logo.png"));
        assert!(!is_text_file("LICENSE"));
    }

    #[test]
    fn test_token_excludes_trailing_underscore() {
        let issues = scan_text("a.go", "x := TEMPLATE_FOO_", &[]);
        assert_eq!(issues[0].token, "TEMPLATE_FOO");
    }
}
