//! Path filtering for template trees.
//! Decides which files and directories of a source tree are left out of the
//! generated project: hidden files, build and dependency directories,
//! previously generated projects, binary files and the CLI's own sources.

use crate::config::FilterRules;
use crate::error::Result;
use crate::loader::{join_path, SourceEntry, SourceTree};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;
use std::fmt;

/// Why an entry was filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Hidden,
    GeneratedProject,
    DeniedDirectory,
    BinaryFile,
    InternalPath,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::Hidden => "hidden",
            SkipReason::GeneratedProject => "already generated project",
            SkipReason::DeniedDirectory => "denied directory",
            SkipReason::BinaryFile => "binary file",
            SkipReason::InternalPath => "generator internal path",
        };
        f.write_str(reason)
    }
}

/// Compiled form of [`FilterRules`].
#[derive(Debug, Clone)]
pub struct PathFilter {
    allowed_dotfiles: Vec<String>,
    marker_file: String,
    skip_dirs: Vec<String>,
    binary_files: GlobSet,
    internal_prefixes: Vec<String>,
}

impl PathFilter {
    /// Compiles the rules. Internal prefixes are resolved against `root_prefix`,
    /// the directory of the template payload within the walked tree.
    pub fn new(rules: &FilterRules, root_prefix: &str) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for extension in &rules.binary_extensions {
            let glob = GlobBuilder::new(&format!("*.{extension}"))
                .case_insensitive(true)
                .literal_separator(true)
                .build()?;
            builder.add(glob);
        }

        let root_prefix = root_prefix.trim_matches('/');
        Ok(Self {
            allowed_dotfiles: rules.allowed_dotfiles.clone(),
            marker_file: rules.marker_file.clone(),
            skip_dirs: rules.skip_dirs.clone(),
            binary_files: builder.build()?,
            internal_prefixes: rules
                .internal_prefixes
                .iter()
                .map(|prefix| join_path(root_prefix, prefix))
                .collect(),
        })
    }

    /// Returns the first rule that excludes the entry, or `None` to keep it.
    ///
    /// Rules, in order: hidden names (except allow-listed dotfiles), directories
    /// holding the sentinel marker, denylisted directory names, binary file
    /// extensions, generator-internal paths. The marker rule probes `source`
    /// once per directory; nothing else touches storage.
    pub fn skip_reason(
        &self,
        path: &str,
        is_dir: bool,
        name: &str,
        source: &dyn SourceTree,
    ) -> Option<SkipReason> {
        if name.starts_with('.') && !self.allowed_dotfiles.iter().any(|allowed| allowed == name) {
            return Some(SkipReason::Hidden);
        }

        if is_dir && source.exists(&join_path(path, &self.marker_file)) {
            return Some(SkipReason::GeneratedProject);
        }

        if is_dir && self.skip_dirs.iter().any(|dir| dir == name) {
            return Some(SkipReason::DeniedDirectory);
        }

        if !is_dir && self.binary_files.is_match(name) {
            return Some(SkipReason::BinaryFile);
        }

        if self.internal_prefixes.iter().any(|prefix| is_under_prefix(path, prefix)) {
            return Some(SkipReason::InternalPath);
        }

        None
    }

    pub fn should_skip(&self, path: &str, is_dir: bool, name: &str, source: &dyn SourceTree) -> bool {
        match self.skip_reason(path, is_dir, name, source) {
            Some(reason) => {
                debug!("Skipping {path} ({reason})");
                true
            }
            None => false,
        }
    }

    pub fn should_skip_entry(&self, entry: &SourceEntry, source: &dyn SourceTree) -> bool {
        self.should_skip(&entry.path, entry.is_dir, &entry.name, source)
    }
}

// Prefixes ending in `_` match any name starting with them (`test_*`);
// other prefixes match the path itself and everything beneath it.
fn is_under_prefix(path: &str, prefix: &str) -> bool {
    if prefix.ends_with('_') {
        return path.starts_with(prefix);
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
