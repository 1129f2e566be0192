//! Tree materialization.
//! Walks a source tree, filters it, rewrites placeholders in every kept file
//! and writes the result under an output directory with the same layout.

use crate::error::{Error, Result};
use crate::ignore::PathFilter;
use crate::loader::{SourceEntry, SourceTree, Visit};
use crate::vars::{ReplacementTable, TemplateVars};
use log::debug;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Counters collected during one materialization pass. Observational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub files_processed: usize,
    pub files_skipped: usize,
    /// Files whose content changed through substitution.
    pub files_rewritten: usize,
    pub bytes_processed: u64,
}

/// Returns true when `filename` carries the template suffix and something
/// before it (`main.go.template`, but not `.template`).
pub fn is_template_file(filename: &str, suffix: &str) -> bool {
    filename.len() > suffix.len() && filename.ends_with(suffix)
}

/// Maps a source path to its output path: drops the root prefix, then the
/// template suffix of the last component. Returns `None` for the root
/// prefix itself and for paths outside it.
pub fn resolve_target_path(path: &str, root_prefix: &str, suffix: &str) -> Option<String> {
    let root_prefix = root_prefix.trim_matches('/');
    let relative = if root_prefix.is_empty() {
        path
    } else {
        path.strip_prefix(root_prefix)?.strip_prefix('/')?
    };
    if relative.is_empty() {
        return None;
    }

    let (parent, filename) = match relative.rsplit_once('/') {
        Some((parent, filename)) => (Some(parent), filename),
        None => (None, relative),
    };
    let filename = if is_template_file(filename, suffix) {
        &filename[..filename.len() - suffix.len()]
    } else {
        filename
    };

    Some(match parent {
        Some(parent) => format!("{parent}/{filename}"),
        None => filename.to_string(),
    })
}

// True when `path` lies on the way to `root_prefix` (one of its ancestors).
fn is_ancestor_of_root(path: &str, root_prefix: &str) -> bool {
    root_prefix
        .strip_prefix(path)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn write_file(path: &Path, content: &[u8], mode: Option<u32>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::file("create directory", parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::file("write", path, e))?;
    set_mode(path, mode)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .map_err(|e| Error::file("set permissions on", path, e))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}

/// Materializes source trees into an output directory.
///
/// The replacement table is built once from the variables at construction;
/// the variables themselves are only borrowed for that.
pub struct Processor<'a> {
    filter: &'a PathFilter,
    table: ReplacementTable,
    root_prefix: String,
    template_suffix: String,
    substitute_paths: bool,
}

impl<'a> Processor<'a> {
    pub fn new(vars: &TemplateVars, filter: &'a PathFilter) -> Self {
        Self {
            filter,
            table: vars.to_replacement_map(),
            root_prefix: String::new(),
            template_suffix: crate::config::TEMPLATE_SUFFIX.to_string(),
            substitute_paths: false,
        }
    }

    /// Directory of the template payload inside the walked tree. Entries
    /// outside it are ignored.
    pub fn with_root_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.root_prefix = prefix.into().trim_matches('/').to_string();
        self
    }

    pub fn with_template_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.template_suffix = suffix.into();
        self
    }

    /// Also substitute placeholders in output paths.
    pub fn with_path_substitution(mut self, enabled: bool) -> Self {
        self.substitute_paths = enabled;
        self
    }

    pub fn table(&self) -> &ReplacementTable {
        &self.table
    }

    /// Walks `source` and writes every kept entry under `output_root`.
    ///
    /// Stops at the first error; files written before it stay on disk.
    pub fn materialize(&self, source: &dyn SourceTree, output_root: &Path) -> Result<ProcessStats> {
        debug!("Processing {} into {}", source.name(), output_root.display());
        let mut stats = ProcessStats::default();

        source.walk(&mut |entry| self.process_entry(source, entry, output_root, &mut stats))?;

        debug!(
            "Processed {} files ({} skipped, {} bytes)",
            stats.files_processed, stats.files_skipped, stats.bytes_processed
        );
        Ok(stats)
    }

    fn process_entry(
        &self,
        source: &dyn SourceTree,
        entry: &SourceEntry,
        output_root: &Path,
        stats: &mut ProcessStats,
    ) -> Result<Visit> {
        if self.filter.should_skip_entry(entry, source) {
            if !entry.is_dir {
                stats.files_skipped += 1;
            }
            return Ok(Visit::SkipSubtree);
        }

        let Some(target) = resolve_target_path(&entry.path, &self.root_prefix, &self.template_suffix)
        else {
            // Keep walking towards the payload, ignore everything beside it.
            let on_root_path = entry.path == self.root_prefix
                || is_ancestor_of_root(&entry.path, &self.root_prefix);
            return Ok(if entry.is_dir && on_root_path { Visit::Continue } else { Visit::SkipSubtree });
        };

        let target = if self.substitute_paths {
            self.table.apply_str(&target).into_owned()
        } else {
            target
        };
        let target_path = self.output_path(output_root, &target);

        if entry.is_dir {
            debug!("Creating directory: {}", target_path.display());
            fs::create_dir_all(&target_path)
                .map_err(|e| Error::file("create directory", &target_path, e))?;
        } else {
            let content = source.read(&entry.path)?;
            stats.bytes_processed += content.len() as u64;

            let processed = self.table.apply(&content);
            if matches!(processed, Cow::Owned(_)) {
                stats.files_rewritten += 1;
            }

            debug!("Writing file: {}", target_path.display());
            write_file(&target_path, &processed, entry.mode)?;
            stats.files_processed += 1;
        }
        Ok(Visit::Continue)
    }

    fn output_path(&self, output_root: &Path, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(output_root.to_path_buf(), |acc, part| acc.join(part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ancestor_of_root() {
        assert!(is_ancestor_of_root("cmd", "cmd/meower/template"));
        assert!(is_ancestor_of_root("cmd/meower", "cmd/meower/template"));
        assert!(!is_ancestor_of_root("cmd/meower/template", "cmd/meower/template"));
        assert!(!is_ancestor_of_root("cm", "cmd/meower/template"));
        assert!(!is_ancestor_of_root("web", ""));
    }
}
