use crate::error::Result;

/// One file or directory met while walking a source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Slash-separated path relative to the tree root.
    pub path: String,
    /// Last path component.
    pub name: String,
    pub is_dir: bool,
    /// Unix permission bits, when the backing store has them.
    pub mode: Option<u32>,
}

impl SourceEntry {
    pub fn new<S: Into<String>>(path: S, is_dir: bool, mode: Option<u32>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self { path, name, is_dir, mode }
    }
}

/// Answer of a walk visitor for the entry it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    /// Do not descend into this directory. Same as `Continue` for files.
    SkipSubtree,
}

/// Read-only hierarchical file set the materializer works from.
pub trait SourceTree {
    /// Human readable description, used in logs and reports.
    fn name(&self) -> String;

    /// Visits every entry in pre-order: a directory comes before its
    /// contents and siblings are sorted by name. The root itself is not
    /// visited.
    fn walk(&self, visit: &mut dyn FnMut(&SourceEntry) -> Result<Visit>) -> Result<()>;

    /// Reads the full contents of the file at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Whether `path` exists in the tree.
    fn exists(&self, path: &str) -> bool;
}

/// Joins a directory path and a child name with `/`, treating `""` as root.
pub fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}
