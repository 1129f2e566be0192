use crate::error::{Error, Result};
use crate::loader::interface::{SourceEntry, SourceTree, Visit};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source tree backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The generator's own source checkout, used when nothing is embedded.
    pub fn checkout() -> Self {
        Self::new(env!("CARGO_MANIFEST_DIR"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/').filter(|part| !part.is_empty()).fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

impl SourceTree for LocalSource {
    fn name(&self) -> String {
        format!("local path: '{}'", self.root.display())
    }

    fn walk(&self, visit: &mut dyn FnMut(&SourceEntry) -> Result<Visit>) -> Result<()> {
        if !self.root.is_dir() {
            return Err(Error::SourceUnavailableError { source_name: self.name() });
        }

        let mut entries = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = entries.next() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| Error::file("resolve", entry.path(), std::io::Error::other(e)))?;
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let is_dir = entry.file_type().is_dir();
            let source_entry = SourceEntry::new(relative, is_dir, file_mode(entry.path()));

            if visit(&source_entry)? == Visit::SkipSubtree && is_dir {
                debug!("Not descending into {}", source_entry.path);
                entries.skip_current_dir();
            }
        }
        Ok(())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        std::fs::read(&full_path).map_err(|e| Error::file("read", &full_path, e))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }
}

#[cfg(unix)]
fn file_mode(path: &Path) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).ok().map(|m| m.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> Option<u32> {
    None
}
