use crate::error::{Error, Result};
use crate::loader::interface::{SourceEntry, SourceTree, Visit};
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Template payload compiled into the binary, as `(path, contents)` pairs
/// relative to the crate root.
#[cfg(feature = "embedded-templates")]
static BUNDLE: &[(&str, &[u8])] = &[
    ("GUIDE.md", include_bytes!("../../GUIDE.md")),
    ("template/CONTRIBUTING.md", include_bytes!("../../template/CONTRIBUTING.md")),
    ("template/README.md", include_bytes!("../../template/README.md")),
    ("template/docker-compose.yml", include_bytes!("../../template/docker-compose.yml")),
    ("template/go.mod.template", include_bytes!("../../template/go.mod.template")),
    ("template/Makefile", include_bytes!("../../template/Makefile")),
    ("template/api/Dockerfile", include_bytes!("../../template/api/Dockerfile")),
    ("template/api/main.go.template", include_bytes!("../../template/api/main.go.template")),
    ("template/api/server/server.go.template", include_bytes!("../../template/api/server/server.go.template")),
    ("template/api/proto/.gitkeep", include_bytes!("../../template/api/proto/.gitkeep")),
    ("template/api/db/migrations/001_init.sql", include_bytes!("../../template/api/db/migrations/001_init.sql")),
    ("template/api/db/sqlc.yaml", include_bytes!("../../template/api/db/sqlc.yaml")),
    ("template/web/Dockerfile", include_bytes!("../../template/web/Dockerfile")),
    ("template/web/main.go.template", include_bytes!("../../template/web/main.go.template")),
    ("template/web/handlers/app.go.template", include_bytes!("../../template/web/handlers/app.go.template")),
    ("template/web/handlers/homepage.go.template", include_bytes!("../../template/web/handlers/homepage.go.template")),
    ("template/web/routing/routing.go.template", include_bytes!("../../template/web/routing/routing.go.template")),
    ("template/web/static/.gitkeep", include_bytes!("../../template/web/static/.gitkeep")),
];

#[cfg(not(feature = "embedded-templates"))]
static BUNDLE: &[(&str, &[u8])] = &[];

/// Source tree backed by an in-memory file bundle.
#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    files: Vec<(Cow<'static, str>, Cow<'static, [u8]>)>,
    entries: Vec<SourceEntry>,
}

impl EmbeddedSource {
    /// The bundle compiled into this binary. Empty when the
    /// `embedded-templates` feature is disabled.
    pub fn bundled() -> Self {
        Self::from_pairs(BUNDLE.iter().map(|(path, bytes)| (Cow::Borrowed(*path), Cow::Borrowed(*bytes))))
    }

    /// Builds a bundle from owned files.
    pub fn from_files<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<Vec<u8>>,
    {
        Self::from_pairs(
            files.into_iter().map(|(path, contents)| (Cow::Owned(path.into()), Cow::Owned(contents.into()))),
        )
    }

    fn from_pairs<I>(pairs: I) -> Self
    where
        I: Iterator<Item = (Cow<'static, str>, Cow<'static, [u8]>)>,
    {
        let files: Vec<_> = pairs
            .map(|(path, contents)| {
                let path = if path.starts_with('/') || path.ends_with('/') {
                    Cow::Owned(path.trim_matches('/').to_string())
                } else {
                    path
                };
                (path, contents)
            })
            .filter(|(path, _)| !path.is_empty())
            .collect();

        let mut dirs = BTreeSet::new();
        for (path, _) in &files {
            let mut parent = path.as_ref();
            while let Some((dir, _)) = parent.rsplit_once('/') {
                dirs.insert(dir.to_string());
                parent = dir;
            }
        }

        let mut entries: Vec<SourceEntry> = dirs
            .into_iter()
            .map(|dir| SourceEntry::new(dir, true, None))
            .chain(files.iter().map(|(path, _)| SourceEntry::new(path.to_string(), false, None)))
            .collect();
        entries.sort_by(|a, b| a.path.split('/').cmp(b.path.split('/')));

        Self { files, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

impl SourceTree for EmbeddedSource {
    fn name(&self) -> String {
        "embedded template bundle".to_string()
    }

    fn walk(&self, visit: &mut dyn FnMut(&SourceEntry) -> Result<Visit>) -> Result<()> {
        if self.is_empty() {
            return Err(Error::SourceUnavailableError { source_name: self.name() });
        }

        let mut skipped: Option<String> = None;
        for entry in &self.entries {
            if let Some(prefix) = &skipped {
                if entry.path.starts_with(prefix.as_str()) {
                    continue;
                }
                skipped = None;
            }
            if visit(entry)? == Visit::SkipSubtree && entry.is_dir {
                skipped = Some(format!("{}/", entry.path));
            }
        }
        Ok(())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, contents)| contents.to_vec())
            .ok_or_else(|| {
                Error::file(
                    "read embedded file",
                    path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "not in bundle"),
                )
            })
    }

    fn exists(&self, path: &str) -> bool {
        let path = path.trim_matches('/');
        self.entries.iter().any(|entry| entry.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directories_are_synthesized_in_pre_order() {
        let source = EmbeddedSource::from_files([
            ("b/z.txt", "z"),
            ("a.txt", "a"),
            ("b/c/d.txt", "d"),
        ]);
        let paths: Vec<_> = source.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["a.txt", "b", "b/c", "b/c/d.txt", "b/z.txt"]);
    }

    #[test]
    fn test_skip_subtree_hides_descendants_only() {
        let source = EmbeddedSource::from_files([("b/c.txt", "c"), ("bb.txt", "bb")]);
        let mut seen = Vec::new();
        source
            .walk(&mut |entry| {
                seen.push(entry.path.clone());
                Ok(if entry.path == "b" { Visit::SkipSubtree } else { Visit::Continue })
            })
            .unwrap();
        assert_eq!(seen, ["b", "bb.txt"]);
    }
}
