use std::path::PathBuf;

pub mod embedded;
pub mod interface;
pub mod local;

pub use embedded::EmbeddedSource;
pub use interface::{join_path, SourceEntry, SourceTree, Visit};
pub use local::LocalSource;

/// Where template files are read from.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Bundle compiled into the binary
    Embedded,
    /// Directory on the local filesystem
    FileSystem(PathBuf),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::Embedded => write!(f, "embedded template bundle"),
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
        }
    }
}

impl TemplateSource {
    /// The generator's own checkout, used when the embedded bundle is missing.
    pub fn checkout() -> Self {
        Self::FileSystem(LocalSource::checkout().root().to_path_buf())
    }

    /// Opens the source tree behind this location.
    pub fn open(&self) -> Box<dyn SourceTree> {
        match self {
            TemplateSource::Embedded => Box::new(EmbeddedSource::bundled()),
            TemplateSource::FileSystem(path) => Box::new(LocalSource::new(path.clone())),
        }
    }
}
