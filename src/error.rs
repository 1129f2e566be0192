//! Error handling for the Meower application.
//! Defines the error type and result alias used throughout the crate.

use crate::generator::Stage;
use crate::validation::ValidationError;
use thiserror::Error;

/// Errors produced while generating projects or components.
///
/// Each variant carries enough context to be shown to the user verbatim.
#[derive(Error, Debug)]
pub enum Error {
    /// A project, module, service or model name was rejected.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    #[error("Directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    /// The template source cannot be read at all (e.g. nothing was embedded).
    #[error("Template source '{source_name}' is not available.")]
    SourceUnavailableError { source_name: String },

    #[error("Failed to {action} '{path}': {source}.")]
    FileError {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is not a Meower project (missing {marker}). Run 'meower new <project-name>' first.")]
    NotAProjectError { path: String, marker: String },

    #[error("Could not determine the module path: {reason}.")]
    ModulePathError { reason: String },

    #[error("'{method}' is not a supported handler method (expected one of: {expected}).")]
    UnknownMethodError { method: String, expected: String },

    #[error("Template validation found {count} unknown placeholder(s):\n{details}")]
    UnknownPlaceholdersError { count: usize, details: String },

    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk the template tree: {0}.")]
    WalkError(#[from] walkdir::Error),

    #[error("Invalid filter pattern: {0}.")]
    GlobError(#[from] globset::Error),

    #[error("Failed to serialize template context: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Wraps an error raised inside a generation stage.
    #[error("Failed to {stage}: {source}")]
    StageError {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn file<P: AsRef<std::path::Path>>(
        action: &'static str,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Error::FileError { action, path: path.as_ref().display().to_string(), source }
    }

    /// Attaches the stage in which this error happened.
    pub fn in_stage(self, stage: Stage) -> Self {
        Error::StageError { stage, source: Box::new(self) }
    }

    /// The error underneath any stage wrapping.
    pub fn root(&self) -> &Error {
        match self {
            Error::StageError { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
