//! Project generation pipeline.
//! Sequences validation, output setup, template materialization,
//! post-processing and reporting. Every stage must succeed before the next
//! one starts; a failure is wrapped in [`Error::StageError`] naming the stage.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::ignore::PathFilter;
use crate::loader::{SourceTree, TemplateSource};
use crate::processor::{ProcessStats, Processor};
use crate::validation::Validator;
use crate::vars::TemplateVars;
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Named stages of [`ProjectGenerator::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    CreateStructure,
    ProcessTemplates,
    PostProcess,
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validate => "validate configuration",
            Stage::CreateStructure => "create project structure",
            Stage::ProcessTemplates => "process templates",
            Stage::PostProcess => "post-process",
            Stage::Report => "report",
        };
        f.write_str(name)
    }
}

/// Input of a generation run.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    pub project_name: String,
    /// Empty means `<default prefix>/<project name>`.
    pub module_path: String,
    pub force: bool,
    /// Directory the project directory is created in. Empty means the current directory.
    pub parent_dir: PathBuf,
    dest_dir: Option<PathBuf>,
}

impl ProjectConfig {
    pub fn new<S: Into<String>>(project_name: S) -> Self {
        Self { project_name: project_name.into(), ..Self::default() }
    }

    pub fn with_module_path<S: Into<String>>(mut self, module_path: S) -> Self {
        self.module_path = module_path.into();
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_parent_dir<P: Into<PathBuf>>(mut self, parent_dir: P) -> Self {
        self.parent_dir = parent_dir.into();
        self
    }

    /// Destination directory, known once the validate stage has run.
    pub fn dest_dir(&self) -> Option<&Path> {
        self.dest_dir.as_deref()
    }
}

/// Outcome of a successful generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub project_name: String,
    pub module_path: String,
    pub dest_dir: PathBuf,
    /// Name of the source tree the project was materialized from.
    pub source_name: String,
    /// True when the embedded bundle was unavailable and the on-disk
    /// fallback was used.
    pub degraded: bool,
    pub stats: ProcessStats,
    pub guide_copied: bool,
}

/// Generates a new project from a template source.
pub struct ProjectGenerator<'a> {
    settings: &'a Settings,
    validator: &'a Validator,
    config: ProjectConfig,
    primary: Box<dyn SourceTree>,
    fallback: Option<Box<dyn SourceTree>>,
}

impl<'a> ProjectGenerator<'a> {
    /// Generator reading the embedded bundle, falling back to the
    /// generator's own checkout when nothing was embedded.
    pub fn new(settings: &'a Settings, validator: &'a Validator, config: ProjectConfig) -> Self {
        Self::with_sources(
            settings,
            validator,
            config,
            TemplateSource::Embedded.open(),
            Some(TemplateSource::checkout().open()),
        )
    }

    pub fn with_sources(
        settings: &'a Settings,
        validator: &'a Validator,
        config: ProjectConfig,
        primary: Box<dyn SourceTree>,
        fallback: Option<Box<dyn SourceTree>>,
    ) -> Self {
        Self { settings, validator, config, primary, fallback }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Runs the whole pipeline.
    ///
    /// # Errors
    /// * `Error::StageError` wrapping the first failure, e.g.
    ///   `OutputDirectoryExistsError` from the validate stage
    pub fn generate(&mut self) -> Result<GenerationReport> {
        let dest_dir = self.validate().map_err(|e| e.in_stage(Stage::Validate))?;
        self.create_structure(&dest_dir).map_err(|e| e.in_stage(Stage::CreateStructure))?;
        let (source, stats) =
            self.process_templates(&dest_dir).map_err(|e| e.in_stage(Stage::ProcessTemplates))?;
        let guide_copied = self.post_process(source, &dest_dir);

        let report = GenerationReport {
            project_name: self.config.project_name.clone(),
            module_path: self.config.module_path.clone(),
            dest_dir,
            source_name: self.source(source).name(),
            degraded: matches!(source, ActiveSource::Fallback),
            stats,
            guide_copied,
        };
        print_report(self.settings, &report);
        Ok(report)
    }

    fn validate(&mut self) -> Result<PathBuf> {
        info!("Validating project '{}'", self.config.project_name);
        self.validator.validate_project_name(&self.config.project_name)?;

        if self.config.module_path.is_empty() {
            self.config.module_path = self.settings.default_module_path(&self.config.project_name);
            warn!("No module path given, using '{}'", self.config.module_path);
        }
        self.validator.validate_module_path(&self.config.module_path)?;

        let dest_dir = self.config.parent_dir.join(&self.config.project_name);
        if dest_dir.exists() {
            if !self.config.force {
                return Err(Error::OutputDirectoryExistsError {
                    output_dir: dest_dir.display().to_string(),
                });
            }
            warn!("Directory '{}' already exists, overwriting", dest_dir.display());
        }
        self.config.dest_dir = Some(dest_dir.clone());
        Ok(dest_dir)
    }

    fn create_structure(&self, dest_dir: &Path) -> Result<()> {
        info!("Creating project directory {}", dest_dir.display());
        fs::create_dir_all(dest_dir).map_err(|e| Error::file("create directory", dest_dir, e))?;

        let marker = dest_dir.join(&self.settings.marker_file);
        fs::write(&marker, &self.settings.marker_content).map_err(|e| Error::file("write", &marker, e))
    }

    fn process_templates(&self, dest_dir: &Path) -> Result<(ActiveSource, ProcessStats)> {
        let mut vars = TemplateVars::with_validator(self.validator.clone())
            .with_self_module_path(&self.settings.self_module_path);
        vars.set_project(&self.config.project_name, &self.config.module_path)?;

        let filter = PathFilter::new(&self.settings.filter, &self.settings.template_root)?;
        let processor = Processor::new(&vars, &filter)
            .with_root_prefix(&self.settings.template_root)
            .with_template_suffix(&self.settings.template_suffix);

        info!("Processing templates from {}", self.primary.name());
        match processor.materialize(self.primary.as_ref(), dest_dir) {
            Ok(stats) => Ok((ActiveSource::Primary, stats)),
            Err(Error::SourceUnavailableError { source_name }) => {
                let Some(fallback) = &self.fallback else {
                    return Err(Error::SourceUnavailableError { source_name });
                };
                warn!(
                    "Template source '{}' is not available, falling back to {}. \
                     The generated project may differ from a release build.",
                    source_name,
                    fallback.name()
                );
                let stats = processor.materialize(fallback.as_ref(), dest_dir)?;
                Ok((ActiveSource::Fallback, stats))
            }
            Err(e) => Err(e),
        }
    }

    // Best effort: failures are logged and never abort the run. Returns
    // whether the guide was copied.
    fn post_process(&self, source: ActiveSource, dest_dir: &Path) -> bool {
        info!("Post-processing {}", dest_dir.display());
        for path in &self.settings.cleanup_paths {
            remove_generated_path(&dest_dir.join(path));
        }

        let guide = &self.settings.guide_file;
        let source = self.source(source);
        if !source.exists(guide) {
            debug!("No {} in {}, skipping", guide, source.name());
            return false;
        }
        let target = dest_dir.join(guide);
        match source.read(guide).and_then(|content| {
            fs::write(&target, content).map_err(|e| Error::file("write", &target, e))
        }) {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not copy {}: {}", guide, e);
                false
            }
        }
    }

    fn source(&self, active: ActiveSource) -> &dyn SourceTree {
        match (active, &self.fallback) {
            (ActiveSource::Fallback, Some(fallback)) => fallback.as_ref(),
            _ => self.primary.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ActiveSource {
    Primary,
    Fallback,
}

fn remove_generated_path(path: &Path) {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        return;
    };
    match result {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) => warn!("Could not remove {}: {}", path.display(), e),
    }
}

fn print_report(settings: &Settings, report: &GenerationReport) {
    if report.degraded {
        println!("Warning: templates were read from {} (fallback).", report.source_name);
    }
    println!(
        "Project '{}' created in {} ({} files, {} skipped).",
        report.project_name,
        report.dest_dir.display(),
        report.stats.files_processed,
        report.stats.files_skipped
    );
    println!("Module path: {}", report.module_path);
    println!();
    println!("Next steps:");
    println!("  cd {}", report.dest_dir.display());
    println!("  make setup");
    println!("  make dev");
    println!("  open http://localhost:{}", settings.http_port);
    if report.guide_copied {
        println!();
        println!("See {} for a walkthrough of the generated project.", settings.guide_file);
    }
}
