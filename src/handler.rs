//! `create handler`: generates a gRPC service definition, its server-side
//! implementation and a web handler stub inside an existing project.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::validation::Validator;
use crate::vars::ServiceIdentity;
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const PROTO_TEMPLATE: &str = include_str!("../assets/handler/service.proto.j2");
const SERVER_TEMPLATE: &str = include_str!("../assets/handler/server.go.j2");
const WEB_TEMPLATE: &str = include_str!("../assets/handler/web.go.j2");

/// Methods the handler templates know how to generate.
pub const HANDLER_METHODS: [&str; 5] = ["Create", "Get", "Update", "Delete", "List"];

/// Normalizes user supplied method names (`get`, `LIST`) to their canonical
/// spelling, rejecting anything the templates do not support. Duplicates are
/// dropped, first occurrence wins.
pub fn parse_methods<S: AsRef<str>>(methods: &[S]) -> Result<Vec<String>> {
    let mut parsed: Vec<String> = Vec::new();
    for method in methods {
        let method = method.as_ref().trim();
        let canonical = HANDLER_METHODS
            .iter()
            .find(|known| known.eq_ignore_ascii_case(method))
            .ok_or_else(|| Error::UnknownMethodError {
                method: method.to_string(),
                expected: HANDLER_METHODS.join(", "),
            })?;
        if !parsed.iter().any(|m| m == canonical) {
            parsed.push(canonical.to_string());
        }
    }
    if parsed.is_empty() {
        return Err(Error::UnknownMethodError { method: String::new(), expected: HANDLER_METHODS.join(", ") });
    }
    Ok(parsed)
}

/// Reads the module path from `go.mod` or `api/go.mod` under `project_root`.
/// A trailing `/api` is removed so the result is the project's root module.
pub fn read_module_path(project_root: &Path) -> Result<String> {
    for candidate in ["go.mod", "api/go.mod"] {
        let path = project_root.join(candidate);
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let module = content
            .lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix("module "))
            .map(|module| module.trim().trim_matches('"'));
        if let Some(module) = module {
            debug!("Module path '{}' read from {}", module, path.display());
            return Ok(module.strip_suffix("/api").unwrap_or(module).to_string());
        }
    }
    Err(Error::ModulePathError {
        reason: format!("no go.mod with a module line in '{}' or its api/ directory", project_root.display()),
    })
}

#[derive(Debug, Serialize)]
struct HandlerContext<'a> {
    service_name: &'a str,
    service_name_lower: &'a str,
    service_name_snake: &'a str,
    service_name_kebab: &'a str,
    module_path: &'a str,
    resource_name: &'a str,
    resource_name_lower: String,
    methods: &'a [String],
}

/// Files written by [`HandlerGenerator::generate`], relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedHandler {
    pub proto: PathBuf,
    pub server: PathBuf,
    pub web: PathBuf,
}

/// Generates handler files for one service inside a generated project.
pub struct HandlerGenerator<'a> {
    renderer: &'a dyn TemplateRenderer,
    project_root: PathBuf,
    service: ServiceIdentity,
    module_path: String,
    methods: Vec<String>,
}

impl<'a> HandlerGenerator<'a> {
    /// Checks that `project_root` is a generated project, validates the
    /// service name with the strict rules and resolves the module path.
    pub fn new<P: Into<PathBuf>>(
        settings: &Settings,
        renderer: &'a dyn TemplateRenderer,
        project_root: P,
        service_name: &str,
        methods: &[String],
    ) -> Result<Self> {
        let project_root = project_root.into();
        if !project_root.join(&settings.marker_file).is_file() {
            return Err(Error::NotAProjectError {
                path: project_root.display().to_string(),
                marker: settings.marker_file.clone(),
            });
        }

        let validator = Validator::strict();
        let service = ServiceIdentity::new(&validator, service_name)?;
        let module_path = read_module_path(&project_root)?;
        validator.validate_module_path(&module_path)?;

        Ok(Self {
            renderer,
            service,
            module_path,
            project_root,
            methods: parse_methods(methods)?,
        })
    }

    pub fn service(&self) -> &ServiceIdentity {
        &self.service
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    pub fn generate(&self) -> Result<GeneratedHandler> {
        let service = &self.service;
        let resource_name = service.name().strip_suffix("Service").unwrap_or(service.name());
        let context = serde_json::to_value(HandlerContext {
            service_name: service.name(),
            service_name_lower: service.lower(),
            service_name_snake: service.snake(),
            service_name_kebab: service.kebab(),
            module_path: &self.module_path,
            resource_name,
            resource_name_lower: resource_name.to_lowercase(),
            methods: &self.methods,
        })?;

        let lower = service.lower();
        let generated = GeneratedHandler {
            proto: PathBuf::from("api/proto").join(lower).join("v1").join(format!("{lower}.proto")),
            server: PathBuf::from("api/server/handlers").join(format!("{lower}.go")),
            web: PathBuf::from("web/handlers").join(format!("{lower}.go")),
        };

        info!("Generating protobuf definition for {}", service.name());
        self.write(&generated.proto, PROTO_TEMPLATE, &context)?;
        info!("Generating server handler for {}", service.name());
        self.write(&generated.server, SERVER_TEMPLATE, &context)?;
        info!("Generating web handler for {}", service.name());
        self.write(&generated.web, WEB_TEMPLATE, &context)?;

        Ok(generated)
    }

    fn write(&self, relative: &Path, template: &str, context: &serde_json::Value) -> Result<()> {
        let content = self.renderer.render(template, context)?;
        let path = self.project_root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::file("create directory", parent, e))?;
        }
        fs::write(&path, content).map_err(|e| Error::file("write", &path, e))
    }
}
