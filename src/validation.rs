//! Input validation for project, module, service and model names.
//! Every failure names the field, the offending value and the rule it broke,
//! so callers can surface it to the user as-is.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static PROJECT_NAME_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid project name regex"));

static MODULE_PATH_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.-]+(/[a-zA-Z0-9.~-]+)*$").expect("valid module path regex")
});

static API_VERSION_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v[0-9]+[a-z0-9]*$").expect("valid api version regex"));

pub const PROJECT_NAME_MIN_LEN: usize = 2;
pub const PROJECT_NAME_MAX_LEN: usize = 50;
pub const SERVICE_NAME_MIN_LEN: usize = 2;

/// Service names that are too generic to generate code for.
pub const RESERVED_SERVICE_NAMES: [&str; 4] = ["Service", "Handler", "Controller", "Manager"];

/// The rule a value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Length,
    Charset,
    Case,
    Format,
    Reserved,
    Suffix,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Required => "required",
            Rule::Length => "length",
            Rule::Charset => "charset",
            Rule::Case => "case",
            Rule::Format => "format",
            Rule::Reserved => "reserved",
            Rule::Suffix => "suffix",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed for {field} '{value}' ({rule}): {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
    pub rule: Rule,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, value: &str, rule: Rule, message: impl Into<String>) -> Self {
        Self { field, value: value.to_string(), rule, message: message.into() }
    }
}

/// Suffix convention enforced by the strict service validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSuffix {
    pub suffix: &'static str,
    pub min_len: usize,
}

/// Name validator. Built once and shared by everything that accepts names.
#[derive(Debug, Clone)]
pub struct Validator {
    reserved_service_names: Vec<&'static str>,
    service_suffix: Option<ServiceSuffix>,
}

impl Default for Validator {
    fn default() -> Self {
        Self { reserved_service_names: RESERVED_SERVICE_NAMES.to_vec(), service_suffix: None }
    }
}

impl Validator {
    /// Validator used when generating handlers: service names must end with
    /// `Service` and be at least 8 characters long (`XService`).
    pub fn strict() -> Self {
        Self {
            service_suffix: Some(ServiceSuffix { suffix: "Service", min_len: 8 }),
            ..Self::default()
        }
    }

    pub fn with_reserved_service_names(mut self, names: Vec<&'static str>) -> Self {
        self.reserved_service_names = names;
        self
    }

    pub fn service_suffix(&self) -> Option<&ServiceSuffix> {
        self.service_suffix.as_ref()
    }

    /// Project names are lowercase letters, digits and single inner hyphens,
    /// 2 to 50 characters long.
    pub fn validate_project_name(&self, name: &str) -> Result<(), ValidationError> {
        const FIELD: &str = "project name";
        if name.is_empty() {
            return Err(ValidationError::new(FIELD, name, Rule::Required, "project name cannot be empty"));
        }
        let len = name.chars().count();
        if len < PROJECT_NAME_MIN_LEN {
            return Err(ValidationError::new(
                FIELD,
                name,
                Rule::Length,
                format!("project name must be at least {PROJECT_NAME_MIN_LEN} characters"),
            ));
        }
        if len > PROJECT_NAME_MAX_LEN {
            return Err(ValidationError::new(
                FIELD,
                name,
                Rule::Length,
                format!("project name must be at most {PROJECT_NAME_MAX_LEN} characters"),
            ));
        }
        if !PROJECT_NAME_CHARSET.is_match(name) {
            return Err(ValidationError::new(
                FIELD,
                name,
                Rule::Charset,
                "project name must contain only lowercase letters, numbers, and hyphens",
            ));
        }
        if name.starts_with('-') || name.ends_with('-') {
            return Err(ValidationError::new(
                FIELD,
                name,
                Rule::Format,
                "project name cannot start or end with a hyphen",
            ));
        }
        if name.contains("--") {
            return Err(ValidationError::new(
                FIELD,
                name,
                Rule::Format,
                "project name cannot contain consecutive hyphens",
            ));
        }
        Ok(())
    }

    /// Module paths look like `github.com/user/project`: no scheme, no empty
    /// segments, no trailing slash.
    pub fn validate_module_path(&self, path: &str) -> Result<(), ValidationError> {
        const FIELD: &str = "module path";
        if path.is_empty() {
            return Err(ValidationError::new(FIELD, path, Rule::Required, "module path cannot be empty"));
        }
        if path.contains("://") {
            return Err(ValidationError::new(
                FIELD,
                path,
                Rule::Format,
                "module path must not include a protocol prefix (e.g. github.com/user/project)",
            ));
        }
        if path.contains("//") {
            return Err(ValidationError::new(FIELD, path, Rule::Format, "module path cannot contain '//'"));
        }
        if path.ends_with('/') {
            return Err(ValidationError::new(FIELD, path, Rule::Format, "module path cannot end with '/'"));
        }
        if !MODULE_PATH_FORMAT.is_match(path) {
            return Err(ValidationError::new(
                FIELD,
                path,
                Rule::Charset,
                "module path must be a valid Go module path (e.g. github.com/user/project)",
            ));
        }
        Ok(())
    }

    /// Service names are PascalCase letters and digits. The strict variant
    /// also enforces the `Service` suffix and its minimum length.
    pub fn validate_service_name(&self, name: &str) -> Result<(), ValidationError> {
        const FIELD: &str = "service name";
        validate_pascal_case(FIELD, name)?;

        match &self.service_suffix {
            Some(convention) => {
                if !name.ends_with(convention.suffix) {
                    return Err(ValidationError::new(
                        FIELD,
                        name,
                        Rule::Suffix,
                        format!(
                            "service name must end with '{0}' (e.g. User{0}, Post{0})",
                            convention.suffix
                        ),
                    ));
                }
                if name.len() < convention.min_len {
                    return Err(ValidationError::new(
                        FIELD,
                        name,
                        Rule::Length,
                        format!("service name must be at least {} characters", convention.min_len),
                    ));
                }
            }
            None if name.len() < SERVICE_NAME_MIN_LEN => {
                return Err(ValidationError::new(
                    FIELD,
                    name,
                    Rule::Length,
                    format!("service name must be at least {SERVICE_NAME_MIN_LEN} characters"),
                ));
            }
            None => {}
        }

        if let Some(word) = self.reserved_service_names.iter().find(|word| **word == name) {
            return Err(ValidationError::new(
                FIELD,
                name,
                Rule::Reserved,
                format!("'{word}' is a reserved word, please choose a more specific name"),
            ));
        }
        Ok(())
    }

    pub fn validate_model_name(&self, name: &str) -> Result<(), ValidationError> {
        validate_pascal_case("model name", name)
    }

    pub fn validate_api_version(&self, version: &str) -> Result<(), ValidationError> {
        const FIELD: &str = "api version";
        if version.is_empty() {
            return Err(ValidationError::new(FIELD, version, Rule::Required, "api version cannot be empty"));
        }
        if !API_VERSION_FORMAT.is_match(version) {
            return Err(ValidationError::new(
                FIELD,
                version,
                Rule::Format,
                "api version must look like v1, v2 or v1beta1",
            ));
        }
        Ok(())
    }
}

fn validate_pascal_case(field: &'static str, name: &str) -> Result<(), ValidationError> {
    let Some(first) = name.chars().next() else {
        return Err(ValidationError::new(field, name, Rule::Required, format!("{field} cannot be empty")));
    };
    if !first.is_ascii_uppercase() {
        return Err(ValidationError::new(
            field,
            name,
            Rule::Case,
            format!("{field} must start with an uppercase letter (PascalCase)"),
        ));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new(
            field,
            name,
            Rule::Charset,
            format!("{field} can only contain letters and numbers"),
        ));
    }
    Ok(())
}
