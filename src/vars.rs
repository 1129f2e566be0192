//! Template variables and the placeholder replacement table.
//!
//! Each group of variables (project, service, model) is a small value object
//! that validates its canonical name and derives every casing form in one
//! step, so a half-derived group can never exist. [`TemplateVars`] composes
//! the groups and turns them into a [`ReplacementTable`].

use crate::naming::{
    to_kebab_case, to_pascal_case, to_plural, to_snake_case, to_upper_snake_case,
};
use crate::validation::{ValidationError, Validator};
use indexmap::IndexMap;
use regex::bytes::{Captures, Regex};
use std::borrow::Cow;
use std::fmt;

/// Prefix shared by every placeholder token.
pub const PLACEHOLDER_PREFIX: &str = "TEMPLATE_";

/// Default value of `TEMPLATE_API_VERSION`.
pub const DEFAULT_API_VERSION: &str = "v1";

/// The fixed placeholder vocabulary recognized in template files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    ProjectName,
    ProjectNameUpper,
    ProjectNameCamel,
    ModulePath,
    ServiceName,
    ServiceNameLower,
    ServiceNameSnake,
    ServiceNameKebab,
    ModelName,
    ModelNameLower,
    ModelNamePlural,
    TableName,
    ApiVersion,
}

impl Placeholder {
    pub const ALL: [Placeholder; 13] = [
        Placeholder::ProjectName,
        Placeholder::ProjectNameUpper,
        Placeholder::ProjectNameCamel,
        Placeholder::ModulePath,
        Placeholder::ServiceName,
        Placeholder::ServiceNameLower,
        Placeholder::ServiceNameSnake,
        Placeholder::ServiceNameKebab,
        Placeholder::ModelName,
        Placeholder::ModelNameLower,
        Placeholder::ModelNamePlural,
        Placeholder::TableName,
        Placeholder::ApiVersion,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            Placeholder::ProjectName => "TEMPLATE_PROJECT_NAME",
            Placeholder::ProjectNameUpper => "TEMPLATE_PROJECT_NAME_UPPER",
            Placeholder::ProjectNameCamel => "TEMPLATE_PROJECT_NAME_CAMEL",
            Placeholder::ModulePath => "TEMPLATE_MODULE_PATH",
            Placeholder::ServiceName => "TEMPLATE_SERVICE_NAME",
            Placeholder::ServiceNameLower => "TEMPLATE_SERVICE_NAME_LOWER",
            Placeholder::ServiceNameSnake => "TEMPLATE_SERVICE_NAME_SNAKE",
            Placeholder::ServiceNameKebab => "TEMPLATE_SERVICE_NAME_KEBAB",
            Placeholder::ModelName => "TEMPLATE_MODEL_NAME",
            Placeholder::ModelNameLower => "TEMPLATE_MODEL_NAME_LOWER",
            Placeholder::ModelNamePlural => "TEMPLATE_MODEL_NAME_PLURAL",
            Placeholder::TableName => "TEMPLATE_TABLE_NAME",
            Placeholder::ApiVersion => "TEMPLATE_API_VERSION",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Project name and module path with their derived forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    name: String,
    upper_snake: String,
    pascal: String,
    module_path: String,
}

impl ProjectIdentity {
    /// Validates both values before deriving anything; on error nothing is built.
    pub fn new(validator: &Validator, name: &str, module_path: &str) -> Result<Self, ValidationError> {
        validator.validate_project_name(name)?;
        validator.validate_module_path(module_path)?;
        Ok(Self {
            name: name.to_string(),
            upper_snake: to_upper_snake_case(name),
            pascal: to_pascal_case(name),
            module_path: module_path.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn upper_snake(&self) -> &str {
        &self.upper_snake
    }

    pub fn pascal(&self) -> &str {
        &self.pascal
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    name: String,
    lower: String,
    snake: String,
    kebab: String,
}

impl ServiceIdentity {
    pub fn new(validator: &Validator, name: &str) -> Result<Self, ValidationError> {
        validator.validate_service_name(name)?;
        Ok(Self {
            name: name.to_string(),
            lower: name.to_lowercase(),
            snake: to_snake_case(name),
            kebab: to_kebab_case(name),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn snake(&self) -> &str {
        &self.snake
    }

    pub fn kebab(&self) -> &str {
        &self.kebab
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelIdentity {
    name: String,
    lower: String,
    plural: String,
}

impl ModelIdentity {
    pub fn new(validator: &Validator, name: &str) -> Result<Self, ValidationError> {
        validator.validate_model_name(name)?;
        Ok(Self { name: name.to_string(), lower: name.to_lowercase(), plural: to_plural(name) })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// Table names are the plural form.
    pub fn table_name(&self) -> &str {
        &self.plural
    }
}

/// Canonical record of everything a template can reference.
///
/// Groups are replaced wholesale by the setters; a failed setter leaves the
/// previous state untouched.
#[derive(Debug, Clone)]
pub struct TemplateVars {
    validator: Validator,
    project: Option<ProjectIdentity>,
    module_path: Option<String>,
    service: Option<ServiceIdentity>,
    model: Option<ModelIdentity>,
    api_version: String,
    self_module_path: Option<String>,
}

impl Default for TemplateVars {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::with_validator(Validator::default())
    }

    pub fn with_validator(validator: Validator) -> Self {
        Self {
            validator,
            project: None,
            module_path: None,
            service: None,
            model: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            self_module_path: None,
        }
    }

    /// Hard-coded module path used by the template sources themselves. Every
    /// occurrence is rewritten to the project's module path.
    pub fn with_self_module_path<S: Into<String>>(mut self, path: S) -> Self {
        self.self_module_path = Some(path.into());
        self
    }

    pub fn set_project(&mut self, name: &str, module_path: &str) -> Result<(), ValidationError> {
        let project = ProjectIdentity::new(&self.validator, name, module_path)?;
        self.module_path = Some(project.module_path.clone());
        self.project = Some(project);
        Ok(())
    }

    /// Sets only the module path, for generators running inside an existing
    /// project where the project name is unknown.
    pub fn set_module_path(&mut self, module_path: &str) -> Result<(), ValidationError> {
        self.validator.validate_module_path(module_path)?;
        self.module_path = Some(module_path.to_string());
        Ok(())
    }

    pub fn set_service(&mut self, name: &str) -> Result<(), ValidationError> {
        self.service = Some(ServiceIdentity::new(&self.validator, name)?);
        Ok(())
    }

    pub fn set_model(&mut self, name: &str) -> Result<(), ValidationError> {
        self.model = Some(ModelIdentity::new(&self.validator, name)?);
        Ok(())
    }

    pub fn set_api_version(&mut self, version: &str) -> Result<(), ValidationError> {
        self.validator.validate_api_version(version)?;
        self.api_version = version.to_string();
        Ok(())
    }

    pub fn project(&self) -> Option<&ProjectIdentity> {
        self.project.as_ref()
    }

    pub fn module_path(&self) -> Option<&str> {
        self.module_path.as_deref()
    }

    pub fn service(&self) -> Option<&ServiceIdentity> {
        self.service.as_ref()
    }

    pub fn model(&self) -> Option<&ModelIdentity> {
        self.model.as_ref()
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Builds the placeholder table. Only groups that are set contribute
    /// entries, so unset placeholders stay verbatim instead of collapsing to
    /// empty strings.
    pub fn to_replacement_map(&self) -> ReplacementTable {
        let mut entries = IndexMap::new();

        if let Some(project) = &self.project {
            entries.insert(Placeholder::ProjectName.token().to_string(), project.name.clone());
            entries.insert(
                Placeholder::ProjectNameUpper.token().to_string(),
                project.upper_snake.clone(),
            );
            entries.insert(Placeholder::ProjectNameCamel.token().to_string(), project.pascal.clone());
        }
        if let Some(module_path) = &self.module_path {
            entries.insert(Placeholder::ModulePath.token().to_string(), module_path.clone());
            if let Some(self_path) = &self.self_module_path {
                entries.insert(self_path.clone(), module_path.clone());
            }
        }
        if let Some(service) = &self.service {
            entries.insert(Placeholder::ServiceName.token().to_string(), service.name.clone());
            entries.insert(Placeholder::ServiceNameLower.token().to_string(), service.lower.clone());
            entries.insert(Placeholder::ServiceNameSnake.token().to_string(), service.snake.clone());
            entries.insert(Placeholder::ServiceNameKebab.token().to_string(), service.kebab.clone());
        }
        if let Some(model) = &self.model {
            entries.insert(Placeholder::ModelName.token().to_string(), model.name.clone());
            entries.insert(Placeholder::ModelNameLower.token().to_string(), model.lower.clone());
            entries.insert(Placeholder::ModelNamePlural.token().to_string(), model.plural.clone());
            entries.insert(Placeholder::TableName.token().to_string(), model.plural.clone());
        }
        if !self.api_version.is_empty() {
            entries.insert(Placeholder::ApiVersion.token().to_string(), self.api_version.clone());
        }

        ReplacementTable::new(entries)
    }
}

/// Placeholder to value mapping with a single-pass substitution matcher.
#[derive(Debug, Clone)]
pub struct ReplacementTable {
    entries: IndexMap<String, String>,
    matcher: Option<Regex>,
}

impl PartialEq for ReplacementTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl ReplacementTable {
    pub fn new(entries: IndexMap<String, String>) -> Self {
        let matcher = build_matcher(entries.keys().map(String::as_str));
        Self { entries, matcher }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces every key occurrence in one left-to-right pass. At any
    /// position the longest key wins and substituted text is never rescanned,
    /// so the order of keys has no effect on the result. Returns the input
    /// unchanged (borrowed) when nothing matched.
    pub fn apply<'h>(&self, haystack: &'h [u8]) -> Cow<'h, [u8]> {
        let Some(matcher) = &self.matcher else {
            return Cow::Borrowed(haystack);
        };
        matcher.replace_all(haystack, |caps: &Captures<'_>| {
            let found = &caps[0];
            std::str::from_utf8(found)
                .ok()
                .and_then(|key| self.entries.get(key))
                .map(|value| value.as_bytes().to_vec())
                .unwrap_or_else(|| found.to_vec())
        })
    }

    pub fn apply_str<'h>(&self, haystack: &'h str) -> Cow<'h, str> {
        match self.apply(haystack.as_bytes()) {
            Cow::Borrowed(_) => Cow::Borrowed(haystack),
            Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }
}

fn build_matcher<'a>(keys: impl Iterator<Item = &'a str>) -> Option<Regex> {
    let mut keys: Vec<&str> = keys.filter(|k| !k.is_empty()).collect();
    if keys.is_empty() {
        return None;
    }
    // Longest first: the alternation is leftmost-first.
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let pattern = keys.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
    Some(Regex::new(&pattern).expect("escaped key alternation is a valid regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_tokens_are_prefixed_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for placeholder in Placeholder::ALL {
            assert!(placeholder.token().starts_with(PLACEHOLDER_PREFIX));
            assert!(seen.insert(placeholder.token()), "duplicate token {placeholder}");
            assert_eq!(Placeholder::from_token(placeholder.token()), Some(placeholder));
        }
    }

    #[test]
    fn test_derived_values_never_contain_tokens() {
        let mut vars = TemplateVars::new().with_self_module_path("github.com/AlyxPink/meower");
        vars.set_project("template-app", "github.com/acme/template-app").unwrap();
        vars.set_service("TemplateService").unwrap();
        vars.set_model("Template").unwrap();

        for (_, value) in vars.to_replacement_map().iter() {
            for placeholder in Placeholder::ALL {
                assert!(!value.contains(placeholder.token()), "{value} contains {placeholder}");
            }
        }
    }

    #[test]
    fn test_matcher_escapes_metacharacters() {
        let mut entries = IndexMap::new();
        entries.insert("a.b(c)*".to_string(), "x".to_string());
        entries.insert("[z]".to_string(), "y".to_string());
        let table = ReplacementTable::new(entries);

        assert_eq!(table.apply_str("a.b(c)* axb(c) [z] z"), "x axb(c) y z");
    }

    #[test]
    fn test_matcher_prefers_longest_token() {
        let mut entries = IndexMap::new();
        entries.insert("TEMPLATE_PROJECT_NAME".to_string(), "app".to_string());
        entries.insert("TEMPLATE_PROJECT_NAME_UPPER".to_string(), "APP".to_string());
        let table = ReplacementTable::new(entries);

        assert_eq!(
            table.apply_str("TEMPLATE_PROJECT_NAME_UPPER TEMPLATE_PROJECT_NAME"),
            "APP app"
        );
    }
}
