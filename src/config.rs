//! Generator configuration.
//! Every lookup table the generator relies on lives here and is built once at
//! startup, then handed to the components that need it.

/// Name of the sentinel file written at the root of every generated project.
pub const MARKER_FILE_NAME: &str = ".meowed";

/// Contents of the sentinel file. Only its existence is significant.
pub const MARKER_FILE_CONTENT: &str = "This project has been MEOWED!

It was generated by the Meower CLI. Template processing never descends into
a directory containing this file, so generated projects are not mistaken
for template sources.

https://github.com/AlyxPink/meower
";

/// Keeps otherwise empty directories in the template tree.
pub const KEEP_FILE_NAME: &str = ".gitkeep";

/// Default module prefix used when no module path is given.
pub const DEFAULT_MODULE_PREFIX: &str = "github.com/user";

/// Module path hard-coded in the template sources.
pub const SELF_MODULE_PATH: &str = "github.com/AlyxPink/meower";

/// Directory holding the template payload, relative to the source tree root.
pub const TEMPLATE_ROOT: &str = "template";

/// Suffix stripped from template file names (`main.go.template` -> `main.go`).
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Guide copied next to every generated project.
pub const GUIDE_FILE_NAME: &str = "GUIDE.md";

/// Default HTTP port of the generated web server.
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Rules consumed by the path filter.
#[derive(Debug, Clone)]
pub struct FilterRules {
    /// Dotfiles that are kept even though they are hidden.
    pub allowed_dotfiles: Vec<String>,
    /// Sentinel file marking a generated project.
    pub marker_file: String,
    /// Directory names whose whole subtree is skipped.
    pub skip_dirs: Vec<String>,
    /// Binary file extensions, without the leading dot.
    pub binary_extensions: Vec<String>,
    /// Path prefixes, relative to the template root, reserved for the CLI.
    pub internal_prefixes: Vec<String>,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            allowed_dotfiles: strings(&[MARKER_FILE_NAME, KEEP_FILE_NAME]),
            marker_file: MARKER_FILE_NAME.to_string(),
            skip_dirs: strings(&[
                "node_modules",
                ".git",
                "vendor",
                "dist",
                "build",
                "tmp",
                "target",
                ".next",
                ".nuxt",
                "cmd",
                "internal",
            ]),
            binary_extensions: strings(&[
                "exe", "bin", "so", "dylib", "dll", "jpg", "jpeg", "png", "gif", "svg", "ico",
                "mp4", "mp3", "wav", "avi", "zip", "tar", "gz", "7z", "pdf", "doc", "docx",
            ]),
            internal_prefixes: strings(&["cmd", "internal", "CONTRIBUTING.md", "test_", "debug_"]),
        }
    }
}

/// Process-wide generator settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub template_root: String,
    pub template_suffix: String,
    pub marker_file: String,
    pub marker_content: String,
    pub default_module_prefix: String,
    pub self_module_path: String,
    pub guide_file: String,
    /// Paths removed from the generated project after materialization.
    pub cleanup_paths: Vec<String>,
    pub http_port: u16,
    pub filter: FilterRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_root: TEMPLATE_ROOT.to_string(),
            template_suffix: TEMPLATE_SUFFIX.to_string(),
            marker_file: MARKER_FILE_NAME.to_string(),
            marker_content: MARKER_FILE_CONTENT.to_string(),
            default_module_prefix: DEFAULT_MODULE_PREFIX.to_string(),
            self_module_path: SELF_MODULE_PATH.to_string(),
            guide_file: GUIDE_FILE_NAME.to_string(),
            cleanup_paths: strings(&["cmd", "internal", "CONTRIBUTING.md"]),
            http_port: DEFAULT_HTTP_PORT,
            filter: FilterRules::default(),
        }
    }
}

impl Settings {
    /// Module path used when the user does not supply one.
    pub fn default_module_path(&self, project_name: &str) -> String {
        format!("{}/{}", self.default_module_prefix, project_name)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
