use meower::config::{Settings, MARKER_FILE_NAME};
use meower::error::Error;
use meower::handler::{parse_methods, read_module_path, HandlerGenerator, HANDLER_METHODS};
use meower::renderer::MiniJinjaRenderer;
use meower::validation::Rule;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project(go_mod: &str, module: &str) -> TempDir {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(MARKER_FILE_NAME), "meowed").unwrap();
    let go_mod = root.path().join(go_mod);
    fs::create_dir_all(go_mod.parent().unwrap()).unwrap();
    fs::write(go_mod, format!("module {module}\n\ngo 1.22\n")).unwrap();
    root
}

fn all_methods() -> Vec<String> {
    HANDLER_METHODS.iter().map(|m| m.to_string()).collect()
}

fn read(root: &Path, relative: &Path) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn test_parse_methods() {
    assert_eq!(parse_methods(&["get", "LIST", "Get"]).unwrap(), vec!["Get", "List"]);
    assert_eq!(parse_methods(&[" create "]).unwrap(), vec!["Create"]);

    match parse_methods(&["Get", "Patch"]).unwrap_err() {
        Error::UnknownMethodError { method, expected } => {
            assert_eq!(method, "Patch");
            assert_eq!(expected, "Create, Get, Update, Delete, List");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(parse_methods::<&str>(&[]).is_err());
}

#[test]
fn test_read_module_path() {
    let root = project("go.mod", "github.com/user/blog-app");
    assert_eq!(read_module_path(root.path()).unwrap(), "github.com/user/blog-app");

    let root = project("api/go.mod", "github.com/acme/shop/api");
    assert_eq!(read_module_path(root.path()).unwrap(), "github.com/acme/shop");

    let empty = TempDir::new().unwrap();
    assert!(matches!(read_module_path(empty.path()), Err(Error::ModulePathError { .. })));
}

#[test_log::test]
fn test_generate_all_methods() {
    let root = project("go.mod", "github.com/user/blog-app");
    let settings = Settings::default();
    let renderer = MiniJinjaRenderer::new();

    let generator =
        HandlerGenerator::new(&settings, &renderer, root.path(), "PostService", &all_methods()).unwrap();
    let generated = generator.generate().unwrap();

    assert_eq!(generated.proto, Path::new("api/proto/postservice/v1/postservice.proto"));
    assert_eq!(generated.server, Path::new("api/server/handlers/postservice.go"));
    assert_eq!(generated.web, Path::new("web/handlers/postservice.go"));

    let proto = read(root.path(), &generated.proto);
    assert!(proto.contains("package postservice.v1;"));
    assert!(proto.contains("option go_package = \"github.com/user/blog-app/api/proto/postservice/v1\";"));
    assert!(proto.contains("service PostService {"));
    assert!(proto.contains("  rpc CreatePost(CreatePostRequest) returns (CreatePostResponse) {}"));
    assert!(proto.contains("  rpc ListPost(ListPostRequest) returns (ListPostResponse) {}"));
    assert!(proto.contains("  repeated Post posts = 1;"));

    let server = read(root.path(), &generated.server);
    assert!(server.contains("postserviceV1 \"github.com/user/blog-app/api/proto/postservice/v1\""));
    assert!(server.contains("func NewPostServiceServer(db *pgxpool.Pool) postserviceV1.PostServiceServer {"));
    assert!(server.contains("func (s *postserviceServer) DeletePost("));
    assert!(server.contains("Posts: []*postserviceV1.Post{},"));

    let web = read(root.path(), &generated.web);
    assert!(web.contains("type PostService struct {"));
    assert!(web.contains("func (h *PostService) ListPost(c *fiber.Ctx) error {"));
    assert!(!web.contains("{{"));
}

#[test]
fn test_generate_selected_methods() {
    let root = project("go.mod", "github.com/user/blog-app");
    let settings = Settings::default();
    let renderer = MiniJinjaRenderer::new();
    let methods = vec!["get".to_string()];

    let generator = HandlerGenerator::new(&settings, &renderer, root.path(), "CategoryService", &methods).unwrap();
    assert_eq!(generator.methods(), ["Get"]);
    assert_eq!(generator.module_path(), "github.com/user/blog-app");
    let generated = generator.generate().unwrap();

    let proto = read(root.path(), &generated.proto);
    assert!(proto.contains("rpc GetCategory(GetCategoryRequest)"));
    assert!(!proto.contains("rpc ListCategory"));
    assert!(!proto.contains("rpc CreateCategory"));

    let web = read(root.path(), &generated.web);
    assert!(web.contains("func (h *CategoryService) GetCategory("));
    assert!(!web.contains("ListCategory"));
}

#[test]
fn test_requires_generated_project() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("go.mod"), "module github.com/user/app\n").unwrap();
    let settings = Settings::default();
    let renderer = MiniJinjaRenderer::new();

    let err = HandlerGenerator::new(&settings, &renderer, root.path(), "PostService", &all_methods())
        .err()
        .unwrap();
    assert!(matches!(err, Error::NotAProjectError { .. }));
    assert!(err.to_string().contains("meower new"));
}

#[test]
fn test_rejects_invalid_service_names() {
    let root = project("go.mod", "github.com/user/blog-app");
    let settings = Settings::default();
    let renderer = MiniJinjaRenderer::new();

    for (name, rule) in [("Post", Rule::Suffix), ("postService", Rule::Case), ("Service", Rule::Length)] {
        match HandlerGenerator::new(&settings, &renderer, root.path(), name, &all_methods()).err() {
            Some(Error::ValidationError(e)) => assert_eq!(e.rule, rule, "{name}"),
            other => panic!("expected a validation error for {name}, got {other:?}"),
        }
    }
    assert!(!root.path().join("api").exists());
}

#[test]
fn test_rejects_invalid_module_path_in_go_mod() {
    let root = project("go.mod", "github.com/user/blog_app");
    let settings = Settings::default();
    let renderer = MiniJinjaRenderer::new();

    match HandlerGenerator::new(&settings, &renderer, root.path(), "PostService", &all_methods()).err() {
        Some(Error::ValidationError(e)) => {
            assert_eq!(e.field, "module path");
            assert_eq!(e.value, "github.com/user/blog_app");
            assert_eq!(e.rule, Rule::Charset);
        }
        other => panic!("expected a module path validation error, got {other:?}"),
    }
}

#[test]
fn test_web_handler_without_read_methods_has_no_imports() {
    let root = project("go.mod", "github.com/user/blog-app");
    let settings = Settings::default();
    let renderer = MiniJinjaRenderer::new();
    let methods = vec!["Create".to_string(), "Delete".to_string()];

    let generated = HandlerGenerator::new(&settings, &renderer, root.path(), "TagService", &methods)
        .unwrap()
        .generate()
        .unwrap();

    let web = read(root.path(), &generated.web);
    assert!(web.starts_with("package handlers\n\ntype TagService struct {"));
    assert!(!web.contains("import"));
}

#[test]
fn test_server_handler_imports_follow_methods() {
    let root = project("go.mod", "github.com/user/blog-app");
    let settings = Settings::default();
    let renderer = MiniJinjaRenderer::new();

    let methods = vec!["Delete".to_string(), "List".to_string()];
    let generated = HandlerGenerator::new(&settings, &renderer, root.path(), "TagService", &methods)
        .unwrap()
        .generate()
        .unwrap();
    assert!(!read(root.path(), &generated.server).contains("timestamppb"));

    let generated = HandlerGenerator::new(&settings, &renderer, root.path(), "TagService", &all_methods())
        .unwrap()
        .generate()
        .unwrap();
    let server = read(root.path(), &generated.server);
    assert!(server.contains("\t\"google.golang.org/protobuf/types/known/timestamppb\"\n)"));
    assert!(server.contains("CreatedAt: timestamppb.Now(),"));
}
