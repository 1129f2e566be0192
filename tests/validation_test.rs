use meower::validation::{Rule, Validator};

#[test]
fn test_valid_project_names() {
    let validator = Validator::default();
    for name in ["my-app", "blog-app", "app2", "a1", "x-y-z", "2fa-service"] {
        assert!(validator.validate_project_name(name).is_ok(), "{name} should be valid");
    }
}

#[test]
fn test_invalid_project_names_name_the_rule() {
    let validator = Validator::default();
    let cases = [
        ("", Rule::Required),
        ("a", Rule::Length),
        ("MyApp", Rule::Charset),
        ("my_app", Rule::Charset),
        ("-app", Rule::Format),
        ("app-", Rule::Format),
        ("my--app", Rule::Format),
    ];
    for (name, rule) in cases {
        let err = validator.validate_project_name(name).unwrap_err();
        assert_eq!(err.rule, rule, "unexpected rule for '{name}'");
        assert_eq!(err.field, "project name");
        assert_eq!(err.value, name);
    }

    let too_long = "a".repeat(51);
    assert_eq!(validator.validate_project_name(&too_long).unwrap_err().rule, Rule::Length);
    assert!(validator.validate_project_name(&"a".repeat(50)).is_ok());
}

#[test]
fn test_validation_error_display() {
    let err = Validator::default().validate_project_name("my--app").unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation failed for project name 'my--app' (format): project name cannot contain consecutive hyphens"
    );
}

#[test]
fn test_module_paths() {
    let validator = Validator::default();
    assert!(validator.validate_module_path("github.com/user/blog-app").is_ok());
    assert!(validator.validate_module_path("example.com/x").is_ok());

    let cases = [
        ("", Rule::Required),
        ("https://github.com/user/app", Rule::Format),
        ("github.com//app", Rule::Format),
        ("github.com/user/", Rule::Format),
        ("github.com/user name", Rule::Charset),
        ("github.com/user/my_app", Rule::Charset),
    ];
    for (path, rule) in cases {
        assert_eq!(validator.validate_module_path(path).unwrap_err().rule, rule, "{path}");
    }
}

#[test]
fn test_service_names_default_validator() {
    let validator = Validator::default();
    assert!(validator.validate_service_name("Post").is_ok());
    assert!(validator.validate_service_name("UserService").is_ok());

    assert_eq!(validator.validate_service_name("").unwrap_err().rule, Rule::Required);
    assert_eq!(validator.validate_service_name("post").unwrap_err().rule, Rule::Case);
    assert_eq!(validator.validate_service_name("User_Service").unwrap_err().rule, Rule::Charset);
    assert_eq!(validator.validate_service_name("P").unwrap_err().rule, Rule::Length);
    assert_eq!(validator.validate_service_name("Handler").unwrap_err().rule, Rule::Reserved);
}

#[test]
fn test_service_names_strict_validator() {
    let validator = Validator::strict();
    assert!(validator.validate_service_name("PostService").is_ok());
    assert!(validator.validate_service_name("XService").is_ok());

    assert_eq!(validator.validate_service_name("Post").unwrap_err().rule, Rule::Suffix);
    assert_eq!(validator.validate_service_name("Service").unwrap_err().rule, Rule::Length);
}

#[test]
fn test_custom_reserved_words() {
    let validator = Validator::default().with_reserved_service_names(vec!["Api"]);
    assert!(validator.validate_service_name("Handler").is_ok());
    assert_eq!(validator.validate_service_name("Api").unwrap_err().rule, Rule::Reserved);
}

#[test]
fn test_model_and_api_version() {
    let validator = Validator::default();
    assert!(validator.validate_model_name("Post").is_ok());
    assert_eq!(validator.validate_model_name("post").unwrap_err().rule, Rule::Case);

    for version in ["v1", "v2", "v1beta1"] {
        assert!(validator.validate_api_version(version).is_ok(), "{version}");
    }
    assert_eq!(validator.validate_api_version("").unwrap_err().rule, Rule::Required);
    assert_eq!(validator.validate_api_version("1").unwrap_err().rule, Rule::Format);
}
