use std::io;

use meower::error::Error;
use meower::generator::Stage;
use meower::validation::Validator;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }

    let validation = Validator::default().validate_project_name("").unwrap_err();
    let err: Error = validation.into();
    assert!(matches!(err, Error::ValidationError(_)));
}

#[test]
fn test_error_display() {
    let err = Error::OutputDirectoryExistsError { output_dir: "blog-app".to_string() };
    assert_eq!(err.to_string(), "Directory 'blog-app' already exists. Use --force to overwrite it.");

    let err = Error::UnknownMethodError { method: "Patch".to_string(), expected: "Get, List".to_string() };
    assert_eq!(err.to_string(), "'Patch' is not a supported handler method (expected one of: Get, List).");

    let err: Error = Validator::default().validate_project_name("").unwrap_err().into();
    assert_eq!(
        err.to_string(),
        "validation failed for project name '' (required): project name cannot be empty"
    );
}

#[test]
fn test_stage_wrapping() {
    let err = Error::OutputDirectoryExistsError { output_dir: "blog-app".to_string() }.in_stage(Stage::Validate);
    assert_eq!(
        err.to_string(),
        "Failed to validate configuration: Directory 'blog-app' already exists. Use --force to overwrite it."
    );
    assert!(matches!(err.root(), Error::OutputDirectoryExistsError { .. }));
    assert!(std::error::Error::source(&err).is_some());
}
