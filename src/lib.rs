//! Meower is a project scaffolding tool for Go gRPC and web projects.
//! It materializes a template tree into a new project, replacing placeholder
//! tokens with identifiers derived from the project name, and generates
//! service handlers inside existing projects.

/// Template placeholder check
pub mod check;

/// Command-line interface module for the Meower application
pub mod cli;

/// Process-wide settings: marker file, template layout, filter rules
pub mod config;

/// Error types and handling for the Meower application
pub mod error;

/// Project generation pipeline
pub mod generator;

/// `create handler` component generation
pub mod handler;

/// Path filtering for template trees
pub mod ignore;

/// Template source trees, embedded or on disk
pub mod loader;

/// Casing and pluralization helpers
pub mod naming;

/// Tree materialization
pub mod processor;

/// MiniJinja rendering for generated components
pub mod renderer;

/// Name validation
pub mod validation;

/// Template variables and placeholder substitution
pub mod vars;
