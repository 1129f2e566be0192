//! Command-line interface implementation for Meower.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for Meower.
#[derive(Parser, Debug)]
#[command(author, version, about = "Meower: scaffold Go gRPC and web projects", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project
    New(NewArgs),

    /// Add a component to an existing project
    #[command(subcommand)]
    Create(CreateCommand),

    /// Report unknown TEMPLATE_ placeholders in a template tree
    Check {
        /// Template tree to scan. Defaults to the template/ directory of the meower checkout
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct NewArgs {
    /// Project name: lowercase letters, digits and hyphens
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: String,

    /// Go module path (default: github.com/user/<project-name>)
    #[arg(short, long, value_name = "MODULE")]
    pub module: Option<String>,

    /// Overwrite the project directory if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// Directory in which the project directory is created
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum CreateCommand {
    /// Generate a gRPC service, its server implementation and a web handler
    Handler(HandlerArgs),
}

#[derive(ClapArgs, Debug)]
pub struct HandlerArgs {
    /// Service name in PascalCase, ending with "Service" (e.g. PostService)
    #[arg(value_name = "SERVICE_NAME")]
    pub service_name: String,

    /// Comma-separated methods to generate
    #[arg(
        long,
        value_delimiter = ',',
        value_name = "METHODS",
        default_value = "Create,Get,Update,Delete,List"
    )]
    pub methods: Vec<String>,

    /// Project root
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub directory: PathBuf,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let mut command = Args::command().help_template(
                    r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                );
                if let Err(print_err) = command.print_help() {
                    eprintln!("{print_err}");
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_methods_are_comma_delimited() {
        let args = Args::parse_from(["meower", "create", "handler", "PostService", "--methods", "get,List"]);
        let Commands::Create(CreateCommand::Handler(handler)) = args.command else {
            panic!("expected create handler");
        };
        assert_eq!(handler.methods, vec!["get", "List"]);
        assert_eq!(handler.directory, PathBuf::from("."));
    }

    #[test]
    fn test_check_path_help_names_checkout() {
        let command = Args::command();
        let check = command.find_subcommand("check").unwrap();
        let path = check.get_arguments().find(|arg| arg.get_id() == "path").unwrap();
        let help = path.get_help().unwrap().to_string();
        assert!(help.contains("checkout"), "{help}");
        assert!(!help.contains("bundled"), "{help}");
    }
}
