//! Meower's main application entry point.
//! Parses the command line, sets up logging and dispatches to the
//! generators.

use meower::{
    check::{default_vocabulary, into_result, scan_placeholders},
    cli::{get_args, Args, Commands, CreateCommand, HandlerArgs, NewArgs},
    config::Settings,
    error::{default_error_handler, Result},
    generator::{ProjectConfig, ProjectGenerator},
    handler::HandlerGenerator,
    ignore::PathFilter,
    loader::{LocalSource, SourceTree},
    renderer::MiniJinjaRenderer,
    validation::Validator,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    env_logger::Builder::new()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn })
        .parse_default_env()
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let settings = Settings::default();
    match args.command {
        Commands::New(new_args) => new_project(&settings, new_args),
        Commands::Create(CreateCommand::Handler(handler_args)) => create_handler(&settings, handler_args),
        Commands::Check { path } => {
            let path = path.unwrap_or_else(|| LocalSource::checkout().root().join(&settings.template_root));
            check_templates(&settings, &LocalSource::new(path))
        }
    }
}

fn new_project(settings: &Settings, args: NewArgs) -> Result<()> {
    let validator = Validator::default();
    let config = ProjectConfig::new(args.project_name)
        .with_module_path(args.module.unwrap_or_default())
        .with_force(args.force)
        .with_parent_dir(args.directory);

    ProjectGenerator::new(settings, &validator, config).generate()?;
    Ok(())
}

fn create_handler(settings: &Settings, args: HandlerArgs) -> Result<()> {
    let renderer = MiniJinjaRenderer::new();
    let generator =
        HandlerGenerator::new(settings, &renderer, &args.directory, &args.service_name, &args.methods)?;
    let generated = generator.generate()?;

    println!("Generated {} ({}):", generator.service().name(), generator.methods().join(", "));
    for path in [&generated.proto, &generated.server, &generated.web] {
        println!("  {}", path.display());
    }
    println!();
    println!("Next steps:");
    println!("  make proto");
    println!("  Register the service in api/server/server.go");
    println!("  Add routes for the web handler in web/routing/routing.go");
    Ok(())
}

// `source` is rooted at the template tree itself.
fn check_templates(settings: &Settings, source: &dyn SourceTree) -> Result<()> {
    let filter = PathFilter::new(&settings.filter, "")?;
    let issues = scan_placeholders(source, &filter, &default_vocabulary())?;
    if issues.is_empty() {
        println!("No unknown placeholders in {}.", source.name());
    }
    into_result(issues)
}
