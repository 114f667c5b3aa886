//! CLI Adapter.

mod interactive;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::api;
use crate::domain::{AppError, BuildMilestone, BuildType, LibraryVersion, ProjectConfig, ProjectName};
use crate::services::CommandReport;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "SFML_ME_LOG";

#[derive(Parser)]
#[command(name = "sfml-me")]
#[command(version)]
#[command(about = "Scaffold SFML projects and drive their CMake builds", long_about = None)]
struct Cli {
    /// Tool configuration file (overrides SFML_ME_CONFIG and the per-user config)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new SFML project skeleton
    #[clap(visible_alias = "n")]
    New {
        /// Project name (letters, digits, '-' and '_')
        name: String,
        /// Directory to create the project in (defaults to the current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
        /// SFML version: 2.5 or 2.6
        #[arg(long = "sfml-version", default_value = "2.6")]
        sfml_version: String,
        /// CMake build type: Debug, Release, RelWithDebInfo, MinSizeRel
        #[arg(short, long, default_value = "Release")]
        build_type: String,
        /// Write a .gitignore (appends when one already exists)
        #[arg(long)]
        gitignore: bool,
        /// Skip `git init`
        #[arg(long)]
        no_git: bool,
    },
    /// Configure and compile a project with CMake
    #[clap(visible_alias = "b")]
    Build {
        /// Project directory (defaults to the current directory)
        path: Option<PathBuf>,
        /// CMake build type (defaults to the one the project was created with)
        #[arg(short, long)]
        build_type: Option<String>,
    },
    /// Run the built executable
    #[clap(visible_alias = "r")]
    Run {
        /// Project directory (defaults to the current directory)
        path: Option<PathBuf>,
    },
    /// Initialize a git repository and commit everything in it
    #[clap(visible_alias = "g")]
    Git {
        /// Directory to initialize (defaults to the current directory)
        path: Option<PathBuf>,
        /// Commit message (defaults to the configured message)
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Open a project in the configured editor
    #[clap(visible_alias = "e")]
    Edit {
        /// Project directory (defaults to the current directory)
        path: Option<PathBuf>,
    },
    /// Interactive session with the create/build/run workflow
    #[clap(visible_alias = "s")]
    Session,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result: Result<(), AppError> = match cli.command {
        Commands::New { name, dir, sfml_version, build_type, gitignore, no_git } => {
            run_new(&name, dir, &sfml_version, &build_type, gitignore, no_git, config)
        }
        Commands::Build { path, build_type } => run_build(path, build_type.as_deref(), config),
        Commands::Run { path } => run_executable(path, config),
        Commands::Git { path, message } => run_git(path, message.as_deref(), config),
        Commands::Edit { path } => run_edit(path, config),
        Commands::Session => interactive::run_session(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_dir(path: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match path {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|err| AppError::io(".", err)),
    }
}

fn run_new(
    name: &str,
    dir: Option<PathBuf>,
    sfml_version: &str,
    build_type: &str,
    gitignore: bool,
    no_git: bool,
    config_path: Option<&Path>,
) -> Result<(), AppError> {
    let name = ProjectName::new(name)?;
    let config = ProjectConfig::new(name, resolve_dir(dir)?)?
        .with_library_version(sfml_version.parse::<LibraryVersion>()?)
        .with_build_type(build_type.parse::<BuildType>()?)
        .with_ignore_file(gitignore)
        .with_repository(!no_git);

    let layout = api::create(&config, config_path)?;
    println!("✅ Created project '{}' at {}", config.name, layout.root().display());
    Ok(())
}

fn run_build(
    path: Option<PathBuf>,
    build_type: Option<&str>,
    config_path: Option<&Path>,
) -> Result<(), AppError> {
    let build_type = build_type.map(str::parse::<BuildType>).transpose()?;
    let project_dir = resolve_dir(path)?;
    let result = api::build(&project_dir, build_type, config_path, &mut print_milestone)?;
    println!("✅ Build completed successfully ({})", result.build_type);
    Ok(())
}

fn run_executable(path: Option<PathBuf>, config_path: Option<&Path>) -> Result<(), AppError> {
    let project_dir = resolve_dir(path)?;
    let report = api::run(&project_dir, config_path)?;
    print_output(&report);
    Ok(())
}

fn run_git(
    path: Option<PathBuf>,
    message: Option<&str>,
    config_path: Option<&Path>,
) -> Result<(), AppError> {
    let dir = resolve_dir(path)?;
    api::init_repo(&dir, message, config_path)?;
    println!("✅ Git repository initialized in {}", dir.display());
    Ok(())
}

fn run_edit(path: Option<PathBuf>, config_path: Option<&Path>) -> Result<(), AppError> {
    let project_dir = resolve_dir(path)?;
    let report = api::open_in_editor(&project_dir, config_path)?;
    println!("✅ Opened {} ({})", project_dir.display(), report.command);
    Ok(())
}

pub(crate) fn print_milestone(milestone: BuildMilestone) {
    println!("[{:>3}%] {}", milestone.percent(), milestone.label());
}

pub(crate) fn print_output(report: &CommandReport) {
    if !report.output.stdout.is_empty() {
        print!("{}", report.output.stdout);
    }
    if !report.output.stderr.is_empty() {
        eprint!("{}", report.output.stderr);
    }
}
