use anyhow::{Context, Result};
use branch_overview::areas::overview::Overview;
use branch_overview::artifacts::config::settings::Config;
use clap::{ArgAction, Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "branch-overview",
    version = "0.1.0",
    about = "Keep an Org outline of the branches of many git repositories",
    long_about = "Runs `git branch -vv` in every configured repository and merges the result \
    into an Org outline. Branches that are ahead of or behind their upstream are \
    marked TODO. Text written into the outline by hand is never removed.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(long, global = true, help = "Path to the configuration file")]
    config: Option<PathBuf>,
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "More logging on stderr, repeat for more detail"
    )]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "sync",
        about = "Update the outline from every configured repository",
        long_about = "This command collects the branches of every repository listed in the \
        configuration and merges them into the outline file."
    )]
    Sync {
        #[arg(short, long, help = "The outline file, instead of the configured one")]
        outline: Option<PathBuf>,
    },
    #[command(
        name = "branches",
        about = "Print the branches of one repository",
        long_about = "This command prints the branch listing of the repository containing \
        the given path, as it will be recorded in the outline."
    )]
    Branches {
        #[arg(index = 1, help = "A path inside the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "status",
        about = "Run the status command for a repository in the outline",
        long_about = "This command finds the repository owning the given line of the outline \
        and runs the configured status command there. Without a line, or when the line does \
        not belong to a repository, the repository path is read from stdin."
    )]
    Status {
        #[arg(short, long, help = "The outline file, instead of the configured one")]
        outline: Option<PathBuf>,
        #[arg(short, long, help = "A 1-based line number in the outline")]
        line: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    init_logging(cli.verbose, config.log_level.as_deref());
    colored::control::set_override(std::io::stdout().is_terminal());

    let overview = Overview::new(config, Box::new(std::io::stdout()));

    match &cli.command {
        Commands::Sync { outline } => {
            overview.sync(outline.as_deref())?;
        }
        Commands::Branches { path } => {
            let path = match path {
                Some(path) => path.clone(),
                None => std::env::current_dir()?,
            };

            overview.branches(&path)?;
        }
        Commands::Status { outline, line } => {
            let stdin = std::io::stdin();
            overview.status(outline.as_deref(), *line, &mut stdin.lock())?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()));
    }

    match Config::default_path() {
        Some(path) if path.exists() => Config::load(&path)
            .with_context(|| format!("failed to load configuration {}", path.display())),
        _ => Ok(Config::default()),
    }
}

/// `-v` flags win over the configured level.
fn init_logging(verbose: u8, configured: Option<&str>) {
    let level = match verbose {
        0 => configured
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}
