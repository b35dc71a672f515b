//! go-scaffold - interactive scaffolding for opinionated Go projects

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use go_scaffold_core::runtime::check_toolchain;
use go_scaffold_core::templates::Catalog;
use go_scaffold_core::tui::{self, TuiOutcome};
use go_scaffold_core::{Configuration, GoToolchain, Navigator, Toolchain};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const USAGE: [&str; 2] = [
    "go-scaffold:                will create a new project in $PWD",
    "go-scaffold <project-name>: will create a new project in $PWD/<project-name>",
];

#[derive(Parser, Debug)]
#[command(name = "go-scaffold")]
#[command(about = "Interactive scaffolding for opinionated Go projects")]
#[command(version)]
pub struct Args {
    /// Project directory to create (defaults to the current directory)
    pub target: Option<PathBuf>,

    /// Local directory to use for templates instead of the embedded ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Write logs to this file; RUST_LOG overrides the default filter
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn wants_usage(&self) -> bool {
        matches!(
            self.target.as_deref().and_then(Path::to_str),
            Some("help" | "h")
        )
    }
}

/// Logs go to a file only; the terminal belongs to the TUI
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("go_scaffold=info,go_scaffold_core=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .init();
    Ok(())
}

fn install_terminal_guards() {
    // Ensure terminal is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = tui::restore_terminal();
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C delivered as a signal (outside raw mode)
    ctrlc::set_handler(move || {
        let _ = tui::restore_terminal();
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();
}

/// Create the target directory, or use the current one
fn resolve_project_dir(target: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;
    match target {
        Some(target) => {
            let dir = cwd.join(target);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            Ok(dir)
        }
        None => Ok(cwd),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    install_terminal_guards();
    let args = Args::parse();

    if args.wants_usage() {
        for line in USAGE {
            println!("{}", line);
        }
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }

    let toolchain = GoToolchain;
    let project_dir = resolve_project_dir(args.target.as_deref())?;
    toolchain.ensure_fresh(&project_dir)?;

    let runtime = check_toolchain(&toolchain);
    if let Some(warning) = runtime.advisory(toolchain.docs_url()) {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }
    tracing::info!(
        dir = %project_dir.display(),
        toolchain = ?runtime.version,
        "starting wizard"
    );

    let catalog = match &args.template_dir {
        Some(dir) => Catalog::local(dir)
            .with_context(|| format!("failed to load templates from {}", dir.display()))?,
        None => Catalog::embedded().context("failed to load the embedded templates")?,
    };

    let navigator = Navigator::new(Configuration::new(&project_dir), catalog);
    let outcome = tui::run(navigator, toolchain, project_dir.clone()).await?;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match outcome {
        TuiOutcome::Cancelled => {
            println!("Setup cancelled.");
            Ok(ExitCode::SUCCESS)
        }
        // the build task is still running; leaving main would wait for it
        TuiOutcome::Abandoned => std::process::exit(0),
        TuiOutcome::Built { config, report } => {
            print_report(&toolchain, &project_dir, &config, &report);
            Ok(ExitCode::SUCCESS)
        }
        TuiOutcome::Failed(e) => {
            eprintln!("{} {}", "Build failed:".red().bold(), e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_report(
    toolchain: &GoToolchain,
    project_dir: &Path,
    config: &Configuration,
    report: &go_scaffold_core::BuildReport,
) {
    println!("\n{} Project created successfully!\n", "✓".green().bold());
    println!("  {} files written to {}", report.files.len(), project_dir.display());
    if report.vendored {
        println!("  dependencies vendored");
    }
    if !report.failed_dependencies.is_empty() {
        println!(
            "  {} could not fetch: {}",
            "!".yellow().bold(),
            report.failed_dependencies.join(", ")
        );
    }

    println!("\nNext steps:");
    for (i, step) in toolchain.next_steps(project_dir, config).iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();
}
