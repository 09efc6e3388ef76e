use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};

use rbookmark::{DocumentController, OutlineItem, Settings};

/// PDF 书签整理：折叠、修正跳转目标、标题大小写、目录注释加粗
#[derive(Parser)]
#[command(name = "rbookmark")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: $RBOOKMARK_CONFIG or <config_dir>/rbookmark/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Target {
    /// Input PDF file
    input: PathBuf,

    /// Output file (default: overwrite the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report the change count without writing the file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Collapse every bookmark.
    Collapse(Target),

    /// Rewrite every destination to XYZ with unspecified zoom.
    Fix(Target),

    /// Rewrite bookmark titles in title case.
    Capitalize(Target),

    /// Make table-of-contents text annotations bold.
    #[command(name = "fix-annots")]
    FixAnnots(Target),

    /// Print the outline.
    List {
        /// Input PDF file
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(
        Env::default().default_filter_or(level), // RUST_LOG 优先
    )
    .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut controller = DocumentController::new(settings)?;

    let (target, report) = match cli.command {
        Commands::List { input } => {
            controller.open(&input)?;
            let items = controller.outline_items().unwrap_or_default();
            print_outline(&items);
            return Ok(());
        }
        Commands::Collapse(target) => {
            controller.open(&target.input)?;
            let report = controller.collapse_all();
            (target, report)
        }
        Commands::Fix(target) => {
            controller.open(&target.input)?;
            let report = controller.fix_destinations();
            (target, report)
        }
        Commands::Capitalize(target) => {
            controller.open(&target.input)?;
            let report = controller.capitalize_all();
            (target, report)
        }
        Commands::FixAnnots(target) => {
            controller.open(&target.input)?;
            let report = controller.fix_annotations();
            (target, report)
        }
    };

    let report = report.context("No active document")?;
    println!("{}", report);

    if target.dry_run {
        info!("Dry run, {} not written", target.input.display());
        return Ok(());
    }
    let saved = controller.save(target.output.as_deref())?;
    info!("Saved {}", saved.display());
    Ok(())
}

fn print_outline(items: &[OutlineItem]) {
    for item in items {
        let indent = "  ".repeat(item.level.saturating_sub(1));
        let target = match (item.page, item.fit) {
            (Some(page), Some(fit)) => format!("p. {} {}", page + 1, fit),
            _ => "-".to_string(),
        };
        let open = if item.open { " [open]" } else { "" };
        let bold = if item.is_bold() { " [bold]" } else { "" };
        let italic = if item.is_italic() { " [italic]" } else { "" };
        println!("{}{} ({}){}{}{}", indent, item.title, target, open, bold, italic);
    }
}
