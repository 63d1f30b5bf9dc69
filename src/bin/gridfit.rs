use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gridfit", version)]
struct Cli {
    /// Log more (repeat for trace output). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out every item of a grid document and print offsets and container height.
    Layout(LayoutArgs),
    /// Replay filter/search/sort/shuffle state and print the full placement plan.
    Arrange(ArrangeArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input grid JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Override the document layout (packed, horizontal, vertical, sameHeight, sameWidth,
    /// sameSize).
    #[arg(long)]
    layout: Option<gridfit::LayoutKind>,

    /// Override the container width.
    #[arg(long)]
    width: Option<f64>,

    /// Override the column count for sameWidth / sameSize.
    #[arg(long)]
    columns: Option<usize>,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ArrangeArgs {
    /// Input grid JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Arrange(args) => cmd_arrange(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let mut doc = gridfit::GridDoc::from_path(&args.in_path)?;
    if let Some(layout) = args.layout {
        doc.layout = layout;
    }
    if let Some(width) = args.width {
        doc.container_width = width;
    }
    if args.columns.is_some() {
        doc.columns = args.columns;
    }
    doc.validate()?;

    let result = gridfit::compute_layout_with(
        doc.layout,
        &doc.sizes(),
        doc.container_width,
        &doc.layout_options(),
    )?;
    write_json(args.out.as_deref(), &result)
}

fn cmd_arrange(args: ArrangeArgs) -> anyhow::Result<()> {
    let doc = gridfit::GridDoc::from_path(&args.in_path)?;
    let plan = doc.into_gallery()?.arrange()?;
    write_json(args.out.as_deref(), &plan)
}

fn write_json<T: serde::Serialize>(out: Option<&Path>, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize result")?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("write json '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write stdout")?;
        }
    }
    Ok(())
}
