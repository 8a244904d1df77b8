//! Flowpack CLI - lay out scene files with the flow row packer.

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod scene;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use flowpack_core::{HeightMode, Size, Slot};
use flowpack_layout::{FlowLayout, Layout};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::scene::{Scene, SceneError};

#[derive(Parser)]
#[command(name = "flowpack")]
#[command(about = "Pack fixed-size items into rows")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG applies otherwise
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a scene and print every placement
    Layout {
        /// Scene file (.json, .yaml or .yml)
        scene: PathBuf,

        /// Override the container width
        #[arg(short, long)]
        width: Option<i32>,

        /// Reorder items to use fewer rows
        #[arg(short, long)]
        compress: bool,

        /// Spread leftover width of full rows as spacers
        #[arg(short, long)]
        align: bool,

        /// Keep only the first K rows
        #[arg(short, long, value_name = "K")]
        rows: Option<usize>,

        /// Size zero-width items as 1/N of the content width
        #[arg(long, value_name = "N")]
        columns: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Report the container size for a scene
    Measure {
        /// Scene file (.json, .yaml or .yml)
        scene: PathBuf,

        /// Override the container width
        #[arg(short, long)]
        width: Option<i32>,

        /// Fix the height instead of following the content
        #[arg(long)]
        height: Option<i32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Passes requested on the command line.
#[derive(Debug, Clone, Copy, Default)]
struct Passes {
    compress: bool,
    align: bool,
    rows: Option<usize>,
    columns: Option<u32>,
}

#[derive(Serialize)]
struct Report<'a> {
    size: Size,
    layout: &'a Layout,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::from_default_env(),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), SceneError> {
    match command {
        Commands::Layout {
            scene,
            width,
            compress,
            align,
            rows,
            columns,
            format,
        } => {
            let passes = Passes {
                compress,
                align,
                rows,
                columns,
            };
            let output = layout_scene(&scene, width, passes, format)?;
            print!("{output}");
        }
        Commands::Measure {
            scene,
            width,
            height,
        } => {
            let size = measure_scene(&scene, width, height)?;
            println!("{}x{}", size.width, size.height);
        }
    }
    Ok(())
}

fn load(path: &Path, width: Option<i32>) -> Result<(FlowLayout, i32), SceneError> {
    let scene = Scene::load(path)?;
    let width = width.unwrap_or(scene.width);
    Ok((scene.into_flow(), width))
}

fn layout_scene(
    path: &Path,
    width: Option<i32>,
    passes: Passes,
    format: OutputFormat,
) -> Result<String, SceneError> {
    let (mut flow, width) = load(path, width)?;
    apply_passes(&mut flow, width, passes);

    let layout = flow.layout(width);
    let size = flow.measure(width, HeightMode::Wrap);
    info!(
        rows = layout.row_count(),
        width,
        height = size.height,
        "laid out scene"
    );

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&Report {
            size,
            layout: &layout,
        })? + "\n"),
        OutputFormat::Text => Ok(render_text(&layout, size)),
    }
}

fn apply_passes(flow: &mut FlowLayout, width: i32, passes: Passes) {
    if let Some(columns) = passes.columns {
        flow.set_number_of_columns(columns);
    }
    match (passes.compress, passes.align) {
        (true, true) => flow.compress_and_align(width),
        (true, false) => flow.compress(width),
        (false, true) => flow.align(width),
        (false, false) => {}
    }
    if let Some(rows) = passes.rows {
        flow.keep_rows(width, rows);
    }
}

fn measure_scene(path: &Path, width: Option<i32>, height: Option<i32>) -> Result<Size, SceneError> {
    let (mut flow, width) = load(path, width)?;
    let mode = height.map_or(HeightMode::Wrap, HeightMode::Exact);
    Ok(flow.measure(width, mode))
}

fn render_text(layout: &Layout, size: Size) -> String {
    let mut out = format!(
        "container {}x{}, {} rows\n",
        size.width,
        size.height,
        layout.row_count()
    );
    for row in &layout.rows {
        out.push_str(&format!(
            "row {} (y={}, used {}, height {})\n",
            row.index, row.y, row.used_width, row.height
        ));
        for placement in &row.placements {
            let rect = placement.rect();
            match placement.slot {
                Slot::Item(item) => out.push_str(&format!(
                    "  {:<6} x={:<5} y={:<5} {}x{}\n",
                    item.id.to_string(),
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height
                )),
                Slot::Blank(blank) => {
                    out.push_str(&format!("  blank  x={:<5} w={}\n", rect.x, blank.width));
                }
            }
        }
    }
    out
}
