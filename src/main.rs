mod app;
mod config;
mod domain;
mod models;
mod ui;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use gpui::{App, Application};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::EditorConfig;
use crate::ui::{FileAssets, PieceAssets};

#[derive(Parser)]
#[command(name = "board-sketch", version, about = "Sketch chess diagrams with pieces and arrows")]
struct Cli {
    /// JSON config file; defaults apply when omitted
    #[arg(long, env = "BOARD_SKETCH_CONFIG")]
    config: Option<PathBuf>,
    /// Override the directory exports are written to
    #[arg(long)]
    export_dir: Option<PathBuf>,
    /// Print the config file JSON schema and exit
    #[arg(long)]
    print_config_schema: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config_schema {
        println!("{}", EditorConfig::schema_json()?);
        return Ok(());
    }

    init_tracing();

    let mut config = EditorConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }

    // the editor is not shown until every piece image is available
    let file_assets = FileAssets::new();
    let pieces = PieceAssets::load(&file_assets).context("piece images are required to start")?;
    info!(export_dir = %config.export_dir.display(), "starting editor");

    Application::new()
        .with_assets(file_assets)
        .run(move |cx: &mut App| app::run(cx, config, pieces));
    Ok(())
}
