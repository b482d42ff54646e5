//! Interactive branch diagram viewer (requires `--features egui`).
//!
//! Usage:
//!   cargo run --features egui --bin branchline-viewer -- [--config layout.json] [SCRIPT]

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use branchline::command::parse_script;
use branchline::config::LayoutConfig;
use branchline::egui_app::BranchlineApp;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive branch diagram viewer", long_about = None)]
struct Args {
    /// Optional command script replayed before the window opens
    #[arg(value_name = "SCRIPT")]
    script: Option<Utf8PathBuf>,

    /// JSON file overriding layout constants
    #[arg(short = 'c', long = "config")]
    config: Option<Utf8PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let cfg = match &args.config {
        Some(path) => LayoutConfig::from_json_file(path)?,
        None => LayoutConfig::default(),
    };

    let mut app = BranchlineApp::new(cfg);
    if let Some(path) = &args.script {
        let script = std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
        for cmd in parse_script(&script).with_context(|| format!("Failed to parse {}", path))? {
            app.apply(cmd);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "branchline viewer",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}
