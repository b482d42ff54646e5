use std::io::Read;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use branchline::command::parse_script;
use branchline::config::LayoutConfig;
use branchline::engine::Engine;
use branchline::surface::{RecordingSurface, Surface};
use branchline::svg::save_svg;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a branch diagram command script", long_about = None)]
struct Cli {
    /// Command script, one command per line (stdin if omitted)
    #[arg(value_name = "SCRIPT")]
    script: Option<Utf8PathBuf>,

    /// JSON file overriding layout constants
    #[arg(short = 'c', long = "config")]
    config: Option<Utf8PathBuf>,

    /// Write the final drawing as SVG
    #[arg(long = "svg", value_name = "FILE")]
    svg: Option<Utf8PathBuf>,

    /// Outline the selected subject before exporting
    #[arg(long = "highlight")]
    highlight: bool,

    /// Print a full JSON snapshot instead of a summary line
    #[arg(long = "json")]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => LayoutConfig::from_json_file(path)?,
        None => LayoutConfig::default(),
    };

    let script = match &cli.script {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Read script from stdin")?;
            buf
        }
    };
    let commands = parse_script(&script).context("Failed to parse script")?;

    let surface = RecordingSurface::new(cfg.initial_width, cfg.initial_height);
    let mut engine = Engine::new(cfg, surface);
    for cmd in &commands {
        engine.apply(cmd);
    }
    if cli.highlight {
        engine.highlight_selection();
    }

    if let Some(path) = &cli.svg {
        save_svg(engine.surface(), path)?;
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&engine.snapshot())?;
        println!("{}", json);
    } else {
        let state = engine.state();
        let stats = engine.stats();
        println!(
            "{} subjects, {} steps, {} extensions, surface {}x{}, {} rebuilds",
            state.subject_count(),
            state.total_steps(),
            state.total_extensions(),
            engine.surface().width(),
            engine.surface().height(),
            stats.rebuilds
        );
    }
    Ok(())
}
