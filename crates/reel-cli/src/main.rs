//! # Reel CLI
//!
//! Host for the shipped compositions: lists them, evaluates single frames,
//! and renders frame ranges as JSON lines for an external encoder.
//!
//! ## Commands
//! - `list`: Show every composition with its size, frame rate and duration
//! - `frame`: Print the visual tree of one frame
//! - `render`: Render a frame range, in parallel, to a file or stdout
//!
//! Design tokens and copy can be overridden with `--tokens`, and extra
//! timelines assembled from the catalog with one or more `--plan` files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reel_core::{
    build_timeline, render_to_sink, Frame, JsonLinesSink, SceneRegistry, TimelinePlan,
};
use reel_scenes::DesignTokens;
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reel")]
#[command(about = "Frame-deterministic motion graphics renderer")]
#[command(version)]
struct Cli {
    /// Design tokens JSON (brand colors, exam cards, copy)
    #[arg(long, global = true)]
    tokens: Option<PathBuf>,

    /// Timeline plan JSON to register alongside the catalog (repeatable)
    #[arg(long, global = true)]
    plan: Vec<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available compositions
    List {
        /// Print the composition metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the visual tree of a single frame as JSON
    Frame {
        /// Composition id
        id: String,

        /// Frame number
        frame: Frame,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Render a range of frames as JSON lines
    Render {
        /// Composition id
        id: String,

        /// First frame (inclusive)
        #[arg(long, default_value = "0")]
        start: Frame,

        /// Last frame (exclusive). Defaults to the composition's duration.
        #[arg(long)]
        end: Option<Frame>,

        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Frames rendered per parallel batch
        #[arg(long, default_value = "32")]
        chunk: usize,

        /// Worker threads (defaults to one per core)
        #[arg(long)]
        threads: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let registry = load_registry(cli.tokens.as_deref(), &cli.plan)?;

    match cli.command {
        Commands::List { json } => cmd_list(&registry, json),
        Commands::Frame { id, frame, pretty } => cmd_frame(&registry, &id, frame, pretty),
        Commands::Render {
            id,
            start,
            end,
            output,
            chunk,
            threads,
        } => cmd_render(&registry, &id, start, end, output.as_deref(), chunk, threads),
    }
}

/// Logs go to stderr so stdout stays clean for frame output.
fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("reel=info,reel_core=info,reel_scenes=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_registry(tokens: Option<&Path>, plans: &[PathBuf]) -> Result<SceneRegistry> {
    let tokens = match tokens {
        Some(path) => DesignTokens::load(path)?,
        None => DesignTokens::default(),
    };
    let mut registry = reel_scenes::registry(&tokens).context("Failed to build scene catalog")?;

    for path in plans {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan: {}", path.display()))?;
        let plan = TimelinePlan::from_json(&json)
            .with_context(|| format!("Invalid plan in {}", path.display()))?;
        let timeline = build_timeline(&plan, &registry)
            .with_context(|| format!("Failed to build timeline '{}'", plan.id))?;
        registry.register(Arc::new(timeline))?;
    }
    Ok(registry)
}

fn cmd_list(registry: &SceneRegistry, json: bool) -> Result<()> {
    let compositions = registry.list();
    if json {
        println!("{}", serde_json::to_string_pretty(&compositions)?);
        return Ok(());
    }

    println!("Compositions:");
    println!("=============");
    for meta in compositions {
        println!(
            "  • {} - {}x{} @ {} fps, {} frames ({:.1}s)",
            meta.id,
            meta.width,
            meta.height,
            meta.fps,
            meta.duration_in_frames,
            meta.duration_secs()
        );
    }
    Ok(())
}

fn cmd_frame(registry: &SceneRegistry, id: &str, frame: Frame, pretty: bool) -> Result<()> {
    let scene = registry.get(id)?;
    let range = scene.meta().frames();
    if !range.contains(&frame) {
        tracing::warn!(
            id,
            frame,
            duration = range.end,
            "frame lies outside the composition"
        );
    }

    let tree = scene.render(frame);
    let json = if pretty {
        serde_json::to_string_pretty(&tree)?
    } else {
        serde_json::to_string(&tree)?
    };
    println!("{json}");
    Ok(())
}

fn cmd_render(
    registry: &SceneRegistry,
    id: &str,
    start: Frame,
    end: Option<Frame>,
    output: Option<&Path>,
    chunk: usize,
    threads: Option<usize>,
) -> Result<()> {
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure render threads")?;
    }

    let scene = registry.get(id)?;
    let end = end.unwrap_or(scene.meta().duration_in_frames as Frame);

    let written = match output {
        Some(path) => {
            let mut sink = JsonLinesSink::create(path)?;
            render_to_sink(scene.as_ref(), start..end, &mut sink, chunk)?
        }
        None => {
            let mut sink = JsonLinesSink::new(BufWriter::new(io::stdout().lock()));
            render_to_sink(scene.as_ref(), start..end, &mut sink, chunk)?
        }
    };

    tracing::info!(id, frames = written, "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_arguments() {
        let cli = Cli::parse_from([
            "reel",
            "--plan",
            "a.json",
            "--plan",
            "b.json",
            "render",
            "Scene3-ExamCards",
            "--start",
            "10",
            "--end",
            "20",
            "--threads",
            "2",
        ]);
        assert_eq!(cli.plan.len(), 2);
        match cli.command {
            Commands::Render {
                id,
                start,
                end,
                chunk,
                threads,
                output,
            } => {
                assert_eq!(id, "Scene3-ExamCards");
                assert_eq!((start, end, chunk, threads), (10, Some(20), 32, Some(2)));
                assert!(output.is_none());
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn default_registry_has_catalog() {
        let registry = load_registry(None, &[]).unwrap();
        assert!(registry.contains("EP4-Scene3and4"));
    }

    #[test]
    fn plans_are_registered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teaser.json");
        fs::write(
            &path,
            r#"{"id":"teaser","width":1080,"height":1920,"fps":30,
                "entries":[{"scene":"Scene4-BrandOutro","duration":60}]}"#,
        )
        .unwrap();

        let registry = load_registry(None, &[path]).unwrap();
        assert_eq!(registry.get("teaser").unwrap().meta().duration_in_frames, 60);
    }
}
