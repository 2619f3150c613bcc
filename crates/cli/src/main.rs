#![deny(unsafe_code)]
//! CLI binary for the meadow grass-field animation.
//!
//! Subcommands:
//! - `render` — run the simulation N frames, write the final frame as PNG
//! - `stats` — run headless and print scene statistics

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use meadow_grass::{Scene, SceneSettings};
use meadow_raster::RasterCanvas;
use std::path::PathBuf;
use std::process;

/// Synthetic frame clock: the simulation is frame-driven, so the CLI feeds
/// it a fixed 60 Hz timeline instead of wall time.
const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

#[derive(Parser)]
#[command(name = "meadow", about = "Grass-field wind animation")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct SimArgs {
    /// Viewport width in pixels.
    #[arg(short = 'W', long, default_value_t = 1000)]
    width: usize,

    /// Viewport height in pixels.
    #[arg(short = 'H', long, default_value_t = 600)]
    height: usize,

    /// Number of animation frames to run.
    #[arg(short, long, default_value_t = 300)]
    frames: usize,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Scene settings as a JSON object
    /// (num_blades, resolution, width, wind, show_skeleton, show_fill).
    #[arg(long, default_value = "{}")]
    params: String,

    /// Inject a gust at this position before the first frame.
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    gust: Option<Vec<f64>>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation and write the final frame as a PNG.
    Render {
        #[command(flatten)]
        sim: SimArgs,

        /// Output file path.
        #[arg(short, long, default_value = "meadow.png")]
        output: PathBuf,
    },
    /// Run the simulation headless and print scene statistics.
    Stats {
        #[command(flatten)]
        sim: SimArgs,
    },
}

/// Builds a running scene from the shared simulation arguments and advances
/// it `frames` ticks on the synthetic clock.
fn run_simulation(sim: &SimArgs) -> Result<Scene, CliError> {
    let params: serde_json::Value = serde_json::from_str(&sim.params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let settings = SceneSettings::from_json(&params);

    let mut scene = Scene::new(sim.width as f64, sim.height as f64, sim.seed, settings)?;
    scene.init();
    scene.start();

    if let Some(gust) = &sim.gust {
        scene.inject_gust(gust[0], gust[1], None, None, None);
    }

    for frame in 0..sim.frames {
        scene.advance(frame as f64 * FRAME_INTERVAL_MS);
    }
    Ok(scene)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render { sim, output } => {
            let mut scene = run_simulation(&sim)?;
            let mut canvas = RasterCanvas::new(sim.width, sim.height);
            scene.render(&mut canvas);
            meadow_raster::snapshot::write_png(&canvas, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": sim.width,
                    "height": sim.height,
                    "frames": sim.frames,
                    "seed": sim.seed,
                    "blades": scene.blade_count(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} blades ({}x{}, {} frames, seed {}) -> {}",
                    scene.blade_count(),
                    sim.width,
                    sim.height,
                    sim.frames,
                    sim.seed,
                    output.display()
                );
            }
        }
        Command::Stats { sim } => {
            let scene = run_simulation(&sim)?;
            let stats = scene.stats();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("blades:       {}", stats.blade_count);
                println!("wind:         {:.2} (strength {})", stats.wind.base_wind, stats.wind.strength);
                println!("active gusts: {}", stats.wind.active_gusts);
                println!(
                    "pool:         {}/{} in use ({} fallback)",
                    stats.pool.in_use, stats.pool.total, stats.pool.fallback_allocations
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
