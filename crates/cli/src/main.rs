#![deny(unsafe_code)]
//! CLI binary for the descent-engine simulation.
//!
//! Subcommands:
//! - `run` — drive a simulation N ticks, stream its events
//! - `render` — generate a landscape, write a height-mapped PNG
//! - `list` — print available palettes and the parameter schema

mod error;

use clap::{Parser, Subcommand};
use descent_engine_core::{Palette, ResetCause, RunRecipe, SimEvent, Simulation, Splitmix64};
use descent_engine_landscape::Landscape;
use descent_engine_optim::{DescentConfig, OptimParams};
use descent_engine_runtime::{ControlSurface, DEFAULT_STRIDE};
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "descent-engine", about = "Loss-landscape descent simulation CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a simulation for N ticks and stream its events.
    Run {
        /// Number of physics ticks to advance.
        #[arg(short, long, default_value_t = 600)]
        ticks: u64,

        /// PRNG seed for the landscape, start positions, and noise.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Optimizer parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Engine thresholds as a JSON string
        /// (stuck_ticks, celebration_ticks, trail_cap, ...).
        #[arg(long, default_value = "{}")]
        config: String,

        /// Read seed/ticks/params from a recipe file instead of flags.
        #[arg(long)]
        recipe: Option<PathBuf>,
    },
    /// Generate a landscape and write a height-mapped PNG.
    Render {
        /// Image width in pixels.
        #[arg(short = 'W', long, default_value_t = 512)]
        width: usize,

        /// Image height in pixels.
        #[arg(short = 'H', long, default_value_t = 512)]
        height: usize,

        /// PRNG seed for landscape generation.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Palette name (violet, ocean, ember, mono).
        #[arg(short, long, default_value = "violet")]
        palette: String,

        /// Output file path.
        #[arg(short, long, default_value = "landscape.png")]
        output: PathBuf,
    },
    /// List available palettes and the optimizer parameter schema.
    List,
}

fn cause_label(cause: ResetCause) -> &'static str {
    match cause {
        ResetCause::Stuck => "stuck",
        ResetCause::Converged => "converged",
        ResetCause::Manual => "manual",
    }
}

fn print_event(event: &SimEvent) {
    match event {
        SimEvent::Step {
            tick,
            x,
            z,
            loss,
            dx,
            dz,
        } => println!("tick {tick:>6}  L({x:.3}, {z:.3}) = {loss:.4}  grad ({dx:.3}, {dz:.3})"),
        SimEvent::MinimumFound { tick, x, z, loss } => {
            println!("tick {tick:>6}  global minimum found at ({x:.3}, {z:.3}), loss {loss:.4}")
        }
        SimEvent::Reset { tick, cause } => {
            println!("tick {tick:>6}  reset ({})", cause_label(*cause))
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Run {
            ticks,
            seed,
            params,
            config,
            recipe,
        } => {
            let recipe = match recipe {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)
                        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
                    RunRecipe::from_json(&text)?
                }
                None => {
                    let params: serde_json::Value = serde_json::from_str(&params)
                        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
                    let recipe = RunRecipe {
                        seed,
                        ticks,
                        params,
                    };
                    recipe.validate()?;
                    recipe
                }
            };
            let config: serde_json::Value = serde_json::from_str(&config)
                .map_err(|e| CliError::Input(format!("invalid --config JSON: {e}")))?;

            let mut surface = ControlSurface::with_settings(
                recipe.seed,
                OptimParams::from_json(&recipe.params),
                DescentConfig::from_json(&config),
            )?;
            surface.toggle_run();

            let frames = recipe.ticks.saturating_mul(u64::from(DEFAULT_STRIDE));
            let mut minima = 0u64;
            let mut resets = 0u64;
            for _ in 0..frames {
                for event in surface.frame()? {
                    match event {
                        SimEvent::MinimumFound { .. } => minima += 1,
                        SimEvent::Reset { .. } => resets += 1,
                        SimEvent::Step { .. } => {}
                    }
                    if cli.json {
                        println!("{}", serde_json::to_string(&event)?);
                    } else {
                        print_event(&event);
                    }
                }
            }

            let sim = surface.simulation();
            let pos = sim.position();
            let loss = sim.landscape().loss(pos.x, pos.y);
            if cli.json {
                let summary = serde_json::json!({
                    "seed": recipe.seed,
                    "ticks": sim.tick(),
                    "x": pos.x,
                    "z": pos.y,
                    "loss": loss,
                    "minima_found": minima,
                    "resets": resets,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                eprintln!(
                    "ran {} ticks (seed {}): final L({:.3}, {:.3}) = {:.4}, {} minima, {} resets",
                    sim.tick(),
                    recipe.seed,
                    pos.x,
                    pos.y,
                    loss,
                    minima,
                    resets
                );
            }
        }
        Command::Render {
            width,
            height,
            seed,
            palette,
            output,
        } => {
            let palette =
                Palette::from_name(&palette).map_err(|e| CliError::Input(e.to_string()))?;
            let mut rng = Splitmix64::new(seed);
            let landscape = Landscape::generate(&mut rng);
            let map = landscape.sample_heightmap(width, height)?;

            descent_engine_runtime::snapshot::write_png(&map, &palette, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "seed": seed,
                    "width": width,
                    "height": height,
                    "basins": landscape.basins.len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered landscape (seed {seed}, {width}x{height}, {} basins) -> {}",
                    landscape.basins.len(),
                    output.display()
                );
            }
        }
        Command::List => {
            let palettes = Palette::list_names();
            let schema = OptimParams::schema();
            if cli.json {
                let info = serde_json::json!({
                    "palettes": palettes,
                    "params": schema,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
                println!("Optimizer params:");
                if let Some(map) = schema.as_object() {
                    for (name, meta) in map {
                        println!(
                            "  {name}: {}..{} step {} (default {})",
                            meta["min"], meta["max"], meta["step"], meta["default"]
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

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
