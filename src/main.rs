//! Energy Flap entry point
//!
//! Runs a headless game with the autopilot at the controls and reports the
//! final score. Frames can be streamed as JSON lines for an external renderer.

use std::fs;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use energy_flap::Tuning;
use energy_flap::frame::{JsonLinesRenderer, NullRenderer, Renderer};
use energy_flap::session::{Autopilot, Session};
use energy_flap::sim::GameState;

#[derive(Parser, Debug)]
#[command(name = "energy-flap", about = "Flappy arcade simulation with energy, rockets and hearts")]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks even if the bird is still flying
    #[arg(long)]
    max_frames: Option<u64>,
    /// JSON tuning file overriding the stock balance
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Pace the loop at the tuning frame rate instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Write every frame to stdout as a JSON line
    #[arg(long)]
    dump_frames: bool,
}

fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading tuning file {}", path.display()))?;
    let tuning = Tuning::from_json(&json)
        .with_context(|| format!("loading tuning from {}", path.display()))?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(tuning)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = load_tuning(args.tuning.as_ref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Energy Flap starting (seed {})", seed);

    let mut pilot = Autopilot::new(&tuning);
    let mut session = Session::new(GameState::new(tuning), seed);
    if args.realtime {
        session = session.realtime();
    }

    let mut renderer: Box<dyn Renderer> = if args.dump_frames {
        Box::new(JsonLinesRenderer::new(BufWriter::new(io::stdout().lock())))
    } else {
        Box::new(NullRenderer)
    };
    let summary = session.run(&mut pilot, renderer.as_mut(), args.max_frames);
    drop(renderer);

    log::info!(
        "Run finished after {} ticks ({} simulated frames): {:?}",
        summary.ticks,
        summary.frames,
        summary.end_reason
    );
    println!("Game over! Score: {}", summary.score);
    Ok(())
}
