use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lance_ai::app::{RunOptions, SimApp};
use lance_ai::config::SimConfig;
use lance_ai::engine::logging::{init_logging, LogFormat};
use lance_ai::error::AgentError;

#[derive(Parser)]
#[command(name = "lance-ai", about = "Headless player/enemy behavior simulation")]
struct Args {
    /// JSON tuning file; every field is optional.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 20.0)]
    seconds: f32,

    /// Frame rate of the behavior pass. Physics always steps at 60 Hz.
    #[arg(long, default_value_t = 60.0, value_parser = parse_fps)]
    fps: f32,

    /// Seed for enemy wander picks.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    #[arg(long, default_value_t = 4)]
    enemies: usize,

    /// Pace frames against the wall clock.
    #[arg(long)]
    realtime: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    /// -v info, -vv debug (state transitions), -vvv trace (timers).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_fps(raw: &str) -> Result<f32, String> {
    let fps: f32 = raw.parse().map_err(|e| format!("{e}"))?;
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(format!("fps must be positive, got {fps}"))
    }
}

fn run(args: &Args) -> Result<(), AgentError> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let mut app = SimApp::new(&config, args.enemies, args.seed)?;
    let summary = app.run(&RunOptions {
        seconds: args.seconds,
        fps: args.fps,
        realtime: args.realtime,
    })?;

    tracing::info!(
        frames = summary.frames,
        physics_steps = summary.physics_steps,
        elapsed = summary.elapsed,
        player_state = summary.player_state.unwrap_or("-"),
        player_health = summary.player_health,
        damage_taken = summary.damage_taken,
        strikes_landed = summary.strikes_landed,
        enemies_alive = summary.enemies_alive,
        enemy_states = ?summary.enemy_states,
        "simulation finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_format, args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "simulation failed");
            ExitCode::FAILURE
        }
    }
}
