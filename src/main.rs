//! Flappy Sim headless runner
//!
//! Drives a session with the autopilot at a fixed timestep and logs what
//! happens. See `flappy-sim --help`.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use flappy_sim::SessionConfig;
use flappy_sim::consts::{MAX_SUBSTEPS, SIM_DT};
use flappy_sim::sim::{Session, SessionEvent, TickInput, advance};

/// Headless autopilot run of the flappy simulation
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session config JSON; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for the obstacle gaps
    #[arg(short, long, default_value_t = 0x5EED)]
    seed: u64,

    /// Simulated time to run, in seconds
    #[arg(long, default_value_t = 30.0, value_parser = parse_seconds)]
    seconds: f32,
}

fn parse_seconds(s: &str) -> Result<f32, String> {
    let seconds: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(format!("expected a positive number of seconds, got {s}"))
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SessionConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(SessionConfig::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(SessionConfig::default()),
    }
}

/// Host loop: fixed substeps from variable frame time
struct Runner {
    session: Session,
    accumulator: f32,
    input: TickInput,
}

impl Runner {
    fn update(&mut self, frame_dt: f32) -> Vec<SessionEvent> {
        let frame_dt = frame_dt.min(0.1);
        self.accumulator += frame_dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(advance(&mut self.session, &self.input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump_pressed = false;
            self.input.start_pressed = false;
        }
        events
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Flappy Sim (headless) starting with seed {}", args.seed);

    let mut runner = Runner {
        session: Session::new(load_config(args.config.as_ref())?, args.seed)?,
        accumulator: 0.0,
        input: TickInput {
            autopilot: true,
            ..Default::default()
        },
    };

    let mut best = 0;
    let mut elapsed = 0.0;
    while elapsed < args.seconds {
        for event in runner.update(SIM_DT) {
            match event {
                SessionEvent::GameOver { final_score } => best = best.max(final_score),
                SessionEvent::GapPassed { .. } | SessionEvent::Jumped => {}
                other => log::debug!("{:?}", other),
            }
        }
        elapsed += SIM_DT;
    }

    let session = &runner.session;
    best = best.max(session.score());
    log::info!(
        "Simulated {:.1}s over {} ticks: {} runs, best score {}",
        session.now_ms() / 1000.0,
        session.time_ticks(),
        session.run(),
        best
    );
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}
