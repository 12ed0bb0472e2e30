use anyhow::{Context, Result};
use clap::Args;
use hanoi::{
    config::Config,
    host::{self, JsonLinesSink, NullSink, Pacing},
};
use hanoi_core::Simulation;
use std::{io, path::PathBuf};

#[derive(Args)]
pub struct RunArgs {
    /// Path to a configuration file (TOML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the number of discs.
    #[arg(long, short = 'n')]
    pub discs: Option<usize>,

    /// Override the initial speed multiplier.
    #[arg(long)]
    pub speed: Option<f64>,

    /// Tick as fast as possible instead of at the animation frame rate.
    #[arg(long)]
    pub unpaced: bool,

    /// Write every frame to stdout as a line of JSON.
    #[arg(long)]
    pub frames: bool,
}

impl RunArgs {
    pub fn run(&self) -> Result<()> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(discs) = self.discs {
            config.simulation.discs = discs;
        }
        if let Some(speed) = self.speed {
            config.simulation.speed = speed;
        }
        config.validate()?;

        let mut sim =
            Simulation::new(config.simulation_config()).context("failed to set up board")?;
        if !sim.solve() {
            anyhow::bail!("nothing to solve");
        }

        let pacing = if self.unpaced {
            Pacing::Unpaced
        } else {
            Pacing::Realtime
        };

        let summary = if self.frames {
            let mut sink = JsonLinesSink::new(io::stdout().lock());
            host::run_to_completion(&mut sim, pacing, &mut sink)?
        } else {
            host::run_to_completion(&mut sim, pacing, &mut NullSink)?
        };

        tracing::info!(
            moves = summary.moves,
            ticks = summary.ticks,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "run complete"
        );
        if !self.frames {
            println!("{}", sim.board_summary());
        }

        Ok(())
    }
}
