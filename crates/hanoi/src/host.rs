//! Headless driver loop for a [`Simulation`].
//!
//! A real renderer would call [`Simulation::poll`] from its idle callback
//! and draw the returned [`Frame`]; here frames go to a [`FrameSink`].

use anyhow::{Context, Result};
use hanoi_core::{Simulation, Tick, frame::Frame, motion::MotionEvent};
use std::{
    io::Write,
    thread,
    time::{Duration, Instant},
};

/// How often a throttled realtime loop re-checks the frame gate.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

pub trait FrameSink {
    fn push(&mut self, frame: Frame) -> Result<()>;
}

/// Discards frames.
#[derive(Default, Debug)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn push(&mut self, _frame: Frame) -> Result<()> {
        Ok(())
    }
}

#[derive(Default, Debug)]
pub struct RecordingSink {
    pub frames: Vec<Frame>,
}

impl FrameSink for RecordingSink {
    fn push(&mut self, frame: Frame) -> Result<()> {
        self.frames.push(frame);
        Ok(())
    }
}

/// Writes each frame as one line of JSON.
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn push(&mut self, frame: Frame) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &frame).context("failed to encode frame")?;
        writeln!(self.writer).context("failed to write frame")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Gate ticks on the wall clock at the simulation's speed.
    Realtime,
    /// Tick as fast as possible.
    Unpaced,
}

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub ticks: u64,
    pub moves: usize,
    pub elapsed: Duration,
}

/// Drive `sim` until nothing is queued or flying, pushing a frame after
/// every tick that advanced.
pub fn run_to_completion<S: FrameSink>(
    sim: &mut Simulation,
    pacing: Pacing,
    sink: &mut S,
) -> Result<RunSummary> {
    let epoch = Instant::now();
    let mut ticks = 0u64;

    while !sim.is_idle() {
        let tick = match pacing {
            Pacing::Realtime => sim.poll(epoch.elapsed()),
            Pacing::Unpaced => sim.step(),
        };
        match tick {
            Tick::Throttled => thread::sleep(POLL_INTERVAL),
            Tick::Dormant => break,
            Tick::Advanced(event) => {
                ticks += 1;
                log_event(event);
                sink.push(sim.frame())?;
            }
        }
    }

    Ok(RunSummary {
        ticks,
        moves: sim.moves_completed(),
        elapsed: epoch.elapsed(),
    })
}

pub fn log_event(event: Option<MotionEvent>) {
    match event {
        Some(MotionEvent::Started { disc, mv }) => tracing::info!(disc, "{mv}"),
        Some(MotionEvent::Skipped { mv }) => tracing::warn!("skipped: {mv}"),
        Some(MotionEvent::Settled { disc, rod }) => tracing::debug!(disc, %rod, "settled"),
        None => {}
    }
}
