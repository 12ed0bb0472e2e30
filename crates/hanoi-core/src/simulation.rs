//! The complete, explicitly owned puzzle state.

use crate::{
    board::{Board, BoardLayout},
    frame::{self, Frame, FlightView},
    input::Command,
    motion::{MotionEngine, MotionEvent, MotionParams},
    pacing::{FrameGate, Speed},
    solver::{self, MAX_SOLVER_DISCS, Move, Rod, SolveError},
};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub discs: usize,
    pub layout: BoardLayout,
    pub motion: MotionParams,
    pub speed: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            discs: 3,
            layout: BoardLayout::default(),
            motion: MotionParams::default(),
            speed: Speed::DEFAULT,
        }
    }
}

/// Result of one call to [`Simulation::poll`] or [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The frame gate held the tick back.
    Throttled,
    /// Nothing queued and nothing in flight.
    Dormant,
    /// State advanced by one tick.
    Advanced(Option<MotionEvent>),
}

/// What the host should do after a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    ShowHelp,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    config: SimulationConfig,
    board: Board,
    engine: MotionEngine,
    gate: FrameGate,
    speed: Speed,
    solving: bool,
    moves_planned: usize,
    moves_completed: usize,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SolveError> {
        if config.discs > MAX_SOLVER_DISCS {
            return Err(SolveError::TooManyDiscs {
                discs: config.discs,
                max: MAX_SOLVER_DISCS,
            });
        }
        config.motion.validate()?;
        let speed = Speed::new(config.speed);
        let mut engine = MotionEngine::new(config.motion);
        engine.set_step_u(speed.scale_step(config.motion.u_step));
        Ok(Self {
            config,
            board: Board::new(config.discs, config.layout),
            engine,
            gate: FrameGate::new(),
            speed,
            solving: false,
            moves_planned: 0,
            moves_completed: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn is_solving(&self) -> bool {
        self.solving
    }

    pub fn is_idle(&self) -> bool {
        self.engine.is_idle()
    }

    pub fn moves_planned(&self) -> usize {
        self.moves_planned
    }

    pub fn moves_completed(&self) -> usize {
        self.moves_completed
    }

    pub fn handle(&mut self, command: Command) -> Control {
        match command {
            Command::Solve => {
                self.solve();
            }
            Command::SpeedUp => self.set_speed(|s| s.increase()),
            Command::SlowDown => self.set_speed(|s| s.decrease()),
            Command::Reset => self.reset(),
            Command::Help => return Control::ShowHelp,
            Command::Quit => return Control::Quit,
        }
        Control::Continue
    }

    /// Plan the full solve from the left rod to the right rod and queue it.
    ///
    /// Ignored unless every disc rests on the left rod and the engine is
    /// idle; returns whether moves were queued.
    pub fn solve(&mut self) -> bool {
        if !self.engine.is_idle() {
            tracing::debug!("solve ignored: animation in progress");
            return false;
        }
        let discs = self.board.disc_count();
        if discs == 0 || self.board.stack(Rod::LEFT).len() != discs {
            tracing::debug!("solve ignored: discs are not all on the source rod");
            return false;
        }

        let mut moves = Vec::with_capacity((1usize << discs) - 1);
        let planned = solver::generate_moves_with(discs, Rod::LEFT, Rod::RIGHT, |m: Move| {
            tracing::debug!("{m}");
            moves.push(m);
        });
        if let Err(err) = planned {
            tracing::debug!(%err, "solve ignored");
            return false;
        }

        tracing::info!(discs, moves = moves.len(), "solving");
        self.moves_planned = moves.len();
        self.moves_completed = 0;
        self.engine.enqueue(moves);
        self.solving = true;
        true
    }

    /// Restore the initial board, dropping any queued or in-flight move.
    pub fn reset(&mut self) {
        self.engine.clear();
        self.board = Board::new(self.config.discs, self.config.layout);
        self.solving = false;
        self.moves_planned = 0;
        self.moves_completed = 0;
        tracing::info!("board reset");
    }

    fn set_speed(&mut self, adjust: impl FnOnce(&mut Speed)) {
        adjust(&mut self.speed);
        self.engine
            .set_step_u(self.speed.scale_step(self.config.motion.u_step));
        tracing::info!(speed = self.speed.get(), "speed changed");
    }

    /// Time the frame gate waits between ticks at the current speed.
    pub fn frame_interval(&self) -> Duration {
        self.speed.frame_interval(self.config.motion.base_fps)
    }

    /// Gated tick: advances only when a frame interval has passed since the
    /// last admitted tick. `now` is measured from any fixed host epoch.
    pub fn poll(&mut self, now: Duration) -> Tick {
        if !self.gate.ready(now, self.frame_interval()) {
            return Tick::Throttled;
        }
        self.step()
    }

    /// Ungated tick.
    pub fn step(&mut self) -> Tick {
        if self.engine.is_idle() {
            return Tick::Dormant;
        }
        let event = self.engine.step(&mut self.board);
        if let Some(MotionEvent::Settled { disc, rod }) = event {
            self.moves_completed += 1;
            tracing::debug!(disc, %rod, completed = self.moves_completed, "move complete");
        }
        if self.solving && self.engine.is_idle() {
            self.solving = false;
            tracing::info!(moves = self.moves_completed, "solved");
        }
        Tick::Advanced(event)
    }

    pub fn frame(&self) -> Frame {
        let flight = self.engine.flight();
        Frame {
            rods: frame::rods(&self.board),
            discs: frame::discs(&self.board, flight),
            flight: flight.map(FlightView::from),
            tube_radius: crate::appearance::tube_radius(self.config.layout.rod_base_radius),
            speed: self.speed.get(),
            solving: self.solving,
            moves_planned: self.moves_planned,
            moves_completed: self.moves_completed,
        }
    }

    /// Rod stacks as text, e.g. `0: [2, 1, 0]`, one rod per line.
    pub fn board_summary(&self) -> String {
        Rod::ALL
            .into_iter()
            .map(|rod| format!("{rod}: {:?}", self.board.stack(rod)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
