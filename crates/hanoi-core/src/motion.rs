//! Disc flight state machine.
//!
//! The engine owns a queue of pending [`Move`]s and at most one in-flight
//! disc. Each call to [`MotionEngine::step`] performs one tick of work:
//!
//! * `Idle`: pop the next move, detach the top disc of its source rod and
//!   enter `Lifting`. Moves from an empty rod, or onto the same rod, are
//!   skipped.
//! * `Lifting`: raise the disc by `lift_step` until it clears the rods.
//! * `Traversing`: advance `u` by the step size and place the disc on the
//!   Hermite arc, tilting it along the direction of travel.
//! * `Settling`: lower the disc by `lift_step` until it reaches its slot,
//!   then commit it to the destination rod.

use crate::{
    board::{Board, DiscId},
    geometry::{ArcPath, Vec3},
    solver::{Move, Rod, SolveError},
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Tunable step sizes for disc flights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    /// Vertical distance covered per tick while lifting or settling.
    pub lift_step: f64,
    /// Interpolation step per tick at the default speed.
    pub u_step: f64,
    /// Target ticks per second at speed 1.0.
    pub base_fps: u32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            lift_step: 0.05,
            u_step: 0.015,
            base_fps: 60,
        }
    }
}

impl MotionParams {
    /// Reject step sizes with which a flight can never finish.
    pub fn validate(&self) -> Result<(), SolveError> {
        if !self.lift_step.is_finite() || self.lift_step <= 0.0 {
            return Err(SolveError::InvalidMotion {
                name: "lift_step",
                value: self.lift_step,
            });
        }
        if self.u_step.is_nan() || self.u_step <= 0.0 || self.u_step > 1.0 {
            return Err(SolveError::InvalidMotion {
                name: "u_step",
                value: self.u_step,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Lifting,
    Traversing,
    Settling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flight {
    pub disc: DiscId,
    pub from: Rod,
    pub to: Rod,
    pub start: Vec3,
    pub dest: Vec3,
    pub u: f64,
    pub step_u: f64,
    pub phase: Phase,
    /// +1 rightward, -1 leftward.
    pub direction: i8,
    path: ArcPath,
}

impl Flight {
    pub fn path(&self) -> &ArcPath {
        &self.path
    }
}

/// Notable things that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    Started { disc: DiscId, mv: Move },
    Skipped { mv: Move },
    Settled { disc: DiscId, rod: Rod },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MotionEngine {
    params: MotionParams,
    step_u: f64,
    queue: VecDeque<Move>,
    flight: Option<Flight>,
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new(MotionParams::default())
    }
}

impl MotionEngine {
    pub fn new(params: MotionParams) -> Self {
        Self {
            params,
            step_u: params.u_step,
            queue: VecDeque::new(),
            flight: None,
        }
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    pub fn enqueue<I: IntoIterator<Item = Move>>(&mut self, moves: I) {
        self.queue.extend(moves);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn queued(&self) -> impl Iterator<Item = &Move> {
        self.queue.iter()
    }

    pub fn flight(&self) -> Option<&Flight> {
        self.flight.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.flight.map_or(Phase::Idle, |f| f.phase)
    }

    /// Nothing in flight and nothing queued.
    pub fn is_idle(&self) -> bool {
        self.flight.is_none() && self.queue.is_empty()
    }

    pub fn step_u(&self) -> f64 {
        self.step_u
    }

    /// Change the interpolation step, including for the current flight.
    pub fn set_step_u(&mut self, step_u: f64) {
        self.step_u = step_u.clamp(f64::MIN_POSITIVE, 1.0);
        if let Some(flight) = self.flight.as_mut() {
            flight.step_u = self.step_u;
        }
    }

    /// Drop all queued moves and forget the current flight. The board is
    /// left as is; callers rebuild it.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.flight = None;
    }

    /// One tick: start the next queued move if idle, then advance the
    /// current flight.
    pub fn step(&mut self, board: &mut Board) -> Option<MotionEvent> {
        let started = self.start_next(board);
        let advanced = self.advance(board);
        advanced.or(started)
    }

    /// Pop the next move and begin its flight. A no-op while a disc is
    /// already flying.
    pub fn start_next(&mut self, board: &mut Board) -> Option<MotionEvent> {
        if self.flight.is_some() {
            return None;
        }
        let mv = self.queue.pop_front()?;
        Some(self.begin(mv, board))
    }

    fn begin(&mut self, mv: Move, board: &mut Board) -> MotionEvent {
        if mv.from == mv.to {
            tracing::debug!(rod = %mv.from, "skipping move onto the same rod");
            return MotionEvent::Skipped { mv };
        }
        let Some(disc) = board.take_top(mv.from) else {
            tracing::debug!(rod = %mv.from, "skipping move from an empty rod");
            return MotionEvent::Skipped { mv };
        };

        let layout = *board.layout();
        let start = layout.slot_position(mv.from, board.stack(mv.from).len());
        let dest = board.next_free_slot(mv.to);
        let path = ArcPath::new(start, dest, layout.center_y(), layout.clearance());

        tracing::debug!(disc, from = %mv.from, to = %mv.to, "starting flight");

        self.flight = Some(Flight {
            disc,
            from: mv.from,
            to: mv.to,
            start,
            dest,
            u: 0.0,
            step_u: self.step_u,
            phase: Phase::Lifting,
            direction: mv.direction(),
            path,
        });
        MotionEvent::Started { disc, mv }
    }

    fn advance(&mut self, board: &mut Board) -> Option<MotionEvent> {
        let flight = self.flight.as_mut()?;
        let lift_step = self.params.lift_step;
        let clearance = board.layout().clearance();

        let Some(disc) = board.disc_mut(flight.disc) else {
            tracing::debug!(disc = flight.disc, "dropping flight for unknown disc");
            self.flight = None;
            return None;
        };

        if flight.phase == Phase::Lifting {
            if disc.position.z < clearance {
                disc.position.z += lift_step;
                return None;
            }
            tracing::trace!(disc = flight.disc, "lifted, traversing");
            flight.phase = Phase::Traversing;
        }

        if flight.phase == Phase::Traversing {
            flight.u = (flight.u + flight.step_u).min(1.0);
            let p = flight.path.point_at(flight.u);
            let delta = p - disc.position;
            if delta.length() > 0.0 {
                disc.normal = delta.normalized();
            }
            disc.position = p;
            if flight.u >= 1.0 {
                tracing::trace!(disc = flight.disc, "traversed, settling");
                flight.phase = Phase::Settling;
            }
            return None;
        }

        disc.normal = Vec3::UP;
        if disc.position.z > flight.dest.z {
            disc.position.z -= lift_step;
            if disc.position.z > flight.dest.z {
                return None;
            }
        }

        let (id, rod) = (flight.disc, flight.to);
        self.flight = None;
        board.place(rod, id);
        tracing::trace!(disc = id, %rod, "settled");
        Some(MotionEvent::Settled { disc: id, rod })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardLayout;

    fn setup(discs: usize) -> (MotionEngine, Board) {
        (
            MotionEngine::default(),
            Board::new(discs, BoardLayout::default()),
        )
    }

    fn run_until_idle(engine: &mut MotionEngine, board: &mut Board) -> Vec<MotionEvent> {
        let mut events = Vec::new();
        for _ in 0..100_000 {
            if engine.is_idle() {
                return events;
            }
            events.extend(engine.step(board));
        }
        panic!("engine never went idle");
    }

    #[test]
    fn idle_engine_does_nothing() {
        let (mut engine, mut board) = setup(3);
        let (engine_before, board_before) = (engine.clone(), board.clone());
        for _ in 0..10 {
            assert_eq!(engine.step(&mut board), None);
        }
        assert_eq!(engine, engine_before);
        assert_eq!(board, board_before);
    }

    #[test]
    fn starting_detaches_the_top_disc() {
        let (mut engine, mut board) = setup(3);
        engine.enqueue([Move::new(Rod::LEFT, Rod::RIGHT)]);
        let event = engine.step(&mut board);
        assert_eq!(
            event,
            Some(MotionEvent::Started {
                disc: 0,
                mv: Move::new(Rod::LEFT, Rod::RIGHT)
            })
        );
        assert_eq!(board.stack(Rod::LEFT), &[2, 1]);
        assert_eq!(board.occurrences(), vec![0, 1, 1]);

        let flight = engine.flight().unwrap();
        assert_eq!(flight.phase, Phase::Lifting);
        assert_eq!(flight.direction, 1);
        assert_eq!(flight.dest, board.layout().slot_position(Rod::RIGHT, 0));
        // The first tick already lifted the disc once.
        assert!(board.disc(0).unwrap().position.z > flight.start.z);
    }

    #[test]
    fn start_next_is_a_no_op_mid_flight() {
        let (mut engine, mut board) = setup(3);
        engine.enqueue([
            Move::new(Rod::LEFT, Rod::RIGHT),
            Move::new(Rod::LEFT, Rod::MIDDLE),
        ]);
        engine.step(&mut board);
        assert_eq!(engine.start_next(&mut board), None);
        assert_eq!(engine.pending(), 1);
        assert_eq!(engine.flight().unwrap().disc, 0);
    }

    #[test]
    fn skips_moves_from_empty_rods() {
        let (mut engine, mut board) = setup(2);
        let mv = Move::new(Rod::MIDDLE, Rod::RIGHT);
        engine.enqueue([mv]);
        assert_eq!(engine.step(&mut board), Some(MotionEvent::Skipped { mv }));
        assert!(engine.is_idle());
        assert_eq!(board.stack(Rod::LEFT), &[1, 0]);
    }

    #[test]
    fn skips_moves_onto_the_same_rod() {
        let (mut engine, mut board) = setup(2);
        let mv = Move::new(Rod::LEFT, Rod::LEFT);
        engine.enqueue([mv]);
        assert_eq!(engine.step(&mut board), Some(MotionEvent::Skipped { mv }));
        assert_eq!(board.stack(Rod::LEFT), &[1, 0]);
    }

    #[test]
    fn phases_run_in_order() {
        let (mut engine, mut board) = setup(1);
        engine.enqueue([Move::new(Rod::LEFT, Rod::MIDDLE)]);

        let clearance = board.layout().clearance();
        let mut phases = vec![Phase::Idle];
        while !engine.is_idle() {
            engine.step(&mut board);
            let phase = engine.phase();
            if phase == Phase::Traversing {
                let z = board.disc(0).unwrap().position.z;
                assert!(z >= clearance, "traversing at z = {z} below {clearance}");
            }
            if phases.last() != Some(&phase) {
                phases.push(phase);
            }
        }
        assert_eq!(
            phases,
            vec![
                Phase::Idle,
                Phase::Lifting,
                Phase::Traversing,
                Phase::Settling,
                Phase::Idle
            ]
        );
        assert_eq!(board.stack(Rod::MIDDLE), &[0]);
    }

    #[test]
    fn disc_tilts_while_traversing_and_rests_upright() {
        let (mut engine, mut board) = setup(1);
        engine.enqueue([Move::new(Rod::LEFT, Rod::RIGHT)]);
        while engine.phase() != Phase::Traversing {
            engine.step(&mut board);
        }
        engine.step(&mut board);
        let normal = board.disc(0).unwrap().normal;
        assert!((normal.length() - 1.0).abs() < 1e-9);
        assert!(normal.x > 0.0, "rightward flight tilts towards +x");

        run_until_idle(&mut engine, &mut board);
        let disc = board.disc(0).unwrap();
        assert_eq!(disc.normal, Vec3::UP);
        assert_eq!(disc.position, board.layout().slot_position(Rod::RIGHT, 0));
    }

    #[test]
    fn traversal_ends_exactly_over_the_destination() {
        let (mut engine, mut board) = setup(2);
        engine.enqueue([Move::new(Rod::LEFT, Rod::MIDDLE)]);
        while engine.phase() != Phase::Settling {
            engine.step(&mut board);
        }
        let flight = *engine.flight().unwrap();
        assert_eq!(flight.u, 1.0);
        assert_eq!(board.disc(0).unwrap().position, flight.path().p1);
    }

    #[test]
    fn settle_reports_the_destination() {
        let (mut engine, mut board) = setup(2);
        engine.enqueue([Move::new(Rod::LEFT, Rod::RIGHT)]);
        let events = run_until_idle(&mut engine, &mut board);
        assert_eq!(
            events.last(),
            Some(&MotionEvent::Settled {
                disc: 0,
                rod: Rod::RIGHT
            })
        );
    }

    #[test]
    fn larger_step_finishes_sooner() {
        let count_ticks = |step: f64| {
            let (mut engine, mut board) = setup(1);
            engine.set_step_u(step);
            engine.enqueue([Move::new(Rod::LEFT, Rod::RIGHT)]);
            let mut ticks = 0;
            while !engine.is_idle() {
                engine.step(&mut board);
                ticks += 1;
            }
            ticks
        };
        assert!(count_ticks(0.1) < count_ticks(0.01));
    }

    #[test]
    fn rejects_steps_that_never_finish() {
        let valid = MotionParams::default();
        assert_eq!(valid.validate(), Ok(()));

        for lift_step in [0.0, -0.05, f64::NAN, f64::INFINITY] {
            let params = MotionParams { lift_step, ..valid };
            assert!(
                matches!(
                    params.validate(),
                    Err(SolveError::InvalidMotion { name: "lift_step", .. })
                ),
                "lift_step = {lift_step}"
            );
        }
        for u_step in [0.0, -0.1, 1.5, f64::NAN] {
            let params = MotionParams { u_step, ..valid };
            assert!(
                matches!(
                    params.validate(),
                    Err(SolveError::InvalidMotion { name: "u_step", .. })
                ),
                "u_step = {u_step}"
            );
        }
        assert_eq!(MotionParams { u_step: 1.0, ..valid }.validate(), Ok(()));
    }

    #[test]
    fn clear_forgets_everything() {
        let (mut engine, mut board) = setup(2);
        engine.enqueue([
            Move::new(Rod::LEFT, Rod::RIGHT),
            Move::new(Rod::LEFT, Rod::MIDDLE),
        ]);
        engine.step(&mut board);
        engine.clear();
        assert!(engine.is_idle());
        assert_eq!(engine.phase(), Phase::Idle);
    }
}
