use crate::{
    board::Board,
    motion::{MotionEvent, Phase},
    simulation::{Simulation, Tick},
    solver::Move,
};

/// Render a move list as `from -> to` lines for snapshotting.
pub fn render_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| format!("{} -> {}", m.from, m.to))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Apply `moves` to `board` instantly, asserting the stacking rule after
/// every move.
pub fn replay(board: &mut Board, moves: &[Move]) {
    for (i, m) in moves.iter().enumerate() {
        let disc = board
            .take_top(m.from)
            .unwrap_or_else(|| panic!("move {i} ({m}) takes from an empty rod"));
        if let Some(top) = board.top(m.to) {
            assert!(top > disc, "move {i} ({m}) puts disc {disc} on {top}");
        }
        board.place(m.to, disc);
    }
}

/// Tick `sim` until it goes dormant, checking the occupancy invariants on
/// every tick. Returns the moves in the order their flights started.
pub fn run_checked(sim: &mut Simulation) -> Vec<Move> {
    let mut started = Vec::new();
    for _ in 0..1_000_000 {
        let tick = sim.step();
        assert_invariants(sim);
        match tick {
            Tick::Dormant => return started,
            Tick::Advanced(Some(MotionEvent::Started { mv, .. })) => started.push(mv),
            Tick::Advanced(_) | Tick::Throttled => {}
        }
    }
    panic!("simulation never went dormant");
}

pub fn assert_invariants(sim: &Simulation) {
    let board = sim.board();
    let flying = sim.engine().flight().map(|f| f.disc);
    for (disc, count) in board.occurrences().into_iter().enumerate() {
        let expected = if Some(disc) == flying { 0 } else { 1 };
        assert_eq!(count, expected, "disc {disc} occupies {count} slots");
    }
    assert!(board.is_ordered(), "stacking rule violated");
    if flying.is_none() {
        assert_eq!(sim.engine().phase(), Phase::Idle);
    }
}
