//! Core logic for the Towers of Hanoi visualization.
//!
//! Nothing here opens a window or draws. A host drives [`Simulation`] with
//! periodic ticks and reads back a [`frame::Frame`] to draw.

pub mod appearance;
pub mod board;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod pacing;
pub mod simulation;
pub mod solver;

pub use board::{Board, BoardLayout, DiscId};
pub use input::Command;
pub use motion::{MotionEngine, MotionParams, Phase};
pub use pacing::{FrameGate, Speed};
pub use simulation::{Control, Simulation, SimulationConfig, Tick};
pub use solver::{Move, Rod, SolveError, generate_moves, generate_moves_with};

#[cfg(test)]
mod testing;
