//! Snapshot of everything a renderer needs to draw one frame.

use crate::{
    appearance::{self, Rgb},
    board::{Board, DiscId},
    geometry::Vec3,
    motion::{Flight, Phase},
    solver::Rod,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub rods: Vec<RodView>,
    pub discs: Vec<DiscView>,
    pub flight: Option<FlightView>,
    /// Thickness of every disc ring.
    pub tube_radius: f64,
    pub speed: f64,
    pub solving: bool,
    pub moves_planned: usize,
    pub moves_completed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RodView {
    pub rod: Rod,
    /// Centre of the pedestal on the board surface.
    pub base: Vec3,
    pub height: f64,
    pub pedestal_radius: f64,
    pub pole_radius: f64,
    /// Resting discs, bottom to top.
    pub stack: Vec<DiscId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscView {
    pub id: DiscId,
    pub position: Vec3,
    pub normal: Vec3,
    pub radius: f64,
    pub color: Rgb,
    /// Highlight flag for the disc currently moving.
    pub in_flight: bool,
    /// Rotation about the y axis, in degrees, that aligns the ring with its
    /// normal. Signed by the direction of travel.
    pub tilt_degrees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightView {
    pub disc: DiscId,
    pub from: Rod,
    pub to: Rod,
    pub phase: Phase,
    pub u: f64,
    pub direction: i8,
}

impl From<&Flight> for FlightView {
    fn from(flight: &Flight) -> Self {
        Self {
            disc: flight.disc,
            from: flight.from,
            to: flight.to,
            phase: flight.phase,
            u: flight.u,
            direction: flight.direction,
        }
    }
}

pub(crate) fn rods(board: &Board) -> Vec<RodView> {
    let layout = board.layout();
    Rod::ALL
        .into_iter()
        .map(|rod| RodView {
            rod,
            base: layout.rod_base(rod),
            height: layout.rod_height,
            pedestal_radius: layout.rod_base_radius,
            pole_radius: 0.1 * layout.rod_base_radius,
            stack: board.stack(rod).to_vec(),
        })
        .collect()
}

pub(crate) fn discs(board: &Board, flight: Option<&Flight>) -> Vec<DiscView> {
    let r = board.layout().rod_base_radius;
    board
        .discs()
        .iter()
        .enumerate()
        .map(|(id, disc)| {
            let active = flight.filter(|f| f.disc == id);
            let direction = active.map_or(0.0, |f| f64::from(f.direction));
            DiscView {
                id,
                position: disc.position,
                normal: disc.normal,
                radius: appearance::disc_radius(id, r),
                color: appearance::disc_color(id),
                in_flight: active.is_some(),
                tilt_degrees: direction * disc.normal.z.clamp(-1.0, 1.0).acos().to_degrees(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardLayout;

    #[test]
    fn resting_discs_are_flat() {
        let board = Board::new(3, BoardLayout::default());
        let views = discs(&board, None);
        assert_eq!(views.len(), 3);
        for view in &views {
            assert!(!view.in_flight);
            assert_eq!(view.tilt_degrees, 0.0);
        }
        assert!(views[0].radius < views[2].radius);
    }

    #[test]
    fn rods_report_stacks() {
        let board = Board::new(2, BoardLayout::default());
        let rods = rods(&board);
        assert_eq!(rods[0].stack, vec![1, 0]);
        assert!(rods[1].stack.is_empty());
        assert_eq!(rods[1].base, Vec3::new(5.0, 2.5, 0.0));
        assert_eq!(rods[2].pole_radius, 0.1);
    }
}
