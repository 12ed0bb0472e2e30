//! Rod occupancy and slot geometry.

use crate::{geometry::Vec3, solver::Rod};
use serde::{Deserialize, Serialize};

/// Disc identifier; 0 is the smallest disc.
pub type DiscId = usize;

/// Physical dimensions of the board, rods and disc stacking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardLayout {
    /// Radius of each rod's pedestal; the unit for disc sizes.
    pub rod_base_radius: f64,
    /// Extent of the base along x.
    pub width: f64,
    /// Extent of the base along y.
    pub depth: f64,
    pub rod_height: f64,
    /// Vertical distance between stacked disc slots.
    pub disc_spacing: f64,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            rod_base_radius: 1.0,
            width: 10.0,
            depth: 5.0,
            rod_height: 5.0,
            disc_spacing: 0.33,
        }
    }
}

impl BoardLayout {
    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    /// The line along which every rod stands and every flight travels.
    pub fn center_y(&self) -> f64 {
        self.depth / 2.0
    }

    /// Height a disc must reach before it may cross to another rod.
    pub fn clearance(&self) -> f64 {
        self.rod_height + 0.2 * self.rod_base_radius
    }

    pub fn rod_x(&self, rod: Rod) -> f64 {
        let dx = self.width / 3.0;
        self.center_x() + (rod.index() as f64 - 1.0) * dx
    }

    /// Position of slot `height` (0 is the bottom) on `rod`.
    pub fn slot_position(&self, rod: Rod, height: usize) -> Vec3 {
        Vec3::new(
            self.rod_x(rod),
            self.center_y(),
            (height as f64 + 1.0) * self.disc_spacing,
        )
    }

    pub fn rod_base(&self, rod: Rod) -> Vec3 {
        Vec3::new(self.rod_x(rod), self.center_y(), 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub position: Vec3,
    /// Unit orientation; `Vec3::UP` while resting.
    pub normal: Vec3,
}

/// Authoritative occupancy of the three rods plus each disc's pose.
///
/// A disc lifted off a rod by [`Board::take_top`] is absent from every
/// stack until [`Board::place`] commits it again.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    layout: BoardLayout,
    stacks: [Vec<DiscId>; 3],
    discs: Vec<Disc>,
}

impl Board {
    /// All `count` discs on the left rod, largest at the bottom.
    pub fn new(count: usize, layout: BoardLayout) -> Self {
        let mut stacks: [Vec<DiscId>; 3] = Default::default();
        stacks[0] = (0..count).rev().collect();

        let discs = (0..count)
            .map(|id| Disc {
                position: layout.slot_position(Rod::LEFT, count - 1 - id),
                normal: Vec3::UP,
            })
            .collect();

        Self {
            layout,
            stacks,
            discs,
        }
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn disc_count(&self) -> usize {
        self.discs.len()
    }

    pub fn disc(&self, id: DiscId) -> Option<&Disc> {
        self.discs.get(id)
    }

    pub fn disc_mut(&mut self, id: DiscId) -> Option<&mut Disc> {
        self.discs.get_mut(id)
    }

    pub fn discs(&self) -> &[Disc] {
        &self.discs
    }

    /// Discs on `rod`, bottom to top.
    pub fn stack(&self, rod: Rod) -> &[DiscId] {
        &self.stacks[rod.index()]
    }

    pub fn top(&self, rod: Rod) -> Option<DiscId> {
        self.stacks[rod.index()].last().copied()
    }

    pub fn is_empty(&self, rod: Rod) -> bool {
        self.stacks[rod.index()].is_empty()
    }

    /// Position of the lowest empty slot on `rod`.
    pub fn next_free_slot(&self, rod: Rod) -> Vec3 {
        self.layout
            .slot_position(rod, self.stacks[rod.index()].len())
    }

    /// Detach the top disc of `rod`. Returns `None` for an empty rod.
    pub fn take_top(&mut self, rod: Rod) -> Option<DiscId> {
        self.stacks[rod.index()].pop()
    }

    /// Commit `disc` onto `rod`, snapping it into the slot and resetting its
    /// orientation.
    pub fn place(&mut self, rod: Rod, disc: DiscId) {
        let slot = self.next_free_slot(rod);
        self.stacks[rod.index()].push(disc);
        if let Some(d) = self.discs.get_mut(disc) {
            d.position = slot;
            d.normal = Vec3::UP;
        }
    }

    /// Rod currently holding `disc`, or `None` while it is in flight.
    pub fn rod_of(&self, disc: DiscId) -> Option<Rod> {
        Rod::ALL
            .into_iter()
            .find(|rod| self.stacks[rod.index()].contains(&disc))
    }

    /// True when no stack has a larger disc resting on a smaller one.
    pub fn is_ordered(&self) -> bool {
        self.stacks
            .iter()
            .all(|stack| stack.windows(2).all(|w| w[0] > w[1]))
    }

    /// Number of slots holding each disc. A resting disc appears once; a
    /// flying disc zero times.
    pub fn occurrences(&self) -> Vec<usize> {
        let mut counts = vec![0; self.discs.len()];
        for id in self.stacks.iter().flatten() {
            if let Some(c) = counts.get_mut(*id) {
                *c += 1;
            }
        }
        counts
    }
}
