//! Cosmetic per-disc properties.

use crate::board::DiscId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

const PALETTE: [Rgb; 7] = [
    Rgb::new(1.0, 0.0, 0.0), // red
    Rgb::new(0.0, 1.0, 0.0), // green
    Rgb::new(0.0, 0.0, 1.0), // blue
    Rgb::new(1.0, 1.0, 0.0), // yellow
    Rgb::new(0.7, 1.0, 1.0), // light blue
    Rgb::new(0.8, 0.1, 0.8), // purple
    Rgb::new(0.2, 1.0, 0.8), // teal
];

pub fn disc_color(id: DiscId) -> Rgb {
    PALETTE.get(id).copied().unwrap_or(Rgb::WHITE)
}

/// Ring radius of disc `id`, in units of the rod base radius.
///
/// Grows by 0.2 per disc with a gap above the fourth disc so the larger
/// discs clear the pedestal (radius 1.0).
pub fn radius_factor(id: DiscId) -> f64 {
    let step = if id >= 4 { id + 2 } else { id + 1 };
    0.2 * step as f64
}

pub fn disc_radius(id: DiscId, rod_base_radius: f64) -> f64 {
    radius_factor(id) * rod_base_radius
}

/// Thickness of the ring's tube.
pub fn tube_radius(rod_base_radius: f64) -> f64 {
    0.2 * rod_base_radius
}
