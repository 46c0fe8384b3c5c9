//! Pixel layout for flat-topped hexagons.
//!
//! These values are pass-through data for a renderer: they are deterministic
//! in `(coordinate, grid radius, pixel radius)` and the engine never reads
//! them back.

use crate::coord::CubeCoord;

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel layout of one grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    grid_radius: u32,
    pixel_radius: f64,
}

impl HexLayout {
    /// Layout with an explicit cell pixel radius.
    pub const fn new(grid_radius: u32, pixel_radius: f64) -> Self {
        Self {
            grid_radius,
            pixel_radius,
        }
    }

    /// Layout whose widest row fits `width` pixels.
    ///
    /// A hexagon of radius `r` spans `3r - 1` cell radii horizontally.
    pub fn fit_width(width: f64, grid_radius: u32) -> Self {
        let span = (3 * grid_radius).saturating_sub(1).max(1);
        Self::new(grid_radius, width / f64::from(span))
    }

    pub const fn grid_radius(&self) -> u32 {
        self.grid_radius
    }

    pub const fn pixel_radius(&self) -> f64 {
        self.pixel_radius
    }

    /// Bounding box of one cell: `(2R, 2R·sin 60°)`.
    pub fn hex_size(&self) -> Point {
        Point::new(
            2.0 * self.pixel_radius,
            2.0 * 60f64.to_radians().sin() * self.pixel_radius,
        )
    }

    /// The six corners of a cell, relative to its bounding box.
    pub fn corners(&self) -> [Point; 6] {
        let size = self.hex_size();
        std::array::from_fn(|i| {
            let angle = (60.0 * i as f64).to_radians();
            Point::new(
                size.x / 2.0 + self.pixel_radius * angle.cos(),
                size.y / 2.0 + self.pixel_radius * angle.sin(),
            )
        })
    }

    /// Cell outline as an SVG path (`M x y L x y ... Z`).
    pub fn outline_path(&self) -> String {
        let mut parts: Vec<String> = self
            .corners()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let cmd = if i == 0 { 'M' } else { 'L' };
                format!("{}{} {}", cmd, p.x, p.y)
            })
            .collect();
        parts.push("Z".to_string());
        parts.join(" ")
    }

    /// Top-left pixel position of a cell's bounding box.
    pub fn position(&self, coord: CubeCoord) -> Point {
        let offset = f64::from(self.grid_radius) - 1.0;
        let x = f64::from(coord.x());
        let z = f64::from(coord.z());
        Point::new(
            1.5 * self.pixel_radius * (x + offset),
            3f64.sqrt() * self.pixel_radius * (0.5 * x + (z + offset)),
        )
    }
}
