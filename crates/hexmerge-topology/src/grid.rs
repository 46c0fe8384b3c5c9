//! Hexagon enumeration.
//!
//! A hexagon of radius `r` holds every cell within `r - 1` steps of the
//! origin: the center plus rings `1..r`. Ring `n > 0` has `6n` cells, so the
//! hexagon has `1 + 3(r-1)r = 3r² - 3r + 1` cells in total.
//!
//! Radii are bounded by [`MAX_RADIUS`] so that cell counts fit a 32-bit
//! `usize` and every axis value fits an `i32`.

use crate::coord::CubeCoord;
use crate::error::{Result, TopologyError};

/// Largest radius a hexagon may have.
pub const MAX_RADIUS: u32 = 1 << 14;

/// Number of cells in a hexagon of the given radius.
///
/// Zero for radius `0` and for radii above [`MAX_RADIUS`], which no
/// hexagon can have.
#[inline]
pub const fn cell_count(radius: u32) -> usize {
    if radius == 0 || radius > MAX_RADIUS {
        return 0;
    }
    let r = radius as usize;
    3 * r * r - 3 * r + 1
}

/// Whether `coord` lies inside a hexagon of the given radius.
pub fn contains(radius: u32, coord: CubeCoord) -> bool {
    radius > 0 && coord.ring() < radius
}

/// Iterator over the cells of a hexagon, ordered by `x` then `y` ascending.
#[derive(Debug, Clone)]
pub struct Hexagon {
    limit: i32,
    x: i32,
    y: i32,
    remaining: usize,
}

impl Hexagon {
    /// Hexagon of the given radius.
    ///
    /// Fails with [`TopologyError::InvalidRadius`] when `radius` is zero or
    /// above [`MAX_RADIUS`].
    pub fn new(radius: u32) -> Result<Self> {
        if radius < 1 || radius > MAX_RADIUS {
            return Err(TopologyError::InvalidRadius(radius));
        }
        let limit = radius as i32 - 1;
        Ok(Self {
            limit,
            x: -limit,
            y: Self::y_start(-limit, limit),
            remaining: cell_count(radius),
        })
    }

    fn y_start(x: i32, limit: i32) -> i32 {
        (-limit).max(-x - limit)
    }

    fn y_end(x: i32, limit: i32) -> i32 {
        limit.min(-x + limit)
    }
}

impl Iterator for Hexagon {
    type Item = CubeCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let coord = CubeCoord::new(self.x, self.y);
        self.remaining -= 1;

        if self.y < Self::y_end(self.x, self.limit) {
            self.y += 1;
        } else {
            self.x += 1;
            self.y = Self::y_start(self.x, self.limit);
        }
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Hexagon {}

/// Every coordinate of a hexagon of the given radius, in grid order.
pub fn hexagon(radius: u32) -> Result<Vec<CubeCoord>> {
    Ok(Hexagon::new(radius)?.collect())
}
