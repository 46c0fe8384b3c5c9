//! Cube coordinates on the hexagonal lattice.
//!
//! A cube coordinate names a hex cell with three integer axes (x, y, z) that
//! always sum to zero. Only two of them are independent, so the constructor
//! takes (x, y) and derives z; the three-axis form is validated.

use crate::error::{Result, TopologyError};

/// One of the three cube axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// A position on the hexagonal lattice.
///
/// Invariant: `x + y + z == 0`. Every constructor preserves it, and
/// deserialization rejects triples that break it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCube"))]
pub struct CubeCoord {
    x: i32,
    y: i32,
    z: i32,
}

impl CubeCoord {
    /// Center of the lattice.
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a coordinate from two axes; `z` is derived.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y, z: -x - y }
    }

    /// Create a coordinate from all three axes.
    ///
    /// Fails with [`TopologyError::OffLattice`] when the axes do not sum to zero.
    pub fn from_cube(x: i32, y: i32, z: i32) -> Result<Self> {
        if x.checked_add(y).and_then(|sum| sum.checked_add(z)) != Some(0) {
            return Err(TopologyError::OffLattice { x, y, z });
        }
        Ok(Self { x, y, z })
    }

    pub const fn x(&self) -> i32 {
        self.x
    }

    pub const fn y(&self) -> i32 {
        self.y
    }

    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Value of this coordinate along `axis`.
    #[inline]
    pub const fn axis(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Hex distance: the number of unit steps between two cells.
    pub fn distance(&self, other: &Self) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        dx.max(dy).max(dz)
    }

    /// Ring number around the origin (0 = origin).
    pub fn ring(&self) -> u32 {
        self.distance(&Self::ORIGIN)
    }
}

/// Unvalidated wire form of a cube coordinate.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCube {
    x: i32,
    y: i32,
    z: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCube> for CubeCoord {
    type Error = TopologyError;

    fn try_from(raw: RawCube) -> Result<Self> {
        Self::from_cube(raw.x, raw.y, raw.z)
    }
}

impl std::fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
