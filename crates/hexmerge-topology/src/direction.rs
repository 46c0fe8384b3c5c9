//! The six move directions and the axes that decompose the board into rows.
//!
//! A move in any direction splits the hexagon into rows of cells sharing the
//! same value on the direction's *group* axis. Within a row cells are ordered
//! ascending by the *order* axis, and tiles slide toward the front of that
//! order. The two axes are always distinct, which is what makes sliding work
//! along the non-orthogonal hex directions.
//!
//! | Direction | key | group | order |
//! |-----------|-----|-------|-------|
//! | North     | `w` | x     | z     |
//! | South     | `s` | x     | y     |
//! | NorthWest | `q` | z     | x     |
//! | SouthEast | `d` | z     | y     |
//! | NorthEast | `e` | y     | z     |
//! | SouthWest | `a` | y     | x     |

use std::str::FromStr;

use crate::coord::Axis;
use crate::error::TopologyError;

/// A move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[cfg_attr(feature = "serde", serde(rename = "w"))]
    North,
    #[cfg_attr(feature = "serde", serde(rename = "e"))]
    NorthEast,
    #[cfg_attr(feature = "serde", serde(rename = "q"))]
    NorthWest,
    #[cfg_attr(feature = "serde", serde(rename = "s"))]
    South,
    #[cfg_attr(feature = "serde", serde(rename = "d"))]
    SouthEast,
    #[cfg_attr(feature = "serde", serde(rename = "a"))]
    SouthWest,
}

/// Grouping and ordering axes for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectionAxes {
    /// Cells sharing a value on this axis form one row.
    pub group: Axis,
    /// Cells within a row are sorted ascending on this axis.
    pub order: Axis,
}

/// The authoritative direction table: one entry per direction.
pub const DIRECTION_TABLE: [(Direction, DirectionAxes); 6] = [
    (Direction::North, DirectionAxes { group: Axis::X, order: Axis::Z }),
    (Direction::South, DirectionAxes { group: Axis::X, order: Axis::Y }),
    (Direction::NorthWest, DirectionAxes { group: Axis::Z, order: Axis::X }),
    (Direction::SouthEast, DirectionAxes { group: Axis::Z, order: Axis::Y }),
    (Direction::NorthEast, DirectionAxes { group: Axis::Y, order: Axis::Z }),
    (Direction::SouthWest, DirectionAxes { group: Axis::Y, order: Axis::X }),
];

impl Direction {
    /// All six directions, in input-key order `w e q s d a`.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::South,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Grouping and ordering axes for this direction.
    pub const fn axes(self) -> DirectionAxes {
        match self {
            Direction::North => DIRECTION_TABLE[0].1,
            Direction::South => DIRECTION_TABLE[1].1,
            Direction::NorthWest => DIRECTION_TABLE[2].1,
            Direction::SouthEast => DIRECTION_TABLE[3].1,
            Direction::NorthEast => DIRECTION_TABLE[4].1,
            Direction::SouthWest => DIRECTION_TABLE[5].1,
        }
    }

    /// Keyboard key bound to this direction.
    pub const fn key(self) -> char {
        match self {
            Direction::North => 'w',
            Direction::NorthEast => 'e',
            Direction::NorthWest => 'q',
            Direction::South => 's',
            Direction::SouthEast => 'd',
            Direction::SouthWest => 'a',
        }
    }

    /// Direction bound to a keyboard key, if any.
    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }
}

impl FromStr for Direction {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => {
                Self::from_key(key).ok_or_else(|| TopologyError::UnknownDirection(s.to_string()))
            }
            _ => Err(TopologyError::UnknownDirection(s.to_string())),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_one_entry_per_direction() {
        for direction in Direction::ALL {
            let entries = DIRECTION_TABLE.iter().filter(|(d, _)| *d == direction).count();
            assert_eq!(entries, 1, "{:?} should appear exactly once", direction);
        }
    }

    #[test]
    fn axis_pairs_are_unique() {
        for i in 0..DIRECTION_TABLE.len() {
            for j in (i + 1)..DIRECTION_TABLE.len() {
                assert_ne!(DIRECTION_TABLE[i].1, DIRECTION_TABLE[j].1);
            }
        }
    }

    #[test]
    fn group_and_order_differ() {
        for (direction, axes) in DIRECTION_TABLE {
            assert_ne!(axes.group, axes.order, "{:?}", direction);
        }
    }

    #[test]
    fn axes_agree_with_table() {
        for (direction, axes) in DIRECTION_TABLE {
            assert_eq!(direction.axes(), axes);
        }
    }

    #[test]
    fn keys_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_key(direction.key()), Some(direction));
            assert_eq!(direction.to_string().parse::<Direction>(), Ok(direction));
        }
        assert_eq!(Direction::from_key('x'), None);
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        assert!("".parse::<Direction>().is_err());
        assert!("ww".parse::<Direction>().is_err());
        assert_eq!(
            "z".parse::<Direction>(),
            Err(TopologyError::UnknownDirection("z".into()))
        );
    }
}
