//! Hex-grid alphabet: compass directions, relative turns, and axial
//! coordinates.
//!
//! Directions and turns are closed six-value enums. All rotation arithmetic
//! is total; every (direction, turn) combination is defined.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign};

/// Axial coordinate of a cell on the hex grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Column axis
    pub q: i32,
    /// Row axis
    pub r: i32,
}

impl Coord {
    /// The grid origin, where every reconstructed stroke starts
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    /// Create a coordinate from axial components
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }
}

impl Add<Direction> for Coord {
    type Output = Coord;

    fn add(self, dir: Direction) -> Coord {
        let (dq, dr) = dir.offset();
        Coord::new(self.q + dq, self.r + dr)
    }
}

impl AddAssign<Direction> for Coord {
    fn add_assign(&mut self, dir: Direction) {
        *self = *self + dir;
    }
}

/// One of the six compass directions around a hex cell, arranged clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Every direction, in clockwise order starting from north-east
    pub const ALL: [Direction; 6] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    fn index(self) -> u8 {
        match self {
            Direction::NorthEast => 0,
            Direction::East => 1,
            Direction::SouthEast => 2,
            Direction::SouthWest => 3,
            Direction::West => 4,
            Direction::NorthWest => 5,
        }
    }

    fn from_index(index: u8) -> Self {
        Self::ALL[(index % 6) as usize]
    }

    /// Axial offset of one step in this direction
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (0, -1),
        }
    }

    /// Rotate this direction by a relative turn
    pub fn rotated(self, turn: Turn) -> Self {
        Self::from_index(self.index() + turn.steps())
    }

    /// The direction pointing the opposite way
    pub fn opposite(self) -> Self {
        self.rotated(Turn::Back)
    }

    /// The direction stepping from `from` to `to`, if the two cells are
    /// adjacent
    pub fn between(from: Coord, to: Coord) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| from + *dir == to)
    }
}

impl Mul<Turn> for Direction {
    type Output = Direction;

    fn mul(self, turn: Turn) -> Direction {
        self.rotated(turn)
    }
}

impl MulAssign<Turn> for Direction {
    fn mul_assign(&mut self, turn: Turn) {
        *self = self.rotated(turn);
    }
}

/// How a stroke's heading changes at one step, relative to its previous
/// heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    Forward,
    Right,
    HardRight,
    Back,
    HardLeft,
    Left,
}

impl Turn {
    /// Every turn, in order of increasing clockwise rotation
    pub const ALL: [Turn; 6] = [
        Turn::Forward,
        Turn::Right,
        Turn::HardRight,
        Turn::Back,
        Turn::HardLeft,
        Turn::Left,
    ];

    /// Clockwise rotation amount in sixths of a full turn
    pub fn steps(self) -> u8 {
        match self {
            Turn::Forward => 0,
            Turn::Right => 1,
            Turn::HardRight => 2,
            Turn::Back => 3,
            Turn::HardLeft => 4,
            Turn::Left => 5,
        }
    }

    fn from_steps(steps: u8) -> Self {
        Self::ALL[(steps % 6) as usize]
    }

    /// The turn that rotates `from` onto `to`
    pub fn between(from: Direction, to: Direction) -> Self {
        Self::from_steps(to.index() + 6 - from.index())
    }
}
