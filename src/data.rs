use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};

/// Positions are packed into 32 bits when fingerprinting so neither dimension may exceed this.
pub const MAX_SIZE: usize = u16::max_value() as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCell {
    Wall,
    Floor,
    Goal,
    /// Floor the hero can never reach, trimmed away when the level was normalized.
    OutOfBounds,
}

impl MapCell {
    /// Boxes and the hero can only ever stand on these.
    pub fn is_floor(self) -> bool {
        self == MapCell::Floor || self == MapCell::Goal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contents {
    Empty,
    Box,
    Player,
}

/// Row and column, `[0, 0]` is the top left corner.
///
/// Fields are signed so that stepping off the edge of the map produces a position
/// that simply doesn't exist in any grid instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: i32,
    pub c: i32,
}

impl Pos {
    pub fn new(r: usize, c: usize) -> Pos {
        Pos {
            r: r as i32,
            c: c as i32,
        }
    }

    pub fn dist(self, other: Pos) -> i32 {
        (self.r - other.r).abs() + (self.c - other.c).abs()
    }

    pub fn neighbors(self) -> [Pos; 4] {
        [
            self + DIRECTIONS[0],
            self + DIRECTIONS[1],
            self + DIRECTIONS[2],
            self + DIRECTIONS[3],
        ]
    }

    /// Only valid for adjacent positions.
    pub fn dir_to(self, other: Pos) -> Dir {
        match (other.r - self.r, other.c - self.c) {
            (-1, 0) => Dir::Up,
            (0, 1) => Dir::Right,
            (0, -1) => Dir::Left,
            (1, 0) => Dir::Down,
            _ => panic!("{:?} and {:?} are not adjacent", self, other),
        }
    }

    /// Injective for all positions inside a map of at most `MAX_SIZE` x `MAX_SIZE`.
    pub(crate) fn key(self) -> u32 {
        ((self.r as u32) << 16) | (self.c as u32 & 0xFFFF)
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.r, self.c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Left,
    Down,
}

/// The order here is the order in which moves are generated and therefore
/// determines which solution the solver finds first.
pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Left, Dir::Down];

impl Dir {
    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Left => Dir::Right,
            Dir::Down => Dir::Up,
        }
    }

    fn offset(self) -> (i32, i32) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Left => (0, -1),
            Dir::Down => (1, 0),
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Right => write!(f, "r"),
            Dir::Left => write!(f, "l"),
            Dir::Down => write!(f, "d"),
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.offset();
        Pos {
            r: self.r + dr,
            c: self.c + dc,
        }
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.inverse()
    }
}
