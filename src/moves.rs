use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Dir, Pos};

// Terminology:
// move = any action of the hero
// step = a move that doesn't change a box position
// push = a move that changes a box position

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// The hero walks one cell.
    Step(Dir),
    /// The hero gets behind the box at `box_pos` (if it isn't there already) and pushes it one cell.
    Push { box_pos: Pos, dir: Dir },
}

impl Move {
    pub fn dir(self) -> Dir {
        match self {
            Move::Step(dir) | Move::Push { dir, .. } => dir,
        }
    }

    pub fn is_push(self) -> bool {
        match self {
            Move::Step(_) => false,
            Move::Push { .. } => true,
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_push() {
            write!(f, "{}", self.dir().to_string().to_uppercase())
        } else {
            write!(f, "{}", self.dir())
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Step(dir) => write!(f, "{}", dir),
            Move::Push { box_pos, dir } => {
                write!(f, "{}{}", dir.to_string().to_uppercase(), box_pos)
            }
        }
    }
}

/// A track - moves in the order they're made.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Move>);

impl Moves {
    pub fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn push_cnt(&self) -> usize {
        self.0.iter().filter(|m| m.is_push()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.0
    }

    pub(crate) fn add(&mut self, mov: Move) {
        self.0.push(mov);
    }

    pub fn extend(&mut self, moves: &Moves) {
        self.0.extend_from_slice(&moves.0);
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Move> {
        self.0.iter()
    }
}

impl From<Vec<Move>> for Moves {
    fn from(moves: Vec<Move>) -> Self {
        Moves(moves)
    }
}

impl IntoIterator for Moves {
    type Item = Move;
    type IntoIter = ::std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = ::std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for mov in self {
            write!(f, "{}", mov)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
