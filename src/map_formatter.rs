use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Contents, MapCell, Pos};
use crate::state::State;
use crate::vec2d::Vec2d;

pub struct MapFormatter<'a> {
    grid: &'a Vec2d<MapCell>,
    state: Option<&'a State>,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(grid: &'a Vec2d<MapCell>, state: Option<&'a State>) -> Self {
        Self { grid, state }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut state_grid = self.grid.scratchpad_with_default(Contents::Empty);
        if let Some(state) = self.state {
            for &b in &state.boxes {
                if state_grid.get(b).is_some() {
                    state_grid[b] = Contents::Box;
                }
            }
            if state_grid.get(state.player_pos).is_some() {
                state_grid[state.player_pos] = Contents::Player;
            }
        }

        for r in 0..self.grid.rows() {
            // don't print trailing out of bounds cells to match the input level strings
            let mut row_len = 0;
            for c in 0..self.grid.cols() {
                let pos = Pos::new(r, c);
                if self.grid[pos] != MapCell::OutOfBounds || state_grid[pos] != Contents::Empty {
                    row_len = c + 1;
                }
            }

            for c in 0..row_len {
                let pos = Pos::new(r, c);
                Self::write_cell_xsb(self.grid[pos], state_grid[pos], f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_cell_xsb(cell: MapCell, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
        match (cell, contents) {
            (MapCell::Wall, Contents::Empty) => write!(f, "#"),
            (MapCell::Floor, Contents::Empty) => write!(f, " "),
            (MapCell::Floor, Contents::Box) => write!(f, "$"),
            (MapCell::Floor, Contents::Player) => write!(f, "@"),
            (MapCell::Goal, Contents::Empty) => write!(f, "."),
            (MapCell::Goal, Contents::Box) => write!(f, "*"),
            (MapCell::Goal, Contents::Player) => write!(f, "+"),
            (MapCell::OutOfBounds, Contents::Empty) => write!(f, "_"),
            // only possible for levels that failed validation
            (MapCell::Wall, _) | (MapCell::OutOfBounds, _) => write!(f, "?"),
        }
    }
}

impl Display for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl Debug for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
