use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::{MapCell, Pos};

#[derive(Clone, PartialEq, Eq)]
pub struct Vec2d<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Vec2d<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `None` for anything outside the grid, including negative positions.
    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.offset(pos).map(|i| &self.data[i])
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Pos::new(r, c)))
    }

    pub(crate) fn scratchpad<U: Default + Clone>(&self) -> Vec2d<U> {
        self.scratchpad_with_default(U::default())
    }

    pub(crate) fn scratchpad_with_default<U: Clone>(&self, default: U) -> Vec2d<U> {
        Vec2d {
            data: vec![default; self.data.len()],
            rows: self.rows,
            cols: self.cols,
        }
    }

    fn offset(&self, pos: Pos) -> Option<usize> {
        if pos.r < 0 || pos.c < 0 {
            return None;
        }
        let (r, c) = (pos.r as usize, pos.c as usize);
        if r >= self.rows || c >= self.cols {
            return None;
        }
        Some(r * self.cols + c)
    }
}

impl Vec2d<bool> {
    /// Out of grid counts as unset.
    pub fn flag(&self, pos: Pos) -> bool {
        self.get(pos).cloned().unwrap_or(false)
    }
}

impl Vec2d<MapCell> {
    /// Pads shorter rows with `OutOfBounds`.
    pub(crate) fn new(grid: &[Vec<MapCell>]) -> Self {
        let max_cols = grid.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut data = Vec::with_capacity(grid.len() * max_cols);
        for row in grid {
            data.extend_from_slice(row);
            for _ in row.len()..max_cols {
                data.push(MapCell::OutOfBounds);
            }
        }
        Vec2d {
            data,
            rows: grid.len(),
            cols: max_cols,
        }
    }

    /// Out of grid counts as not floor.
    pub fn is_floor(&self, pos: Pos) -> bool {
        self.get(pos).map_or(false, |cell| cell.is_floor())
    }
}

impl Display for Vec2d<bool> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.max(1)) {
            for &cell in row {
                write!(f, "{}", if cell { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Display for Vec2d<Option<u32>> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.max(1)) {
            for cell in row {
                match cell {
                    Some(dist) => write!(f, "{:>3}", dist)?,
                    None => write!(f, "  -")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Debug> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.max(1)) {
            for cell in row {
                write!(f, "{:?} ", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        match self.offset(index) {
            Some(i) => &self.data[i],
            None => panic!("{:?} is outside of {}x{} grid", index, self.rows, self.cols),
        }
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        match self.offset(index) {
            Some(i) => &mut self.data[i],
            None => panic!("{:?} is outside of {}x{} grid", index, self.rows, self.cols),
        }
    }
}
