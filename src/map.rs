use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// The immutable part of a level - walls, floor and goals.
#[derive(Clone, PartialEq, Eq)]
pub struct GoalMap {
    pub grid: Vec2d<MapCell>,
    pub goals: Vec<Pos>,
}

impl GoalMap {
    /// Goals are collected from the grid in ascending order.
    pub fn new(grid: Vec2d<MapCell>) -> Self {
        let goals = grid
            .positions()
            .filter(|&pos| grid[pos] == MapCell::Goal)
            .collect();
        GoalMap { grid, goals }
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        MapFormatter::new(&self.grid, None)
    }

    pub fn xsb_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(&self.grid, Some(state))
    }
}

impl Display for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    #[test]
    fn formatting_map() {
        let xsb_level = r"
*###*
#@$.#
*###*#
"
        .trim_start_matches('\n');
        let xsb_map = "
.###.
#  .#
.###.#
"
        .trim_start_matches('\n');

        let level: Level = xsb_level.parse().unwrap();
        assert_eq!(format!("{}", level.map), xsb_map);
        assert_eq!(format!("{:?}", level.map), xsb_map);
        assert_eq!(level.to_string(), xsb_level);
        assert_eq!(
            level.map.xsb_with_state(&level.state).to_string(),
            xsb_level
        );
    }

    #[test]
    fn formatting_out_of_bounds() {
        // ragged rows are padded but the padding isn't printed back
        let xsb_level = r"
_#####
_#@$.#
_####
"
        .trim_start_matches('\n');

        let level: Level = xsb_level.parse().unwrap();
        assert_eq!(level.map.grid.cols(), 6);
        assert_eq!(level.to_string(), xsb_level);
    }
}
