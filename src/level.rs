use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos, MAX_SIZE};
use crate::map::GoalMap;
use crate::map_formatter::MapFormatter;
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Reasons a level is rejected before any analysis or search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelErr {
    TooLarge,
    OutOfGrid(Pos),
    NotFloor(Pos),
    DuplicateBox(Pos),
    NoGoals,
    BoxesGoals,
    IncompleteBorder,
}

impl Display for LevelErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            LevelErr::TooLarge => write!(f, "Map larger than {} rows/columns", MAX_SIZE),
            LevelErr::OutOfGrid(pos) => write!(f, "Position {} is outside the map", pos),
            LevelErr::NotFloor(pos) => write!(f, "Hero or box on a non-floor cell at {}", pos),
            LevelErr::DuplicateBox(pos) => write!(f, "Multiple boxes at {}", pos),
            LevelErr::NoGoals => write!(f, "No goals"),
            LevelErr::BoxesGoals => write!(f, "Different number of boxes and goals"),
            LevelErr::IncompleteBorder => write!(
                f,
                "Hero can exit the level because of missing border"
            ),
        }
    }
}

impl Error for LevelErr {}

/// A level as handed over by the level loader: the map plus the initial hero and box positions.
#[derive(Clone, PartialEq, Eq)]
pub struct Level {
    pub map: GoalMap,
    pub state: State,
}

impl Level {
    pub fn new(map: GoalMap, state: State) -> Self {
        Level { map, state }
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.map.xsb_with_state(&self.state)
    }

    pub fn xsb_solution<'a>(&'a self, moves: &'a Moves, include_steps: bool) -> SolutionFormatter<'a> {
        SolutionFormatter::new(&self.map, &self.state, moves, include_steps)
    }

    pub fn validate(&self) -> Result<(), LevelErr> {
        let grid = &self.map.grid;
        if grid.rows() > MAX_SIZE || grid.cols() > MAX_SIZE {
            return Err(LevelErr::TooLarge);
        }

        check_floor(grid, self.state.player_pos)?;
        for &b in &self.state.boxes {
            check_floor(grid, b)?;
        }
        // sorted so duplicates are always next to each other
        for pair in self.state.boxes.windows(2) {
            if pair[0] == pair[1] {
                return Err(LevelErr::DuplicateBox(pair[0]));
            }
        }

        if self.map.goals.is_empty() {
            return Err(LevelErr::NoGoals);
        }
        if self.map.goals.len() != self.state.boxes.len() {
            return Err(LevelErr::BoxesGoals);
        }

        walkable_area(grid, self.state.player_pos).map(|_| ())
    }

    /// Turns floor the hero can never get to into `OutOfBounds`.
    ///
    /// Boxes are ignored when looking for reachable cells. Goals and cells holding a box
    /// are kept as they are so the level stays solvable (or not) in the same way.
    pub fn normalized(&self) -> Result<Level, LevelErr> {
        self.validate()?;

        let visited = walkable_area(&self.map.grid, self.state.player_pos)?;
        let mut grid = self.map.grid.clone();
        for pos in grid.positions() {
            if grid[pos] == MapCell::Floor && !visited[pos] && !self.state.has_box(pos) {
                grid[pos] = MapCell::OutOfBounds;
            }
        }

        Ok(Level::new(GoalMap::new(grid), self.state.clone()))
    }
}

fn check_floor(grid: &Vec2d<MapCell>, pos: Pos) -> Result<(), LevelErr> {
    match grid.get(pos) {
        None => Err(LevelErr::OutOfGrid(pos)),
        Some(cell) if !cell.is_floor() => Err(LevelErr::NotFloor(pos)),
        Some(_) => Ok(()),
    }
}

/// Everything the hero could walk to if there were no boxes.
fn walkable_area(grid: &Vec2d<MapCell>, player_pos: Pos) -> Result<Vec2d<bool>, LevelErr> {
    let mut visited: Vec2d<bool> = grid.scratchpad();
    visited[player_pos] = true;

    let mut to_visit = vec![player_pos];
    while let Some(cur) = to_visit.pop() {
        for &new_pos in &cur.neighbors() {
            match grid.get(new_pos) {
                // we got out of bounds without hitting a wall
                None | Some(MapCell::OutOfBounds) => return Err(LevelErr::IncompleteBorder),
                Some(cell) => {
                    if cell.is_floor() && !visited[new_pos] {
                        visited[new_pos] = true;
                        to_visit.push(new_pos);
                    }
                }
            }
        }
    }

    Ok(visited)
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}
