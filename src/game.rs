use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use log::debug;

use crate::analysis::{self, StaticData};
use crate::data::{Dir, MapCell, Pos};
use crate::level::{Level, LevelErr};
use crate::moves::{Move, Moves};
use crate::pathfinding;
use crate::replay::Replay;
use crate::solver::{self, optimizer, SolverOk};
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameErr {
    /// The move would put the hero or a box into a wall or onto another box.
    InvalidMove(Move),
    /// The hero can't walk to this position.
    UnreachableTarget(Pos),
    MalformedLevel(LevelErr),
}

impl Display for GameErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            GameErr::InvalidMove(mov) => write!(f, "Invalid move: {:?}", mov),
            GameErr::UnreachableTarget(pos) => write!(f, "Hero can't reach {}", pos),
            GameErr::MalformedLevel(err) => write!(f, "Malformed level: {}", err),
        }
    }
}

impl Error for GameErr {}

impl From<LevelErr> for GameErr {
    fn from(err: LevelErr) -> Self {
        GameErr::MalformedLevel(err)
    }
}

/// A level being played.
///
/// Owns the current state and everything derived from it. The derived data is recomputed
/// after every accepted move so it's always consistent with the state.
#[derive(Clone)]
pub struct Game {
    sd: StaticData,
    state: State,
    box_map: Vec2d<bool>,
    step_map: Vec2d<bool>,
    moves: Vec<Move>,
    fingerprint: u32,
    boxes_fingerprint: u32,
}

impl Game {
    pub fn new(level: &Level) -> Result<Self, GameErr> {
        level.validate()?;

        let sd = StaticData::new(level.map.clone());
        debug!("Good cells:\n{}", sd.good_map);
        Ok(Self::with_state(sd, level.state.clone()))
    }

    fn with_state(sd: StaticData, state: State) -> Self {
        let mut game = Game {
            box_map: sd.map.grid.scratchpad(),
            step_map: sd.map.grid.scratchpad(),
            sd,
            state,
            moves: Vec::new(),
            fingerprint: 0,
            boxes_fingerprint: 0,
        };
        game.refresh();
        game
    }

    fn refresh(&mut self) {
        let grid = &self.sd.map.grid;
        self.box_map = analysis::box_map(grid, &self.state.boxes);
        self.step_map = analysis::step_map(grid, &self.box_map, self.state.player_pos);
        self.moves = analysis::list_moves(
            &self.box_map,
            &self.sd.good_map,
            &self.step_map,
            &self.state.boxes,
        );
        self.fingerprint = self.state.fingerprint();
        self.boxes_fingerprint = self.state.boxes_fingerprint();
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn level(&self) -> Level {
        Level::new(self.sd.map.clone(), self.state.clone())
    }

    pub fn good_map(&self) -> &Vec2d<bool> {
        &self.sd.good_map
    }

    pub fn box_map(&self) -> &Vec2d<bool> {
        &self.box_map
    }

    pub fn step_map(&self) -> &Vec2d<bool> {
        &self.step_map
    }

    /// Pushes that don't put a box onto a dead cell, in the order the solver tries them.
    pub fn legal_moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }

    pub fn boxes_fingerprint(&self) -> u32 {
        self.boxes_fingerprint
    }

    pub fn is_solved(&self) -> bool {
        self.boxes_fingerprint == self.sd.solved_boxes_fingerprint
    }

    /// The move the hero makes when told to go in `dir` - a step, a push of the adjacent box or nothing.
    pub fn hero_move(&self, dir: Dir) -> Option<Move> {
        let next = self.state.player_pos + dir;
        if !self.sd.map.grid.is_floor(next) {
            return None;
        }
        if !self.box_map[next] {
            return Some(Move::Step(dir));
        }
        let dest = next + dir;
        if self.sd.map.grid.is_floor(dest) && !self.box_map[dest] {
            Some(Move::Push { box_pos: next, dir })
        } else {
            None
        }
    }

    pub fn apply_move(&mut self, mov: Move) -> Result<(), GameErr> {
        if let Move::Push { box_pos, dir } = mov {
            // the solver skips this, the move generator already guarantees it
            if !self.step_map.flag(box_pos - dir) {
                return Err(GameErr::InvalidMove(mov));
            }
        }
        apply(&self.sd.map.grid, &mut self.state, mov)?;
        self.refresh();
        Ok(())
    }

    /// Reverts `last` which must be the last move applied.
    ///
    /// The exact geometric inverse: a step is reverted by stepping back, a push by stepping back
    /// and pulling the box along. A push made from a distance leaves the hero behind the box,
    /// not where the walk to it started.
    pub fn undo(&mut self, last: Move) -> Result<(), GameErr> {
        undo(&self.sd.map.grid, &mut self.state, last)?;
        self.refresh();
        Ok(())
    }

    /// Searches for a push track from the current state. The game itself is left untouched.
    pub fn solve(&self, print_status: bool) -> Result<SolverOk, GameErr> {
        solver::search(&self.sd, &self.state, print_status)
    }

    /// Removes moves that don't contribute anything from a track starting at the current state.
    pub fn optimize(&self, track: &Moves) -> Result<Moves, GameErr> {
        optimizer::optimize(&self.sd, &self.state, track)
    }

    /// Cells the hero walks through to get to `target`, excluding the current position.
    pub fn hero_track(&self, target: Pos) -> Result<Vec<Pos>, GameErr> {
        pathfinding::hero_track(&self.sd.map.grid, &self.box_map, self.state.player_pos, target)
    }

    /// Turns a track (where pushes can be made from a distance) into one the hero can follow cell by cell.
    pub fn expand_track(&self, track: &Moves) -> Result<Moves, GameErr> {
        pathfinding::expand_track(&self.sd, &self.state, track)
    }

    /// States after each move of the track, starting at the current state.
    pub fn replay<'a>(&'a self, track: &'a Moves) -> Replay<'a> {
        Replay::new(&self.sd.map, self.state.clone(), track)
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sd.map.xsb_with_state(&self.state))
    }
}

impl Debug for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Applies the move without checking whether the hero can actually get behind a pushed box.
pub(crate) fn apply(grid: &Vec2d<MapCell>, state: &mut State, mov: Move) -> Result<(), GameErr> {
    match mov {
        Move::Step(dir) => {
            let dest = state.player_pos + dir;
            if !grid.is_floor(dest) || state.has_box(dest) {
                return Err(GameErr::InvalidMove(mov));
            }
            state.player_pos = dest;
        }
        Move::Push { box_pos, dir } => {
            let dest = box_pos + dir;
            if !grid.is_floor(dest) || state.has_box(dest) {
                return Err(GameErr::InvalidMove(mov));
            }
            if !state.move_box(box_pos, dest) {
                return Err(GameErr::InvalidMove(mov));
            }
            state.player_pos = box_pos;
        }
    }
    Ok(())
}

pub(crate) fn undo(grid: &Vec2d<MapCell>, state: &mut State, last: Move) -> Result<(), GameErr> {
    match last {
        Move::Step(dir) => apply(grid, state, Move::Step(dir.inverse()))
            .map_err(|_| GameErr::InvalidMove(last)),
        Move::Push { box_pos, dir } => {
            // the box is one cell further in the push direction than the hero
            let pushed = state.player_pos + dir;
            let back = state.player_pos - dir;
            if state.player_pos != box_pos
                || !state.has_box(pushed)
                || !grid.is_floor(back)
                || state.has_box(back)
            {
                return Err(GameErr::InvalidMove(last));
            }
            state.player_pos = back;
            state.move_box(pushed, box_pos);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(level: &str) -> Game {
        let level: Level = level.parse().unwrap();
        Game::new(&level).unwrap()
    }

    #[test]
    fn one_push_solves() {
        let mut game = game(
            r"
#####
#@$.#
#####",
        );
        assert!(!game.is_solved());
        assert_eq!(game.legal_moves().len(), 1);

        let mov = game.legal_moves()[0];
        assert_eq!(
            mov,
            Move::Push {
                box_pos: Pos::new(1, 2),
                dir: Dir::Right
            }
        );
        game.apply_move(mov).unwrap();
        assert!(game.is_solved());
        assert_eq!(game.state().player_pos(), Pos::new(1, 2));
        assert_eq!(game.state().boxes(), &[Pos::new(1, 3)]);
    }

    #[test]
    fn solved_from_start() {
        let game = game(
            r"
#####
#@ *#
#####",
        );
        assert!(game.is_solved());
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn solved_regardless_of_hero() {
        let mut game = game(
            r"
######
#@ * #
######",
        );
        assert!(game.is_solved());
        game.apply_move(Move::Step(Dir::Right)).unwrap();
        assert!(game.is_solved());
    }

    #[test]
    fn malformed() {
        let level: Level = r"
######
#@$..#
######"
            .parse()
            .unwrap();
        assert_eq!(
            Game::new(&level).unwrap_err(),
            GameErr::MalformedLevel(LevelErr::BoxesGoals)
        );
    }

    #[test]
    fn invalid_moves() {
        let mut game = game(
            r"
######
#@$$.#
#   .#
######",
        );
        let fingerprint = game.fingerprint();

        let into_wall = Move::Step(Dir::Up);
        assert_eq!(game.apply_move(into_wall), Err(GameErr::InvalidMove(into_wall)));

        let into_box = Move::Step(Dir::Right);
        assert_eq!(game.apply_move(into_box), Err(GameErr::InvalidMove(into_box)));

        let box_into_box = Move::Push {
            box_pos: Pos::new(1, 2),
            dir: Dir::Right,
        };
        assert_eq!(
            game.apply_move(box_into_box),
            Err(GameErr::InvalidMove(box_into_box))
        );

        let no_box = Move::Push {
            box_pos: Pos::new(2, 2),
            dir: Dir::Right,
        };
        assert_eq!(game.apply_move(no_box), Err(GameErr::InvalidMove(no_box)));

        // the hero would have to stand on the other box
        let unreachable = Move::Push {
            box_pos: Pos::new(1, 2),
            dir: Dir::Left,
        };
        assert_eq!(
            game.apply_move(unreachable),
            Err(GameErr::InvalidMove(unreachable))
        );

        assert_eq!(game.fingerprint(), fingerprint);
    }

    #[test]
    fn hero_moves() {
        let game = game(
            r"
######
#@$$.#
#   .#
######",
        );
        assert_eq!(game.hero_move(Dir::Up), None);
        assert_eq!(game.hero_move(Dir::Left), None);
        assert_eq!(game.hero_move(Dir::Down), Some(Move::Step(Dir::Down)));
        // box behind box
        assert_eq!(game.hero_move(Dir::Right), None);
    }

    #[test]
    fn apply_undo_roundtrip() {
        let level: Level = r"
#######
#     #
# $$  #
#  @ .#
#.    #
#######"
            .parse()
            .unwrap();
        let mut game = Game::new(&level).unwrap();

        let snapshot = |game: &Game| {
            (
                game.state().clone(),
                game.fingerprint(),
                game.boxes_fingerprint(),
            )
        };

        // every move the hero can make from here
        for &dir in &crate::data::DIRECTIONS {
            if let Some(mov) = game.hero_move(dir) {
                let before = snapshot(&game);
                game.apply_move(mov).unwrap();
                assert_ne!(game.fingerprint(), before.1);
                game.undo(mov).unwrap();
                assert_eq!(snapshot(&game), before);
                assert!(game.step_map().flag(game.state().player_pos()));
            }
        }

        // every generated push, made after walking behind the box
        let pushes = game.legal_moves().to_vec();
        assert!(!pushes.is_empty());
        for mov in pushes {
            if let Move::Push { box_pos, dir } = mov {
                let mut game = game.clone();
                for pos in game.hero_track(box_pos - dir).unwrap() {
                    let step = Move::Step(game.state().player_pos().dir_to(pos));
                    game.apply_move(step).unwrap();
                }

                let before = snapshot(&game);
                game.apply_move(mov).unwrap();
                assert_ne!(game.boxes_fingerprint(), before.2);
                game.undo(mov).unwrap();
                assert_eq!(snapshot(&game), before);
            }
        }
    }

    #[test]
    fn undo_push_from_distance() {
        let mut game = game(
            r"
######
#@ $.#
######",
        );
        let push = Move::Push {
            box_pos: Pos::new(1, 3),
            dir: Dir::Right,
        };
        let boxes_before = game.boxes_fingerprint();
        game.apply_move(push).unwrap();
        game.undo(push).unwrap();
        assert_eq!(game.boxes_fingerprint(), boxes_before);
        assert_eq!(game.state().player_pos(), Pos::new(1, 2));
    }

    #[test]
    fn invariants_after_moves() {
        let mut game = game(
            r"
#######
#     #
# $$  #
#  @ .#
#.    #
#######",
        );
        for _ in 0..3 {
            let mov = game.legal_moves()[0];
            game.apply_move(mov).unwrap();

            let boxes = game.state().boxes();
            assert!(boxes.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(game.step_map().flag(game.state().player_pos()));
        }
    }
}
