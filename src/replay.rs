use std::slice;

use crate::game::{self, GameErr};
use crate::map::GoalMap;
use crate::moves::{Move, Moves};
use crate::state::State;

/// Plays a track one move at a time, yielding each move together with the state it leads to.
///
/// Stops after the first move that can't be made.
#[derive(Debug)]
pub struct Replay<'a> {
    map: &'a GoalMap,
    state: State,
    moves: slice::Iter<'a, Move>,
    failed: bool,
}

impl<'a> Replay<'a> {
    pub(crate) fn new(map: &'a GoalMap, initial_state: State, track: &'a Moves) -> Self {
        Replay {
            map,
            state: initial_state,
            moves: track.iter(),
            failed: false,
        }
    }

    /// The state after the last successful move.
    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Iterator for Replay<'_> {
    type Item = Result<(Move, State), GameErr>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mov = *self.moves.next()?;
        match game::apply(&self.map.grid, &mut self.state, mov) {
            Ok(()) => Some(Ok((mov, self.state.clone()))),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
