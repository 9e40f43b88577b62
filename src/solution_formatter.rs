use std::fmt::{self, Debug, Display, Formatter};

use crate::map::GoalMap;
use crate::moves::Moves;
use crate::replay::Replay;
use crate::state::State;

/// Prints the initial state and then the state after every push (or every move with `include_steps`),
/// separated by empty lines.
pub struct SolutionFormatter<'a> {
    map: &'a GoalMap,
    initial_state: &'a State,
    moves: &'a Moves,
    include_steps: bool,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(
        map: &'a GoalMap,
        initial_state: &'a State,
        moves: &'a Moves,
        include_steps: bool,
    ) -> Self {
        Self {
            map,
            initial_state,
            moves,
            include_steps,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.map.xsb_with_state(self.initial_state))?;

        let replay = Replay::new(self.map, self.initial_state.clone(), self.moves);
        for step in replay {
            match step {
                Ok((mov, state)) => {
                    if mov.is_push() || self.include_steps {
                        writeln!(f, "{}", self.map.xsb_with_state(&state))?;
                    }
                }
                // somebody passed moves from a different level
                Err(err) => writeln!(f, "{}", err)?,
            }
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
