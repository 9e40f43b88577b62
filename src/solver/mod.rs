pub(crate) mod optimizer;
mod stats;

use std::fmt::{self, Debug, Formatter};

use fnv::FnvHashSet;
use log::{debug, error, info};

use crate::analysis::{self, StaticData};
use crate::game::{self, Game, GameErr};
use crate::level::Level;
use crate::moves::{Move, Moves};
use crate::state::State;
use crate::Solve;

pub use self::stats::Stats;

pub struct SolverOk {
    /// `None` if there's no solution, empty if the level was already solved.
    pub moves: Option<Moves>,
    pub stats: Stats,
}

impl SolverOk {
    fn new(moves: Option<Moves>, stats: Stats) -> Self {
        Self { moves, stats }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "No solution")?,
            Some(ref moves) => writeln!(f, "{}", moves)?,
        }
        write!(f, "{}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, print_status: bool) -> Result<SolverOk, GameErr> {
        debug!("Processing level...");
        let game = Game::new(self)?;
        debug!("Processed level");
        game.solve(print_status)
    }
}

impl Solve for Game {
    fn solve(&self, print_status: bool) -> Result<SolverOk, GameErr> {
        Game::solve(self, print_status)
    }
}

/// One level of the search - a state and the pushes still to be tried from it.
struct Frame {
    state: State,
    moves: Vec<Move>,
    next: usize,
}

impl Frame {
    fn new(sd: &StaticData, state: State) -> Self {
        let grid = &sd.map.grid;
        let box_map = analysis::box_map(grid, &state.boxes);
        let step_map = analysis::step_map(grid, &box_map, state.player_pos);
        let moves = analysis::list_moves(&box_map, &sd.good_map, &step_map, &state.boxes);
        Frame {
            state,
            moves,
            next: 0,
        }
    }
}

/// Depth first search for any push track that solves the level.
///
/// Pushes are tried in the order they're generated so the first solution found
/// is always the same for the same level.
pub(crate) fn search(
    sd: &StaticData,
    initial_state: &State,
    print_status: bool,
) -> Result<SolverOk, GameErr> {
    debug!("Search called");

    let mut stats = Stats::new();
    let mut visited = FnvHashSet::default();

    visited.insert(initial_state.fingerprint());
    stats.add_created(0);
    stats.add_unique_visited(0);
    if print_status {
        println!("Visited new depth: 0");
        println!("{:?}", stats);
    }

    if initial_state.boxes_fingerprint() == sd.solved_boxes_fingerprint {
        debug!("Already solved");
        return Ok(SolverOk::new(Some(Moves::default()), stats));
    }

    // invariant: track[i] leads from stack[i] to stack[i + 1]
    let mut track = Vec::new();
    let mut stack = vec![Frame::new(sd, initial_state.clone())];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.moves.len() {
            stack.pop();
            track.pop();
            continue;
        }
        let mov = frame.moves[frame.next];
        frame.next += 1;

        let mut new_state = frame.state.clone();
        if let Err(err) = game::apply(&sd.map.grid, &mut new_state, mov) {
            error!(
                "Generated illegal move {:?} in state:\n{}",
                mov,
                sd.map.xsb_with_state(&frame.state)
            );
            return Err(err);
        }

        let depth = track.len() + 1;
        stats.add_created(depth);
        if !visited.insert(new_state.fingerprint()) {
            stats.add_reached_duplicate(depth);
            continue;
        }
        if stats.add_unique_visited(depth) && print_status {
            println!("Visited new depth: {}", depth);
            println!("{:?}", stats);
        }

        track.push(mov);
        if new_state.boxes_fingerprint() == sd.solved_boxes_fingerprint {
            info!("Solved, {} pushes", track.len());
            return Ok(SolverOk::new(Some(Moves::new(track)), stats));
        }
        stack.push(Frame::new(sd, new_state));
    }

    info!("No solution, {} states visited", stats.total_unique_visited());
    Ok(SolverOk::new(None, stats))
}
