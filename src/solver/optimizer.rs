use log::debug;

use crate::analysis::{self, StaticData};
use crate::data::Pos;
use crate::game::{self, GameErr};
use crate::moves::{Move, Moves};
use crate::state::State;

/// Removes blocks of moves that leave every box where it was.
///
/// For each move, looks for the furthest later move such that the block between them
/// doesn't change box placement and the hero could simply walk from where the block started
/// to where it ended. Such blocks are dropped. Returns the track unchanged
/// if there's nothing to remove.
pub(crate) fn optimize(
    sd: &StaticData,
    initial_state: &State,
    track: &Moves,
) -> Result<Moves, GameErr> {
    let grid = &sd.map.grid;
    let moves = track.as_slice();

    // states[i] is the state before moves[i]
    let mut states = Vec::with_capacity(moves.len() + 1);
    let mut state = initial_state.clone();
    states.push(state.clone());
    for &mov in moves {
        game::apply(grid, &mut state, mov)?;
        states.push(state.clone());
    }

    // box placement always follows `states`, only the hero can end up elsewhere
    let mut cur = initial_state.clone();
    let mut optimized = Moves::default();
    let mut i = 0;
    while i < moves.len() {
        match furthest_noop(sd, &states, moves, i, cur.player_pos) {
            Some(j) => {
                debug!("Removing moves {}..={}: {:?}", i, j, &moves[i..=j]);
                i = j + 1;
            }
            None => {
                game::apply(grid, &mut cur, moves[i])?;
                optimized.add(moves[i]);
                i += 1;
            }
        }
    }

    debug!(
        "Optimized {} moves to {}",
        track.move_cnt(),
        optimized.move_cnt()
    );
    Ok(optimized)
}

fn furthest_noop(
    sd: &StaticData,
    states: &[State],
    moves: &[Move],
    i: usize,
    player_pos: Pos,
) -> Option<usize> {
    let boxes_fingerprint = states[i].boxes_fingerprint();
    for j in (i..moves.len()).rev() {
        let after = &states[j + 1];
        if after.boxes_fingerprint() != boxes_fingerprint {
            continue;
        }
        let fits = match moves.get(j + 1) {
            // steps are relative to the hero so it has to be exactly where it would be
            Some(Move::Step(_)) => after.player_pos == player_pos,
            // pushes only need the hero to be able to walk behind the box
            Some(Move::Push { .. }) | None => reachable(sd, after, player_pos),
        };
        if fits {
            return Some(j);
        }
    }
    None
}

fn reachable(sd: &StaticData, state: &State, target: Pos) -> bool {
    let grid = &sd.map.grid;
    let box_map = analysis::box_map(grid, &state.boxes);
    analysis::step_map(grid, &box_map, state.player_pos).flag(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::Dir;
    use crate::game::Game;
    use crate::level::Level;

    const ROOM: &str = r"
#######
#     #
# @$ .#
#     #
#######";

    fn push(r: usize, c: usize, dir: Dir) -> Move {
        Move::Push {
            box_pos: Pos::new(r, c),
            dir,
        }
    }

    fn game() -> Game {
        let level: Level = ROOM.parse().unwrap();
        Game::new(&level).unwrap()
    }

    fn assert_solves(game: &Game, moves: &Moves) {
        let mut game = game.clone();
        for &mov in moves {
            game.apply_move(mov).unwrap();
        }
        assert!(game.is_solved());
    }

    #[test]
    fn nothing_to_remove() {
        let game = game();
        let track = Moves::new(vec![push(2, 3, Dir::Right), push(2, 4, Dir::Right)]);
        assert_eq!(game.optimize(&track).unwrap(), track);
    }

    #[test]
    fn back_and_forth_pushes() {
        let game = game();
        let track = Moves::new(vec![
            push(2, 3, Dir::Right),
            push(2, 4, Dir::Left),
            push(2, 3, Dir::Right),
            push(2, 4, Dir::Right),
        ]);
        assert_solves(&game, &track);

        let optimized = game.optimize(&track).unwrap();
        assert_eq!(
            optimized.as_slice(),
            &[push(2, 3, Dir::Right), push(2, 4, Dir::Right)]
        );
        assert_solves(&game, &optimized);
    }

    #[test]
    fn wandering_steps() {
        let game = game();
        let track = Moves::new(vec![
            Move::Step(Dir::Down),
            Move::Step(Dir::Up),
            Move::Step(Dir::Left),
            push(2, 3, Dir::Right),
            push(2, 4, Dir::Right),
            Move::Step(Dir::Down),
            Move::Step(Dir::Left),
        ]);
        let optimized = game.optimize(&track).unwrap();
        assert_eq!(
            optimized.as_slice(),
            &[push(2, 3, Dir::Right), push(2, 4, Dir::Right)]
        );
        assert_solves(&game, &optimized);
    }

    #[test]
    fn solver_track_stays_valid() {
        let level: Level = r"
#######
#     #
# $$  #
#  @ .#
#.    #
#######"
            .parse()
            .unwrap();
        let game = Game::new(&level).unwrap();
        let track = game.solve(false).unwrap().moves.unwrap();
        let optimized = game.optimize(&track).unwrap();
        assert!(optimized.move_cnt() <= track.move_cnt());
        assert_solves(&game, &optimized);
    }

    #[test]
    fn invalid_track() {
        let game = game();
        let track = Moves::new(vec![Move::Step(Dir::Up), Move::Step(Dir::Up)]);
        assert_eq!(
            game.optimize(&track),
            Err(GameErr::InvalidMove(Move::Step(Dir::Up)))
        );
    }
}
