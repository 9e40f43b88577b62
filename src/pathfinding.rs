use std::collections::VecDeque;

use log::trace;

use crate::analysis::{self, StaticData};
use crate::data::{MapCell, Pos};
use crate::game::{self, GameErr};
use crate::moves::{Move, Moves};
use crate::state::State;
use crate::vec2d::Vec2d;

/// Cells the hero walks through to get from `player_pos` to `target`, one neighbor after another.
///
/// Doesn't include `player_pos`, ends with `target`. Empty if the hero is already there.
pub(crate) fn hero_track(
    grid: &Vec2d<MapCell>,
    box_map: &Vec2d<bool>,
    player_pos: Pos,
    target: Pos,
) -> Result<Vec<Pos>, GameErr> {
    if !grid.is_floor(target) || box_map.flag(target) {
        return Err(GameErr::UnreachableTarget(target));
    }

    let dists = distances(grid, box_map, target);
    trace!("Distances to {}:\n{}", target, dists);

    let mut cur = player_pos;
    let mut cur_dist = distance(&dists, cur).ok_or(GameErr::UnreachableTarget(target))?;
    let mut track = Vec::with_capacity(cur_dist as usize);
    while cur_dist > 0 {
        // there's always a neighbor one step closer, the first one in `DIRECTIONS` wins
        let (next_dist, next) = cur
            .neighbors()
            .iter()
            .filter_map(|&pos| distance(&dists, pos).map(|dist| (dist, pos)))
            .min_by_key(|&(dist, _)| dist)
            .ok_or(GameErr::UnreachableTarget(target))?;
        if next_dist >= cur_dist {
            return Err(GameErr::UnreachableTarget(target));
        }
        track.push(next);
        cur = next;
        cur_dist = next_dist;
    }
    Ok(track)
}

/// BFS from `target` over cells the hero can walk on.
fn distances(grid: &Vec2d<MapCell>, box_map: &Vec2d<bool>, target: Pos) -> Vec2d<Option<u32>> {
    let mut dists = grid.scratchpad_with_default(None);
    dists[target] = Some(0);

    let mut to_visit = VecDeque::new();
    to_visit.push_back((target, 0));
    while let Some((cur, dist)) = to_visit.pop_front() {
        for &next in &cur.neighbors() {
            if grid.is_floor(next) && !box_map[next] && dists[next].is_none() {
                dists[next] = Some(dist + 1);
                to_visit.push_back((next, dist + 1));
            }
        }
    }

    dists
}

fn distance(dists: &Vec2d<Option<u32>>, pos: Pos) -> Option<u32> {
    dists.get(pos).cloned().and_then(|dist| dist)
}

/// Inserts the steps the hero has to make before each push so every move is to a neighboring cell.
pub(crate) fn expand_track(
    sd: &StaticData,
    initial_state: &State,
    track: &Moves,
) -> Result<Moves, GameErr> {
    let grid = &sd.map.grid;
    let mut state = initial_state.clone();
    let mut expanded = Moves::default();

    for &mov in track {
        if let Move::Push { box_pos, dir } = mov {
            let box_map = analysis::box_map(grid, &state.boxes);
            for pos in hero_track(grid, &box_map, state.player_pos, box_pos - dir)? {
                let step = Move::Step(state.player_pos.dir_to(pos));
                game::apply(grid, &mut state, step)?;
                expanded.add(step);
            }
        }
        game::apply(grid, &mut state, mov)?;
        expanded.add(mov);
    }

    Ok(expanded)
}
