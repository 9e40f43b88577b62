use crate::data::{MapCell, Pos, DIRECTIONS};
use crate::map::GoalMap;
use crate::moves::Move;
use crate::state;
use crate::vec2d::Vec2d;

/// Everything about a level that doesn't change while it's being played or searched.
#[derive(Debug, Clone)]
pub(crate) struct StaticData {
    pub(crate) map: GoalMap,
    pub(crate) good_map: Vec2d<bool>,
    pub(crate) solved_boxes_fingerprint: u32,
}

impl StaticData {
    pub(crate) fn new(map: GoalMap) -> Self {
        let good_map = good_map(&map.grid);
        // goals are sorted just like boxes
        let solved_boxes_fingerprint = state::fingerprint(&map.goals);
        StaticData {
            map,
            good_map,
            solved_boxes_fingerprint,
        }
    }
}

pub(crate) fn box_map(grid: &Vec2d<MapCell>, boxes: &[Pos]) -> Vec2d<bool> {
    let mut box_map = grid.scratchpad();
    for &b in boxes {
        box_map[b] = true;
    }
    box_map
}

/// Cells from which a lone box can still be pushed onto some goal.
///
/// Depends only on walls and goals so it's computed once per level.
/// Starts from the goals and keeps adding cells from which a box can be pushed onto an already good cell
/// (the cell on the other side, where the hero has to stand, must be floor) until nothing changes.
pub(crate) fn good_map(grid: &Vec2d<MapCell>) -> Vec2d<bool> {
    let mut good: Vec2d<bool> = grid.scratchpad();

    loop {
        let mut changed = false;
        for pos in grid.positions() {
            // walls and out of bounds cells are never good
            if good[pos] || !grid[pos].is_floor() {
                continue;
            }

            let pushable_to_good = grid[pos] == MapCell::Goal
                || DIRECTIONS
                    .iter()
                    .any(|&dir| good.flag(pos + dir) && grid.is_floor(pos - dir));
            if pushable_to_good {
                good[pos] = true;
                changed = true;
            }
        }
        if !changed {
            return good;
        }
    }
}

/// Cells the hero can walk to without pushing anything.
pub(crate) fn step_map(grid: &Vec2d<MapCell>, box_map: &Vec2d<bool>, player_pos: Pos) -> Vec2d<bool> {
    let mut reachable = grid.scratchpad();
    reachable[player_pos] = true;

    let mut to_visit = vec![player_pos];
    while let Some(cur) = to_visit.pop() {
        for &next in &cur.neighbors() {
            if grid.is_floor(next) && !box_map[next] && !reachable[next] {
                reachable[next] = true;
                to_visit.push(next);
            }
        }
    }

    reachable
}

/// All pushes possible right now.
///
/// Ordered by box position and then by `DIRECTIONS` - the solver relies on this to be deterministic.
pub(crate) fn list_moves(
    box_map: &Vec2d<bool>,
    good_map: &Vec2d<bool>,
    step_map: &Vec2d<bool>,
    boxes: &[Pos],
) -> Vec<Move> {
    let mut moves = Vec::new();
    for &box_pos in boxes {
        for &dir in &DIRECTIONS {
            let dest = box_pos + dir;
            let player_pos = box_pos - dir;
            if good_map.flag(dest)
                && step_map.flag(player_pos)
                && !box_map.flag(dest)
                && !box_map.flag(player_pos)
            {
                moves.push(Move::Push { box_pos, dir });
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::Dir;
    use crate::level::Level;

    fn analyze(level: &str) -> (Level, Vec2d<bool>, Vec2d<bool>, Vec2d<bool>) {
        let level: Level = level.parse().unwrap();
        let grid = &level.map.grid;
        let good = good_map(grid);
        let boxes = box_map(grid, &level.state.boxes);
        let steps = step_map(grid, &boxes, level.state.player_pos);
        (level, good, boxes, steps)
    }

    #[test]
    fn good_cells() {
        let (_, good, _, steps) = analyze(
            r"
#####
##@##
##$##
#  .#
#####",
        );
        let expected_good = r"
00000
00000
00100
00110
00000
"
        .trim_start();
        let expected_steps = r"
00000
00100
00000
00000
00000
"
        .trim_start();
        assert_eq!(good.to_string(), expected_good);
        assert_eq!(steps.to_string(), expected_steps);
    }

    #[test]
    fn out_of_bounds_never_good() {
        let (_, good, _, _) = analyze(
            r"
######
#@$._#
######",
        );
        assert_eq!(good.to_string(), "000000\n001100\n000000\n");
    }

    #[test]
    fn good_cells_room() {
        let (_, good, _, steps) = analyze(
            r"
######
#@   #
# $  #
#  $ #
# .. #
######",
        );
        let expected_good = r"
000000
000000
001100
001100
001100
000000
"
        .trim_start();
        let expected_steps = r"
000000
011110
010110
011010
011110
000000
"
        .trim_start();
        assert_eq!(good.to_string(), expected_good);
        assert_eq!(steps.to_string(), expected_steps);
    }

    #[test]
    fn move_order() {
        let (level, good, boxes, steps) = analyze(
            r"
######
#@   #
# $  #
#  $ #
# .. #
######",
        );
        let moves = list_moves(&boxes, &good, &steps, &level.state.boxes);
        let push = |r, c, dir| Move::Push {
            box_pos: Pos::new(r, c),
            dir,
        };
        assert_eq!(
            moves,
            vec![
                push(2, 2, Dir::Right),
                push(2, 2, Dir::Down),
                push(3, 3, Dir::Up),
                push(3, 3, Dir::Left),
                push(3, 3, Dir::Down),
            ]
        );
    }

    #[test]
    fn boxes_block_pushes() {
        // the left box can't be pushed into the right one
        // and the right one can't be pushed because the hero can't get behind it
        let (level, good, boxes, steps) = analyze(
            r"
#######
#@$$..#
#######",
        );
        let moves = list_moves(&boxes, &good, &steps, &level.state.boxes);
        assert!(moves.is_empty());
    }

    #[test]
    fn one_push_to_goal() {
        let (level, good, boxes, steps) = analyze(
            r"
#####
#@$.#
#####",
        );
        let moves = list_moves(&boxes, &good, &steps, &level.state.boxes);
        assert_eq!(
            moves,
            vec![Move::Push {
                box_pos: Pos::new(1, 2),
                dir: Dir::Right
            }]
        );
    }
}
