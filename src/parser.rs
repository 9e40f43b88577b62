use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::{MapCell, Pos, MAX_SIZE};
use crate::level::Level;
use crate::map::GoalMap;
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Pos(usize, usize),
    TooLarge,
    MultiplePlayers,
    NoPlayer,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::TooLarge => write!(f, "Map larger than {} rows/columns", MAX_SIZE),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::NoPlayer => write!(f, "No player"),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses (a subset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format)
///
/// `_` marks out of bounds cells, lines starting with `;` are comments.
pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let mut grid = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for line in level.lines().filter(|line| !line.starts_with(';')) {
        let r = grid.len();
        if r >= MAX_SIZE {
            return Err(ParserErr::TooLarge);
        }
        let mut line_tiles = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            if c >= MAX_SIZE {
                return Err(ParserErr::TooLarge);
            }
            let pos = Pos::new(r, c);

            let tile = match cur_char {
                '#' => MapCell::Wall,
                ' ' | '-' => MapCell::Floor,
                '.' => MapCell::Goal,
                '_' => MapCell::OutOfBounds,
                '@' | '+' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    if cur_char == '+' {
                        MapCell::Goal
                    } else {
                        MapCell::Floor
                    }
                }
                '$' => {
                    boxes.push(pos);
                    MapCell::Floor
                }
                '*' => {
                    boxes.push(pos);
                    MapCell::Goal
                }
                _ => return Err(ParserErr::Pos(r, c)),
            };
            line_tiles.push(tile);
        }
        grid.push(line_tiles);
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    let map = GoalMap::new(Vec2d::new(&grid));
    Ok(Level::new(map, State::new(player_pos, boxes)))
}
