use crate::data::Pos;

/// Hero and box positions for one point in time.
///
/// Boxes are always sorted and unique - equality, hashing and both fingerprints rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub(crate) player_pos: Pos,
    pub(crate) boxes: Vec<Pos>,
}

impl State {
    pub fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort(); // sort to detect equal states when we reorder boxes
        State { player_pos, boxes }
    }

    pub fn player_pos(&self) -> Pos {
        self.player_pos
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    /// Moves the box at `from` to `to` and restores the ordering.
    ///
    /// Returns `false` if there's no box at `from`.
    pub(crate) fn move_box(&mut self, from: Pos, to: Pos) -> bool {
        match self.boxes.binary_search(&from) {
            Ok(index) => {
                self.boxes.remove(index);
                let insert_at = self.boxes.binary_search(&to).unwrap_or_else(|i| i);
                self.boxes.insert(insert_at, to);
                true
            }
            Err(_) => false,
        }
    }

    pub fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }

    /// Identifies the whole state. Two states with the same fingerprint are considered identical.
    pub fn fingerprint(&self) -> u32 {
        fold(self.boxes_fingerprint(), self.player_pos)
    }

    /// Identifies the box placement regardless of where the hero stands.
    pub fn boxes_fingerprint(&self) -> u32 {
        fingerprint(&self.boxes)
    }
}

/// Polynomial hash `hash = 31 * hash + key` over the positions in the given order.
pub(crate) fn fingerprint<'a, I>(positions: I) -> u32
where
    I: IntoIterator<Item = &'a Pos>,
{
    positions.into_iter().fold(0, |hash, &pos| fold(hash, pos))
}

fn fold(hash: u32, pos: Pos) -> u32 {
    hash.wrapping_mul(31).wrapping_add(pos.key())
}
