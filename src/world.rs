use bitvec::prelude::*;

/// Upper bound for the track length
pub const MAX_WORLD_LEN: usize = 32;
const TRACK_BYTES: usize = MAX_WORLD_LEN / 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Obstacle,
}

impl From<bool> for Cell {
    fn from(bit: bool) -> Self {
        if bit {
            Cell::Obstacle
        } else {
            Cell::Empty
        }
    }
}

/// The track ahead of the player
///
/// Each cell is a single bit (set for an obstacle), stored from the player's
/// position (index 0) towards the far end. The length is fixed at creation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct World {
    track: [u8; TRACK_BYTES],
    len: usize,
    last_was_obstacle: bool,
}

impl World {
    /// Create an empty track of `len` cells
    ///
    /// `len` comes from a validated `Config`, between 1 and `MAX_WORLD_LEN`.
    pub(crate) fn new(len: usize) -> Self {
        debug_assert!(len > 0 && len <= MAX_WORLD_LEN);
        Self {
            track: [0; TRACK_BYTES],
            len,
            last_was_obstacle: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.bits().get(index).map(|&bit| Cell::from(bit))
    }

    /// Cell currently under the player
    pub fn at_player(&self) -> Cell {
        Cell::from(self.bits()[0])
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.bits().iter().map(|&bit| Cell::from(bit))
    }

    pub fn last_was_obstacle(&self) -> bool {
        self.last_was_obstacle
    }

    /// Move every cell one step towards the player and spawn a new one at the far end
    ///
    /// `trial` is the outcome of this tick's obstacle draw. An obstacle is only spawned
    /// when the previously spawned cell was empty, so two obstacles never touch.
    pub fn scroll(&mut self, trial: bool) -> Cell {
        let len = self.len;
        let bits = &mut self.track[..].view_bits_mut::<Msb0>()[..len];
        for i in 1..len {
            let next = bits[i];
            bits.set(i - 1, next);
        }
        let spawn = !self.last_was_obstacle && trial;
        bits.set(len - 1, spawn);
        self.last_was_obstacle = spawn;
        Cell::from(spawn)
    }

    /// Empty the whole track and forget the last spawned cell
    pub fn clear(&mut self) {
        *self = Self::new(self.len);
    }

    fn bits(&self) -> &BitSlice<Msb0, u8> {
        &self.track[..].view_bits::<Msb0>()[..self.len]
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, index: usize, cell: Cell) {
        let len = self.len;
        self.track[..].view_bits_mut::<Msb0>()[..len].set(index, cell == Cell::Obstacle);
    }
}
