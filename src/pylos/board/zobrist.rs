use std::{hash::{DefaultHasher, Hasher}, sync::OnceLock};

use crate::pylos::prelude::*;

use super::Board;

const NUM_CELLS: usize = NUM_LOCATIONS * 2;

static ZOBRIST_CELL_TABLE: OnceLock<[u64; NUM_CELLS]> = OnceLock::new();

impl Board {
    /// Gets the hash for a given colour on a location. This hash is _always_ updated as a part of a
    /// mutable operation on the occupancy, so placing and then taking a sphere cancels out.
    pub(super) fn cell_hash(loc: Location, color: Color) -> u64 {
        let table = ZOBRIST_CELL_TABLE.get_or_init(|| {
            let mut table: [u64; NUM_CELLS] = [0; NUM_CELLS];
            let mut hasher = DefaultHasher::new();
            for (i, entry) in table.iter_mut().enumerate() {
                hasher.write_usize(i);
                *entry = hasher.finish();
            }
            table
        });
        table[color as usize * NUM_LOCATIONS + loc.index()]
    }
}
