use crate::pylos::prelude::*;

/// A counter for square completion; a square owned entirely by one colour lets that colour take
/// spheres back into its reserve.
///
/// We keep track of all 14 squares with one population count per colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SquareCounter([[u8; 2]; NUM_SQUARES]);

impl SquareCounter {
    /// Determines how many spheres of the colour sit on the square.
    #[inline]
    pub fn count(&self, square: Square, color: Color) -> u8 {
        self.0[square.index()][color as usize]
    }

    /// Updates the population count on all squares touching a given location, unchecked; engine use only.
    ///
    /// A base corner belongs to one square and a base centre to four, so the update is at most four
    /// increments regardless of how many spheres are on the board.
    #[inline]
    pub fn update_unchecked(&mut self, loc: Location, color: Color, delta: i8) {
        for square in loc.squares() {
            let el = &mut self.0[square.index()][color as usize];
            *el = (*el as i8 + delta) as u8;
        }
    }
}
