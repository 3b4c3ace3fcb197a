use crate::pylos::prelude::*;

/// Scores are always from the perspective of the colour being evaluated for.
pub type Score = i32;

/// The weights of the static evaluation terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weights {
    pub reserve: Score,
    pub full_square: Score,
    pub almost_square: Score,
    pub blocked_square: Score,
    pub square: Score,
    /// Worth of one sphere on each level; a sphere higher up covers everything beneath it.
    pub height_table: [Score; NUM_LEVELS],
    pub height: Score,
    pub center: Score,
    pub decisive: Score,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            reserve: 10,
            full_square: 3,
            almost_square: 1,
            blocked_square: 2,
            square: 5,
            height_table: [0, 4, 13, 29],
            height: 1,
            center: 0,
            decisive: 100_000,
        }
    }
}

/// Anything that can statically score a board for a colour.
pub trait Evaluate {
    fn evaluate(&self, board: &Board, color: Color) -> Score;
}

/// The default static evaluator; a pure function of the board, the colour and its weights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Evaluator {
    pub weights: Weights,
}

impl Evaluator {
    pub fn new(weights: Weights) -> Evaluator {
        Evaluator { weights }
    }

    fn reserves(&self, board: &Board, color: Color) -> Score {
        (board.reserve(color) as Score - board.reserve(-color) as Score) * self.weights.reserve
    }

    fn squares(&self, board: &Board, color: Color) -> Score {
        let w = &self.weights;
        let classify = |own: u8, other: u8| match (own, other) {
            (4, _) => w.full_square,
            (3, 0) => w.almost_square,
            (1, 3) => w.blocked_square,
            _      => 0
        };
        let total = Square::all()
            .map(|square| {
                let (own, other) = (board.square_count(square, color), board.square_count(square, -color));
                classify(own, other) - classify(other, own)
            })
            .sum::<Score>();
        total * w.square
    }

    fn heights(&self, board: &Board, color: Color) -> Score {
        let stack = |c: Color| board.spheres_on_board(c).map(|(_, loc)| self.weights.height_table[loc.level()]).sum::<Score>();
        (stack(color) - stack(-color)) * self.weights.height
    }

    fn centre(&self, board: &Board, color: Color) -> Score {
        let total = Location::central().iter()
            .map(|loc| match board.color_at(*loc) {
                Some(c) if c == color => 1,
                Some(_)               => -1,
                None                  => 0
            })
            .sum::<Score>();
        total * self.weights.center
    }

    /// Capping the pyramid wins; running out of spheres loses.
    fn decisive(&self, board: &Board, color: Color) -> Score {
        let decisive = self.weights.decisive;
        if let Some(top) = board.color_at(Location::apex()) {
            return if top == color { decisive } else { -decisive };
        }
        match (board.reserve(color), board.reserve(-color)) {
            (0, n) if n > 0 => -decisive,
            (n, 0) if n > 0 => decisive,
            _               => 0
        }
    }
}

impl Evaluate for Evaluator {
    fn evaluate(&self, board: &Board, color: Color) -> Score {
        self.reserves(board, color)
            + self.squares(board, color)
            + self.heights(board, color)
            + self.centre(board, color)
            + self.decisive(board, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(layout: &str) -> Board {
        Board::with_layout(&layout.parse::<Layout>().unwrap()).unwrap()
    }

    #[test]
    fn empty_board_is_level() {
        let e = Evaluator::default();
        assert_eq!(e.evaluate(&Board::new(), Color::Light), 0);
        assert_eq!(e.evaluate(&Board::new(), Color::Dark), 0);
    }

    #[test]
    fn evaluation_is_antisymmetric_and_pure() {
        let e = Evaluator::default();
        for layout in ["LL..L..........D", "LDLDDLDLLDLDDLD. L", "LD..DL.........L", "LLDDLLDDDDLLDDLL LD.LD"] {
            let b = board(layout);
            let before = b.clone();
            let light = e.evaluate(&b, Color::Light);
            assert_eq!(light, -e.evaluate(&b, Color::Dark), "layout {layout}");
            assert_eq!(light, e.evaluate(&b, Color::Light));
            assert_eq!(b, before);

            let swapped = Board::with_layout(&b.layout().swapped()).unwrap();
            assert_eq!(light, e.evaluate(&swapped, Color::Dark), "layout {layout} swapped");
        }
    }

    #[test]
    fn square_terms() {
        let e = Evaluator::new(Weights { reserve: 0, height: 0, ..Weights::default() });
        // three light corners of the top-left square, nothing else touching it
        let almost = board("LL..L...........");
        assert_eq!(e.evaluate(&almost, Color::Light), 5);
        // dark blocks it
        let blocked = board("LL..LD.........D");
        assert_eq!(e.evaluate(&blocked, Color::Dark), 2 * 5);
        // and a full square of light
        let full = board("LL..LL..........");
        assert!(e.evaluate(&full, Color::Light) >= 3 * 5);
    }

    #[test]
    fn reserves_and_heights() {
        let e = Evaluator::default();
        // light has one more sphere on the board than dark
        let b = board("L...............");
        assert_eq!(e.evaluate(&b, Color::Light), -10);

        // a sphere on level one is worth its height entry
        let e = Evaluator::new(Weights { reserve: 0, square: 0, ..Weights::default() });
        let raised = board("LD..DL.......... D");
        assert_eq!(e.evaluate(&raised, Color::Dark), 4);
        assert_eq!(e.evaluate(&raised, Color::Light), -4);
    }

    #[test]
    fn centre_weight() {
        let e = Evaluator::new(Weights { reserve: 0, center: 7, ..Weights::default() });
        let b = board(".....L.........D");
        assert_eq!(e.evaluate(&b, Color::Light), 7);
        assert_eq!(e.evaluate(&b, Color::Dark), -7);
    }

    #[test]
    fn decisive_terms() {
        let e = Evaluator::default();
        let capped = board("LDLDDLDLLDLDDLDL LDLDLDLDL DDDL L");
        assert!(e.evaluate(&capped, Color::Light) > 50_000);
        assert!(e.evaluate(&capped, Color::Dark) < -50_000);

        let exhausted = board("LDLDDLDLLDLDDLDL LDLDLDLDL DDD");
        assert_eq!(exhausted.reserve(Color::Dark), 0);
        assert!(e.evaluate(&exhausted, Color::Dark) < -50_000);
    }
}
