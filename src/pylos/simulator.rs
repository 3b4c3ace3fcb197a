use crate::pylos::prelude::*;

/// A private copy of a game that the search can play forwards and backwards.
///
/// The simulator owns its board, so nothing it does is visible to whoever handed the board over. It
/// mirrors the sub-turn transitions of the rules but keeps no history: every `undo` is told the state
/// and colour from before the matching `apply`, which keeps deep searches free of history objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Simulator {
    board: Board,
    state: GameState,
    color: Color,
    winner: Option<Color>,
}

impl Simulator {
    /// Creates a simulator positioned at the given sub-turn.
    pub fn new(state: GameState, color: Color, board: Board) -> Simulator {
        Simulator { board, state, color, winner: None }
    }

    /// Creates a simulator with `color` to move on a board set up outside of play. A position that is
    /// already decided starts out finished: a capped pyramid belongs to the colour on top, and a mover
    /// with an empty reserve has lost.
    pub fn at_turn(color: Color, board: Board) -> Simulator {
        let mut sim = Simulator::new(GameState::Move, color, board);
        if let Some(top) = sim.board.color_at(Location::apex()) {
            sim.finish(Some(top));
        } else if sim.board.reserve(color) == 0 {
            sim.finish(Some(-color));
        } else if !Location::all().any(|loc| sim.board.is_usable(loc)) {
            sim.finish(None);
        }
        sim
    }

    /// Plays a legal move, advancing the sub-turn exactly as the rules would.
    ///
    /// Panics if the game is already over or the move belongs to the wrong colour or sub-turn, since
    /// continuing would desynchronise the board for the rest of the search.
    pub fn apply(&mut self, mv: &Move) {
        assert!(!self.state.is_terminal(), "cannot apply {mv} in terminal state {}", self.state);
        assert_eq!(mv.color, self.color, "{mv} played by {} during {}'s turn", mv.color, self.color);
        assert_eq!(mv.state(), self.state, "{mv} is not playable during {}", self.state);

        match mv.action {
            Action::Add { sphere, to } => {
                self.board.place_unchecked(sphere, to);
                self.settle_placement(to);
            },
            Action::Relocate { sphere, to, .. } => {
                self.board.shift_unchecked(sphere, to);
                self.settle_placement(to);
            },
            Action::RemoveFirst { sphere, .. } => {
                self.board.take_unchecked(sphere);
                self.state = GameState::RemoveSecond;
            },
            Action::RemoveSecond { sphere, .. } => {
                self.board.take_unchecked(sphere);
                self.hand_over();
            },
            Action::Pass => {
                self.hand_over();
            }
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The colour whose sub-turn it is.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Undoes a move, given the state and colour from before it was applied.
    ///
    /// Panics if the move cannot have been applied from that sub-turn, or if the board does not hold
    /// the sphere where the move left it.
    pub fn undo(&mut self, mv: &Move, prior_state: GameState, prior_color: Color) {
        assert_eq!(mv.color, prior_color, "undoing {mv} by {} as if it were {}'s", mv.color, prior_color);
        assert_eq!(mv.state(), prior_state, "undoing {mv} as if it were played during {prior_state}");
        match mv.action {
            Action::Add { sphere, to } => {
                assert_eq!(self.board.location_of(sphere), Some(to), "undoing {mv}, but its sphere has moved");
                self.board.take_unchecked(sphere);
            },
            Action::Relocate { sphere, from, to } => {
                assert_eq!(self.board.location_of(sphere), Some(to), "undoing {mv}, but its sphere has moved");
                self.board.shift_unchecked(sphere, from);
            },
            Action::RemoveFirst { sphere, from } | Action::RemoveSecond { sphere, from } => {
                assert!(self.board.is_reserve(sphere) && !self.board.is_occupied(from), "undoing {mv}, but {from} is taken");
                self.board.place_unchecked(sphere, from);
            },
            Action::Pass => { /* the board never changed */ }
        }
        self.state = prior_state;
        self.color = prior_color;
        self.winner = None;
    }

    /// The winner, once the game is completed.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Decides what follows a sphere landing on `to`: a removal if it completed a square of the mover's
    /// colour, victory if it capped the pyramid, and otherwise the opponent's turn.
    fn settle_placement(&mut self, to: Location) {
        if self.board.completes_square(to, self.color) {
            self.state = GameState::RemoveFirst;
        } else if self.board.is_occupied(Location::apex()) {
            self.finish(Some(self.color));
        } else {
            self.hand_over();
        }
    }

    /// Passes the turn. A colour with nothing left in reserve has lost; a colour with reserve but
    /// nowhere to place it ends the game drawn, matching an empty move list from the generator.
    fn hand_over(&mut self) {
        let next = self.color.other();
        self.color = next;
        self.state = GameState::Move;
        if self.board.reserve(next) == 0 {
            self.finish(Some(-next));
        } else if !Location::all().any(|loc| self.board.is_usable(loc)) {
            self.finish(None);
        }
    }

    fn finish(&mut self, winner: Option<Color>) {
        self.state = match winner {
            Some(_) => GameState::Completed,
            None    => GameState::Draw,
        };
        self.winner = winner;
    }
}
