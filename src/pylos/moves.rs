use crate::pylos::prelude::*;

/// One action a colour can take during its sub-turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// A reserve sphere is placed on a usable location.
    Add { sphere: Sphere, to: Location },
    /// A board sphere climbs to a usable location on a higher level.
    Relocate { sphere: Sphere, from: Location, to: Location },
    /// The mandatory removal after completing a square.
    RemoveFirst { sphere: Sphere, from: Location },
    /// The optional second removal.
    RemoveSecond { sphere: Sphere, from: Location },
    /// Declines the second removal.
    Pass,
}

/// A move in the search tree: an action together with the colour taking it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub action: Action,
    pub color: Color,
}

impl Move {
    pub fn new(action: Action, color: Color) -> Move {
        Move { action, color }
    }

    /// Where the sphere ends up on the board, if it stays on the board.
    pub fn destination(&self) -> Option<Location> {
        match self.action {
            Action::Add { to, .. } | Action::Relocate { to, .. } => Some(to),
            _                                                      => None
        }
    }

    pub fn is_add(&self) -> bool {
        matches!(self.action, Action::Add { .. })
    }

    /// The canonical notation of the move. Removals do not record which removal they are, since the
    /// state of the game already determines that.
    pub fn notate(&self) -> String {
        match self.action {
            Action::Add { to, .. }             => format!("+{to}"),
            Action::Relocate { from, to, .. }  => format!("{from}>{to}"),
            Action::RemoveFirst { from, .. }
            | Action::RemoveSecond { from, .. } => format!("-{from}"),
            Action::Pass                       => "pass".into()
        }
    }

    /// The sphere the move acts on; a pass acts on none.
    pub fn sphere(&self) -> Option<Sphere> {
        match self.action {
            Action::Add { sphere, .. }
            | Action::Relocate { sphere, .. }
            | Action::RemoveFirst { sphere, .. }
            | Action::RemoveSecond { sphere, .. } => Some(sphere),
            Action::Pass                          => None
        }
    }

    /// The sub-turn in which this move is played.
    pub fn state(&self) -> GameState {
        match self.action {
            Action::Add { .. } | Action::Relocate { .. }   => GameState::Move,
            Action::RemoveFirst { .. }                    => GameState::RemoveFirst,
            Action::RemoveSecond { .. } | Action::Pass    => GameState::RemoveSecond,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notate())
    }
}
