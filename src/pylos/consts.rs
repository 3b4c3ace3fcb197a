use std::ops::Neg;
use crate::utils::prelude::*;

pub const NUM_LEVELS: usize = 4;
pub const NUM_LOCATIONS: usize = 30;
pub const NUM_SQUARES: usize = 14;
pub const SPHERES_PER_PLAYER: usize = 15;
pub const NUM_SPHERES: usize = SPHERES_PER_PLAYER * 2;

/// A sphere colour.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    Light = 0,
    Dark = 1,
}

impl Color {
    /// Notates the colour.
    pub fn notate(&self) -> String {
        match self {
            Color::Light => "L",
            Color::Dark  => "D"
        }.into()
    }

    /// The other colour.
    pub fn other(&self) -> Color {
        -*self
    }

    /// Parses into a colour; `.` and friends denote an empty location.
    pub fn parse(s: &str) -> Result<Option<Color>> {
        match s {
            "l" | "L" | "light" => Ok(Some(Color::Light)),
            "d" | "D" | "dark"  => Ok(Some(Color::Dark)),
            "_" | "-" | "."     => Ok(None),
            _                   => Err(anyhow!("invalid notation {s} for colour"))
        }
    }

    /// Renders an optional colour as a single board character.
    pub fn repr(c: Option<Color>) -> String {
        c.map_or(".".into(), |v| v.notate())
    }

    /// The range of sphere ids owned by this colour.
    pub fn spheres(self) -> impl Iterator<Item = Sphere> {
        let base = self as usize * SPHERES_PER_PLAYER;
        (base..base + SPHERES_PER_PLAYER).map(|id| Sphere(id as u8))
    }
}

impl Neg for Color {
    type Output = Color;
    fn neg(self) -> Self::Output {
        match self {
            Color::Light => Color::Dark,
            Color::Dark  => Color::Light
        }
    }
}

impl From<u8> for Color {
    fn from(value: u8) -> Self {
        match value {
            0 => Color::Light,
            1 => Color::Dark,
            _ => panic!("expected Color of 0-1, received {value}"),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Light => write!(f, "light"),
            Color::Dark  => write!(f, "dark")
        }
    }
}

/// Whose sub-turn it is, and what they may do with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Place a reserve sphere or relocate one upwards.
    Move,
    /// A square was completed; one own sphere must be removed.
    RemoveFirst,
    /// A second own sphere may be removed, or the turn passed.
    RemoveSecond,
    Completed,
    Draw,
}

impl GameState {
    /// Determines whether play has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::Completed | GameState::Draw)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameState::Move         => "move",
            GameState::RemoveFirst  => "remove_first",
            GameState::RemoveSecond => "remove_second",
            GameState::Completed    => "completed",
            GameState::Draw         => "draw",
        };
        write!(f, "{s}")
    }
}

/// A sphere identity. The first half of the ids are light, the rest dark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sphere(pub u8);

impl Sphere {
    /// The colour that owns this sphere.
    pub fn color(&self) -> Color {
        Color::from((self.0 as usize / SPHERES_PER_PLAYER) as u8)
    }

    /// The sphere id as an index.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_ownership() {
        assert!(Color::Light.spheres().all(|s| s.color() == Color::Light));
        assert!(Color::Dark.spheres().all(|s| s.color() == Color::Dark));
        assert_eq!(Color::Dark.spheres().next(), Some(Sphere(SPHERES_PER_PLAYER as u8)));
        assert_eq!(-Color::Light, Color::Dark);
    }
}
