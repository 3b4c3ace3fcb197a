use regex::Regex;

use crate::pylos::prelude::*;

/// Parses a layout: one character per location (`L`, `D` or `.`) in location index order. Whitespace and
/// `/` may be used to separate rows or levels, and trailing empty locations may be left out.
impl std::str::FromStr for Layout {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let symbols = s.chars().filter(|c| !c.is_whitespace() && *c != '/').collect::<Vec<char>>();
        if symbols.len() > NUM_LOCATIONS {
            return Err(anyhow!("layout {s} has more than {NUM_LOCATIONS} locations"));
        }

        let mut layout = Layout::default();
        for (i, ch) in symbols.iter().enumerate() {
            layout.0[i] = Color::parse(&ch.to_string())?;
        }
        Board::with_layout(&layout).with_context(|| format!("invalid layout {s}"))?;
        Ok(layout)
    }
}

/// The shape of a move as written, before it is matched against a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveShape {
    Add(Location),
    Relocate(Location, Location),
    Remove(Location),
    Pass,
}

/// A segment of a gamestring that represents a move. Sphere identities and the removal number are not
/// written down, so a move string has to be resolved against a position to become a `Move`.
#[derive(Clone, Debug)]
pub struct MoveString {
    pub repr: String,
    pub shape: MoveShape,
}

impl MoveString {
    /// Finds the legal move this string denotes in the given sub-turn.
    pub fn resolve(&self, state: GameState, color: Color, board: &Board) -> Result<Move> {
        legal_moves(state, color, board).into_iter()
            .find(|mv| self.matches(mv))
            .ok_or(anyhow!("move {} is not legal for {color} during {state}", self.repr))
    }

    fn matches(&self, mv: &Move) -> bool {
        match (self.shape, mv.action) {
            (MoveShape::Add(loc), Action::Add { to, .. })                      => loc == to,
            (MoveShape::Relocate(a, b), Action::Relocate { from, to, .. })     => a == from && b == to,
            (MoveShape::Remove(loc), Action::RemoveFirst { from, .. })
            | (MoveShape::Remove(loc), Action::RemoveSecond { from, .. })      => loc == from,
            (MoveShape::Pass, Action::Pass)                                    => true,
            _                                                                  => false
        }
    }
}

impl std::str::FromStr for MoveString {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s == "pass" {
            return Ok(MoveString { repr: s.to_owned(), shape: MoveShape::Pass });
        }

        let pattern = Regex::new(r"^(?<kind>[+-]?)(?<first>\d,\d,\d)(>(?<second>\d,\d,\d))?$")?;
        let Some(matches) = pattern.captures(s) else {
            return Err(anyhow!("could not parse movestring {s}"));
        };

        let location = |name: &str| -> Result<Option<Location>> {
            matches.name(name)
                .map(|m| m.as_str().parse::<Coord>().and_then(|c| Location::from_coord(&c)))
                .transpose()
        };
        let first = location("first")?.ok_or(anyhow!("movestring {s} names no location"))?;
        let second = location("second")?;

        let shape = match (matches.name("kind").map_or("", |m| m.as_str()), second) {
            ("+", None)     => MoveShape::Add(first),
            ("-", None)     => MoveShape::Remove(first),
            ("", Some(to))  => MoveShape::Relocate(first, to),
            _               => return Err(anyhow!("could not parse movestring {s}"))
        };
        Ok(MoveString { repr: s.to_owned(), shape })
    }
}

/// A parsed gamestring: the moves of a game from the empty board, separated by `;`.
///
/// Caveat: the game need not actually be semantically valid, only syntactically; each move has to be
/// resolved against the position reached by the moves before it.
#[derive(Clone, Debug, Default)]
pub struct GameString {
    pub moves: Vec<MoveString>,
}

impl std::str::FromStr for GameString {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let moves = s.split(';')
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| t.parse::<MoveString>())
            .collect::<Result<Vec<_>>>()?;
        Ok(GameString { moves })
    }
}
