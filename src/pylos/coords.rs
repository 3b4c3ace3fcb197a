use std::sync::OnceLock;

use itertools::iproduct;

use crate::pylos::prelude::*;

/// A point in the stepped pyramid; `z` is the level, 0 being the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl std::str::FromStr for Coord {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts = s.split(',')
            .map(|t| t.trim().parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let &[x, y, z] = parts.as_slice() else {
            return Err(anyhow!("expected three comma-separated numbers for Coord; received {s}"));
        };
        let coord = Coord::new(x, y, z);
        if !coord.in_bounds() {
            return Err(anyhow!("coordinate {s} is not on the pyramid"));
        }
        Ok(coord)
    }
}

impl Coord {
    /// Constructs a new coord.
    pub fn new(x: usize, y: usize, z: usize) -> Coord {
        Coord { x, y, z }
    }

    /// Determines whether or not the coord lies on the pyramid.
    pub fn in_bounds(&self) -> bool {
        self.z < NUM_LEVELS && self.x < level_size(self.z) && self.y < level_size(self.z)
    }

    /// The canonical notation of the coord.
    pub fn notate(&self) -> String {
        format!("{},{},{}", self.x, self.y, self.z)
    }
}

/// The side length of a level.
pub fn level_size(z: usize) -> usize {
    NUM_LEVELS - z
}

/// The dense index of the first location on a level.
pub fn level_offset(z: usize) -> usize {
    (0..z).map(|l| level_size(l).pow(2)).sum()
}

/// A location on the lattice, stored as its dense index (level, then row, then column).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location(pub u8);

impl Location {
    /// Every location, in index order.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..NUM_LOCATIONS).map(|i| Location(i as u8))
    }

    /// The single location on the top level.
    pub fn apex() -> Location {
        Location(NUM_LOCATIONS as u8 - 1)
    }

    /// The four base locations nearest the centre of the board.
    pub fn central() -> [Location; 4] {
        [(1, 1), (2, 1), (1, 2), (2, 2)].map(|(x, y)| Location((y * NUM_LEVELS + x) as u8))
    }

    /// The locations that rest on this one.
    pub fn above(&self) -> &'static [Location] {
        &lattice().above[self.index()]
    }

    /// The four supporting locations, if this location is not on the base.
    pub fn below(&self) -> Option<&'static [Location; 4]> {
        lattice().below[self.index()].as_ref()
    }

    pub fn coord(&self) -> Coord {
        lattice().coords[self.index()]
    }

    /// Resolves a coordinate into its location.
    pub fn from_coord(coord: &Coord) -> Result<Location> {
        if coord.in_bounds() {
            let index = level_offset(coord.z) + coord.y * level_size(coord.z) + coord.x;
            Ok(Location(index as u8))
        } else {
            Err(anyhow!("invalid coordinate ({})", coord.notate()))
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn level(&self) -> usize {
        self.coord().z
    }

    /// The squares this location is a corner of.
    pub fn squares(&self) -> &'static [Square] {
        &lattice().squares_of[self.index()]
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coord().notate())
    }
}

/// A 2x2 group of locations on one level. Every square has exactly one location resting on it,
/// so squares are indexed in the same order as the locations above the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(pub u8);

impl Square {
    /// Every square, in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES).map(|i| Square(i as u8))
    }

    pub fn corners(&self) -> &'static [Location; 4] {
        &lattice().corners[self.index()]
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The location resting on this square.
    pub fn top(&self) -> Location {
        Location((self.index() + level_offset(1)) as u8)
    }
}

/// Precomputed adjacency for the fixed 30-location pyramid.
struct Lattice {
    coords: Vec<Coord>,
    below: Vec<Option<[Location; 4]>>,
    above: Vec<Vec<Location>>,
    corners: Vec<[Location; 4]>,
    squares_of: Vec<Vec<Square>>,
}

static LATTICE: OnceLock<Lattice> = OnceLock::new();

fn lattice() -> &'static Lattice {
    LATTICE.get_or_init(init_lattice)
}

/// Index arithmetic only; everything here is in bounds by construction.
fn index_of(x: usize, y: usize, z: usize) -> Location {
    Location((level_offset(z) + y * level_size(z) + x) as u8)
}

fn init_lattice() -> Lattice {
    let coords = (0..NUM_LEVELS)
        .flat_map(|z| iproduct!(0..level_size(z), 0..level_size(z)).map(move |(y, x)| Coord { x, y, z }))
        .collect::<Vec<_>>();

    let quad = |x: usize, y: usize, z: usize| {
        [index_of(x, y, z), index_of(x + 1, y, z), index_of(x, y + 1, z), index_of(x + 1, y + 1, z)]
    };

    let below = coords.iter().map(|c| {
        if c.z == 0 { None } else { Some(quad(c.x, c.y, c.z - 1)) }
    }).collect::<Vec<_>>();

    let mut above = vec![vec![]; NUM_LOCATIONS];
    for (i, supports) in below.iter().enumerate() {
        for loc in supports.iter().flatten() {
            above[loc.index()].push(Location(i as u8));
        }
    }

    // a square's top is (x, y, z + 1), so walking the upper levels in order yields the squares in order
    let corners = coords.iter()
        .filter(|c| c.z > 0)
        .map(|c| quad(c.x, c.y, c.z - 1))
        .collect::<Vec<_>>();

    let mut squares_of = vec![vec![]; NUM_LOCATIONS];
    for (i, group) in corners.iter().enumerate() {
        for loc in group {
            squares_of[loc.index()].push(Square(i as u8));
        }
    }

    Lattice { coords, below, above, corners, squares_of }
}
