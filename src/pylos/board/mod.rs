pub(crate) mod pretty;
pub(crate) mod squares;
pub(crate) mod zobrist;

use super::prelude::*;

use squares::SquareCounter;

/// The colour on every location of a board, in location index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout(pub [Option<Color>; NUM_LOCATIONS]);

impl Default for Layout {
    fn default() -> Self {
        Layout([None; NUM_LOCATIONS])
    }
}

impl Layout {
    pub fn notate(&self) -> String {
        self.0.iter().map(|c| Color::repr(*c)).collect()
    }

    /// The same position with the colours exchanged.
    pub fn swapped(&self) -> Layout {
        Layout(self.0.map(|c| c.map(|v| -v)))
    }
}

/// A Pylos board: which sphere sits where, and what is left in each reserve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// The sphere resting on each location, if any.
    occupants: [Option<Sphere>; NUM_LOCATIONS],

    /// The location of each sphere; `None` means the sphere is in its owner's reserve.
    placements: [Option<Location>; NUM_SPHERES],

    /// The number of spheres left in each reserve, indexed by colour.
    reserves: [usize; 2],

    /// A per-colour population counter for every square, kept in step with the occupants so that
    /// completion checks are a lookup rather than four.
    square_counts: SquareCounter,

    /// The canonical hash of the occupancy.
    zobrist_hash: u64,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Returns an empty board with every sphere in reserve.
    pub fn new() -> Board {
        Board {
            occupants: [None; NUM_LOCATIONS],
            placements: [None; NUM_SPHERES],
            reserves: [SPHERES_PER_PLAYER; 2],
            square_counts: SquareCounter::default(),
            zobrist_hash: 0,
        }
    }

    /// Builds a board from a layout. Spheres are handed out in id order per colour, and the layout
    /// must respect support and the size of each reserve.
    pub fn with_layout(layout: &Layout) -> Result<Board> {
        let mut board = Board::new();
        for loc in Location::all() {
            let Some(color) = layout.0[loc.index()] else {
                continue;
            };
            if !board.is_usable(loc) {
                bail!("location {loc} is not supported in layout {}", layout.notate());
            }
            let Some(sphere) = board.reserve_sphere(color) else {
                bail!("layout {} uses more than {SPHERES_PER_PLAYER} {color} spheres", layout.notate());
            };
            board.place_unchecked(sphere, loc);
        }
        Ok(board)
    }

    /// Determines whether a board sphere can be taken off the board, i.e. nothing rests on it.
    pub fn can_remove(&self, sphere: Sphere) -> bool {
        self.location_of(sphere).is_some_and(|loc| {
            loc.above().iter().all(|up| !self.is_occupied(*up))
        })
    }

    /// Determines whether a sphere may be played onto a location. A reserve sphere can go to any usable
    /// location; a board sphere must be free, move strictly upwards, and must not be one of the
    /// spheres the destination would rest on.
    pub fn can_move_to(&self, sphere: Sphere, loc: Location) -> bool {
        if !self.is_usable(loc) {
            return false;
        }
        match self.location_of(sphere) {
            None       => true,
            Some(from) => {
                from.level() < loc.level()
                    && self.can_remove(sphere)
                    && loc.below().is_some_and(|supports| !supports.contains(&from))
            }
        }
    }

    /// The colour of the sphere on a location, if any.
    pub fn color_at(&self, loc: Location) -> Option<Color> {
        self.occupant(loc).map(|s| s.color())
    }

    /// Determines whether placing on the given location has completed a square of one colour.
    pub fn completes_square(&self, loc: Location, color: Color) -> bool {
        loc.squares().iter().any(|sq| self.is_square(*sq, color))
    }

    pub fn is_occupied(&self, loc: Location) -> bool {
        self.occupants[loc.index()].is_some()
    }

    pub fn is_reserve(&self, sphere: Sphere) -> bool {
        self.placements[sphere.index()].is_none()
    }

    /// Determines whether all four corners of a square hold spheres of the given colour.
    pub fn is_square(&self, square: Square, color: Color) -> bool {
        self.square_count(square, color) == 4
    }

    /// Determines whether a location is empty and fully supported.
    pub fn is_usable(&self, loc: Location) -> bool {
        !self.is_occupied(loc) && loc.below().is_none_or(|supports| {
            supports.iter().all(|s| self.is_occupied(*s))
        })
    }

    /// The current layout of colours on the board.
    pub fn layout(&self) -> Layout {
        Layout(self.occupants.map(|s| s.map(|v| v.color())))
    }

    pub fn location_of(&self, sphere: Sphere) -> Option<Location> {
        self.placements[sphere.index()]
    }

    pub fn notate(&self) -> String {
        self.layout().notate()
    }

    pub fn occupant(&self, loc: Location) -> Option<Sphere> {
        self.occupants[loc.index()]
    }

    pub fn reserve(&self, color: Color) -> usize {
        self.reserves[color as usize]
    }

    /// The sphere a colour plays from its reserve next: the lowest id still in reserve.
    pub fn reserve_sphere(&self, color: Color) -> Option<Sphere> {
        color.spheres().find(|s| self.is_reserve(*s))
    }

    /// The number of a colour's spheres on the square.
    pub fn square_count(&self, square: Square, color: Color) -> u8 {
        self.square_counts.count(square, color)
    }

    /// Every sphere of the given colour currently on the board, in sphere id order.
    pub fn spheres_on_board(&self, color: Color) -> impl Iterator<Item = (Sphere, Location)> {
        color.spheres().filter_map(|s| self.location_of(s).map(|loc| (s, loc)))
    }

    /// Gets a hash for the occupancy. Reserves follow from the occupancy, so this identifies
    /// the position up to sphere identity.
    pub fn zobrist(&self) -> u64 {
        self.zobrist_hash
    }
}

impl Board {
    /// Puts a reserve sphere onto a location with no checks; engine use only.
    pub(crate) fn place_unchecked(&mut self, sphere: Sphere, loc: Location) {
        let color = sphere.color();
        self.occupants[loc.index()] = Some(sphere);
        self.placements[sphere.index()] = Some(loc);
        self.reserves[color as usize] -= 1;
        self.square_counts.update_unchecked(loc, color, 1);
        self.zobrist_hash ^= Board::cell_hash(loc, color);
    }

    /// Returns a board sphere to its owner's reserve with no checks; engine use only.
    pub(crate) fn take_unchecked(&mut self, sphere: Sphere) -> Option<Location> {
        let color = sphere.color();
        let loc = self.placements[sphere.index()].take()?;
        self.occupants[loc.index()] = None;
        self.reserves[color as usize] += 1;
        self.square_counts.update_unchecked(loc, color, -1);
        self.zobrist_hash ^= Board::cell_hash(loc, color);
        Some(loc)
    }

    /// Moves a board sphere to another location with no checks; engine use only.
    pub(crate) fn shift_unchecked(&mut self, sphere: Sphere, to: Location) {
        if self.take_unchecked(sphere).is_some() {
            self.place_unchecked(sphere, to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: usize, y: usize, z: usize) -> Location {
        Location::from_coord(&Coord::new(x, y, z)).unwrap()
    }

    #[test]
    fn empty_board() {
        let board = Board::new();
        assert_eq!(board.reserve(Color::Light), SPHERES_PER_PLAYER);
        assert_eq!(board.reserve(Color::Dark), SPHERES_PER_PLAYER);
        assert_eq!(Location::all().filter(|l| board.is_usable(*l)).count(), 16);
        assert_eq!(board.zobrist(), 0);
        assert_eq!(board.reserve_sphere(Color::Dark), Some(Sphere(15)));
    }

    #[test]
    fn place_and_take_restore_the_board() {
        let mut board = Board::new();
        let before = board.clone();
        let sphere = board.reserve_sphere(Color::Light).unwrap();

        board.place_unchecked(sphere, at(1, 1, 0));
        assert_eq!(board.reserve(Color::Light), SPHERES_PER_PLAYER - 1);
        assert_eq!(board.color_at(at(1, 1, 0)), Some(Color::Light));
        assert_ne!(board.zobrist(), 0);
        assert_eq!(board.reserve_sphere(Color::Light), Some(Sphere(1)));

        assert_eq!(board.take_unchecked(sphere), Some(at(1, 1, 0)));
        assert_eq!(board, before);
    }

    #[test]
    fn support_and_removal() {
        let floating = "LDLD............ L".parse::<Layout>();
        assert!(floating.is_err(), "a sphere on level one needs all four supports");
        let mut unchecked = Layout::default();
        unchecked.0[16] = Some(Color::Light);
        assert!(Board::with_layout(&unchecked).is_err());

        let mut board = Board::with_layout(&"LDL.D...........".parse::<Layout>().unwrap()).unwrap();
        assert!(!board.is_usable(at(0, 0, 1)));
        let last = board.reserve_sphere(Color::Dark).unwrap();
        board.place_unchecked(last, at(1, 1, 0));
        assert!(board.is_usable(at(0, 0, 1)));

        let top = board.reserve_sphere(Color::Light).unwrap();
        board.place_unchecked(top, at(0, 0, 1));
        let under = board.occupant(at(0, 0, 0)).unwrap();
        assert!(!board.can_remove(under));
        assert!(board.can_remove(top));
        assert!(board.can_remove(board.occupant(at(2, 0, 0)).unwrap()));
    }

    #[test]
    fn relocation_rules() {
        // a full light square at the corner, plus a free light sphere elsewhere on the base
        let board = Board::with_layout(&"LL..LL.........L".parse::<Layout>().unwrap()).unwrap();
        let target = at(0, 0, 1);
        let free = board.occupant(at(3, 3, 0)).unwrap();
        let support = board.occupant(at(0, 0, 0)).unwrap();

        assert!(board.is_square(Square(0), Color::Light));
        assert!(board.can_move_to(free, target));
        assert!(!board.can_move_to(support, target), "a supporting sphere cannot climb onto itself");
        assert!(!board.can_move_to(free, at(2, 2, 0)), "relocations only go upwards");
        assert!(board.can_move_to(board.reserve_sphere(Color::Dark).unwrap(), target));
    }
}
