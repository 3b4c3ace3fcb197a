use crate::pylos::prelude::*;

/// Pushes every legal move for the colour in the given sub-turn, in a fixed order:
/// - during a move, relocations (by square, then by sphere id) come before additions (by location);
/// - during the second removal, the pass comes before the removals;
/// - terminal states have no moves.
pub fn generate(state: GameState, color: Color, board: &Board, moves: &mut Vec<Move>) {
    match state {
        GameState::Move => {
            generate_relocations(color, board, moves);
            generate_additions(color, board, moves);
        },
        GameState::RemoveFirst => {
            generate_removals(color, board, moves, |sphere, from| Action::RemoveFirst { sphere, from });
        },
        GameState::RemoveSecond => {
            moves.push(Move::new(Action::Pass, color));
            generate_removals(color, board, moves, |sphere, from| Action::RemoveSecond { sphere, from });
        },
        GameState::Completed | GameState::Draw => { /* nobody moves */ }
    }
}

/// Collects the legal moves into a fresh vector.
pub fn legal_moves(state: GameState, color: Color, board: &Board) -> Vec<Move> {
    let mut moves = vec![];
    generate(state, color, board, &mut moves);
    moves
}

/// A supported empty location above the base is exactly the top of a filled square, so walking the
/// squares finds every relocation target.
fn generate_relocations(color: Color, board: &Board, moves: &mut Vec<Move>) {
    for square in Square::all() {
        let to = square.top();
        if !board.is_usable(to) {
            continue;
        }
        for (sphere, from) in board.spheres_on_board(color) {
            if board.can_move_to(sphere, to) {
                moves.push(Move::new(Action::Relocate { sphere, from, to }, color));
            }
        }
    }
}

fn generate_additions(color: Color, board: &Board, moves: &mut Vec<Move>) {
    let Some(sphere) = board.reserve_sphere(color) else {
        return;
    };
    moves.extend(
        Location::all()
            .filter(|loc| board.is_usable(*loc))
            .map(|to| Move::new(Action::Add { sphere, to }, color))
    );
}

fn generate_removals(color: Color, board: &Board, moves: &mut Vec<Move>, action: impl Fn(Sphere, Location) -> Action) {
    moves.extend(
        board.spheres_on_board(color)
            .filter(|(sphere, _)| board.can_remove(*sphere))
            .map(|(sphere, from)| Move::new(action(sphere, from), color))
    );
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn board(layout: &str) -> Board {
        Board::with_layout(&layout.parse::<Layout>().unwrap()).unwrap()
    }

    fn at(x: usize, y: usize, z: usize) -> Location {
        Location::from_coord(&Coord::new(x, y, z)).unwrap()
    }

    /// Every (sphere, destination) pair the board's own predicates allow, found by brute force.
    fn brute_force_targets(color: Color, board: &Board) -> BTreeSet<(Sphere, Location)> {
        let candidates = board.spheres_on_board(color)
            .map(|(s, _)| s)
            .chain(board.reserve_sphere(color))
            .collect::<Vec<_>>();
        candidates.iter()
            .flat_map(|s| Location::all().map(move |l| (*s, l)))
            .filter(|(s, l)| board.can_move_to(*s, *l))
            .collect()
    }

    fn generated_targets(color: Color, board: &Board) -> BTreeSet<(Sphere, Location)> {
        legal_moves(GameState::Move, color, board).iter()
            .map(|m| (m.sphere().unwrap(), m.destination().unwrap()))
            .collect()
    }

    #[test]
    fn empty_board_only_adds() {
        let moves = legal_moves(GameState::Move, Color::Light, &Board::new());
        assert_eq!(moves.len(), 16);
        assert!(moves.iter().all(|m| m.is_add() && m.color == Color::Light));
        assert_eq!(moves[0].destination(), Some(at(0, 0, 0)));
    }

    #[test]
    fn relocations_come_first() {
        // a mixed full square with a free light sphere elsewhere
        let b = board("LD..DL.........L");
        let moves = legal_moves(GameState::Move, Color::Light, &b);

        let relocation = moves[0];
        assert_eq!(relocation.action, Action::Relocate { sphere: Sphere(2), from: at(3, 3, 0), to: at(0, 0, 1) });
        assert!(moves[1..].iter().all(|m| m.is_add()));
        // the level-one target plus the eleven empty base locations
        assert_eq!(moves.len(), 1 + 12);
        assert_eq!(generated_targets(Color::Light, &b), brute_force_targets(Color::Light, &b));
    }

    #[test]
    fn matches_brute_force_on_crowded_boards() {
        let layouts = [
            "LDLDDLDLLDLDDLDL",
            "LDLDDLDLLDLDDLD. L",
            "LLDDLLDDDDLLDDLL LD.LD",
            "LDLDDLDLLDLDDLDL LDLDLD",
        ];
        for layout in layouts {
            let b = board(layout);
            for color in [Color::Light, Color::Dark] {
                assert_eq!(generated_targets(color, &b), brute_force_targets(color, &b), "layout {layout}");
            }
        }
    }

    #[test]
    fn no_reserve_means_no_additions() {
        let mut b = board("LDLDDLDLLDLDDLDL");
        while let Some(sphere) = b.reserve_sphere(Color::Light) {
            b.place_unchecked(sphere, Location::all().find(|l| b.is_usable(*l)).unwrap());
        }
        assert_eq!(b.reserve(Color::Light), 0);
        assert!(legal_moves(GameState::Move, Color::Light, &b).iter().all(|m| !m.is_add()));
    }

    #[test]
    fn removals_by_state() {
        let b = board("LL..LL..D......D L");
        // the light sphere at (0,0,1) pins down the whole light square beneath it
        let first = legal_moves(GameState::RemoveFirst, Color::Light, &b);
        assert!(first.iter().all(|m| matches!(m.action, Action::RemoveFirst { .. })));
        assert!(first.iter().all(|m| b.can_remove(m.sphere().unwrap())));
        assert_eq!(first.len(), 1);

        let second = legal_moves(GameState::RemoveSecond, Color::Light, &b);
        assert_eq!(second[0].action, Action::Pass);
        assert_eq!(second.iter().filter(|m| m.action == Action::Pass).count(), 1);
        assert_eq!(second.len(), first.len() + 1);
    }

    #[test]
    fn terminal_states_are_empty() {
        let b = Board::new();
        assert!(legal_moves(GameState::Completed, Color::Light, &b).is_empty());
        assert!(legal_moves(GameState::Draw, Color::Dark, &b).is_empty());
    }
}
