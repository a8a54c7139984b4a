//! Castling geometry, rights tracking and legality.
use crate::attacks::AttackMap;
use crate::board::Board;
use crate::types::{Color, Direction, Piece, PieceType, Square};

const KING_FILE: u8 = 4;

/// The king's starting square for `color`.
pub const fn king_home(color: Color) -> Square {
    Square::at(KING_FILE, color.home_rank())
}

impl Direction {
    const fn rook_file(self) -> u8 {
        match self {
            Direction::Queenside => 0,
            Direction::Kingside => 7,
        }
    }

    /// Where the rook for this direction starts.
    pub const fn rook_home(self, color: Color) -> Square {
        Square::at(self.rook_file(), color.home_rank())
    }

    /// Where the king lands.
    pub const fn king_target(self, color: Color) -> Square {
        let file = match self {
            Direction::Queenside => 2,
            Direction::Kingside => 6,
        };
        Square::at(file, color.home_rank())
    }

    /// Where the rook lands.
    pub const fn rook_target(self, color: Color) -> Square {
        let file = match self {
            Direction::Queenside => 3,
            Direction::Kingside => 5,
        };
        Square::at(file, color.home_rank())
    }

    /// Files strictly between king and rook; all must be empty.
    const fn between_files(self) -> &'static [u8] {
        match self {
            Direction::Queenside => &[1, 2, 3],
            Direction::Kingside => &[5, 6],
        }
    }

    /// Files the king crosses, its destination included; none may be attacked.
    const fn path_files(self) -> &'static [u8] {
        match self {
            Direction::Queenside => &[3, 2],
            Direction::Kingside => &[5, 6],
        }
    }
}

/// Which kings and rooks are still unmoved, per color.
///
/// Flags only ever go from `true` to `false`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct CastlingRights {
    king_unmoved: [bool; 2],
    /// Indexed by color, then by [`Direction::index`].
    rook_unmoved: [[bool; 2]; 2],
}

impl CastlingRights {
    /// Every king and rook unmoved.
    pub const fn all() -> Self {
        Self {
            king_unmoved: [true; 2],
            rook_unmoved: [[true; 2]; 2],
        }
    }

    pub const fn none() -> Self {
        Self {
            king_unmoved: [false; 2],
            rook_unmoved: [[false; 2]; 2],
        }
    }

    pub const fn king_unmoved(&self, color: Color) -> bool {
        self.king_unmoved[color.index()]
    }

    pub const fn rook_unmoved(&self, color: Color, direction: Direction) -> bool {
        self.rook_unmoved[color.index()][direction.index()]
    }

    /// True while castling in `direction` has not been ruled out by moves.
    pub const fn allows(&self, color: Color, direction: Direction) -> bool {
        self.king_unmoved(color) && self.rook_unmoved(color, direction)
    }

    /// Returns a copy with one rook flag set; used when loading positions.
    #[must_use]
    pub fn with_rook(mut self, color: Color, direction: Direction, unmoved: bool) -> Self {
        self.rook_unmoved[color.index()][direction.index()] = unmoved;
        self
    }

    /// Returns a copy with the king flag set; used when loading positions.
    #[must_use]
    pub fn with_king(mut self, color: Color, unmoved: bool) -> Self {
        self.king_unmoved[color.index()] = unmoved;
        self
    }

    /// Rights after the piece on `from` (in the pre-move `board`) moves to `to`.
    ///
    /// A king or rook leaving its home square loses its flag, and so does a
    /// rook whose home square is captured on.
    #[must_use]
    pub fn after_move(&self, board: &Board, from: Square, to: Square) -> Self {
        let mut rights = *self;

        if let Some(piece) = board.piece_at(from) {
            let color = piece.color;
            match piece.piece_type {
                PieceType::King if from == king_home(color) => {
                    rights.king_unmoved[color.index()] = false;
                }
                PieceType::Rook => {
                    for direction in Direction::BOTH {
                        if from == direction.rook_home(color) {
                            rights.rook_unmoved[color.index()][direction.index()] = false;
                        }
                    }
                }
                _ => {}
            }
        }

        for color in Color::BOTH {
            for direction in Direction::BOTH {
                if to == direction.rook_home(color) {
                    rights.rook_unmoved[color.index()][direction.index()] = false;
                }
            }
        }

        rights
    }

    /// Rights after `color` castles: the king has moved.
    #[must_use]
    pub fn after_castle(&self, color: Color) -> Self {
        let mut rights = *self;
        rights.king_unmoved[color.index()] = false;
        rights
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

/// Directions `color` may castle in right now, queenside first.
///
/// Requires the unmoved king on its home square and not attacked, the
/// unmoved rook on its home square, every square between them empty, and
/// no square on the king's path attacked by `enemy`.
pub fn castle_directions(
    board: &Board,
    color: Color,
    rights: &CastlingRights,
    enemy: &AttackMap,
) -> Vec<Direction> {
    let home = king_home(color);
    if !rights.king_unmoved(color)
        || board.piece_at(home) != Some(Piece::new(PieceType::King, color))
        || enemy.is_attacked(home)
    {
        return Vec::new();
    }

    let rank = color.home_rank();
    Direction::BOTH
        .into_iter()
        .filter(|&direction| {
            rights.rook_unmoved(color, direction)
                && board.piece_at(direction.rook_home(color))
                    == Some(Piece::new(PieceType::Rook, color))
                && direction
                    .between_files()
                    .iter()
                    .all(|&file| board.is_empty(Square::at(file, rank)))
                && direction
                    .path_files()
                    .iter()
                    .all(|&file| !enemy.is_attacked(Square::at(file, rank)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn place(board: Board, s: &str, piece_type: PieceType, color: Color) -> Board {
        board.with_piece(sq(s), Some(Piece::new(piece_type, color)))
    }

    fn castle_ready() -> Board {
        let board = place(Board::empty(), "e1", PieceType::King, Color::White);
        let board = place(board, "a1", PieceType::Rook, Color::White);
        let board = place(board, "h1", PieceType::Rook, Color::White);
        place(board, "e8", PieceType::King, Color::Black)
    }

    fn directions(board: &Board, rights: &CastlingRights) -> Vec<Direction> {
        let enemy = AttackMap::build(board, Color::Black);
        castle_directions(board, Color::White, rights, &enemy)
    }

    #[test]
    fn test_geometry() {
        assert_eq!(Direction::Queenside.king_target(Color::White), sq("c1"));
        assert_eq!(Direction::Queenside.rook_target(Color::White), sq("d1"));
        assert_eq!(Direction::Kingside.king_target(Color::Black), sq("g8"));
        assert_eq!(Direction::Kingside.rook_home(Color::Black), sq("h8"));
    }

    #[test]
    fn test_both_directions_available() {
        let board = castle_ready();
        assert_eq!(
            directions(&board, &CastlingRights::all()),
            vec![Direction::Queenside, Direction::Kingside]
        );
    }

    #[test]
    fn test_blocked_knight_square() {
        let board = place(castle_ready(), "b1", PieceType::Knight, Color::White);
        assert_eq!(
            directions(&board, &CastlingRights::all()),
            vec![Direction::Kingside]
        );
    }

    #[test]
    fn test_moved_pieces_refuse() {
        let board = castle_ready();
        let rights = CastlingRights::all().with_rook(Color::White, Direction::Kingside, false);
        assert_eq!(directions(&board, &rights), vec![Direction::Queenside]);

        let rights = CastlingRights::all().with_king(Color::White, false);
        assert!(directions(&board, &rights).is_empty());
    }

    #[test]
    fn test_attacked_squares_refuse() {
        // Rook on f8 covers f1, the kingside path.
        let board = place(castle_ready(), "f8", PieceType::Rook, Color::Black);
        assert_eq!(
            directions(&board, &CastlingRights::all()),
            vec![Direction::Queenside]
        );

        // Rook on e7 checks the king.
        let board = place(castle_ready(), "e7", PieceType::Rook, Color::Black);
        assert!(directions(&board, &CastlingRights::all()).is_empty());
    }

    #[test]
    fn test_missing_rook_refuses() {
        let board = castle_ready().without_piece(sq("a1"));
        assert_eq!(
            directions(&board, &CastlingRights::all()),
            vec![Direction::Kingside]
        );
    }

    #[test]
    fn test_rights_after_moves() {
        let board = castle_ready();
        let rights = CastlingRights::all();

        let after_rook = rights.after_move(&board, sq("h1"), sq("h5"));
        assert!(!after_rook.rook_unmoved(Color::White, Direction::Kingside));
        assert!(after_rook.rook_unmoved(Color::White, Direction::Queenside));
        assert!(after_rook.king_unmoved(Color::White));

        let after_king = rights.after_move(&board, sq("e1"), sq("e2"));
        assert!(!after_king.king_unmoved(Color::White));
        assert!(after_king.king_unmoved(Color::Black));

        let captured = rights.after_move(&board, sq("a1"), sq("a8"));
        assert!(!captured.rook_unmoved(Color::Black, Direction::Queenside));
        assert!(!captured.rook_unmoved(Color::White, Direction::Queenside));

        assert!(!rights.after_castle(Color::Black).king_unmoved(Color::Black));
    }
}
