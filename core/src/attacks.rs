use crate::board::Board;
use crate::move_gen::{BISHOP_VECTORS, KING_VECTORS, KNIGHT_VECTORS, ROOK_VECTORS};
use crate::types::{Color, PieceType, Probe, Square};

/// Squares the piece on `origin` threatens, regardless of whose turn it is.
///
/// Pawns threaten both forward diagonals whether or not anything stands
/// there. Sliding rays stop at the first occupied square of either color
/// and include it.
pub fn attacks(board: &Board, origin: Square, color: Color) -> Vec<Square> {
    let Some(piece) = board.piece_at(origin) else {
        return Vec::new();
    };

    match piece.piece_type {
        PieceType::Pawn => [-1, 1]
            .into_iter()
            .filter_map(|df| origin.offset(df, color.sign()))
            .collect(),
        PieceType::Knight => jump_attacks(origin, &KNIGHT_VECTORS),
        PieceType::King => jump_attacks(origin, &KING_VECTORS),
        PieceType::Bishop => ray_attacks(board, origin, &BISHOP_VECTORS),
        PieceType::Rook => ray_attacks(board, origin, &ROOK_VECTORS),
        PieceType::Queen => {
            let mut squares = ray_attacks(board, origin, &BISHOP_VECTORS);
            squares.extend(ray_attacks(board, origin, &ROOK_VECTORS));
            squares
        }
    }
}

fn jump_attacks(origin: Square, vectors: &[(i8, i8)]) -> Vec<Square> {
    vectors
        .iter()
        .filter_map(|&(df, dr)| origin.offset(df, dr))
        .collect()
}

fn ray_attacks(board: &Board, origin: Square, vectors: &[(i8, i8)]) -> Vec<Square> {
    let mut squares = Vec::new();

    for &(df, dr) in vectors {
        let mut file = origin.file() as i8;
        let mut rank = origin.rank() as i8;

        loop {
            file += df;
            rank += dr;

            let probe = board.probe(file, rank);
            if probe == Probe::Border {
                break;
            }
            squares.push(Square::at(file as u8, rank as u8));
            if probe != Probe::Empty {
                break;
            }
        }
    }

    squares
}

/// For every square, the origins of one color's pieces that threaten it.
#[derive(Clone, Debug)]
pub struct AttackMap {
    by_square: [Vec<Square>; 64],
}

impl AttackMap {
    /// Builds the index over all of `color`'s pieces, in row-major order.
    pub fn build(board: &Board, color: Color) -> Self {
        let mut by_square: [Vec<Square>; 64] = std::array::from_fn(|_| Vec::new());

        for (origin, _) in board.pieces_of(color) {
            for target in attacks(board, origin, color) {
                by_square[target.index()].push(origin);
            }
        }

        Self { by_square }
    }

    /// Origins of the pieces covering `square`.
    pub fn attackers(&self, square: Square) -> &[Square] {
        &self.by_square[square.index()]
    }

    pub fn count(&self, square: Square) -> usize {
        self.by_square[square.index()].len()
    }

    pub fn is_attacked(&self, square: Square) -> bool {
        !self.by_square[square.index()].is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn place(board: Board, s: &str, piece_type: PieceType, color: Color) -> Board {
        board.with_piece(sq(s), Some(Piece::new(piece_type, color)))
    }

    #[test]
    fn test_pawn_attacks_both_diagonals_unconditionally() {
        let board = place(Board::empty(), "e4", PieceType::Pawn, Color::White);
        assert_eq!(attacks(&board, sq("e4"), Color::White), vec![sq("d5"), sq("f5")]);

        let board = place(Board::empty(), "a5", PieceType::Pawn, Color::Black);
        assert_eq!(attacks(&board, sq("a5"), Color::Black), vec![sq("b4")]);
    }

    #[test]
    fn test_ray_includes_friendly_blocker() {
        let board = Board::empty();
        let board = place(board, "a1", PieceType::Rook, Color::White);
        let board = place(board, "a3", PieceType::Pawn, Color::White);

        let squares = attacks(&board, sq("a1"), Color::White);
        assert!(squares.contains(&sq("a3")));
        assert!(!squares.contains(&sq("a4")));
        assert!(squares.contains(&sq("h1")));
    }

    #[test]
    fn test_attack_map_counts_defenders() {
        let board = Board::starting_position();
        let white = AttackMap::build(&board, Color::White);
        let black = AttackMap::build(&board, Color::Black);

        // c2 and e2 pawns; the queen's ray stops on d2.
        assert_eq!(white.count(sq("d3")), 2);
        assert_eq!(white.attackers(sq("a3")), &[sq("b1"), sq("b2")]);
        assert!(!white.is_attacked(sq("e5")));
        assert!(black.is_attacked(sq("f6")));
        assert!(!black.is_attacked(sq("e4")));
    }
}
