//! Pure board transformations.
//!
//! None of these validate legality; callers check destinations against
//! [`crate::legal_destinations`] first.

use crate::board::Board;
use crate::castling::king_home;
use crate::move_gen::MoveInfo;
use crate::types::{Color, Direction, Move, Piece, PieceType, Square};

/// Moves the piece on `origin` to `destination` as `color`, overwriting
/// whatever stood there. An empty origin leaves the board unchanged.
#[must_use]
pub fn apply_move(board: &Board, origin: Square, destination: Square, color: Color) -> Board {
    let Some(piece) = board.piece_at(origin) else {
        return *board;
    };

    let mut next = *board;
    next.set(destination, Some(Piece::new(piece.piece_type, color)));
    next.set(origin, None);
    next
}

/// Applies a classified move with its pawn side effects: promotion to a
/// queen, and removal of the pawn captured en passant.
#[must_use]
pub fn process_move(board: &Board, mv: Move, color: Color, info: &MoveInfo) -> Board {
    let mut next = apply_move(board, mv.from, mv.to, color);

    if info.promotion {
        next.set(mv.to, Some(Piece::new(PieceType::Queen, color)));
    }

    if info.en_passant {
        if let Some(victim) = mv.to.offset(0, -color.sign()) {
            next.set(victim, None);
        }
    }

    next
}

/// Moves king and rook to their castled squares in one step.
#[must_use]
pub fn castle(board: &Board, color: Color, direction: Direction) -> Board {
    let next = apply_move(
        board,
        direction.rook_home(color),
        direction.rook_target(color),
        color,
    );
    apply_move(
        &next,
        king_home(color),
        direction.king_target(color),
        color,
    )
}

/// The en passant target left behind by a move: its destination after a
/// double pawn push, otherwise none.
pub fn en_passant_target(mv: Move, info: &MoveInfo) -> Option<Square> {
    info.double_push.then_some(mv.to)
}
