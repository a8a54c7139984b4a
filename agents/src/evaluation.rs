//! Material counting, exchange analysis and positional bonuses.
//!
//! All scores are integer quarter points scaled by [`ACQUIRE_BONUS`], so a
//! pawn is worth 20 and a bishop's 3.25 stays exact at 65.

use tactician_core::{AttackMap, Board, Color, Move, MoveInfo, PieceType, Square};

/// Scale applied to every piece value.
pub const ACQUIRE_BONUS: i32 = 5;

/// Destination newly inside the four central squares.
pub const CENTER_BONUS: i32 = 16;
/// Destination newly inside the ring around the center.
pub const BROAD_CENTER_BONUS: i32 = 4;
/// Any other pawn advance.
pub const PAWN_BONUS: i32 = 4;
/// A non-pawn, non-king piece closing in on the enemy king.
pub const KING_BONUS: i32 = 8;

/// Points for capturing a king; seeing it in a capture short-circuits search.
pub const KING_CAPTURE: i32 = points(PieceType::King);
/// Points gained by a pawn turning into a queen.
pub const PROMOTION_GAIN: i32 = points(PieceType::Queen) - points(PieceType::Pawn);

const CENTER: [(u8, u8); 4] = [(3, 3), (3, 4), (4, 3), (4, 4)];

const BROAD_CENTER: [(u8, u8); 12] = [
    (2, 2),
    (3, 2),
    (4, 2),
    (5, 2),
    (2, 3),
    (5, 3),
    (2, 4),
    (5, 4),
    (2, 5),
    (3, 5),
    (4, 5),
    (5, 5),
];

/// What a piece is worth when won or lost.
pub const fn points(piece_type: PieceType) -> i32 {
    piece_type.value() * ACQUIRE_BONUS
}

fn in_zone(square: Square, zone: &[(u8, u8)]) -> bool {
    zone.contains(&(square.file(), square.rank()))
}

/// Material balance of `board` from `color`'s point of view.
pub fn material_score(board: &Board, color: Color) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| {
            let value = points(piece.piece_type);
            if piece.color == color {
                value
            } else {
                -value
            }
        })
        .sum()
}

/// The two exchange figures for a candidate move.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Exchange {
    /// Material won outright: the captured piece plus any promotion gain.
    pub gain: i32,
    /// `gain` less the mover's own value when it is expected to be taken back.
    pub net: i32,
}

/// Scores `mv` for the side moving it.
///
/// `ally` and `enemy` are the attack maps of the mover's side and of the
/// opponent on the board before the move. The mover is counted out of its
/// own defenders unless it is a pawn pushing straight ahead, which never
/// covers its destination.
pub fn exchange_value(
    board: &Board,
    mv: Move,
    info: &MoveInfo,
    ally: &AttackMap,
    enemy: &AttackMap,
) -> Exchange {
    let mut piece_points = points(info.piece.piece_type);
    let mut gain = 0;

    if info.promotion {
        piece_points = points(PieceType::Queen);
        gain += PROMOTION_GAIN;
    }
    if let Some(captured) = info.captured {
        gain += points(captured);
    }

    let mut net = gain;

    let attackers = enemy.attackers(mv.to);
    let enemy_count = attackers.len();
    let mut ally_count = ally.count(mv.to) as isize;
    if info.piece.piece_type != PieceType::Pawn || mv.from.file() != mv.to.file() {
        ally_count -= 1;
    }

    if enemy_count > 0 {
        let cheapest = attackers
            .iter()
            .filter_map(|&square| board.piece_at(square))
            .map(|piece| points(piece.piece_type))
            .min()
            .unwrap_or(KING_CAPTURE);

        if piece_points > cheapest || ally_count < enemy_count as isize {
            net -= piece_points;
        }
    }

    Exchange { gain, net }
}

/// Bonus for where a move takes its piece, independent of material.
///
/// Pawns, knights and bishops earn a zone bonus for entering the center or
/// the broad center from outside it; a pawn that earns neither still gets
/// [`PAWN_BONUS`]. Other non-king pieces earn [`KING_BONUS`] for strictly
/// closing the distance to `enemy_king`.
pub fn positional_bonus(mv: Move, piece_type: PieceType, enemy_king: Option<Square>) -> i32 {
    let mut bonus = 0;

    if matches!(
        piece_type,
        PieceType::Pawn | PieceType::Knight | PieceType::Bishop
    ) {
        if !in_zone(mv.from, &CENTER) && in_zone(mv.to, &CENTER) {
            bonus += CENTER_BONUS;
        } else if !in_zone(mv.from, &BROAD_CENTER) && in_zone(mv.to, &BROAD_CENTER) {
            bonus += BROAD_CENTER_BONUS;
        } else if piece_type == PieceType::Pawn {
            bonus += PAWN_BONUS;
        }
    }

    if !matches!(piece_type, PieceType::King | PieceType::Pawn) {
        if let Some(king) = enemy_king {
            if mv.to.distance(king) < mv.from.distance(king) {
                bonus += KING_BONUS;
            }
        }
    }

    bonus
}
