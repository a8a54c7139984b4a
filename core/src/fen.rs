//! FEN (Forsyth-Edwards Notation) loading and saving.
//!
//! Used to set up test and analysis positions. The move clocks are optional
//! on input; the halfmove clock is not tracked and is written as `0`.

use crate::board::Board;
use crate::castling::CastlingRights;
use crate::error::FenError;
use crate::game_state::GameState;
use crate::types::{Color, Direction, Piece, PieceType, Square};

impl GameState {
    /// Parses a FEN string into a game state.
    ///
    /// Accepts either the full six fields or just the first four.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 4 && parts.len() != 6 {
            return Err(FenError::InvalidFormat(format!(
                "expected 4 or 6 fields, got {}",
                parts.len()
            )));
        }

        let board = parse_board(parts[0])?;

        let turn = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidColor(other.to_string())),
        };

        let castling = parse_castling(parts[2])?;
        let en_passant = parse_en_passant(parts[3], turn)?;

        let fullmove_number = match parts.get(5) {
            Some(field) => {
                parts[4]
                    .parse::<u16>()
                    .map_err(|_| FenError::InvalidNumber(parts[4].to_string()))?;
                field
                    .parse::<u16>()
                    .map_err(|_| FenError::InvalidNumber(field.to_string()))?
            }
            None => 1,
        };

        Ok(GameState {
            board,
            turn,
            castling,
            en_passant,
            fullmove_number,
        })
    }

    /// Converts the game state to a six-field FEN string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} 0 {}",
            board_to_fen(&self.board),
            if self.turn == Color::White { "w" } else { "b" },
            castling_to_fen(&self.castling),
            en_passant_to_fen(self.en_passant),
            self.fullmove_number
        )
    }
}

fn parse_board(board_str: &str) -> Result<Board, FenError> {
    let mut board = Board::empty();
    let ranks: Vec<&str> = board_str.split('/').collect();

    if ranks.len() != 8 {
        return Err(FenError::InvalidFormat(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }

    // FEN lists rank 8 first.
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10) {
                file += skip as u8;
            } else {
                let square = Square::new(file, rank).ok_or_else(|| {
                    FenError::InvalidFormat(format!("too many squares in rank {}", rank + 1))
                })?;
                board.set(square, Some(piece_from_char(ch)?));
                file += 1;
            }

            if file > 8 {
                return Err(FenError::InvalidFormat(format!(
                    "too many squares in rank {}",
                    rank + 1
                )));
            }
        }

        if file != 8 {
            return Err(FenError::InvalidFormat(format!(
                "rank {} has {} squares, expected 8",
                rank + 1,
                file
            )));
        }
    }

    Ok(board)
}

fn board_to_fen(board: &Board) -> String {
    let mut fen = String::new();

    for rank in (0..8).rev() {
        let mut empty_count = 0;

        for file in 0..8 {
            match board.piece_at(Square::at(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            fen.push_str(&empty_count.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen
}

fn piece_from_char(ch: char) -> Result<Piece, FenError> {
    let piece_type = PieceType::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Ok(Piece::new(piece_type, color))
}

const CASTLING_LETTERS: [(char, Color, Direction); 4] = [
    ('K', Color::White, Direction::Kingside),
    ('Q', Color::White, Direction::Queenside),
    ('k', Color::Black, Direction::Kingside),
    ('q', Color::Black, Direction::Queenside),
];

/// Each letter marks both the king and the named rook as unmoved.
fn parse_castling(castling_str: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if castling_str == "-" {
        return Ok(rights);
    }

    for ch in castling_str.chars() {
        let &(_, color, direction) = CASTLING_LETTERS
            .iter()
            .find(|(letter, _, _)| *letter == ch)
            .ok_or_else(|| FenError::InvalidCastling(castling_str.to_string()))?;
        rights = rights
            .with_king(color, true)
            .with_rook(color, direction, true);
    }

    Ok(rights)
}

fn castling_to_fen(castling: &CastlingRights) -> String {
    let s: String = CASTLING_LETTERS
        .iter()
        .filter(|(_, color, direction)| castling.allows(*color, *direction))
        .map(|(letter, _, _)| *letter)
        .collect();

    if s.is_empty() {
        "-".to_string()
    } else {
        s
    }
}

/// FEN names the square the pawn skipped; the session keeps the square it
/// landed on. Only the opponent of `turn` can have just double-pushed.
fn parse_en_passant(ep_str: &str, turn: Color) -> Result<Option<Square>, FenError> {
    if ep_str == "-" {
        return Ok(None);
    }

    let invalid = || FenError::InvalidEnPassant(ep_str.to_string());
    let skipped: Square = ep_str.parse().map_err(|_| invalid())?;

    let landed = match (turn, skipped.rank()) {
        (Color::Black, 2) => skipped.offset(0, 1),
        (Color::White, 5) => skipped.offset(0, -1),
        _ => None,
    };
    landed.map(Some).ok_or_else(invalid)
}

fn en_passant_to_fen(en_passant: Option<Square>) -> String {
    let skipped = en_passant.and_then(|landed| match landed.rank() {
        3 => landed.offset(0, -1),
        4 => landed.offset(0, 1),
        _ => None,
    });

    match skipped {
        Some(square) => square.to_string(),
        None => "-".to_string(),
    }
}

/// Standard FEN positions for testing.
pub mod positions {
    /// Starting position.
    pub const STARTING: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Position after 1.e4 e5.
    pub const AFTER_E4_E5: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2";

    /// Both sides with only king and rooks on their home squares.
    pub const CASTLING_READY: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

    /// White pawn one step from promotion, kings far apart.
    pub const PROMOTION: &str = "7k/P7/8/8/8/8/8/K7 w - - 0 1";
}
