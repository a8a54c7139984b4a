use tracing::debug;

use crate::attacks::AttackMap;
use crate::board::Board;
use crate::castling::{castle_directions, CastlingRights};
use crate::error::MoveError;
use crate::move_gen::{classify_move, generate_moves, legal_destinations, Destinations};
use crate::mutate::{castle, en_passant_target, process_move};
use crate::types::*;

/// Complete state of a game between two players.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct GameState {
    /// The current board position
    pub board: Board,
    /// Which side is to move
    pub turn: Color,
    /// Unmoved kings and rooks for both sides
    pub castling: CastlingRights,
    /// Landing square of the previous move if it was a double pawn push
    pub en_passant: Option<Square>,
    /// Full move number (incremented after Black's move)
    pub fullmove_number: u16,
}

impl GameState {
    /// Creates a new game in the starting position.
    pub fn new() -> Self {
        Self {
            board: Board::starting_position(),
            turn: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            fullmove_number: 1,
        }
    }

    /// Creates an empty game state for testing.
    pub fn empty() -> Self {
        Self {
            board: Board::empty(),
            turn: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            fullmove_number: 1,
        }
    }

    /// Destinations for the piece on `origin`, if it belongs to the side to move.
    pub fn legal_destinations(&self, origin: Square) -> Destinations {
        legal_destinations(&self.board, origin, self.turn, self.en_passant)
    }

    /// Every pseudo-legal move for the side to move, castling excluded.
    pub fn moves(&self) -> Vec<Move> {
        generate_moves(&self.board, self.turn, self.en_passant)
    }

    /// Castling directions open to the side to move.
    pub fn castle_directions(&self) -> Vec<Direction> {
        let enemy = AttackMap::build(&self.board, self.turn.opponent());
        castle_directions(&self.board, self.turn, &self.castling, &enemy)
    }

    /// Applies a move without checking it, returning the next state.
    ///
    /// Castling rights and the en passant target are updated, and the turn
    /// passes to the opponent.
    #[must_use]
    pub fn commit_move(&self, origin: Square, destination: Square) -> Self {
        let mv = Move::new(origin, destination);
        let Some(info) = classify_move(&self.board, mv, self.en_passant) else {
            return *self;
        };

        debug!(
            color = %self.turn,
            %mv,
            en_passant = info.en_passant,
            promotion = info.promotion,
            "committing move"
        );

        let mut next = *self;
        next.board = process_move(&self.board, mv, self.turn, &info);
        next.castling = self.castling.after_move(&self.board, origin, destination);
        next.en_passant = en_passant_target(mv, &info);
        next.pass_turn();
        next
    }

    /// Castles without checking legality, returning the next state.
    #[must_use]
    pub fn commit_castle(&self, direction: Direction) -> Self {
        debug!(color = %self.turn, %direction, "committing castle");

        let mut next = *self;
        next.board = castle(&self.board, self.turn, direction);
        next.castling = self.castling.after_castle(self.turn);
        next.en_passant = None;
        next.pass_turn();
        next
    }

    /// Applies a move after checking it against the generated destinations.
    pub fn try_move(&self, origin: Square, destination: Square) -> Result<Self, MoveError> {
        let piece = self
            .board
            .piece_at(origin)
            .ok_or(MoveError::EmptyOrigin(origin))?;

        if piece.color != self.turn {
            return Err(MoveError::WrongOwner {
                square: origin,
                owner: piece.color,
                expected: self.turn,
            });
        }

        if !self.legal_destinations(origin).contains(destination) {
            return Err(MoveError::IllegalDestination {
                from: origin,
                to: destination,
            });
        }

        Ok(self.commit_move(origin, destination))
    }

    /// Castles after checking that the direction is currently open.
    pub fn try_castle(&self, direction: Direction) -> Result<Self, MoveError> {
        if !self.castle_directions().contains(&direction) {
            return Err(MoveError::CastleUnavailable {
                color: self.turn,
                direction,
            });
        }

        Ok(self.commit_castle(direction))
    }

    /// Returns true if the given square is attacked by the given color.
    pub fn is_attacked_by(&self, square: Square, attacker: Color) -> bool {
        AttackMap::build(&self.board, attacker).is_attacked(square)
    }

    /// Returns true if the side to move's king is attacked.
    ///
    /// Informational only: move generation does not filter moves that leave
    /// the king attacked.
    pub fn is_in_check(&self) -> bool {
        self.board
            .king_square(self.turn)
            .is_some_and(|king| self.is_attacked_by(king, self.turn.opponent()))
    }

    fn pass_turn(&mut self) {
        if self.turn == Color::Black {
            self.fullmove_number += 1;
        }
        self.turn = self.turn.opponent();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_starting_position() {
        let state = GameState::new();
        assert_eq!(state.turn, Color::White);
        assert_eq!(state.castling, CastlingRights::all());
        assert!(state.en_passant.is_none());
        assert_eq!(state.fullmove_number, 1);
        assert_eq!(state.moves().len(), 20);
    }

    #[test]
    fn test_double_push_sets_target() {
        let state = GameState::new().commit_move(sq("e2"), sq("e4"));
        assert_eq!(state.turn, Color::Black);
        assert_eq!(state.en_passant, Some(sq("e4")));
        assert_eq!(state.fullmove_number, 1);

        let state = state.commit_move(sq("g8"), sq("f6"));
        assert_eq!(state.en_passant, None);
        assert_eq!(state.fullmove_number, 2);
    }

    #[test]
    fn test_en_passant_capture_through_session() {
        let state = GameState::new()
            .commit_move(sq("e2"), sq("e4"))
            .commit_move(sq("a7"), sq("a6"))
            .commit_move(sq("e4"), sq("e5"))
            .commit_move(sq("d7"), sq("d5"));

        let dests = state.legal_destinations(sq("e5"));
        assert!(dests.is_en_passant(sq("d6")));

        let state = state.try_move(sq("e5"), sq("d6")).unwrap();
        assert!(state.board.is_empty(sq("d5")));
        assert!(state.board.is_color(sq("d6"), Color::White));
    }

    #[test]
    fn test_en_passant_expires_after_one_move() {
        let state = GameState::new()
            .commit_move(sq("e2"), sq("e4"))
            .commit_move(sq("a7"), sq("a6"))
            .commit_move(sq("e4"), sq("e5"))
            .commit_move(sq("d7"), sq("d5"))
            .commit_move(sq("h2"), sq("h3"))
            .commit_move(sq("a6"), sq("a5"));

        assert!(state.legal_destinations(sq("e5")).en_passant.is_empty());
    }

    #[test]
    fn test_rook_move_clears_right() {
        let state = GameState::new()
            .commit_move(sq("h2"), sq("h4"))
            .commit_move(sq("a7"), sq("a6"))
            .commit_move(sq("h1"), sq("h3"));

        assert!(!state.castling.rook_unmoved(Color::White, Direction::Kingside));
        assert!(state.castling.rook_unmoved(Color::White, Direction::Queenside));
    }

    #[test]
    fn test_try_move_errors() {
        let state = GameState::new();
        assert_eq!(
            state.try_move(sq("e4"), sq("e5")),
            Err(MoveError::EmptyOrigin(sq("e4")))
        );
        assert!(matches!(
            state.try_move(sq("e7"), sq("e5")),
            Err(MoveError::WrongOwner { .. })
        ));
        assert_eq!(
            state.try_move(sq("e2"), sq("e5")),
            Err(MoveError::IllegalDestination {
                from: sq("e2"),
                to: sq("e5"),
            })
        );
    }

    #[test]
    fn test_castle_through_session() {
        let state = GameState::new()
            .commit_move(sq("g1"), sq("f3"))
            .commit_move(sq("a7"), sq("a6"))
            .commit_move(sq("e2"), sq("e3"))
            .commit_move(sq("a6"), sq("a5"));

        assert!(state.try_castle(Direction::Kingside).is_err());

        let state = state
            .commit_move(sq("f1"), sq("e2"))
            .commit_move(sq("a5"), sq("a4"));
        assert_eq!(state.castle_directions(), vec![Direction::Kingside]);

        let state = state.try_castle(Direction::Kingside).unwrap();
        assert!(state.board.is_color(sq("g1"), Color::White));
        assert!(state.board.is_color(sq("f1"), Color::White));
        assert!(!state.castling.king_unmoved(Color::White));
        assert_eq!(state.turn, Color::Black);
    }

    #[test]
    fn test_is_attacked() {
        let state = GameState::empty();
        let board = state
            .board
            .with_piece(sq("e4"), Some(Piece::new(PieceType::Rook, Color::White)));
        let state = GameState { board, ..state };

        assert!(state.is_attacked_by(sq("e1"), Color::White));
        assert!(state.is_attacked_by(sq("e8"), Color::White));
        assert!(state.is_attacked_by(sq("a4"), Color::White));
        assert!(state.is_attacked_by(sq("h4"), Color::White));
        assert!(!state.is_attacked_by(sq("d5"), Color::White));
    }
}
