//! Error types surfaced at the session boundary.
//!
//! The board mutators never fail; these errors only come from parsing
//! positions and from the validating wrappers on [`crate::GameState`].

use thiserror::Error;

use crate::types::{Color, Direction, Square};

/// A square could not be parsed from algebraic notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square: {0:?}")]
pub struct SquareError(pub String);

/// A requested move was not among the generated destinations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece at {0}")]
    EmptyOrigin(Square),

    #[error("piece at {square} belongs to {owner}, not {expected}")]
    WrongOwner {
        square: Square,
        owner: Color,
        expected: Color,
    },

    #[error("{from} cannot move to {to}")]
    IllegalDestination { from: Square, to: Square },

    #[error("{color} cannot castle {direction}")]
    CastleUnavailable { color: Color, direction: Direction },
}

/// FEN parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN format: {0}")]
    InvalidFormat(String),

    #[error("invalid piece character: '{0}'")]
    InvalidPiece(char),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastling(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassant(String),

    #[error("invalid number: {0}")]
    InvalidNumber(String),
}
