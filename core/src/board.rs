//! An immutable snapshot of the 64 tiles.
//!
//! Every change produces a new `Board`; the type is `Copy` so search
//! branches each own their snapshot.
use std::fmt;

use crate::types::*;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    /// Indexed by `Square::index()`, rank 0 first.
    tiles: [Option<Piece>; 64],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Self { tiles: [None; 64] }
    }

    /// Creates the standard starting position, White on ranks 0 and 1.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();

        for (file, &piece_type) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            for color in Color::BOTH {
                board.set(
                    Square::at(file, color.home_rank()),
                    Some(Piece::new(piece_type, color)),
                );
                board.set(
                    Square::at(file, color.pawn_rank()),
                    Some(Piece::new(PieceType::Pawn, color)),
                );
            }
        }

        board
    }

    /// Gets the piece at the given square.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.tiles[square.index()]
    }

    /// Bounds-checked lookup by signed coordinates.
    ///
    /// Off-board coordinates yield [`Probe::Border`] without touching the
    /// tile array.
    pub fn probe(&self, file: i8, rank: i8) -> Probe {
        match Square::from_coords(file, rank) {
            None => Probe::Border,
            Some(square) => match self.piece_at(square) {
                None => Probe::Empty,
                Some(piece) => Probe::Occupied(piece.color),
            },
        }
    }

    /// Returns a copy of this board with `square` set to `piece`.
    #[must_use]
    pub fn with_piece(&self, square: Square, piece: Option<Piece>) -> Self {
        let mut board = *self;
        board.set(square, piece);
        board
    }

    /// Returns a copy of this board with `square` cleared.
    #[must_use]
    pub fn without_piece(&self, square: Square) -> Self {
        self.with_piece(square, None)
    }

    /// In-place write, only reachable through the copy-producing mutators.
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.tiles[square.index()] = piece;
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Returns true if the given square holds a piece of `color`.
    pub fn is_color(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.color == color)
    }

    /// Every occupied square in row-major order, rank 0 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Every square occupied by `color`, in row-major order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Finds the king of the given color.
    ///
    /// Returns `None` once the king has been captured, which the engine
    /// allows to happen inside speculative lines.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.piece_type == PieceType::King)
            .map(|(square, _)| square)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self
                    .piece_at(Square::at(file, rank))
                    .map_or('.', Piece::to_char);
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
