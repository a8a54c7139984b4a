use std::fmt;
use std::str::FromStr;

use crate::error::SquareError;

/// One of the two players.
///
/// The discriminant is the signed unit used in direction arithmetic:
/// White's pawns advance toward higher ranks, Black's toward lower ones.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(i8)]
pub enum Color {
    White = 1,
    Black = -1,
}

impl Color {
    /// Both colors, White first.
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    /// Returns `+1` for White and `-1` for Black.
    pub const fn sign(self) -> i8 {
        self as i8
    }

    /// Returns the opposite color.
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Dense index for per-color tables.
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// The rank holding this color's king and rooks at the start.
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// The rank this color's pawns start on.
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// The rank where this color's pawns promote.
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

/// The six types of chess pieces.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Material value in quarter pawns, so the bishop's 3.25 stays integral.
    pub const fn value(self) -> i32 {
        match self {
            PieceType::Pawn => 4,
            PieceType::Knight => 12,
            PieceType::Bishop => 13,
            PieceType::Rook => 20,
            PieceType::Queen => 36,
            PieceType::King => 80,
        }
    }

    /// Lowercase FEN letter.
    pub const fn to_char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// Parses a FEN letter of either case.
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

/// A chess piece with both type and color.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    /// FEN letter: uppercase for White.
    pub const fn to_char(self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// What a bounds-checked probe of the board found.
///
/// `Border` is distinct from both an empty tile and an occupied one so
/// that scanning loops can treat the board edge like a blocker.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Probe {
    Border,
    Empty,
    Occupied(Color),
}

/// A square on the board, stored as `rank * 8 + file`.
/// File and rank are zero-based; rank 0 is White's home rank.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank, or `None` when off the board.
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Creates a square from coordinates already known to be on the board.
    ///
    /// # Panics
    /// Panics if either coordinate is outside `0..8`.
    pub const fn at(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "square coordinates out of range");
        Square(rank * 8 + file)
    }

    /// Creates a square from signed coordinates, or `None` when off the board.
    pub const fn from_coords(file: i8, rank: i8) -> Option<Self> {
        if file >= 0 && file < 8 && rank >= 0 && rank < 8 {
            Some(Square(rank as u8 * 8 + file as u8))
        } else {
            None
        }
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the square shifted by `(df, dr)`, if still on the board.
    pub const fn offset(self, df: i8, dr: i8) -> Option<Self> {
        Self::from_coords(self.file() as i8 + df, self.rank() as i8 + dr)
    }

    /// Straight-line distance between square centres.
    pub fn distance(self, other: Square) -> f64 {
        let df = f64::from(other.file()) - f64::from(self.file());
        let dr = f64::from(other.rank()) - f64::from(self.rank());
        (df * df + dr * dr).sqrt()
    }

    /// All 64 squares, rank 0 first, files ascending within a rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(|| SquareError(s.to_string()))
    }
}

/// The side of the board a castle goes toward.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Queenside,
    Kingside,
}

impl Direction {
    /// Queenside first, matching the order castling options are offered in.
    pub const BOTH: [Direction; 2] = [Direction::Queenside, Direction::Kingside];

    pub const fn index(self) -> usize {
        match self {
            Direction::Queenside => 0,
            Direction::Kingside => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Queenside => f.write_str("queenside"),
            Direction::Kingside => f.write_str("kingside"),
        }
    }
}

/// An origin/destination pair.
///
/// En passant, promotion and double pushes are not stored here; they are
/// re-derived from the board by [`crate::classify_move`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_sign_and_opponent() {
        assert_eq!(Color::White.sign(), 1);
        assert_eq!(Color::Black.sign(), -1);
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent().sign(), Color::White.sign());
    }

    #[test]
    fn test_square_coordinates() {
        let e4: Square = "e4".parse().unwrap();
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.index(), 28);
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(e4.offset(1, 1), Some(Square::at(5, 4)));
        assert_eq!(Square::at(7, 7).offset(1, 0), None);
        assert_eq!(Square::at(0, 0).offset(0, -1), None);
    }

    #[test]
    fn test_square_parse_errors() {
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert!("a10".parse::<Square>().is_err());
    }

    #[test]
    fn test_square_distance() {
        let a1 = Square::at(0, 0);
        assert_eq!(a1.distance(Square::at(3, 4)), 5.0);
        assert_eq!(a1.distance(a1), 0.0);
    }

    #[test]
    fn test_bishop_value_is_exact() {
        assert_eq!(PieceType::Bishop.value(), 13);
        assert_eq!(PieceType::Pawn.value() * 13, PieceType::Bishop.value() * 4);
    }
}
