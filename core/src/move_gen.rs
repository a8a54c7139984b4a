use crate::board::Board;
use crate::types::{Color, Move, Piece, PieceType, Probe, Square};

pub const KNIGHT_VECTORS: [(i8, i8); 8] = [
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (-1, 2),
    (1, 2),
    (-2, -1),
    (-2, 1),
];

pub const KING_VECTORS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const BISHOP_VECTORS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, 1), (1, -1)];

pub const ROOK_VECTORS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Destination squares for one piece.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Destinations {
    /// Every destination, en passant captures included.
    pub squares: Vec<Square>,
    /// The subset of `squares` that are en passant captures.
    pub en_passant: Vec<Square>,
}

impl Destinations {
    pub fn contains(&self, square: Square) -> bool {
        self.squares.contains(&square)
    }

    pub fn is_en_passant(&self, square: Square) -> bool {
        self.en_passant.contains(&square)
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }
}

impl From<Vec<Square>> for Destinations {
    fn from(squares: Vec<Square>) -> Self {
        Self {
            squares,
            en_passant: Vec::new(),
        }
    }
}

/// Pseudo-legal destinations for the piece on `origin`, moving as `color`.
///
/// Castling is not produced here; see [`crate::castle_directions`].
/// An empty origin yields no destinations.
pub fn destinations(
    board: &Board,
    origin: Square,
    color: Color,
    en_passant: Option<Square>,
) -> Destinations {
    let Some(piece) = board.piece_at(origin) else {
        return Destinations::default();
    };

    match piece.piece_type {
        PieceType::Pawn => pawn_destinations(board, origin, color, en_passant),
        PieceType::Knight => jump_destinations(board, origin, color, &KNIGHT_VECTORS).into(),
        PieceType::King => jump_destinations(board, origin, color, &KING_VECTORS).into(),
        PieceType::Bishop => ray_destinations(board, origin, color, &BISHOP_VECTORS).into(),
        PieceType::Rook => ray_destinations(board, origin, color, &ROOK_VECTORS).into(),
        PieceType::Queen => {
            let mut squares = ray_destinations(board, origin, color, &BISHOP_VECTORS);
            squares.extend(ray_destinations(board, origin, color, &ROOK_VECTORS));
            squares.into()
        }
    }
}

/// Destinations the input layer may offer for a selected piece.
///
/// Empty unless `origin` holds a piece owned by `color`.
pub fn legal_destinations(
    board: &Board,
    origin: Square,
    color: Color,
    en_passant: Option<Square>,
) -> Destinations {
    if board.is_color(origin, color) {
        destinations(board, origin, color, en_passant)
    } else {
        Destinations::default()
    }
}

/// Every pseudo-legal move for `color`, pieces in row-major order.
pub fn generate_moves(board: &Board, color: Color, en_passant: Option<Square>) -> Vec<Move> {
    board
        .pieces_of(color)
        .flat_map(|(origin, _)| {
            destinations(board, origin, color, en_passant)
                .squares
                .into_iter()
                .map(move |to| Move::new(origin, to))
        })
        .collect()
}

fn pawn_destinations(
    board: &Board,
    origin: Square,
    color: Color,
    en_passant: Option<Square>,
) -> Destinations {
    let mut result = Destinations::default();
    let file = origin.file() as i8;
    let rank = origin.rank() as i8;
    let forward = color.sign();

    for df in [-1, 1] {
        let (to_file, to_rank) = (file + df, rank + forward);
        match board.probe(to_file, to_rank) {
            Probe::Occupied(owner) if owner == color.opponent() => {
                result.squares.push(Square::at(to_file as u8, to_rank as u8));
            }
            Probe::Empty => {
                // The target is the landing square of the double push, so the
                // victim sits beside us and we land behind it.
                let beside = Square::from_coords(to_file, rank);
                if beside.is_some() && beside == en_passant {
                    let target = Square::at(to_file as u8, to_rank as u8);
                    result.squares.push(target);
                    result.en_passant.push(target);
                }
            }
            _ => {}
        }
    }

    if board.probe(file, rank + forward) == Probe::Empty {
        result
            .squares
            .push(Square::at(file as u8, (rank + forward) as u8));

        if origin.rank() == color.pawn_rank()
            && board.probe(file, rank + 2 * forward) == Probe::Empty
        {
            result
                .squares
                .push(Square::at(file as u8, (rank + 2 * forward) as u8));
        }
    }

    result
}

fn jump_destinations(
    board: &Board,
    origin: Square,
    color: Color,
    vectors: &[(i8, i8)],
) -> Vec<Square> {
    let file = origin.file() as i8;
    let rank = origin.rank() as i8;

    vectors
        .iter()
        .filter_map(|&(df, dr)| match board.probe(file + df, rank + dr) {
            Probe::Border => None,
            Probe::Occupied(owner) if owner == color => None,
            _ => Some(Square::at((file + df) as u8, (rank + dr) as u8)),
        })
        .collect()
}

fn ray_destinations(
    board: &Board,
    origin: Square,
    color: Color,
    vectors: &[(i8, i8)],
) -> Vec<Square> {
    let mut squares = Vec::new();

    for &(df, dr) in vectors {
        let mut file = origin.file() as i8;
        let mut rank = origin.rank() as i8;

        loop {
            file += df;
            rank += dr;

            match board.probe(file, rank) {
                Probe::Border => break,
                Probe::Occupied(owner) if owner == color => break,
                Probe::Empty => squares.push(Square::at(file as u8, rank as u8)),
                Probe::Occupied(_) => {
                    squares.push(Square::at(file as u8, rank as u8));
                    break;
                }
            }
        }
    }

    squares
}

/// Special-move flags re-derived from the board for a single move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MoveInfo {
    /// The piece standing on the origin before the move.
    pub piece: Piece,
    /// The captured piece type; `Pawn` for en passant.
    pub captured: Option<PieceType>,
    pub en_passant: bool,
    pub promotion: bool,
    pub double_push: bool,
}

/// Classifies `mv` against `board` and the current en passant target.
///
/// This is the single place that decides whether a move captures en
/// passant, promotes, or opens an en passant target. Returns `None` if the
/// origin is empty.
pub fn classify_move(board: &Board, mv: Move, en_passant: Option<Square>) -> Option<MoveInfo> {
    let piece = board.piece_at(mv.from)?;
    let is_pawn = piece.piece_type == PieceType::Pawn;

    let en_passant = is_pawn
        && mv.from.file() != mv.to.file()
        && board.is_empty(mv.to)
        && en_passant.is_some()
        && Square::new(mv.to.file(), mv.from.rank()) == en_passant;

    let captured = if en_passant {
        Some(PieceType::Pawn)
    } else {
        board.piece_at(mv.to).map(|p| p.piece_type)
    };

    Some(MoveInfo {
        piece,
        captured,
        en_passant,
        promotion: is_pawn && (mv.to.rank() == 0 || mv.to.rank() == 7),
        double_push: is_pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2,
    })
}
