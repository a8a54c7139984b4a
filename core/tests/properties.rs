use tactician_core::*;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn place(board: Board, s: &str, piece_type: PieceType, color: Color) -> Board {
    board.with_piece(sq(s), Some(Piece::new(piece_type, color)))
}

/// A handful of positions, plus those reached by a fixed walk through the
/// generated moves of each.
fn sample_states() -> Vec<GameState> {
    let mut states = Vec::new();

    for fen in [
        positions::STARTING,
        positions::AFTER_E4_E5,
        positions::CASTLING_READY,
        positions::PROMOTION,
        KIWIPETE,
    ] {
        let mut state = GameState::from_fen(fen).unwrap();
        states.push(state);

        for ply in 0..24 {
            let moves = state.moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[(ply * 7 + 3) % moves.len()];
            state = state.commit_move(mv.from, mv.to);
            states.push(state);
        }
    }

    states
}

#[test]
fn test_destinations_never_include_origin() {
    for state in sample_states() {
        for (origin, piece) in state.board.pieces() {
            let dests = destinations(&state.board, origin, piece.color, state.en_passant);
            assert!(!dests.contains(origin), "{origin} in its own destinations");
            assert!(dests.en_passant.iter().all(|s| dests.contains(*s)));
            for square in &dests.squares {
                assert!(square.file() < 8 && square.rank() < 8);
                assert!(!state.board.is_color(*square, piece.color));
            }
        }
    }
}

#[test]
fn test_rays_never_jump() {
    for state in sample_states() {
        for (origin, piece) in state.board.pieces() {
            if !matches!(
                piece.piece_type,
                PieceType::Bishop | PieceType::Rook | PieceType::Queen
            ) {
                continue;
            }

            for to in destinations(&state.board, origin, piece.color, None).squares {
                let df = (to.file() as i8 - origin.file() as i8).signum();
                let dr = (to.rank() as i8 - origin.rank() as i8).signum();

                let mut step = origin.offset(df, dr).unwrap();
                while step != to {
                    assert!(
                        state.board.is_empty(step),
                        "{origin}->{to} jumps over {step}"
                    );
                    step = step.offset(df, dr).unwrap();
                }
            }
        }
    }
}

#[test]
fn test_quiet_move_round_trip() {
    for state in sample_states() {
        for mv in state.moves() {
            let Some(piece) = state.board.piece_at(mv.from) else {
                continue;
            };
            if !state.board.is_empty(mv.to) || piece.piece_type == PieceType::Pawn {
                continue;
            }

            let there = apply_move(&state.board, mv.from, mv.to, piece.color);
            let back = apply_move(&there, mv.to, mv.from, piece.color);
            assert_eq!(back, state.board, "{mv} and back");
        }
    }
}

#[test]
fn test_en_passant_on_every_file() {
    for file in 0..8u8 {
        for side in [-1i8, 1] {
            let Some(capturer) = Square::new((file as i8 + side) as u8, 4) else {
                continue;
            };
            let start = Square::at(file, 6);
            let landed = Square::at(file, 4);

            let board = Board::empty()
                .with_piece(start, Some(Piece::new(PieceType::Pawn, Color::Black)))
                .with_piece(capturer, Some(Piece::new(PieceType::Pawn, Color::White)));
            let state = GameState {
                board,
                turn: Color::Black,
                ..GameState::empty()
            };

            let state = state.try_move(start, landed).unwrap();
            assert_eq!(state.en_passant, Some(landed));

            let behind = Square::at(file, 5);
            let dests = state.legal_destinations(capturer);
            assert!(dests.is_en_passant(behind));

            let after = state.try_move(capturer, behind).unwrap();
            assert!(after.board.is_empty(landed));
            assert!(after.board.is_empty(capturer));
            assert_eq!(
                after.board.piece_at(behind),
                Some(Piece::new(PieceType::Pawn, Color::White))
            );
        }
    }
}

#[test]
fn test_promotion_always_queens() {
    for file in 0..8u8 {
        for color in Color::BOTH {
            let from_rank = if color == Color::White { 6 } else { 1 };
            let from = Square::at(file, from_rank);
            let to = Square::at(file, color.promotion_rank());

            let board = Board::empty().with_piece(from, Some(Piece::new(PieceType::Pawn, color)));
            let mv = Move::new(from, to);
            let info = classify_move(&board, mv, None).unwrap();
            assert!(info.promotion);
            let next = process_move(&board, mv, color, &info);
            assert_eq!(
                next.piece_at(to),
                Some(Piece::new(PieceType::Queen, color))
            );

            // Capturing onto the last rank promotes too.
            if let Some(target) = to.offset(1, 0) {
                let board = board.with_piece(
                    target,
                    Some(Piece::new(PieceType::Rook, color.opponent())),
                );
                let mv = Move::new(from, target);
                let info = classify_move(&board, mv, None).unwrap();
                let next = process_move(&board, mv, color, &info);
                assert_eq!(
                    next.piece_at(target),
                    Some(Piece::new(PieceType::Queen, color))
                );
            }
        }
    }
}

#[test]
fn test_opening_pawn_scenario() {
    let state = GameState::new();
    let dests = state.legal_destinations(Square::at(4, 1));
    assert_eq!(dests.squares, vec![Square::at(4, 2), Square::at(4, 3)]);
    assert!(dests.en_passant.is_empty());
}

fn castle_ready() -> GameState {
    GameState::from_fen(positions::CASTLING_READY).unwrap()
}

#[test]
fn test_castling_both_ways_then_blocked_knight_square() {
    let state = castle_ready();
    assert_eq!(
        state.castle_directions(),
        vec![Direction::Queenside, Direction::Kingside]
    );

    let board = place(state.board, "b1", PieceType::Knight, Color::White);
    let blocked = GameState { board, ..state };
    assert_eq!(blocked.castle_directions(), vec![Direction::Kingside]);

    let board = place(state.board, "g1", PieceType::Knight, Color::White);
    let blocked = GameState { board, ..state };
    assert_eq!(blocked.castle_directions(), vec![Direction::Queenside]);
}

#[test]
fn test_castling_refused_when_any_condition_flips() {
    let state = castle_ready();

    // King moved.
    let moved = GameState {
        castling: state.castling.with_king(Color::White, false),
        ..state
    };
    assert!(moved.castle_directions().is_empty());

    // One rook moved.
    let moved = GameState {
        castling: state.castling.with_rook(Color::White, Direction::Queenside, false),
        ..state
    };
    assert_eq!(moved.castle_directions(), vec![Direction::Kingside]);

    // King and rook walked away and back: rights stay lost.
    let walked = state
        .commit_move(sq("h1"), sq("h2"))
        .commit_move(sq("a8"), sq("a7"))
        .commit_move(sq("h2"), sq("h1"))
        .commit_move(sq("a7"), sq("a8"));
    assert_eq!(walked.castle_directions(), vec![Direction::Queenside]);

    // Transit square attacked.
    let board = place(state.board, "d5", PieceType::Rook, Color::Black);
    let attacked = GameState { board, ..state };
    assert_eq!(attacked.castle_directions(), vec![Direction::Kingside]);

    // King attacked.
    let board = place(state.board, "e4", PieceType::Rook, Color::Black);
    let checked = GameState { board, ..state };
    assert!(checked.castle_directions().is_empty());
    assert!(checked.is_in_check());
}

#[test]
fn test_en_passant_target_lasts_one_move() {
    let state = GameState::new()
        .commit_move(sq("e2"), sq("e4"))
        .commit_move(sq("g8"), sq("f6"));
    assert_eq!(state.en_passant, None);

    let state = state.commit_move(sq("e4"), sq("e5"));
    let state = state.commit_move(sq("d7"), sq("d5"));
    assert_eq!(state.en_passant, Some(sq("d5")));
    assert!(state.legal_destinations(sq("e5")).is_en_passant(sq("d6")));
}
