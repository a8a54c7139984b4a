use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    style::{Color as TermColor, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use std::io::{self, Write};
use tactician_agents::{Agent, HeuristicAgent, SearchConfig};
use tactician_core::{Color, Destinations, Direction, GameState, Piece, PieceType, Square};
use tracing::info;

/// Unicode glyph for a piece.
pub fn piece_symbol(piece: Piece) -> char {
    match (piece.piece_type, piece.color) {
        (PieceType::King, Color::White) => '♔',
        (PieceType::Queen, Color::White) => '♕',
        (PieceType::Rook, Color::White) => '♖',
        (PieceType::Bishop, Color::White) => '♗',
        (PieceType::Knight, Color::White) => '♘',
        (PieceType::Pawn, Color::White) => '♙',
        (PieceType::King, Color::Black) => '♚',
        (PieceType::Queen, Color::Black) => '♛',
        (PieceType::Rook, Color::Black) => '♜',
        (PieceType::Bishop, Color::Black) => '♝',
        (PieceType::Knight, Color::Black) => '♞',
        (PieceType::Pawn, Color::Black) => '♟',
    }
}

/// Terminal board for a human playing one side against the engine.
pub struct InteractiveGame {
    state: GameState,
    /// States before each ply, oldest first.
    history: Vec<GameState>,
    human: Color,
    engine: HeuristicAgent,
    cursor: (u8, u8),
    selected: Option<Square>,
    destinations: Destinations,
    /// King destinations that castle, for the selected king.
    castles: Vec<(Square, Direction)>,
    message: String,
}

impl InteractiveGame {
    pub fn new(state: GameState, human: Color, config: SearchConfig) -> Self {
        Self {
            state,
            history: Vec::new(),
            human,
            engine: HeuristicAgent::with_config(config),
            cursor: (4, human.pawn_rank()),
            selected: None,
            destinations: Destinations::default(),
            castles: Vec::new(),
            message: String::from("Use hjkl to move, Enter to select/move, q to quit"),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;

        let result = self.game_loop();

        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        result
    }

    fn game_loop(&mut self) -> io::Result<()> {
        loop {
            if self.state.turn != self.human && !self.game_over() {
                self.engine_move()?;
            }

            if self.game_over() {
                self.draw_board()?;
                event::read()?;
                break;
            }

            if self.state.is_in_check() {
                self.message = format!("{} is in check", self.state.turn);
            }
            self.draw_board()?;

            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                if kind != KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1, 0),
                    KeyCode::Char('j') | KeyCode::Down => self.move_cursor(0, -1),
                    KeyCode::Char('k') | KeyCode::Up => self.move_cursor(0, 1),
                    KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1, 0),
                    KeyCode::Enter | KeyCode::Char(' ') => self.handle_selection(),
                    KeyCode::Char('u') => self.undo_move(),
                    KeyCode::Char('n') => self.new_game(),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Sets the closing message and returns true once the side to move is done.
    fn game_over(&mut self) -> bool {
        let turn = self.state.turn;

        if self.state.board.king_square(turn).is_none() {
            self.message = format!("{turn}'s king was captured. {} wins!", turn.opponent());
            return true;
        }
        if self.state.moves().is_empty() && self.state.castle_directions().is_empty() {
            self.message = format!("{turn} has no moves. Game over.");
            return true;
        }
        false
    }

    fn move_cursor(&mut self, df: i8, dr: i8) {
        let file = self.cursor.0 as i8 + df;
        let rank = self.cursor.1 as i8 + dr;

        if (0..8).contains(&file) && (0..8).contains(&rank) {
            self.cursor = (file as u8, rank as u8);
        }
    }

    fn cursor_square(&self) -> Square {
        Square::at(self.cursor.0, self.cursor.1)
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.destinations = Destinations::default();
        self.castles.clear();
    }

    fn handle_selection(&mut self) {
        let target = self.cursor_square();

        if let Some(origin) = self.selected {
            let castle = self
                .castles
                .iter()
                .find(|(square, _)| *square == target)
                .map(|&(_, direction)| direction);

            let result = match castle {
                Some(direction) => Some(self.state.try_castle(direction)),
                None if self.destinations.contains(target) => {
                    Some(self.state.try_move(origin, target))
                }
                None => None,
            };

            match result {
                Some(Ok(next)) => {
                    self.history.push(self.state);
                    self.state = next;
                    self.message = match castle {
                        Some(direction) => format!("Castled {direction}"),
                        None => format!("Moved: {origin}{target}"),
                    };
                    self.clear_selection();
                    return;
                }
                Some(Err(err)) => {
                    self.message = err.to_string();
                    self.clear_selection();
                    return;
                }
                None => self.clear_selection(),
            }
        }

        self.select(target);
    }

    fn select(&mut self, square: Square) {
        let Some(piece) = self.state.board.piece_at(square) else {
            return;
        };
        if piece.color != self.state.turn {
            return;
        }

        self.selected = Some(square);
        self.destinations = self.state.legal_destinations(square);
        if piece.piece_type == PieceType::King {
            self.castles = self
                .state
                .castle_directions()
                .into_iter()
                .map(|direction| (direction.king_target(piece.color), direction))
                .collect();
        }

        self.message = format!(
            "Selected {:?} at {square}: {} destinations",
            piece.piece_type,
            self.destinations.len() + self.castles.len()
        );
    }

    fn engine_move(&mut self) -> io::Result<()> {
        self.message = String::from("Engine thinking...");
        self.draw_board()?;

        if let Some(decision) = self.engine.choose(&self.state) {
            info!(engine = self.engine.name(), %decision, "engine reply");
            self.history.push(self.state);
            self.state = decision.apply(&self.state);
            self.message = format!("Engine played: {decision}");
        }

        Ok(())
    }

    fn undo_move(&mut self) {
        // Back to the latest position where the human was to move.
        match self.history.iter().rposition(|s| s.turn == self.human) {
            Some(index) => {
                self.state = self.history[index];
                self.history.truncate(index);
                self.clear_selection();
                self.message = String::from("Undid last move");
            }
            None => self.message = String::from("Nothing to undo"),
        }
    }

    fn new_game(&mut self) {
        self.state = GameState::new();
        self.history.clear();
        self.clear_selection();
        self.cursor = (4, self.human.pawn_rank());
        self.message = String::from("New game started!");
    }

    fn draw_board(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(MoveTo(0, 0))?;
        stdout.execute(Clear(ClearType::FromCursorDown))?;

        println!("Tactician (vim keys: hjkl)\r");
        println!("Commands: Enter=select/move, u=undo, n=new, q=quit\r");
        println!("Select your king and its castled square to castle.\r");
        println!("\r");

        println!("  a b c d e f g h  \r");
        println!(" ┌─────────────────┐\r");

        for rank in (0..8u8).rev() {
            print!("{}│ ", rank + 1);

            for file in 0..8u8 {
                let square = Square::at(file, rank);

                let is_cursor = self.cursor == (file, rank);
                let is_selected = self.selected == Some(square);
                let is_castle = self.castles.iter().any(|(s, _)| *s == square);
                let is_destination = self.destinations.contains(square);

                let background = if is_cursor {
                    TermColor::Yellow
                } else if is_selected {
                    TermColor::Green
                } else if is_castle {
                    TermColor::Cyan
                } else if is_destination {
                    TermColor::Blue
                } else if (file + rank) % 2 == 0 {
                    TermColor::DarkGrey
                } else {
                    TermColor::Black
                };
                stdout.execute(SetBackgroundColor(background))?;

                if let Some(piece) = self.state.board.piece_at(square) {
                    let foreground = match piece.color {
                        Color::White => TermColor::White,
                        Color::Black => TermColor::Magenta,
                    };
                    stdout.execute(SetForegroundColor(foreground))?;
                    print!("{} ", piece_symbol(piece));
                } else {
                    print!("  ");
                }

                stdout.execute(ResetColor)?;
            }

            println!("│{}\r", rank + 1);
        }

        println!(" └─────────────────┘\r");
        println!("  a b c d e f g h  \r");
        println!("\r");

        println!(
            "{} to move | Move {} | You play {}\r",
            self.state.turn, self.state.fullmove_number, self.human
        );

        println!("\r");
        println!("{}\r", self.message);

        stdout.flush()?;
        Ok(())
    }
}
