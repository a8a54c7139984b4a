//! Fixed-depth exchange search.
//!
//! Every node scores its moves by [`exchange_value`], keeps the ones that do
//! not lose material, and recurses with the opponent to move. Scores are
//! negated at each level so a node always maximises for its own side. The
//! root then breaks ties by castling and by [`positional_bonus`].

use std::fmt;

use tactician_core::{
    castle_directions, classify_move, en_passant_target, generate_moves, process_move, AttackMap,
    Board, CastlingRights, Color, Direction, GameState, Move, MoveInfo, Square,
};
use tracing::{debug, trace};

use crate::evaluation::{
    exchange_value, material_score, positional_bonus, Exchange, KING_CAPTURE,
};

const DEFAULT_DEPTH: u8 = 4;

/// How deep the search looks. The root counts as depth 1.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchConfig {
    pub max_depth: u8,
}

impl SearchConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self {
            max_depth: depth.max(1),
        }
    }

    fn depth(&self) -> u8 {
        self.max_depth.max(1)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
        }
    }
}

/// A move the engine has committed to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Decision {
    Move(Move),
    Castle(Direction),
}

impl Decision {
    /// Plays this decision on `state` without re-checking it.
    #[must_use]
    pub fn apply(self, state: &GameState) -> GameState {
        match self {
            Decision::Move(mv) => state.commit_move(mv.from, mv.to),
            Decision::Castle(direction) => state.commit_castle(direction),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Move(mv) => write!(f, "{mv}"),
            Decision::Castle(Direction::Queenside) => f.write_str("O-O-O"),
            Decision::Castle(Direction::Kingside) => f.write_str("O-O"),
        }
    }
}

/// Result of a root search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchOutcome {
    pub decision: Decision,
    /// Score of the chosen line, in the root side's favour.
    pub score: i32,
    /// Positions analysed, the root included.
    pub nodes: u64,
}

/// One position in the search tree.
#[derive(Clone, Copy, Debug)]
struct Node {
    board: Board,
    /// Side the whole search is run for.
    base: Color,
    side: Color,
    en_passant: Option<Square>,
    /// Score carried down from the parent, from `side`'s point of view.
    score: i32,
    depth: u8,
}

impl Node {
    fn root(state: &GameState) -> Self {
        Self {
            board: state.board,
            base: state.turn,
            side: state.turn,
            en_passant: state.en_passant,
            score: material_score(&state.board, state.turn),
            depth: 1,
        }
    }

    fn child(&self, candidate: &Candidate) -> Self {
        let mv = candidate.mv;
        Self {
            board: process_move(&self.board, mv, self.side, &candidate.info),
            base: self.base,
            side: self.side.opponent(),
            en_passant: en_passant_target(mv, &candidate.info),
            score: -(self.score + candidate.exchange.gain),
            depth: self.depth + 1,
        }
    }

    /// A score this node hands back to its parent, as the base side sees it.
    fn base_view(&self, value: i32) -> i32 {
        if self.side == self.base {
            -value
        } else {
            value
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    mv: Move,
    info: MoveInfo,
    exchange: Exchange,
}

/// Everything a node needs to know about its moves.
struct Analysis {
    candidates: Vec<Candidate>,
    enemy: AttackMap,
    enemy_king: Option<Square>,
}

impl Analysis {
    fn of(node: &Node) -> Self {
        let ally = AttackMap::build(&node.board, node.side);
        let enemy = AttackMap::build(&node.board, node.side.opponent());

        let candidates = generate_moves(&node.board, node.side, node.en_passant)
            .into_iter()
            .filter_map(|mv| {
                let info = classify_move(&node.board, mv, node.en_passant)?;
                let exchange = exchange_value(&node.board, mv, &info, &ally, &enemy);
                Some(Candidate { mv, info, exchange })
            })
            .collect();

        Self {
            candidates,
            enemy,
            enemy_king: node.board.king_square(node.side.opponent()),
        }
    }

    fn king_capture(&self) -> Option<&Candidate> {
        self.candidates
            .iter()
            .find(|c| c.exchange.gain == KING_CAPTURE)
    }

    /// Moves that do not lose material, or every move if none qualify.
    ///
    /// The fallback still recurses on exchange scores; positional bonuses
    /// only ever decide between tied moves at the root.
    fn survivors(&self) -> Vec<&Candidate> {
        let safe: Vec<&Candidate> = self
            .candidates
            .iter()
            .filter(|c| c.exchange.net >= 0)
            .collect();

        if safe.is_empty() {
            self.candidates.iter().collect()
        } else {
            safe
        }
    }

    fn bonus(&self, candidate: &Candidate) -> i32 {
        positional_bonus(
            candidate.mv,
            candidate.info.piece.piece_type,
            self.enemy_king,
        )
    }

    /// The candidate with the highest positional bonus; the last one wins ties.
    fn most_positional<'a>(&self, candidates: &[&'a Candidate]) -> Option<&'a Candidate> {
        candidates
            .iter()
            .copied()
            .max_by_key(|candidate| self.bonus(candidate))
    }
}

struct Searcher {
    max_depth: u8,
    nodes: u64,
}

impl Searcher {
    fn new(config: SearchConfig) -> Self {
        Self {
            max_depth: config.depth(),
            nodes: 0,
        }
    }

    /// Scores a non-root node for the side that moved into it.
    fn evaluate(&mut self, node: Node) -> i32 {
        self.nodes += 1;
        let analysis = Analysis::of(&node);

        if analysis.candidates.is_empty() {
            trace!(depth = node.depth, side = %node.side, "no moves");
            return 0;
        }

        if node.depth >= self.max_depth {
            let best = analysis
                .candidates
                .iter()
                .map(|c| c.exchange.net)
                .max()
                .unwrap_or(0);
            let score = -(node.score + best);
            trace!(
                depth = node.depth,
                side = %node.side,
                score = node.base_view(score),
                "leaf"
            );
            return score;
        }

        if analysis.king_capture().is_some() {
            return -(node.score + KING_CAPTURE);
        }

        let best = analysis
            .survivors()
            .into_iter()
            .map(|candidate| self.evaluate(node.child(candidate)))
            .max()
            .unwrap_or(0);
        let score = -best;

        trace!(
            depth = node.depth,
            side = %node.side,
            score = node.base_view(score),
            "branch"
        );
        score
    }

    fn search_root(&mut self, state: &GameState) -> Option<(Decision, i32)> {
        self.nodes += 1;
        let root = Node::root(state);
        let analysis = Analysis::of(&root);

        if analysis.candidates.is_empty() {
            return None;
        }

        if let Some(capture) = analysis.king_capture() {
            return Some((Decision::Move(capture.mv), root.score + KING_CAPTURE));
        }

        let safe: Vec<&Candidate> = analysis
            .candidates
            .iter()
            .filter(|c| c.exchange.net >= 0)
            .collect();

        if safe.is_empty() {
            let all: Vec<&Candidate> = analysis.candidates.iter().collect();
            let chosen = analysis.most_positional(&all)?;
            return Some((Decision::Move(chosen.mv), root.score));
        }

        let scored: Vec<(i32, &Candidate)> = safe
            .into_iter()
            .map(|candidate| {
                let score = if self.max_depth == 1 {
                    root.score + candidate.exchange.net
                } else {
                    self.evaluate(root.child(candidate))
                };
                trace!(mv = %candidate.mv, score, "root move");
                (score, candidate)
            })
            .collect();

        let best = scored.iter().map(|&(score, _)| score).max()?;
        let tied: Vec<&Candidate> = scored
            .iter()
            .filter(|&&(score, _)| score == best)
            .map(|&(_, candidate)| candidate)
            .collect();

        if let [only] = tied.as_slice() {
            return Some((Decision::Move(only.mv), best));
        }

        let castles = castle_directions(&root.board, root.side, &state.castling, &analysis.enemy);
        if let Some(&direction) = castles.first() {
            return Some((Decision::Castle(direction), best));
        }

        let chosen = analysis.most_positional(&tied)?;
        Some((Decision::Move(chosen.mv), best))
    }
}

/// Runs a full search for the side to move.
///
/// Returns `None` when that side has no moves at all.
pub fn search(state: &GameState, config: SearchConfig) -> Option<SearchOutcome> {
    let mut searcher = Searcher::new(config);
    let (decision, score) = searcher.search_root(state)?;

    debug!(
        color = %state.turn,
        %decision,
        score,
        nodes = searcher.nodes,
        depth = searcher.max_depth,
        "search complete"
    );

    Some(SearchOutcome {
        decision,
        score,
        nodes: searcher.nodes,
    })
}

/// Picks the engine's move for the side to move.
pub fn choose_move(state: &GameState, config: SearchConfig) -> Option<Decision> {
    search(state, config).map(|outcome| outcome.decision)
}

/// Board-level form of [`choose_move`]: plays the chosen move and returns
/// the new board, the en passant target it leaves behind and the castling
/// rights after it.
pub fn choose_move_board(
    board: &Board,
    color: Color,
    en_passant: Option<Square>,
    castling: &CastlingRights,
    config: SearchConfig,
) -> Option<(Board, Option<Square>, CastlingRights)> {
    let state = GameState {
        board: *board,
        turn: color,
        castling: *castling,
        en_passant,
        fullmove_number: 1,
    };
    let next = choose_move(&state, config)?.apply(&state);
    Some((next.board, next.en_passant, next.castling))
}
