//! Local game state: the position, its history, and the status flags the
//! board and status panel read. Rule checking is delegated to shakmaty.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position, Role, Square};

use crate::pgn;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Unreadable move '{0}'")]
    Notation(String),
}

/// A move that was accepted by the rules check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
    /// SAN including check/mate suffix, e.g. `Nf3+`.
    pub san: String,
}

impl PlayedMove {
    /// Source and target squares concatenated (`e2e4`, `e1g1` for castling).
    /// The promotion piece is deliberately left out.
    pub fn square_pair(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

struct HistoryEntry {
    before: Chess,
    played: PlayedMove,
}

pub struct Game {
    start: Chess,
    pos: Chess,
    history: Vec<HistoryEntry>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            start: Chess::default(),
            pos: Chess::default(),
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let parsed: Fen = fen.trim().parse().map_err(|e| GameError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e}"),
        })?;
        let pos: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| GameError::InvalidFen {
                fen: fen.to_string(),
                reason: format!("{e}"),
            })?;
        Ok(Self {
            start: pos.clone(),
            pos,
            history: Vec::new(),
        })
    }

    /// Replace the position and clear history. Returns false (and keeps
    /// the current state) when the FEN is not a valid position.
    pub fn load(&mut self, fen: &str) -> bool {
        match Self::from_fen(fen) {
            Ok(game) => {
                *self = game;
                true
            }
            Err(_) => false,
        }
    }

    pub fn fen(&self) -> String {
        fen_of(&self.pos)
    }

    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    pub fn position(&self) -> &Chess {
        &self.pos
    }

    /// SAN of every move played since the start position.
    pub fn history(&self) -> Vec<String> {
        self.history.iter().map(|h| h.played.san.clone()).collect()
    }

    /// Play a move given as source/target squares.
    ///
    /// The plain square pair is tried first; if that is not legal the
    /// promotion piece (queen unless stated) is added, so a pawn dropped on
    /// the last rank promotes without asking.
    pub fn play_squares(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Option<PlayedMove> {
        let plain = UciMove::Normal {
            from,
            to,
            promotion: None,
        };
        let mv = match plain.to_move(&self.pos) {
            Ok(mv) => mv,
            Err(_) => {
                let promoted = UciMove::Normal {
                    from,
                    to,
                    promotion: Some(promotion.unwrap_or(Role::Queen)),
                };
                promoted.to_move(&self.pos).ok()?
            }
        };
        Some(self.push(mv))
    }

    /// Play a move given in SAN (`Nf3`, `exd5`, `O-O`, `e8=Q+`).
    pub fn play_san(&mut self, notation: &str) -> Option<PlayedMove> {
        let san: SanPlus = notation.trim().parse().ok()?;
        let mv = san.san.to_move(&self.pos).ok()?;
        Some(self.push(mv))
    }

    pub fn undo(&mut self) -> Option<PlayedMove> {
        let entry = self.history.pop()?;
        self.pos = entry.before;
        Some(entry.played)
    }

    fn push(&mut self, mv: Move) -> PlayedMove {
        let before = self.pos.clone();
        let (from, to, promotion) = match mv.to_uci(CastlingMode::Standard) {
            UciMove::Normal {
                from,
                to,
                promotion,
            } => (from, to, promotion),
            // Drops and null moves cannot come out of standard chess.
            _ => (mv.from().unwrap_or(mv.to()), mv.to(), mv.promotion()),
        };
        let san = SanPlus::from_move_and_play_unchecked(&mut self.pos, mv).to_string();
        let played = PlayedMove {
            from,
            to,
            promotion,
            san,
        };
        self.history.push(HistoryEntry {
            before,
            played: played.clone(),
        });
        played
    }

    /// Only pieces of the side to move may be picked up, and nothing once
    /// the game is over.
    pub fn can_pick_up(&self, piece_color: Color) -> bool {
        !self.is_game_over() && piece_color == self.turn()
    }

    pub fn is_check(&self) -> bool {
        self.pos.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    pub fn is_draw(&self) -> bool {
        self.pos.is_stalemate()
            || self.pos.is_insufficient_material()
            || self.pos.halfmoves() >= 100
            || self.is_threefold_repetition()
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    fn is_threefold_repetition(&self) -> bool {
        let current = repetition_key(&self.pos);
        let earlier = self
            .history
            .iter()
            .filter(|h| repetition_key(&h.before) == current)
            .count();
        earlier + 1 >= 3
    }

    /// PGN movetext of the moves played since the start position.
    pub fn pgn(&self) -> String {
        pgn::movetext(
            self.start.fullmoves().get(),
            self.start.turn(),
            &self.history(),
        )
    }
}

pub fn fen_of(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Strips move counters from FEN, keeping only position + side + castling + ep.
pub fn normalize_fen(fen: &str) -> String {
    fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}

fn repetition_key(pos: &Chess) -> String {
    normalize_fen(&fen_of(pos))
}
