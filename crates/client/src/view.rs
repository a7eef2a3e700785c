//! View models for the panels around the board: move list, candidate list
//! and status line.

use shakmaty::Color;

use chess_core::pgn::MoveRow;
use chess_core::protocol::Candidates;
use chess_core::Game;

// ---------------------------------------------------------------------------
// Move list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    rows: Vec<MoveRow>,
}

impl MoveList {
    pub fn rows(&self) -> &[MoveRow] {
        &self.rows
    }

    /// Add a confirmed move. White's moves open a new row, Black's fill the
    /// second cell of the last one.
    pub fn record(&mut self, notation: &str, mover: Color) {
        match mover {
            Color::White => {
                let turn = self.rows.len() as u32 + 1;
                self.rows.push(MoveRow {
                    turn,
                    white: notation.to_string(),
                    black: None,
                });
            }
            Color::Black => match self.rows.last_mut() {
                Some(row) if row.black.is_none() => row.black = Some(notation.to_string()),
                // Black moved first (position loaded with Black to play).
                _ => {
                    let turn = self.rows.len() as u32 + 1;
                    self.rows.push(MoveRow {
                        turn,
                        white: "...".to_string(),
                        black: Some(notation.to_string()),
                    });
                }
            },
        }
    }

    /// Drop the most recent half-move: clear Black's cell if filled,
    /// otherwise remove the whole row.
    pub fn remove_last(&mut self) {
        match self.rows.last_mut() {
            Some(row) if row.black.is_some() && row.white != "..." => row.black = None,
            Some(_) => {
                self.rows.pop();
            }
            None => {}
        }
    }

    pub fn render(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                format!(
                    "{}. {:<8} {}",
                    row.turn,
                    row.white,
                    row.black.as_deref().unwrap_or("")
                )
                .trim_end()
                .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Major,
    Minor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    pub index: usize,
    pub notation: String,
    pub rank: Rank,
}

/// The suggested replies currently on display. Every server answer replaces
/// the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    entries: Vec<CandidateEntry>,
}

impl CandidateList {
    /// Majors first, then minors, numbered continuously.
    pub fn replace(&mut self, candidates: Candidates) {
        let majors = candidates.major.into_iter().map(|n| (n, Rank::Major));
        let minors = candidates.minor.into_iter().map(|n| (n, Rank::Minor));
        self.entries = majors
            .chain(minors)
            .enumerate()
            .map(|(index, (notation, rank))| CandidateEntry {
                index,
                notation,
                rank,
            })
            .collect();
    }

    pub fn get(&self, index: usize) -> Option<&CandidateEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[CandidateEntry] {
        &self.entries
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                let marker = match e.rank {
                    Rank::Major => "*",
                    Rank::Minor => " ",
                };
                format!("[{}]{} {}", e.index, marker, e.notation)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPanel {
    pub status: String,
    pub fen: String,
    pub pgn: String,
}

impl StatusPanel {
    pub fn from_game(game: &Game) -> Self {
        Self {
            status: status_line(game),
            fen: game.fen(),
            pgn: game.pgn(),
        }
    }
}

pub fn status_line(game: &Game) -> String {
    let mover = match game.turn() {
        Color::White => "White",
        Color::Black => "Black",
    };

    if game.is_checkmate() {
        format!("Game over, {mover} is in checkmate.")
    } else if game.is_draw() {
        "Game over, drawn position".to_string()
    } else if game.is_check() {
        format!("{mover} to move, {mover} is in check")
    } else {
        format!("{mover} to move")
    }
}
