//! What the board widget shows: a position and an orientation. It never
//! judges moves; the game does that and tells the board where pieces go.

use chess_core::game::STARTING_FEN;
use chess_core::Side;

/// Answer to a piece being dropped on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece stays where it was dropped.
    Accepted,
    /// The piece jumps back to its source square.
    Snapback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    fen: String,
    orientation: Side,
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardView {
    pub fn new() -> Self {
        Self {
            fen: STARTING_FEN.to_string(),
            orientation: Side::White,
        }
    }

    pub fn fen(&self) -> &str {
        &self.fen
    }

    pub fn set_position(&mut self, fen: impl Into<String>) {
        self.fen = fen.into();
    }

    pub fn orientation(&self) -> Side {
        self.orientation
    }

    pub fn set_orientation(&mut self, side: Side) {
        self.orientation = side;
    }

    pub fn flip(&mut self) {
        self.orientation = self.orientation.flip();
    }

    /// Text diagram seen from the oriented side, with rank and file labels.
    pub fn render(&self) -> String {
        let placement = self.fen.split_whitespace().next().unwrap_or("");
        let mut grid = [['.'; 8]; 8];
        for (row, rank) in placement.split('/').take(8).enumerate() {
            let mut file = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else if file < 8 {
                    grid[row][file] = c;
                    file += 1;
                }
            }
        }

        let rows: Vec<usize> = match self.orientation {
            Side::White => (0..8).collect(),
            Side::Black => (0..8).rev().collect(),
        };
        let files: Vec<usize> = match self.orientation {
            Side::White => (0..8).collect(),
            Side::Black => (0..8).rev().collect(),
        };

        let mut out = String::new();
        for &row in &rows {
            out.push_str(&format!("{} ", 8 - row));
            let squares: Vec<String> = files.iter().map(|&f| grid[row][f].to_string()).collect();
            out.push_str(&squares.join(" "));
            out.push('\n');
        }
        let labels: Vec<String> = files
            .iter()
            .map(|&f| ((b'a' + f as u8) as char).to_string())
            .collect();
        out.push_str("  ");
        out.push_str(&labels.join(" "));
        out
    }
}
