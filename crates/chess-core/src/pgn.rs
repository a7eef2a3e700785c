//! PGN movetext rendering and the paired rows of the move list.

use shakmaty::Color;

/// One row of the move list: a turn number, White's move and, once played,
/// Black's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRow {
    pub turn: u32,
    pub white: String,
    pub black: Option<String>,
}

/// Render SAN moves as PGN movetext (`1. e4 e5 2. Nf3`).
/// `first_turn`/`first_color` describe the position the moves start from.
pub fn movetext(first_turn: u32, first_color: Color, sans: &[String]) -> String {
    let mut out = Vec::with_capacity(sans.len() + sans.len() / 2 + 1);
    let mut turn = first_turn;
    let mut color = first_color;

    for (i, san) in sans.iter().enumerate() {
        match color {
            Color::White => out.push(format!("{turn}. {san}")),
            Color::Black if i == 0 => out.push(format!("{turn}... {san}")),
            Color::Black => out.push(san.clone()),
        }
        if color == Color::Black {
            turn += 1;
        }
        color = !color;
    }

    out.join(" ")
}
