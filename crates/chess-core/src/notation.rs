//! Square-pair move input (`e2e4`, `e7e8q`) and side names.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use shakmaty::{Color, Role, Square};

use crate::game::GameError;

static SQUARE_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-h][1-8])([a-h][1-8])([qrbnQRBN])?$").unwrap());

/// A source/target pair as produced by dragging a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquarePair {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl FromStr for SquarePair {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let cap = SQUARE_PAIR_RE
            .captures(s)
            .ok_or_else(|| GameError::Notation(s.to_string()))?;

        let square = |m: &str| -> Result<Square, GameError> {
            m.parse().map_err(|_| GameError::Notation(s.to_string()))
        };
        let promotion = cap
            .get(3)
            .and_then(|m| m.as_str().chars().next())
            .and_then(|c| Role::from_char(c.to_ascii_lowercase()));

        Ok(Self {
            from: square(&cap[1])?,
            to: square(&cap[2])?,
            promotion,
        })
    }
}

/// The side an opening belongs to, which is also the board orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Lowercase form used on the wire and for orientation.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }

    /// Capitalised label used for the tree roots.
    pub fn label(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Side {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "white" | "w" => Ok(Side::White),
            "black" | "b" => Ok(Side::Black),
            _ => Err(GameError::Notation(s.to_string())),
        }
    }
}
