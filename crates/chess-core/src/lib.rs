//! Shared chess state and wire types for the repertoire client.

pub mod game;
pub mod notation;
pub mod opening_tree;
pub mod pgn;
pub mod protocol;

pub use game::{Game, GameError, PlayedMove};
pub use notation::{Side, SquarePair};
pub use shakmaty;
