//! Request and reply shapes of the `/moves`, `/opening` and `/positions`
//! endpoints. Requests go out form-encoded with jQuery-style bracket keys,
//! replies come back as JSON.

use serde::{Deserialize, Deserializer, Serialize};

use crate::notation::Side;

pub type FormFields = Vec<(&'static str, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Moves,
    Opening,
    Positions,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Moves => "/moves",
            Endpoint::Opening => "/opening",
            Endpoint::Positions => "/positions",
        }
    }
}

// ---------------------------------------------------------------------------
// /moves
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRequest {
    /// A move the user made locally. `mover` stays on the client so the
    /// reply lands in the right column of the move list.
    New {
        source: String,
        target: String,
        mover: Side,
    },
    /// Ask for the next move of the stored line from this position.
    Next { fen: String, mover: Side },
    /// Step back; the local move was already undone.
    Previous { fen: String },
}

impl MoveRequest {
    pub fn form(&self) -> FormFields {
        match self {
            MoveRequest::New { source, target, .. } => vec![
                ("new[source]", source.clone()),
                ("new[target]", target.clone()),
            ],
            MoveRequest::Next { fen, .. } => vec![("next", fen.clone())],
            MoveRequest::Previous { fen } => vec![("previous", fen.clone())],
        }
    }
}

/// Suggested replies. `major` candidates are the main repertoire choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Candidates {
    pub major: Vec<String>,
    pub minor: Vec<String>,
}

impl<'de> Deserialize<'de> for Candidates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Ranked {
                #[serde(default)]
                major: Vec<String>,
                #[serde(default)]
                minor: Vec<String>,
            },
            // Older servers send one unranked list.
            Flat(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Ranked { major, minor } => Candidates { major, minor },
            Raw::Flat(major) => Candidates {
                major,
                minor: Vec::new(),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReply {
    /// Server notation of the move just made; absent on `previous`.
    #[serde(rename = "move", default)]
    pub notation: Option<String>,
    #[serde(default)]
    pub candidates: Candidates,
}

// ---------------------------------------------------------------------------
// /opening
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpeningRequest {
    /// Initial fetch of all opening names.
    List,
    /// Candidates for a stored opening.
    Select { opening: String, color: Side },
    /// Store a new opening; the reply is the full list again.
    Create { color: Side, name: String },
}

impl OpeningRequest {
    pub fn form(&self) -> FormFields {
        match self {
            OpeningRequest::List => Vec::new(),
            OpeningRequest::Select { opening, color } => vec![
                ("opening", opening.clone()),
                ("color", color.label().to_string()),
            ],
            OpeningRequest::Create { color, name } => vec![
                ("color", color.as_str().to_string()),
                ("name", name.clone()),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningList {
    #[serde(default)]
    pub white: Vec<String>,
    #[serde(default)]
    pub black: Vec<String>,
}

// ---------------------------------------------------------------------------
// /positions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// One random position, single-shot.
    Random,
    /// Start a sequential run through the whole opening.
    Full,
    /// Next position of the running sequence.
    Next,
}

impl LoadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadKind::Random => "random",
            LoadKind::Full => "full",
            LoadKind::Next => "next",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Correct => "correct",
            Verdict::Wrong => "wrong",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionRequest {
    Load(LoadKind),
    Performance { verdict: Verdict, mv: String },
}

impl PositionRequest {
    pub fn form(&self) -> FormFields {
        match self {
            PositionRequest::Load(kind) => vec![("load", kind.as_str().to_string())],
            PositionRequest::Performance { verdict, mv } => vec![
                ("performance", verdict.as_str().to_string()),
                ("move", mv.clone()),
            ],
        }
    }
}

pub const FINISHED_SENTINEL: &str = "finished";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionReply {
    Position { fen: String, expected: String },
    Finished,
}

impl<'de> Deserialize<'de> for PositionReply {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Pair(String, String),
            Word(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Pair(fen, expected) => Ok(PositionReply::Position { fen, expected }),
            Raw::Word(w) if w == FINISHED_SENTINEL => Ok(PositionReply::Finished),
            Raw::Word(w) => Err(serde::de::Error::custom(format!(
                "expected [fen, move] or \"{FINISHED_SENTINEL}\", got \"{w}\""
            ))),
        }
    }
}
