//! Training mode: the server hands out a position and the one move it wants
//! to see; the user's move is judged against it and the verdict reported.
//!
//! ```text
//! Idle -> AwaitingPosition -> AwaitingJudgment -> Solved            (single)
//!                 ^                  |   ^
//!                 |   correct        |   | wrong: undo, retry
//!                 +------------------+---+
//!                 |
//!                 +-> Finished  ("finished" in a sequential run)
//! ```

use serde_json::Value;
use shakmaty::{Color, Role, Square};

use chess_core::protocol::{LoadKind, PositionReply, PositionRequest, Verdict};
use chess_core::Game;

use crate::board::{BoardView, DropOutcome};
use crate::dispatch::Outbound;
use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingMode {
    /// One random position; a correct answer ends the exercise.
    Single,
    /// Walk the whole opening; a correct answer fetches the next position.
    Sequential,
}

impl From<LoadKind> for TrainingMode {
    fn from(kind: LoadKind) -> Self {
        match kind {
            LoadKind::Random => TrainingMode::Single,
            LoadKind::Full | LoadKind::Next => TrainingMode::Sequential,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub fen: String,
    /// Source and target squares run together, e.g. `g1f3`.
    pub expected: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingState {
    Idle,
    AwaitingPosition(TrainingMode),
    AwaitingJudgment {
        exercise: Exercise,
        mode: TrainingMode,
    },
    Solved(Exercise),
    Finished,
}

pub struct TrainingController {
    pub game: Game,
    pub board: BoardView,
    state: TrainingState,
    status: String,
}

impl Default for TrainingController {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingController {
    pub fn new() -> Self {
        Self {
            game: Game::new(),
            board: BoardView::new(),
            state: TrainingState::Idle,
            status: String::new(),
        }
    }

    pub fn state(&self) -> &TrainingState {
        &self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Single random position.
    pub fn load_random(&mut self) -> Outbound {
        self.request_position(LoadKind::Random)
    }

    /// Start (or restart) a sequential run.
    pub fn train_full(&mut self) -> Outbound {
        self.request_position(LoadKind::Full)
    }

    /// A fresh exercise starts with a blank status. The verdict of the last
    /// answer stays up while a sequential run fetches its next position.
    fn request_position(&mut self, kind: LoadKind) -> Outbound {
        if !matches!(kind, LoadKind::Next) {
            self.status.clear();
        }
        self.state = TrainingState::AwaitingPosition(kind.into());
        Outbound::Positions(PositionRequest::Load(kind))
    }

    /// Pieces can only be picked up while an answer is expected.
    pub fn on_drag_start(&self, piece_color: Color) -> bool {
        matches!(self.state, TrainingState::AwaitingJudgment { .. })
            && self.game.can_pick_up(piece_color)
    }

    pub fn on_drop(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> (DropOutcome, Vec<Outbound>) {
        let TrainingState::AwaitingJudgment { exercise, mode } = &self.state else {
            return (DropOutcome::Snapback, Vec::new());
        };
        let (exercise, mode) = (exercise.clone(), *mode);

        let Some(played) = self.game.play_squares(from, to, promotion) else {
            return (DropOutcome::Snapback, Vec::new());
        };
        let answer = played.square_pair();

        if answer != exercise.expected {
            // Same position stays loaded for another try.
            tracing::info!(%answer, expected = %exercise.expected, "Wrong move");
            self.game.undo();
            self.status = "Wrong".to_string();
            return (
                DropOutcome::Snapback,
                vec![performance(Verdict::Wrong, answer)],
            );
        }

        tracing::info!(%answer, "Correct move");
        self.status = "Correct".to_string();
        let mut outbound = vec![performance(Verdict::Correct, answer)];
        match mode {
            TrainingMode::Sequential => outbound.push(self.request_position(LoadKind::Next)),
            TrainingMode::Single => self.state = TrainingState::Solved(exercise),
        }
        (DropOutcome::Accepted, outbound)
    }

    pub fn on_snap_end(&mut self) {
        self.board.set_position(self.game.fen());
    }

    /// A position (or the end-of-run sentinel) arrived. Replies are applied
    /// whenever they show up, even if the user moved on meanwhile.
    pub fn on_position(&mut self, kind: LoadKind, result: Result<PositionReply, ClientError>) {
        match result {
            Ok(PositionReply::Position { fen, expected }) => {
                if !self.game.load(&fen) {
                    tracing::warn!(%fen, "Server sent an unreadable position");
                    return;
                }
                self.board.set_position(self.game.fen());
                self.board.set_orientation(self.game.turn().into());
                self.state = TrainingState::AwaitingJudgment {
                    exercise: Exercise { fen, expected },
                    mode: kind.into(),
                };
            }
            Ok(PositionReply::Finished) => {
                tracing::info!("Training run finished");
                self.state = TrainingState::Finished;
                self.status = "Finished".to_string();
            }
            Err(e) => tracing::warn!(load = kind.as_str(), "Failed to load position: {e}"),
        }
    }

    pub fn on_performance(&self, verdict: Verdict, mv: &str, result: Result<Value, ClientError>) {
        match result {
            Ok(reply) => {
                tracing::debug!(verdict = verdict.as_str(), mv, %reply, "Performance recorded")
            }
            Err(e) => {
                tracing::warn!(verdict = verdict.as_str(), mv, "Failed to record performance: {e}")
            }
        }
    }
}

fn performance(verdict: Verdict, mv: String) -> Outbound {
    Outbound::Positions(PositionRequest::Performance { verdict, mv })
}
