//! Move relay for the play board.
//!
//! A move accepted by the local rules check is shown immediately and sent
//! to the server; the server's answer fills in the move list and replaces
//! the candidates. A failed request is only logged. The optimistic local
//! move stays, so client and server can drift apart until the next action.

use shakmaty::{Color, Role, Square};

use chess_core::protocol::{Candidates, MoveReply, MoveRequest};
use chess_core::Game;

use crate::board::{BoardView, DropOutcome};
use crate::dispatch::Outbound;
use crate::error::ClientError;
use crate::view::{CandidateList, MoveList, Rank, StatusPanel};

pub struct PlaySession {
    pub game: Game,
    pub board: BoardView,
    pub move_list: MoveList,
    pub candidates: CandidateList,
    pub status: StatusPanel,
}

impl Default for PlaySession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaySession {
    pub fn new() -> Self {
        let game = Game::new();
        let status = StatusPanel::from_game(&game);
        Self {
            game,
            board: BoardView::new(),
            move_list: MoveList::default(),
            candidates: CandidateList::default(),
            status,
        }
    }

    pub fn on_drag_start(&self, piece_color: Color) -> bool {
        self.game.can_pick_up(piece_color)
    }

    /// Piece dropped on `to`. Illegal moves snap back and nothing is sent.
    pub fn on_drop(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> (DropOutcome, Option<Outbound>) {
        let mover = self.game.turn().into();
        let Some(played) = self.game.play_squares(from, to, promotion) else {
            tracing::debug!(%from, %to, "Illegal move, snapping back");
            return (DropOutcome::Snapback, None);
        };

        tracing::debug!(san = %played.san, "Local move accepted");
        self.refresh_status();
        let request = MoveRequest::New {
            source: from.to_string(),
            target: to.to_string(),
            mover,
        };
        (DropOutcome::Accepted, Some(Outbound::Moves(request)))
    }

    /// Castling, en passant and promotion change more than the dragged
    /// piece, so the board is re-synced from the game once the piece lands.
    pub fn on_snap_end(&mut self) {
        self.board.set_position(self.game.fen());
    }

    /// Ask the server for the next move of the stored line.
    pub fn forward(&self) -> Outbound {
        Outbound::Moves(MoveRequest::Next {
            fen: self.game.fen(),
            mover: self.game.turn().into(),
        })
    }

    /// Take back the last local move and ask for the candidates of the
    /// position before it. The server is not told to undo anything; it is
    /// expected to keep its own cursor.
    pub fn backward(&mut self) -> Option<Outbound> {
        let undone = self.game.undo()?;
        tracing::debug!(san = %undone.san, "Took back move");
        self.board.set_position(self.game.fen());
        self.move_list.remove_last();
        self.refresh_status();

        Some(Outbound::Moves(MoveRequest::Previous {
            fen: self.game.fen(),
        }))
    }

    /// Clicking a major candidate plays it as if it had been dragged.
    /// Minor candidates have no action.
    pub fn click_candidate(&mut self, index: usize) -> Option<Outbound> {
        let entry = self.candidates.get(index)?.clone();
        if entry.rank != Rank::Major {
            tracing::debug!(index, notation = %entry.notation, "Minor candidate clicked, ignoring");
            return None;
        }

        let mover = self.game.turn().into();
        let Some(played) = self.game.play_san(&entry.notation) else {
            tracing::warn!(notation = %entry.notation, "Candidate is not legal here");
            return None;
        };
        self.board.set_position(self.game.fen());
        self.refresh_status();

        Some(Outbound::Moves(MoveRequest::New {
            source: played.from.to_string(),
            target: played.to.to_string(),
            mover,
        }))
    }

    pub fn show_candidates(&mut self, candidates: Candidates) {
        self.candidates.replace(candidates);
    }

    /// Replies may arrive after further local moves, so the move list
    /// column comes from the request, not from the current turn.
    pub fn on_move_reply(&mut self, request: &MoveRequest, result: Result<MoveReply, ClientError>) {
        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(?request, "Move request failed: {e}");
                return;
            }
        };

        match request {
            MoveRequest::New { mover, .. } => {
                if let Some(notation) = &reply.notation {
                    self.move_list.record(notation, (*mover).into());
                }
            }
            MoveRequest::Next { mover, .. } => match reply.notation.as_deref() {
                Some(notation) => match self.game.play_san(notation) {
                    Some(_) => {
                        self.board.set_position(self.game.fen());
                        self.move_list.record(notation, (*mover).into());
                        self.refresh_status();
                    }
                    None => tracing::warn!(notation, "Server move is not legal here"),
                },
                None => tracing::warn!("Server sent no next move"),
            },
            MoveRequest::Previous { .. } => {}
        }

        self.show_candidates(reply.candidates);
    }

    fn refresh_status(&mut self) {
        self.status = StatusPanel::from_game(&self.game);
    }
}
