//! Fire-and-forget request plumbing between the pages and the server.
//!
//! Pages never await the network. They hand back [`Outbound`] requests; the
//! [`Dispatcher`] runs each on its own task and posts the outcome, together
//! with the request that caused it, to the event loop as an [`Inbound`].
//! Replies are applied in arrival order with no cancellation, so a slow
//! reply can land after newer local changes.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use chess_core::protocol::{
    Candidates, LoadKind, MoveReply, MoveRequest, OpeningList, OpeningRequest, PositionReply,
    PositionRequest, Verdict,
};
use chess_core::Side;

use crate::clients::RepertoireClient;
use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Moves(MoveRequest),
    Opening(OpeningRequest),
    Positions(PositionRequest),
}

#[derive(Debug)]
pub enum Inbound {
    Moves {
        request: MoveRequest,
        result: Result<MoveReply, ClientError>,
    },
    /// Reply to the initial fetch or to creating an opening.
    Openings {
        request: OpeningRequest,
        result: Result<OpeningList, ClientError>,
    },
    OpeningCandidates {
        opening: String,
        color: Side,
        result: Result<Candidates, ClientError>,
    },
    Position {
        kind: LoadKind,
        result: Result<PositionReply, ClientError>,
    },
    Performance {
        verdict: Verdict,
        mv: String,
        result: Result<Value, ClientError>,
    },
}

/// Run one request to completion.
pub async fn execute(client: &RepertoireClient, outbound: Outbound) -> Inbound {
    match outbound {
        Outbound::Moves(request) => {
            let result = client.moves(&request).await;
            Inbound::Moves { request, result }
        }
        Outbound::Opening(request) => match request {
            OpeningRequest::Select {
                ref opening,
                color,
            } => {
                let result = client.opening_candidates(&request).await;
                Inbound::OpeningCandidates {
                    opening: opening.clone(),
                    color,
                    result,
                }
            }
            OpeningRequest::List | OpeningRequest::Create { .. } => {
                let result = client.openings(&request).await;
                Inbound::Openings { request, result }
            }
        },
        Outbound::Positions(PositionRequest::Load(kind)) => {
            let result = client.load_position(kind).await;
            Inbound::Position { kind, result }
        }
        Outbound::Positions(PositionRequest::Performance { verdict, mv }) => {
            let result = client.report_performance(verdict, &mv).await;
            Inbound::Performance {
                verdict,
                mv,
                result,
            }
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<RepertoireClient>,
    tx: mpsc::UnboundedSender<Inbound>,
}

impl Dispatcher {
    pub fn new(client: RepertoireClient) -> (Self, mpsc::UnboundedReceiver<Inbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                client: Arc::new(client),
                tx,
            },
            rx,
        )
    }

    /// Spawn the request and return immediately.
    pub fn send(&self, outbound: Outbound) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let inbound = execute(&client, outbound).await;
            if tx.send(inbound).is_err() {
                tracing::debug!("Event loop gone, dropping reply");
            }
        });
    }

    pub fn send_all(&self, outbound: impl IntoIterator<Item = Outbound>) {
        for request in outbound {
            self.send(request);
        }
    }
}
