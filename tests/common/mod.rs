//! In-process stand-in for the repertoire server.
//!
//! Behaves like the real backend closely enough for the client: moves are
//! stored per position and offered back as candidates, the move history has
//! a cursor for next/previous, openings are kept per color, and training
//! positions come from a queue that ends in "finished".

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Form, Json, Router};
use serde_json::{json, Value as JsonValue};

use chess_core::game::normalize_fen;
use chess_core::{Game, SquarePair};
use client::config::Config;
use client::dispatch::Inbound;
use tokio::sync::mpsc::UnboundedReceiver;

pub type Fields = HashMap<String, String>;

#[derive(Default)]
pub struct FakeServer {
    pub game: Game,
    /// Square pairs taken back with `previous`, most recent last.
    pub redo: Vec<String>,
    /// Normalized FEN -> square pairs played from it.
    pub known: HashMap<String, Vec<String>>,
    pub openings: Vec<(String, String)>,
    pub opening_candidates: HashMap<String, JsonValue>,
    pub training: Vec<(String, String)>,
    pub training_cursor: usize,
    pub performance: Vec<(String, String)>,
    /// Every request as (path, fields), in arrival order.
    pub log: Vec<(String, Fields)>,
    /// Answer every request with 500.
    pub broken: bool,
    /// Answer `/positions` loads with this JSON instead of the queue.
    pub positions_override: Option<JsonValue>,
}

pub type Shared = Arc<Mutex<FakeServer>>;

impl FakeServer {
    fn candidates(&self) -> JsonValue {
        let key = normalize_fen(&self.game.fen());
        let major: Vec<String> = self
            .known
            .get(&key)
            .into_iter()
            .flatten()
            .filter_map(|uci| {
                let pair: SquarePair = uci.parse().ok()?;
                let mut scratch = Game::from_fen(&self.game.fen()).ok()?;
                scratch
                    .play_squares(pair.from, pair.to, pair.promotion)
                    .map(|m| m.san)
            })
            .collect();
        json!({ "major": major, "minor": [] })
    }

    fn push(&mut self, source: &str, target: &str) -> Option<String> {
        let key = normalize_fen(&self.game.fen());
        let played = self
            .game
            .play_squares(source.parse().ok()?, target.parse().ok()?, None)?;
        let uci = played.square_pair();
        let known = self.known.entry(key).or_default();
        if !known.contains(&uci) {
            known.push(uci);
        }
        self.redo.clear();
        Some(played.san)
    }

    fn next(&mut self) -> Option<String> {
        let uci = self.redo.pop()?;
        let pair: SquarePair = uci.parse().ok()?;
        self.game
            .play_squares(pair.from, pair.to, pair.promotion)
            .map(|m| m.san)
    }

    fn previous(&mut self) {
        if let Some(undone) = self.game.undo() {
            self.redo.push(undone.square_pair());
        }
    }

    fn opening_list(&self) -> JsonValue {
        let names = |color: &str| -> Vec<String> {
            self.openings
                .iter()
                .filter(|(c, _)| c == color)
                .map(|(_, n)| n.clone())
                .collect()
        };
        json!({ "white": names("white"), "black": names("black") })
    }
}

type Reply = Result<Json<JsonValue>, StatusCode>;

fn record(state: &Shared, path: &str, form: &Fields) -> Result<(), StatusCode> {
    let mut s = state.lock().unwrap();
    s.log.push((path.to_string(), form.clone()));
    if s.broken {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(())
}

async fn moves(State(state): State<Shared>, Form(form): Form<Fields>) -> Reply {
    record(&state, "/moves", &form)?;
    let mut s = state.lock().unwrap();

    if form.contains_key("previous") {
        s.previous();
        return Ok(Json(json!({ "candidates": s.candidates() })));
    }
    if form.contains_key("next") {
        let notation = s.next().ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
        return Ok(Json(json!({ "move": notation, "candidates": s.candidates() })));
    }
    match (form.get("new[source]"), form.get("new[target]")) {
        (Some(source), Some(target)) => {
            let notation = s.push(source, target).ok_or(StatusCode::BAD_REQUEST)?;
            Ok(Json(json!({ "move": notation, "candidates": s.candidates() })))
        }
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

async fn opening(State(state): State<Shared>, Form(form): Form<Fields>) -> Reply {
    record(&state, "/opening", &form)?;
    let mut s = state.lock().unwrap();

    if let Some(name) = form.get("opening") {
        let candidates = s
            .opening_candidates
            .get(name)
            .cloned()
            .unwrap_or_else(|| json!({ "major": [], "minor": [] }));
        return Ok(Json(candidates));
    }
    if let (Some(name), Some(color)) = (form.get("name"), form.get("color")) {
        let entry = (color.clone(), name.clone());
        if !s.openings.contains(&entry) {
            s.openings.push(entry);
        }
    }
    Ok(Json(s.opening_list()))
}

async fn positions(State(state): State<Shared>, Form(form): Form<Fields>) -> Reply {
    record(&state, "/positions", &form)?;
    let mut s = state.lock().unwrap();

    if let (Some(verdict), Some(mv)) = (form.get("performance"), form.get("move")) {
        s.performance.push((verdict.clone(), mv.clone()));
        return Ok(Json(json!({ "recorded": verdict })));
    }
    if let Some(reply) = s.positions_override.clone() {
        return Ok(Json(reply));
    }

    let index = match form.get("load").map(String::as_str) {
        Some("random") => 0,
        Some("full") => {
            s.training_cursor = 0;
            0
        }
        Some("next") => {
            s.training_cursor += 1;
            s.training_cursor
        }
        _ => return Err(StatusCode::BAD_REQUEST),
    };
    match s.training.get(index) {
        Some((fen, expected)) => Ok(Json(json!([fen, expected]))),
        None => Ok(Json(json!("finished"))),
    }
}

/// Start the fake server on an ephemeral port.
pub async fn spawn(server: FakeServer) -> (Config, Shared) {
    let state: Shared = Arc::new(Mutex::new(server));
    let app = Router::new()
        .route("/moves", post(moves))
        .route("/opening", post(opening))
        .route("/positions", post(positions))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    (Config::for_server(&format!("http://{addr}")), state)
}

/// Wait for the next reply delivered to the event loop.
pub async fn next_inbound(rx: &mut UnboundedReceiver<Inbound>) -> Inbound {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("Timed out waiting for reply")
        .expect("Dispatcher channel closed")
}

/// Count requests to `path` carrying `key=value`.
pub fn count_requests(state: &Shared, path: &str, key: &str, value: &str) -> usize {
    state
        .lock()
        .unwrap()
        .log
        .iter()
        .filter(|(p, f)| p == path && f.get(key).map(String::as_str) == Some(value))
        .count()
}
