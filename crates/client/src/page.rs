//! The two screens of the client. The repertoire page combines the play
//! board with the opening explorer (they share board and candidate list);
//! the training page drives the training controller.

use std::str::FromStr;

use chess_core::{Side, SquarePair};
use shakmaty::Position;

use crate::board::DropOutcome;
use crate::dispatch::{Inbound, Outbound};
use crate::explorer::OpeningExplorer;
use crate::play::PlaySession;
use crate::training::TrainingController;

/// A user gesture, as typed at the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Drag(SquarePair),
    Forward,
    Backward,
    Candidate(usize),
    ShowTree,
    Open(usize),
    NewOpening(Side, String),
    Flip,
    LoadRandom,
    TrainFull,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown command '{0}' (type 'help')")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let unknown = || UnknownCommand(line.to_string());
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        match (word.to_lowercase().as_str(), rest) {
            ("f" | "forward", "") => Ok(Command::Forward),
            ("b" | "back" | "backward", "") => Ok(Command::Backward),
            ("c" | "candidate", n) => n.parse().map(Command::Candidate).map_err(|_| unknown()),
            ("tree", "") => Ok(Command::ShowTree),
            ("open", n) => n.parse().map(Command::Open).map_err(|_| unknown()),
            ("new", rest) => {
                let (color, name) = rest.split_once(char::is_whitespace).ok_or_else(unknown)?;
                let side: Side = color.parse().map_err(|_| unknown())?;
                Ok(Command::NewOpening(side, name.trim().to_string()))
            }
            ("flip", "") => Ok(Command::Flip),
            ("random", "") => Ok(Command::LoadRandom),
            ("full", "") => Ok(Command::TrainFull),
            ("help" | "?", "") => Ok(Command::Help),
            ("q" | "quit" | "exit", "") => Ok(Command::Quit),
            (_, "") => word.parse().map(Command::Drag).map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}

pub trait Page {
    /// Requests to send as soon as the page opens.
    fn start(&mut self) -> Vec<Outbound>;

    fn handle(&mut self, command: Command) -> Vec<Outbound>;

    fn apply(&mut self, inbound: Inbound) -> Vec<Outbound>;

    fn render(&self) -> String;

    fn help(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Repertoire page
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RepertoirePage {
    pub play: PlaySession,
    pub explorer: OpeningExplorer,
}

impl RepertoirePage {
    pub fn new() -> Self {
        Self::default()
    }

    fn drag(&mut self, pair: SquarePair) -> Vec<Outbound> {
        let piece_color = self.play.game.position().board().color_at(pair.from);
        if !piece_color.is_some_and(|c| self.play.on_drag_start(c)) {
            tracing::debug!(from = %pair.from, "Nothing to pick up");
            return Vec::new();
        }
        let (outcome, outbound) = self.play.on_drop(pair.from, pair.to, pair.promotion);
        if outcome == DropOutcome::Accepted {
            self.play.on_snap_end();
        }
        outbound.into_iter().collect()
    }
}

impl Page for RepertoirePage {
    fn start(&mut self) -> Vec<Outbound> {
        vec![self.explorer.load()]
    }

    fn handle(&mut self, command: Command) -> Vec<Outbound> {
        match command {
            Command::Drag(pair) => self.drag(pair),
            Command::Forward => vec![self.play.forward()],
            Command::Backward => self.play.backward().into_iter().collect(),
            Command::Candidate(index) => self.play.click_candidate(index).into_iter().collect(),
            Command::ShowTree => vec![self.explorer.load()],
            Command::Open(node_id) => self.explorer.select(node_id).into_iter().collect(),
            Command::NewOpening(side, name) => {
                self.explorer.create(side, &name).into_iter().collect()
            }
            Command::Flip => {
                self.play.board.flip();
                Vec::new()
            }
            other => {
                tracing::info!(?other, "Not available on this page");
                Vec::new()
            }
        }
    }

    fn apply(&mut self, inbound: Inbound) -> Vec<Outbound> {
        match inbound {
            Inbound::Moves { request, result } => self.play.on_move_reply(&request, result),
            Inbound::Openings { result, .. } => self.explorer.on_openings(result),
            Inbound::OpeningCandidates {
                opening,
                color,
                result,
            } => {
                let selection = self.explorer.on_selection(&opening, color, result);
                if let Some((candidates, side)) = selection {
                    self.play.show_candidates(candidates);
                    self.play.board.set_orientation(side);
                }
            }
            other => tracing::warn!(?other, "Unexpected reply on repertoire page"),
        }
        Vec::new()
    }

    fn render(&self) -> String {
        let mut sections = vec![
            self.play.board.render(),
            format!("Status: {}", self.play.status.status),
            format!("FEN:    {}", self.play.status.fen),
            format!("PGN:    {}", self.play.status.pgn),
        ];
        let moves = self.play.move_list.render();
        if !moves.is_empty() {
            sections.push(format!("Moves:\n{moves}"));
        }
        let candidates = self.play.candidates.render();
        if !candidates.is_empty() {
            sections.push(format!("Candidates (* = major):\n{candidates}"));
        }
        if let Some(name) = self.explorer.selected() {
            sections.push(format!("Opening: {name}"));
        }
        sections.push(format!("Openings:\n{}", self.explorer.render()));
        sections.join("\n\n")
    }

    fn help(&self) -> &'static str {
        "e2e4 | e7e8q   move a piece\n\
         f / b         forward / back\n\
         c <n>         play candidate n\n\
         tree          reload openings\n\
         open <id>     select opening\n\
         new <white|black> <name>   add opening\n\
         flip          turn the board\n\
         q             quit"
    }
}

// ---------------------------------------------------------------------------
// Training page
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct TrainingPage {
    pub trainer: TrainingController,
}

impl TrainingPage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Page for TrainingPage {
    fn start(&mut self) -> Vec<Outbound> {
        Vec::new()
    }

    fn handle(&mut self, command: Command) -> Vec<Outbound> {
        match command {
            Command::LoadRandom => vec![self.trainer.load_random()],
            Command::TrainFull => vec![self.trainer.train_full()],
            Command::Drag(pair) => {
                let piece_color = self.trainer.game.position().board().color_at(pair.from);
                if !piece_color.is_some_and(|c| self.trainer.on_drag_start(c)) {
                    return Vec::new();
                }
                let (outcome, outbound) = self.trainer.on_drop(pair.from, pair.to, pair.promotion);
                if outcome == DropOutcome::Accepted {
                    self.trainer.on_snap_end();
                }
                outbound
            }
            Command::Flip => {
                self.trainer.board.flip();
                Vec::new()
            }
            other => {
                tracing::info!(?other, "Not available on this page");
                Vec::new()
            }
        }
    }

    fn apply(&mut self, inbound: Inbound) -> Vec<Outbound> {
        match inbound {
            Inbound::Position { kind, result } => self.trainer.on_position(kind, result),
            Inbound::Performance {
                verdict,
                mv,
                result,
            } => self.trainer.on_performance(verdict, &mv, result),
            other => tracing::warn!(?other, "Unexpected reply on training page"),
        }
        Vec::new()
    }

    fn render(&self) -> String {
        let mut sections = vec![self.trainer.board.render()];
        if !self.trainer.status().is_empty() {
            sections.push(format!("Status: {}", self.trainer.status()));
        }
        sections.join("\n\n")
    }

    fn help(&self) -> &'static str {
        "random        load a random position\n\
         full          train the whole opening\n\
         e2e4          answer with a move\n\
         flip          turn the board\n\
         q             quit"
    }
}
