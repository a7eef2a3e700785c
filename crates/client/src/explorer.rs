//! Opening explorer panel: the tree of stored openings, the current
//! selection, and the form for adding a new opening.

use chess_core::opening_tree::OpeningTree;
use chess_core::protocol::{Candidates, OpeningList, OpeningRequest};
use chess_core::Side;

use crate::dispatch::Outbound;
use crate::error::ClientError;

#[derive(Debug, Default)]
pub struct OpeningExplorer {
    tree: Option<OpeningTree>,
    selected: Option<String>,
}

impl OpeningExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> Option<&OpeningTree> {
        self.tree.as_ref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Initial fetch of the opening list.
    pub fn load(&self) -> Outbound {
        Outbound::Opening(OpeningRequest::List)
    }

    /// Replace the tree with the server's list.
    pub fn on_openings(&mut self, result: Result<OpeningList, ClientError>) {
        match result {
            Ok(list) => {
                tracing::debug!(
                    white = list.white.len(),
                    black = list.black.len(),
                    "Rebuilding opening tree"
                );
                self.tree = Some(OpeningTree::build(&list));
            }
            Err(e) => tracing::warn!("Failed to load openings: {e}"),
        }
    }

    /// Select a leaf of the tree. Roots and unknown ids do nothing.
    pub fn select(&mut self, node_id: usize) -> Option<Outbound> {
        let (opening, color) = self.tree.as_ref()?.select(node_id)?;
        self.selected = Some(opening.clone());
        Some(Outbound::Opening(OpeningRequest::Select { opening, color }))
    }

    /// Submit the new-opening form. The reply is the complete list, which
    /// rebuilds the tree.
    pub fn create(&self, color: Side, name: &str) -> Option<Outbound> {
        let name = name.trim();
        if name.is_empty() {
            tracing::warn!("Refusing to add an opening without a name");
            return None;
        }
        Some(Outbound::Opening(OpeningRequest::Create {
            color,
            name: name.to_string(),
        }))
    }

    /// Candidates for a selected opening, and the side the board should
    /// face. `None` when the request failed.
    pub fn on_selection(
        &self,
        opening: &str,
        color: Side,
        result: Result<Candidates, ClientError>,
    ) -> Option<(Candidates, Side)> {
        match result {
            Ok(candidates) => Some((candidates, color)),
            Err(e) => {
                tracing::warn!(opening, %color, "Failed to load opening candidates: {e}");
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let Some(tree) = &self.tree else {
            return "(openings not loaded)".to_string();
        };
        let mut lines = Vec::new();
        for root in &tree.roots {
            lines.push(format!("{} {}", root.id, root.text));
            for leaf in &root.children {
                let marker = if self.selected.as_deref() == Some(leaf.text.as_str()) {
                    ">"
                } else {
                    " "
                };
                lines.push(format!("  {marker}{} {}", leaf.id, leaf.text));
            }
        }
        lines.join("\n")
    }
}
