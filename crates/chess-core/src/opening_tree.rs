//! Opening explorer tree: two roots (White, Black) holding the names of the
//! stored openings as leaves.

use crate::notation::Side;
use crate::protocol::OpeningList;

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: usize,
    pub text: String,
    pub selectable: bool,
    pub parent: Option<usize>,
    pub side: Side,
    pub children: Vec<TreeNode>,
}

/// Immutable view of the server's opening list. Any change (a new opening)
/// means building a fresh tree from the next list the server sends.
#[derive(Debug, Clone)]
pub struct OpeningTree {
    pub roots: Vec<TreeNode>,
}

impl OpeningTree {
    /// Build the tree. Ids are handed out depth-first starting at 0, the
    /// way a tree widget numbers its nodes.
    pub fn build(list: &OpeningList) -> Self {
        let mut next_id = 0;
        let roots = [(Side::White, &list.white), (Side::Black, &list.black)]
            .into_iter()
            .map(|(side, names)| {
                let root_id = next_id;
                next_id += 1;
                let children = names
                    .iter()
                    .map(|name| {
                        let leaf = TreeNode {
                            id: next_id,
                            text: name.clone(),
                            selectable: true,
                            parent: Some(root_id),
                            side,
                            children: Vec::new(),
                        };
                        next_id += 1;
                        leaf
                    })
                    .collect();
                TreeNode {
                    id: root_id,
                    text: side.label().to_string(),
                    selectable: false,
                    parent: None,
                    side,
                    children,
                }
            })
            .collect();

        Self { roots }
    }

    pub fn node(&self, id: usize) -> Option<&TreeNode> {
        self.roots.iter().find_map(|root| {
            if root.id == id {
                Some(root)
            } else {
                root.children.iter().find(|c| c.id == id)
            }
        })
    }

    /// Opening name and side of a selectable leaf; `None` for the roots.
    pub fn select(&self, id: usize) -> Option<(String, Side)> {
        let node = self.node(id)?;
        if !node.selectable {
            return None;
        }
        let parent = self.node(node.parent?)?;
        Some((node.text.clone(), parent.side))
    }

    pub fn leaves(&self, side: Side) -> impl Iterator<Item = &TreeNode> {
        self.roots
            .iter()
            .filter(move |r| r.side == side)
            .flat_map(|r| r.children.iter())
    }
}
