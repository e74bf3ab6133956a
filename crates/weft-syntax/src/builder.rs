use drop_bomb::DropBomb;
use text_size::{TextRange, TextSize};
use weft_tokenizer::Dialect;

use crate::node::{Node, NodeData, NodeId};
use crate::tree::SyntaxTree;

/// Mutable construction surface of a [`SyntaxTree`].
pub struct TreeBuilder {
    text: String,
    dialect: Dialect,
    nodes: Vec<Node>,
    bomb: DropBomb,
}

impl TreeBuilder {
    pub fn new(text: &str, dialect: Dialect) -> Self {
        let root = Node {
            range: TextRange::up_to(TextSize::of(text)),
            parent: None,
            children: Vec::new(),
            data: NodeData::Root,
            slot: 0,
        };
        Self {
            text: text.to_owned(),
            dialect,
            nodes: vec![root],
            bomb: DropBomb::new("TreeBuilder must be finished"),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Allocates a detached node.
    pub fn alloc(&mut self, data: NodeData, range: TextRange) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node { range, parent: None, children: Vec::new(), data, slot: 0 });
        id
    }

    /// Makes `child` the last child of `parent`, detaching it from its
    /// previous parent first. Detaching shifts only the later siblings, so
    /// moving a last child is O(1).
    pub fn attach(&mut self, child: NodeId, parent: NodeId) {
        if let Some(old) = self.nodes[child.index()].parent.take() {
            let slot = self.nodes[child.index()].slot as usize;
            self.nodes[old.index()].children.remove(slot);
            for index in slot..self.nodes[old.index()].children.len() {
                let sibling = self.nodes[old.index()].children[index];
                self.nodes[sibling.index()].slot = index as u32;
            }
        }
        let slot = self.nodes[parent.index()].children.len() as u32;
        self.nodes[parent.index()].children.push(child);
        let node = &mut self.nodes[child.index()];
        node.parent = Some(parent);
        node.slot = slot;
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn finish(self) -> SyntaxTree {
        let Self { text, dialect, nodes, mut bomb } = self;
        bomb.defuse();
        SyntaxTree { text, dialect, nodes }
    }
}
