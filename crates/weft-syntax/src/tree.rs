use std::fmt::Write as _;

use text_size::TextRange;
use weft_tokenizer::Dialect;

use crate::node::{Node, NodeData, NodeId, NodeKind};

/// Finished, immutable syntax tree of one document version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub(crate) text: String,
    pub(crate) dialect: Dialect,
    pub(crate) nodes: Vec<Node>,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.node(id).data
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.node(id).range
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn node_text(&self, id: NodeId) -> &str {
        &self.text[self.node(id).range]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every node in document order, parents before children.
    pub fn preorder(&self) -> Preorder<'_> {
        self.descendants(self.root())
    }

    pub fn descendants(&self, id: NodeId) -> Preorder<'_> {
        Preorder { tree: self, stack: vec![id] }
    }

    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&id| self.parent(id))
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        siblings.get(self.node(id).slot as usize + 1).copied()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let slot = (self.node(id).slot as usize).checked_sub(1)?;
        siblings.get(slot).copied()
    }

    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.dump(self.root(), 0, &mut out);
        out
    }

    fn dump(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        let _ = write!(out, "{:indent$}{:?}@{:?}", "", node.kind(), node.range, indent = depth * 2);

        match &node.data {
            NodeData::Root | NodeData::Paragraph => {}
            NodeData::Text { text }
            | NodeData::Comment { text }
            | NodeData::ImportStatement { text }
            | NodeData::JsxStatement { text }
            | NodeData::RawText { text }
            | NodeData::Mustache { text, .. } => {
                let _ = write!(out, " {text:?}");
            }
            NodeData::ExpressionStatement { text, is_inline, .. } => {
                let _ = write!(out, " {text:?}");
                if *is_inline {
                    out.push_str(" inline");
                }
            }
            NodeData::CodeBlock(block) => {
                if let Some(lang) = &block.lang {
                    let _ = write!(out, " lang={lang}");
                }
                for (key, value) in &block.attrs {
                    match value {
                        Some(value) => {
                            let _ = write!(out, " {key}={value}");
                        }
                        None => {
                            let _ = write!(out, " {key}");
                        }
                    }
                }
                let _ = write!(out, " {:?}", block.text);
            }
            NodeData::Element(element) => {
                let _ = write!(out, " <{}>", element.tag);
                if element.self_close {
                    out.push_str(" self-close");
                }
            }
            NodeData::Attribute(attribute) => {
                let _ = write!(out, " {}", attribute.name);
                if let Some(value) = &attribute.value {
                    let _ = write!(out, "={value:?}");
                }
            }
            NodeData::Directive(directive) => {
                let _ = write!(out, " v-{}", directive.name);
                if let Some(arg) = &directive.arg {
                    let _ = write!(out, ":{arg}");
                }
                for modifier in &directive.modifiers {
                    let _ = write!(out, ".{modifier}");
                }
                if let Some(value) = &directive.value {
                    let _ = write!(out, "={value:?}");
                }
            }
        }
        out.push('\n');

        for &child in &node.children {
            self.dump(child, depth + 1, out);
        }
    }
}

pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}
