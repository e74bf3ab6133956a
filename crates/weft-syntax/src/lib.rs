mod builder;
mod node;
mod tree;

pub use builder::TreeBuilder;
pub use node::{Attribute, CodeBlock, Directive, Element, Node, NodeData, NodeId, NodeKind};
pub use text_size::{TextRange, TextSize};
pub use tree::{Preorder, SyntaxTree};
pub use weft_tokenizer::Dialect;
