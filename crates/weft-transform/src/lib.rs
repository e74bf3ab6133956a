//! Generates the host-language and prose documents derived from a syntax
//! tree, with source maps back to the authored text.

mod filename;
mod markup;
mod template;

use weft_source_map::{CodeGen, Mapping};
use weft_syntax::{Dialect, NodeData, NodeId, SyntaxTree};

pub use filename::{VirtualFile, file_kind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    /// Isolated host-language fenced block, by zero-based index.
    Block(usize),
    Script,
    Prose,
    Index,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub text: String,
    pub mappings: Vec<Mapping>,
}

/// Buffers shared by every emitter during one transform.
pub(crate) struct TransformContext<'a> {
    tree: &'a SyntaxTree,
    file_name: &'a str,
    script: CodeGen,
    prose: CodeGen,
    blocks: Vec<(String, CodeGen)>,
}

impl<'a> TransformContext<'a> {
    fn new(tree: &'a SyntaxTree, file_name: &'a str) -> Self {
        Self {
            tree,
            file_name,
            script: CodeGen::new(),
            prose: CodeGen::new(),
            blocks: Vec::new(),
        }
    }

    pub(crate) fn children(&mut self, id: NodeId) {
        let tree = self.tree;
        for &child in tree.children(id) {
            emit(self, child);
        }
    }
}

/// One entry of a dispatch table: the first entry whose `test` accepts a
/// node emits it.
pub(crate) struct Emitter {
    test: fn(&NodeData) -> bool,
    emit: fn(&mut TransformContext<'_>, NodeId),
}

fn emit(cx: &mut TransformContext<'_>, id: NodeId) {
    let table = match cx.tree.dialect() {
        Dialect::Markdown | Dialect::Mdx => markup::EMITTERS,
        Dialect::Template => template::EMITTERS,
    };
    let data = cx.tree.data(id);
    if let Some(emitter) = table.iter().find(|emitter| (emitter.test)(data)) {
        (emitter.emit)(cx, id);
    }
}

/// Produces every artifact of `tree`, in a fixed order: blocks, script,
/// prose, index. The output depends only on the tree and `file_name`.
pub fn transform(tree: &SyntaxTree, file_name: &str) -> Vec<Artifact> {
    let cx = TransformContext::new(tree, file_name);
    let artifacts = match tree.dialect() {
        Dialect::Markdown | Dialect::Mdx => markup::transform(cx),
        Dialect::Template => template::transform(cx),
    };
    log::debug!("transformed {file_name} into {} artifacts", artifacts.len());
    artifacts
}

fn artifact(kind: ArtifactKind, file_name: String, codegen: CodeGen) -> Artifact {
    let (text, mappings) = codegen.finish();
    Artifact { kind, file_name, text, mappings }
}
