use camino::Utf8Path;
use text_size::TextRange;
use weft_source_map::{CodeGen, Mapping, Mode};
use weft_syntax::{CodeBlock, Dialect, NodeData, NodeId};

use crate::filename::{INDEX_SUFFIX, MDX_SCRIPT_SUFFIX, PROSE_SUFFIX, block_name};
use crate::{Artifact, ArtifactKind, Emitter, TransformContext, artifact};

const NULL_EXPORT: &str = "export {};\n";

pub(crate) static EMITTERS: &[Emitter] = &[
    Emitter { test: |data| matches!(data, NodeData::Paragraph), emit: paragraph },
    Emitter { test: |data| matches!(data, NodeData::Text { .. }), emit: text },
    Emitter {
        test: |data| {
            matches!(data, NodeData::ImportStatement { .. } | NodeData::JsxStatement { .. })
        },
        emit: statement,
    },
    Emitter { test: |data| matches!(data, NodeData::ExpressionStatement { .. }), emit: expression },
    Emitter { test: |data| matches!(data, NodeData::CodeBlock(_)), emit: code_block },
];

/// Extension of the isolated file for a fenced block, if its language is
/// one the host understands.
fn host_language(lang: &str) -> Option<&'static str> {
    Some(match lang.to_ascii_lowercase().as_str() {
        "js" | "javascript" | "javascriptreact" => "js",
        "jsx" => "jsx",
        "ts" | "typescript" | "typescriptreact" => "ts",
        "tsx" => "tsx",
        _ => return None,
    })
}

fn file_stem_of(name: &str) -> &str {
    let file_name = Utf8Path::new(name).file_name().unwrap_or(name);
    file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem)
}

pub(crate) fn transform(mut cx: TransformContext<'_>) -> Vec<Artifact> {
    let tree = cx.tree;
    cx.script.add_text("import React from 'react';\n\n");
    cx.children(tree.root());
    cx.script.add_text(NULL_EXPORT);

    let TransformContext { file_name, script, prose, blocks, .. } = cx;
    let mut artifacts = blocks
        .into_iter()
        .enumerate()
        .map(|(index, (name, codegen))| artifact(ArtifactKind::Block(index), name, codegen))
        .collect::<Vec<_>>();

    let script_name = format!("{file_name}{MDX_SCRIPT_SUFFIX}");
    let index = index_text(&script_name);
    artifacts.push(artifact(ArtifactKind::Script, script_name, script));
    artifacts.push(artifact(ArtifactKind::Prose, format!("{file_name}{PROSE_SUFFIX}"), prose));

    if tree.dialect() == Dialect::Mdx {
        artifacts.push(Artifact {
            kind: ArtifactKind::Index,
            file_name: format!("{file_name}{INDEX_SUFFIX}"),
            text: index,
            mappings: Vec::new(),
        });
    }
    artifacts
}

fn index_text(script_name: &str) -> String {
    format!(
        "import {{ FC }} from 'react';\n\
         \n\
         declare const MDXComponent: FC<Record<string, any>>;\n\
         export default MDXComponent;\n\
         \n\
         export * from './{}';\n",
        file_stem_of(script_name)
    )
}

fn paragraph(cx: &mut TransformContext<'_>, id: NodeId) {
    cx.children(id);
    cx.prose.add_text("\n\n");
}

fn text(cx: &mut TransformContext<'_>, id: NodeId) {
    let tree = cx.tree;
    cx.prose.add_code(tree.node_text(id), Mode::Offset, tree.range(id));
}

fn statement(cx: &mut TransformContext<'_>, id: NodeId) {
    let tree = cx.tree;
    cx.script.add_code(tree.node_text(id), Mode::Offset, tree.range(id));
    cx.script.add_text(";\n\n");
}

fn expression(cx: &mut TransformContext<'_>, id: NodeId) {
    let tree = cx.tree;
    let NodeData::ExpressionStatement { text, text_range, .. } = tree.data(id) else {
        return;
    };

    let start = cx.script.len();
    cx.script.add_text("{");
    cx.script.add_code(text, Mode::Offset, *text_range);
    cx.script.add_text("}");
    let braces = TextRange::new(start, cx.script.len());
    cx.script.add_mapping(Mapping::new(Mode::Totally, tree.range(id), braces));
    cx.script.add_text(";\n\n");
}

fn code_block(cx: &mut TransformContext<'_>, id: NodeId) {
    let tree = cx.tree;
    let NodeData::CodeBlock(block) = tree.data(id) else {
        return;
    };

    match block.lang.as_deref().and_then(host_language) {
        Some(ext) => host_block(cx, id, block, ext),
        None => {
            cx.prose.add_text(&format!("```{}\n", block.lang.as_deref().unwrap_or_default()));
            cx.prose.add_code(&block.text, Mode::Offset, block.content_range);
            cx.prose.add_text("\n```\n\n");
        }
    }
}

fn host_block(cx: &mut TransformContext<'_>, id: NodeId, block: &CodeBlock, ext: &str) {
    let name = block_name(cx.file_name, cx.blocks.len(), ext);

    let mut codegen = CodeGen::new();
    codegen.add_code(&block.text, Mode::Offset, block.content_range);
    codegen.add_text(&format!("\n\n;{NULL_EXPORT}"));

    let import = cx.script.add_text(&format!(";\nimport './{}';\n", file_stem_of(&name)));
    let opener = TextRange::new(cx.tree.range(id).start(), block.opener_end);
    cx.script.add_mapping(Mapping::new(Mode::Expand, opener, import));

    cx.blocks.push((name, codegen));
}
