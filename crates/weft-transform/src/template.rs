use text_size::{TextRange, TextSize};
use weft_source_map::{Mapping, Mode};
use weft_syntax::{Directive, NodeData, NodeId};

use crate::filename::VUE_SCRIPT_SUFFIX;
use crate::{Artifact, ArtifactKind, Emitter, TransformContext, artifact};

pub(crate) static EMITTERS: &[Emitter] = &[
    Emitter { test: |data| matches!(data, NodeData::Element(_)), emit: element },
    Emitter { test: |data| matches!(data, NodeData::Attribute(_)), emit: attribute },
    Emitter { test: |data| matches!(data, NodeData::Mustache { .. }), emit: mustache },
    Emitter {
        test: |data| matches!(data, NodeData::Directive(Directive { value: Some(_), .. })),
        emit: directive,
    },
];

fn is_raw_element(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("script") || tag.eq_ignore_ascii_case("style")
}

pub(crate) fn transform(mut cx: TransformContext<'_>) -> Vec<Artifact> {
    let tree = cx.tree;
    let mut lang = "js";

    for id in tree.preorder() {
        let NodeData::Element(element) = tree.data(id) else {
            continue;
        };
        if !element.tag.eq_ignore_ascii_case("script") {
            continue;
        }
        for &child in tree.children(id) {
            match tree.data(child) {
                NodeData::Attribute(attribute)
                    if attribute.name == "lang" && attribute.value.as_deref() == Some("ts") =>
                {
                    lang = "ts";
                }
                NodeData::RawText { text } => {
                    cx.script.add_code(text, Mode::Offset, tree.range(child));
                    cx.script.add_text("\n");
                }
                _ => {}
            }
        }
    }

    cx.children(tree.root());

    let file_name = format!("{}{VUE_SCRIPT_SUFFIX}.{lang}", cx.file_name);
    vec![artifact(ArtifactKind::Script, file_name, cx.script)]
}

fn element(cx: &mut TransformContext<'_>, id: NodeId) {
    let tree = cx.tree;
    let NodeData::Element(element) = tree.data(id) else {
        return;
    };
    if !is_raw_element(&element.tag) {
        cx.children(id);
    }
}

/// Attribute values may hold mustaches.
fn attribute(cx: &mut TransformContext<'_>, id: NodeId) {
    cx.children(id);
}

fn mustache(cx: &mut TransformContext<'_>, id: NodeId) {
    let tree = cx.tree;
    if let NodeData::Mustache { text, text_range } = tree.data(id) {
        embed(cx, text, *text_range);
    }
}

/// Emits the directive value as a statement. The directive name maps onto
/// the whole statement.
fn directive(cx: &mut TransformContext<'_>, id: NodeId) {
    let tree = cx.tree;
    let NodeData::Directive(Directive { value: Some(value), value_range: Some(value_range), .. }) =
        tree.data(id)
    else {
        return;
    };

    let source = tree.node_text(id);
    let name = source.split_once('=').map_or(source, |(name, _)| name);
    let name = TextRange::at(tree.range(id).start(), TextSize::of(name));

    let statement = embed(cx, value, *value_range);
    cx.script.add_mapping(Mapping::new(Mode::Expand, name, statement));
}

fn embed(cx: &mut TransformContext<'_>, text: &str, source: TextRange) -> TextRange {
    let start = cx.script.len();
    cx.script.add_text(";(");
    cx.script.add_code(text, Mode::Offset, source);
    cx.script.add_text(");\n");
    TextRange::new(start, cx.script.len())
}
