use weft_errors::Severity;
use weft_syntax::{
    CodeBlock, Dialect, Directive, Element, NodeData, NodeId, TextRange, TextSize, TreeBuilder,
};

use crate::{LintConfig, lint};

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::new(start), TextSize::new(end))
}

fn element(builder: &mut TreeBuilder, parent: NodeId, at: TextRange, directive: &str) -> NodeId {
    let element = builder.alloc(
        NodeData::Element(Element {
            tag: "p".into(),
            self_close: true,
            start_tag_end: Some(at.end()),
            end_tag_start: None,
        }),
        at,
    );
    builder.attach(element, parent);
    let directive_range = TextRange::new(at.start() + TextSize::new(3), at.end() - TextSize::new(2));
    let directive = builder.alloc(NodeData::Directive(Directive::parse(directive)), directive_range);
    builder.attach(directive, element);
    element
}

#[test]
fn inline_expression_with_newline() {
    let text = "a {b\nc}";
    let mut builder = TreeBuilder::new(text, Dialect::Mdx);
    let root = builder.root();
    let paragraph = builder.alloc(NodeData::Paragraph, range(0, 7));
    builder.attach(paragraph, root);
    let expression = builder.alloc(
        NodeData::ExpressionStatement {
            text: "b\nc".into(),
            text_range: range(3, 6),
            is_inline: true,
        },
        range(2, 7),
    );
    builder.attach(expression, paragraph);
    let tree = builder.finish();

    let entries = lint(&tree, &LintConfig::default());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name(), "inline-expression-newline");
    assert_eq!(entries[0].severity(), Severity::Error);
    assert_eq!(entries[0].range(), range(2, 7));

    let quiet = LintConfig::from_levels([("inline-expression-newline", "ignore")]);
    assert!(lint(&tree, &quiet).is_empty());
}

#[test]
fn else_needs_preceding_if() {
    // <p v-if="a"/><p v-else/><p v-else/>
    let text = "<p v-if=\"a\"/><p v-else/><p v-else/>";
    let mut builder = TreeBuilder::new(text, Dialect::Template);
    let root = builder.root();
    element(&mut builder, root, range(0, 13), "v-if");
    element(&mut builder, root, range(13, 24), "v-else");
    element(&mut builder, root, range(24, 35), "v-else");
    let tree = builder.finish();

    let entries = lint(&tree, &LintConfig::default());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name(), "directive-if-chain");
    assert_eq!(entries[0].range(), range(27, 33));
}

#[test]
fn code_block_language_is_opt_in() {
    let text = "```\nx\n```";
    let mut builder = TreeBuilder::new(text, Dialect::Markdown);
    let root = builder.root();
    let block = builder.alloc(
        NodeData::CodeBlock(CodeBlock {
            lang: None,
            attrs: Vec::new(),
            text: "x".into(),
            content_range: range(4, 5),
            opener_end: TextSize::new(3),
        }),
        range(0, 9),
    );
    builder.attach(block, root);
    let tree = builder.finish();

    assert!(lint(&tree, &LintConfig::default()).is_empty());

    let config = LintConfig::from_levels([("code-block-language", "Warn")]);
    let entries = lint(&tree, &config);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity(), Severity::Warn);
    assert_eq!(entries[0].range(), range(0, 3));
}
