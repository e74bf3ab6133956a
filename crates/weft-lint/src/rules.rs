use weft_errors::{Severity, TextRange};
use weft_syntax::{NodeData, NodeId, SyntaxTree};

use crate::{LintContext, Rule};

pub static RULES: &[Rule] = &[INLINE_EXPRESSION_NEWLINE, DIRECTIVE_IF_CHAIN, CODE_BLOCK_LANGUAGE];

const INLINE_EXPRESSION_NEWLINE: Rule = Rule {
    name: "inline-expression-newline",
    default_severity: Severity::Error,
    message: "Inline expression can't contain blank lines.",
    visit: inline_expression_newline,
};

const DIRECTIVE_IF_CHAIN: Rule = Rule {
    name: "directive-if-chain",
    default_severity: Severity::Error,
    message: "v-else/v-else-if has no adjacent v-if or v-else-if.",
    visit: directive_if_chain,
};

const CODE_BLOCK_LANGUAGE: Rule = Rule {
    name: "code-block-language",
    default_severity: Severity::Ignore,
    message: "Fenced code block has no language.",
    visit: code_block_language,
};

fn inline_expression_newline(tree: &SyntaxTree, id: NodeId, cx: &mut LintContext<'_>) {
    if let NodeData::ExpressionStatement { text, is_inline: true, .. } = tree.data(id) {
        if text.contains(['\n', '\u{000C}']) {
            cx.report(tree.range(id));
        }
    }
}

fn directive_if_chain(tree: &SyntaxTree, id: NodeId, cx: &mut LintContext<'_>) {
    let NodeData::Directive(directive) = tree.data(id) else {
        return;
    };
    if directive.name != "else" && directive.name != "else-if" {
        return;
    }

    let chained = tree
        .parent(id)
        .and_then(|element| previous_element(tree, element))
        .is_some_and(|previous| has_directive(tree, previous, &["if", "else-if"]));
    if !chained {
        cx.report(tree.range(id));
    }
}

fn code_block_language(tree: &SyntaxTree, id: NodeId, cx: &mut LintContext<'_>) {
    if let NodeData::CodeBlock(block) = tree.data(id) {
        if block.lang.is_none() {
            cx.report(TextRange::new(tree.range(id).start(), block.opener_end));
        }
    }
}

/// Previous sibling element, looking past comments and blank text.
fn previous_element(tree: &SyntaxTree, id: NodeId) -> Option<NodeId> {
    let mut current = tree.prev_sibling(id)?;
    loop {
        match tree.data(current) {
            NodeData::Element(_) => return Some(current),
            NodeData::Comment { .. } => {}
            NodeData::Text { text } if text.trim().is_empty() => {}
            _ => return None,
        }
        current = tree.prev_sibling(current)?;
    }
}

fn has_directive(tree: &SyntaxTree, element: NodeId, names: &[&str]) -> bool {
    tree.children(element).iter().any(|&child| {
        matches!(tree.data(child), NodeData::Directive(d) if names.contains(&d.name.as_str()))
    })
}
