use text_size::{TextRange, TextSize};
use weft_errors::{Diagnostic, Diagnostics, Severity};
use weft_syntax::{Dialect, NodeData, NodeId, NodeKind, SyntaxTree, TreeBuilder};
use weft_tokenizer::LexError;

/// Tree builder state: the tree under construction and the current node
/// new children attach to.
pub(crate) struct Parser<'a> {
    text: &'a str,
    dialect: Dialect,
    builder: TreeBuilder,
    errors: Diagnostics,
    current: NodeId,
    pub(crate) end_tag_name: Option<&'a str>,
    pub(crate) end_tag_start: TextSize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str, dialect: Dialect) -> Self {
        let builder = TreeBuilder::new(text, dialect);
        let current = builder.root();
        Self {
            text,
            dialect,
            builder,
            errors: Diagnostics::new(),
            current,
            end_tag_name: None,
            end_tag_start: TextSize::new(0),
        }
    }

    pub(crate) fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub(crate) fn text(&self, range: TextRange) -> &'a str {
        &self.text[range]
    }

    pub(crate) fn current(&self) -> NodeId {
        self.current
    }

    pub(crate) fn current_kind(&self) -> NodeKind {
        self.builder.node(self.current).kind()
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.builder.node(id).data
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.builder.node_mut(id).data
    }

    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        &self.builder.node(id).children
    }

    pub(crate) fn range(&self, id: NodeId) -> TextRange {
        self.builder.node(id).range
    }

    /// Attaches a new node to the current one and descends into it.
    pub(crate) fn open(&mut self, data: NodeData, range: TextRange) -> NodeId {
        let id = self.leaf(data, range);
        self.current = id;
        id
    }

    /// Attaches a new node to the current one without descending.
    pub(crate) fn leaf(&mut self, data: NodeData, range: TextRange) -> NodeId {
        let id = self.builder.alloc(data, range);
        self.builder.attach(id, self.current);
        self.grow(self.current, range.end());
        id
    }

    /// Extends the current node to `end`.
    pub(crate) fn extend(&mut self, end: TextSize) {
        self.grow(self.current, end);
    }

    /// Closes the current node at `end` and ascends to its parent.
    pub(crate) fn close(&mut self, end: TextSize) {
        let node = self.builder.node_mut(self.current);
        node.range = TextRange::new(node.range.start(), end.max(node.range.start()));
        self.ascend();
    }

    /// Ascends without touching the current node's range.
    pub(crate) fn ascend(&mut self) {
        let end = self.range(self.current).end();
        if let Some(parent) = self.builder.parent(self.current) {
            self.current = parent;
            self.grow(parent, end);
        }
    }

    pub(crate) fn ancestors_and_self(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(self.current), |&id| self.builder.parent(id))
    }

    fn grow(&mut self, id: NodeId, end: TextSize) {
        let node = self.builder.node_mut(id);
        if node.range.end() < end {
            node.range = TextRange::new(node.range.start(), end);
        }
    }

    pub(crate) fn report(&mut self, error: ParseError, range: TextRange) {
        self.errors.push(Diagnostic::new(error.name(), error.message(), error.severity(), range));
    }

    pub(crate) fn lex_error(&mut self, error: LexError, range: TextRange) {
        self.errors.push(Diagnostic::error(error.name(), error.message(), range));
    }

    /// Reports the current node as never closed, ending it at `end`.
    pub(crate) fn close_unterminated(&mut self, end: TextSize) {
        let id = self.current;
        let kind = self.current_kind();
        let start = self.range(id).start();

        if let NodeData::Element(element) = self.data_mut(id) {
            let start_tag_end = *element.start_tag_end.get_or_insert(end);
            self.report(ParseError::TagUnClosed, TextRange::new(start, start_tag_end));
        } else if kind == NodeKind::Mustache {
            self.report(ParseError::MustacheEndExpected, TextRange::new(start, end));
        } else if kind.is_structural() {
            self.report(ParseError::TagUnClosed, TextRange::new(start, end));
        }

        self.close(end);
    }

    /// Closes every node still open at end of input.
    pub(crate) fn finish(mut self) -> (SyntaxTree, Diagnostics) {
        let end = TextSize::of(self.text);
        while self.current != self.builder.root() {
            if let NodeData::Element(element) = self.data_mut(self.current) {
                element.end_tag_start.get_or_insert(end);
            }
            self.close_unterminated(end);
        }
        (self.builder.finish(), self.errors)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseError {
    TagUnClosed,
    MustacheEndExpected,
    ExtraCloseTag,
    AttributeDuplicate,
    CommandDuplicate,
}

impl ParseError {
    fn name(self) -> &'static str {
        match self {
            Self::TagUnClosed => "tagUnClosed",
            Self::MustacheEndExpected => "mustacheEndExpected",
            Self::ExtraCloseTag => "extraCloseTag",
            Self::AttributeDuplicate => "attributeDuplicate",
            Self::CommandDuplicate => "commandDuplicate",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::TagUnClosed => "Tag is not closed.",
            Self::MustacheEndExpected => "Mustache end expected.",
            Self::ExtraCloseTag => "Extra closing tags.",
            Self::AttributeDuplicate => "Attribute duplicate.",
            Self::CommandDuplicate => "Command duplicate.",
        }
    }

    fn severity(self) -> Severity {
        match self {
            Self::AttributeDuplicate | Self::CommandDuplicate => Severity::Warn,
            _ => Severity::Error,
        }
    }
}
