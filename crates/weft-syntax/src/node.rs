use text_size::{TextRange, TextSize};

/// Index of a node in its tree's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Text,
    Comment,
    Paragraph,
    CodeBlock,
    ImportStatement,
    JsxStatement,
    ExpressionStatement,
    Element,
    Attribute,
    Directive,
    Mustache,
    RawText,
}

impl NodeKind {
    /// Nodes that need an explicit closer and are reported when left open.
    pub fn is_structural(self) -> bool {
        matches!(self, Self::Comment | Self::CodeBlock | Self::Element | Self::Mustache)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Root,
    Text { text: String },
    Comment { text: String },
    Paragraph,
    CodeBlock(CodeBlock),
    ImportStatement { text: String },
    JsxStatement { text: String },
    ExpressionStatement { text: String, text_range: TextRange, is_inline: bool },
    Element(Element),
    Attribute(Attribute),
    Directive(Directive),
    Mustache { text: String, text_range: TextRange },
    RawText { text: String },
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Root => NodeKind::Root,
            Self::Text { .. } => NodeKind::Text,
            Self::Comment { .. } => NodeKind::Comment,
            Self::Paragraph => NodeKind::Paragraph,
            Self::CodeBlock(_) => NodeKind::CodeBlock,
            Self::ImportStatement { .. } => NodeKind::ImportStatement,
            Self::JsxStatement { .. } => NodeKind::JsxStatement,
            Self::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
            Self::Element(_) => NodeKind::Element,
            Self::Attribute(_) => NodeKind::Attribute,
            Self::Directive(_) => NodeKind::Directive,
            Self::Mustache { .. } => NodeKind::Mustache,
            Self::RawText { .. } => NodeKind::RawText,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub lang: Option<String>,
    /// `key=value` pairs after the language, in source order. Bare flags
    /// have no value.
    pub attrs: Vec<(String, Option<String>)>,
    pub text: String,
    pub content_range: TextRange,
    /// End of the opener line, excluding its line break.
    pub opener_end: TextSize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub self_close: bool,
    pub start_tag_end: Option<TextSize>,
    pub end_tag_start: Option<TextSize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
    pub value_range: Option<TextRange>,
}

/// `v-name:arg.modifier="value"`, also written `:arg`, `@arg` or `#arg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub arg: Option<String>,
    pub modifiers: Vec<String>,
    pub value: Option<String>,
    pub value_range: Option<TextRange>,
    pub is_shorthand: bool,
}

impl Directive {
    pub fn parse(raw: &str) -> Self {
        let shorthand = match raw.chars().next() {
            Some(':') => Some("bind"),
            Some('@') => Some("on"),
            Some('#') => Some("slot"),
            _ => None,
        };
        let (name, rest, has_arg) = match shorthand {
            Some(name) => (name, &raw[1..], true),
            None => {
                let body = raw.strip_prefix("v-").unwrap_or(raw);
                let end = body.find([':', '.']).unwrap_or(body.len());
                match body[end..].strip_prefix(':') {
                    Some(rest) => (&body[..end], rest, true),
                    None => (&body[..end], &body[end..], false),
                }
            }
        };

        let mut parts = rest.split('.');
        let arg = parts.next().unwrap_or_default();
        Self {
            name: name.to_owned(),
            arg: has_arg.then(|| arg.to_owned()),
            modifiers: parts.map(str::to_owned).collect(),
            value: None,
            value_range: None,
            is_shorthand: shorthand.is_some(),
        }
    }

    /// Identity used for duplicate detection: name and argument.
    pub fn key(&self) -> String {
        match &self.arg {
            Some(arg) => format!("v-{}:{arg}", self.name),
            None => format!("v-{}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub range: TextRange,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
    /// Position in the parent's `children`.
    pub(crate) slot: u32,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}
