#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    TEXT,
    PARAGRAPH_END,
    WHITESPACE,

    COMMENT_START,
    COMMENT_CONTENT,
    COMMENT_END,

    CODE_BLOCK_START,
    CODE_BLOCK_ATTRIBUTE,
    CODE_BLOCK_CONTENT,
    CODE_BLOCK_END,

    IMPORT_STATEMENT,
    JSX_EXPRESSION,
    BLOCK_EXPRESSION,

    START_TAG_OPEN,
    START_TAG,
    START_TAG_CLOSE,
    START_TAG_SELF_CLOSE,
    END_TAG_OPEN,
    END_TAG,
    END_TAG_CLOSE,
    ATTRIBUTE_NAME,
    DIRECTIVE_NAME,
    ATTRIBUTE_DELIMITER,
    ATTRIBUTE_MARK,
    ATTRIBUTE_VALUE,
    MUSTACHE_START,
    MUSTACHE_CONTENT,
    MUSTACHE_END,
    RAW_TEXT,

    UNKNOWN,
    EOS,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        self == Self::WHITESPACE
    }
}

/// Lexical context the scanner is in between two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    WithinContent,
    WithinInlineContent,
    WithinComment,
    WithinCodeBlockAttr,
    WithinCodeBlock,
    AfterOpeningStartTag,
    WithinTag,
    AfterAttributeName,
    BeforeAttributeValue,
    WithinAttributeValue,
    WithinMustache,
    AfterOpeningEndTag,
    WithinEndTag,
    WithinScriptContent,
    WithinStyleContent,
}

/// Markup flavour of a hybrid document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Prose, comments and fenced code blocks.
    Markdown,
    /// Markdown with imports, JSX and `{ }` expressions.
    #[default]
    Mdx,
    /// HTML-like templates with directives, mustaches and script/style bodies.
    Template,
}

impl Dialect {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "md" | "markdown" => Some(Self::Markdown),
            "mdx" => Some(Self::Mdx),
            "vue" => Some(Self::Template),
            _ => None,
        }
    }
}

/// Lexical error attached to a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexError {
    UnexpectedCharacter,
    UnexpectedWhitespace,
    StartTagNameExpected,
    EndTagNameExpected,
    ClosingBracketMissing,
    ClosingBracketExpected,
    UnexpectedCharacterInTag,
    MustacheCannotBeEmpty,
    ExpressionUnterminated,
    JsxUnterminated,
    ImportUnterminated,
}

impl LexError {
    pub fn name(self) -> &'static str {
        match self {
            Self::UnexpectedCharacter => "unexpectedCharacter",
            Self::UnexpectedWhitespace => "unexpectedWhitespace",
            Self::StartTagNameExpected => "startTagNameExpected",
            Self::EndTagNameExpected => "endTagNameExpected",
            Self::ClosingBracketMissing => "closingBracketMissing",
            Self::ClosingBracketExpected => "closingBracketExpected",
            Self::UnexpectedCharacterInTag => "unexpectedCharacterInTag",
            Self::MustacheCannotBeEmpty => "mustacheCannotBeEmpty",
            Self::ExpressionUnterminated => "expressionUnterminated",
            Self::JsxUnterminated => "jsxUnterminated",
            Self::ImportUnterminated => "importUnterminated",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::UnexpectedCharacter => "Unexpected character.",
            Self::UnexpectedWhitespace => "Unexpected whitespace. Tag name expected.",
            Self::StartTagNameExpected => "Tag name expected.",
            Self::EndTagNameExpected => "End tag name expected.",
            Self::ClosingBracketMissing => "Closing bracket missing.",
            Self::ClosingBracketExpected => "Closing bracket expected.",
            Self::UnexpectedCharacterInTag => "Unexpected character in tag.",
            Self::MustacheCannotBeEmpty => "Mustache cannot be empty.",
            Self::ExpressionUnterminated => "Expression is not closed.",
            Self::JsxUnterminated => "JSX element is not closed.",
            Self::ImportUnterminated => "Import statement has no module specifier.",
        }
    }
}
