pub(crate) fn is_line_space(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

pub(crate) fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{000C}')
}

pub(crate) fn is_whitespace(c: char) -> bool {
    is_line_space(c) || is_newline(c)
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$')
}

pub(crate) fn is_directive_name(name: &str) -> bool {
    name.starts_with("v-") || name.starts_with([':', '@', '#'])
}
