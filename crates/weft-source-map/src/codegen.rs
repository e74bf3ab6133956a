use text_size::{TextRange, TextSize};

use crate::{Mapping, Mode};

/// Text buffer that records where each copied piece came from.
#[derive(Debug, Default)]
pub struct CodeGen {
    text: String,
    mappings: Vec<Mapping>,
}

impl CodeGen {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, text: &str) -> TextRange {
        let start = TextSize::of(&self.text);
        self.text.push_str(text);
        TextRange::at(start, TextSize::of(text))
    }

    /// Appends synthesized text. Nothing maps into it.
    pub fn add_text(&mut self, text: &str) -> TextRange {
        self.push(text)
    }

    /// Appends text taken from `source` and maps the two spans.
    pub fn add_code(&mut self, text: &str, mode: Mode, source: TextRange) -> TextRange {
        let mapped = self.push(text);
        self.add_mapping(Mapping::new(mode, source, mapped));
        mapped
    }

    pub fn add_mapping(&mut self, mapping: Mapping) {
        self.mappings.push(mapping);
    }

    pub fn len(&self) -> TextSize {
        TextSize::of(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn finish(self) -> (String, Vec<Mapping>) {
        (self.text, self.mappings)
    }
}

#[cfg(test)]
mod tests {
    use text_size::{TextRange, TextSize};

    use super::CodeGen;
    use crate::{Mapping, Mode};

    #[test]
    fn code_is_mapped_and_text_is_not() {
        let source = TextRange::new(TextSize::new(7), TextSize::new(10));
        let mut codegen = CodeGen::new();
        let prelude = codegen.add_text("let _ = ");
        let code = codegen.add_code("abc", Mode::Offset, source);
        codegen.add_text(";\n");

        assert_eq!(prelude, TextRange::new(0.into(), 8.into()));
        let (text, mappings) = codegen.finish();
        assert_eq!(text, "let _ = abc;\n");
        assert_eq!(&text[code], "abc");
        assert_eq!(mappings, vec![Mapping::new(Mode::Offset, source, code)]);
    }
}
