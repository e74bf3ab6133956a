use camino::{Utf8Path, Utf8PathBuf};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ArtifactKind;

pub(crate) const BLOCK_SUFFIX: &str = "._md_cb";
pub(crate) const MDX_SCRIPT_SUFFIX: &str = "._mdx.jsx";
pub(crate) const PROSE_SUFFIX: &str = "._mdx.md";
pub(crate) const INDEX_SUFFIX: &str = "._index.ts";
pub(crate) const VUE_SCRIPT_SUFFIX: &str = "._vue";

static VIRTUAL_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?<name>.+?)(?:\.(?<block>\d+)\._md_cb\.(?:jsx?|tsx?)|\._mdx\.jsx|\._mdx\.md|\._index\.ts|\._vue\.(?:js|ts))$",
    )
    .unwrap()
});

pub(crate) fn block_name(name: &str, index: usize, lang: &str) -> String {
    format!("{name}.{index}{BLOCK_SUFFIX}.{lang}")
}

/// What a generated file is, and the document it was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFile {
    pub kind: ArtifactKind,
    pub source: Utf8PathBuf,
}

/// Recognizes a generated file name. Returns `None` for authored files.
pub fn file_kind(path: &Utf8Path) -> Option<VirtualFile> {
    let file_name = path.file_name()?;
    let captures = VIRTUAL_NAME.captures(file_name)?;
    let name = captures.name("name")?.as_str();

    let kind = if let Some(block) = captures.name("block") {
        ArtifactKind::Block(block.as_str().parse().ok()?)
    } else if file_name.ends_with(PROSE_SUFFIX) {
        ArtifactKind::Prose
    } else if file_name.ends_with(INDEX_SUFFIX) {
        ArtifactKind::Index
    } else {
        ArtifactKind::Script
    };

    Some(VirtualFile { kind, source: path.with_file_name(name) })
}
