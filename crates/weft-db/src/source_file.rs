use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};
use rustc_hash::FxHashSet;
use text_size::TextSize;
use weft_errors::Diagnostic;
use weft_parse::{Parse, ParserOptions};
use weft_source_map::SourceMap;
use weft_transform::ArtifactKind;

use crate::vfs::{Document, FileStore, VfsError, normalize};

/// A generated document and how it maps back to its source.
#[derive(Debug)]
pub struct VirtualCode {
    kind: ArtifactKind,
    document: Rc<Document>,
    source_map: SourceMap,
}

impl VirtualCode {
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn path(&self) -> &Utf8Path {
        self.document.path()
    }

    pub fn document(&self) -> &Rc<Document> {
        &self.document
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }
}

/// A hybrid document and everything derived from its last parsed version.
#[derive(Debug)]
pub struct SourceFile {
    path: Utf8PathBuf,
    options: ParserOptions,
    parsed_version: Option<i32>,
    rebuilt: bool,
    parse: Option<Parse>,
    codes: Vec<VirtualCode>,
}

impl SourceFile {
    pub fn new(path: Utf8PathBuf, options: ParserOptions) -> Self {
        Self { path, options, parsed_version: None, rebuilt: false, parse: None, codes: Vec::new() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Version of the document the current results were built from.
    pub fn version(&self) -> Option<i32> {
        self.parsed_version
    }

    /// Whether the last [`update`](Self::update) rebuilt anything.
    pub fn rebuilt(&self) -> bool {
        self.rebuilt
    }

    pub fn parse(&self) -> Option<&Parse> {
        self.parse.as_ref()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        match &self.parse {
            Some(parse) => parse.errors(),
            None => &[],
        }
    }

    pub fn virtual_codes(&self) -> &[VirtualCode] {
        &self.codes
    }

    pub fn virtual_code(&self, path: &Utf8Path) -> Option<&VirtualCode> {
        let path = normalize(path);
        self.codes.iter().find(|code| code.path() == path.as_path())
    }

    /// Reparses when the stored document is newer than the last parse, then
    /// rewrites the generated documents. Generated text that did not change
    /// keeps its document and version. Returns whether anything was rebuilt.
    pub fn update(&mut self, fs: &mut dyn FileStore) -> Result<bool, VfsError> {
        self.rebuilt = false;
        let Some(document) = fs.read_file(&self.path) else {
            log::debug!("{} is gone, nothing to parse", self.path);
            return Ok(false);
        };
        if self.parsed_version == Some(document.version()) {
            log::debug!("{} v{} already parsed", self.path, document.version());
            return Ok(false);
        }

        let parse = weft_parse::parse(document.text(), &self.options);
        let artifacts = weft_transform::transform(parse.tree(), self.path.as_str());

        // A failed write leaves the previous results and version in place, so
        // the next update retries.
        let mut codes = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let path = Utf8PathBuf::from(artifact.file_name);
            let document = fs.write_file(&path, artifact.text)?;
            let source_map = SourceMap::new(self.path.clone(), path, artifact.mappings);
            codes.push(VirtualCode { kind: artifact.kind, document, source_map });
        }

        let live = codes.iter().map(VirtualCode::path).collect::<FxHashSet<_>>();
        for stale in self.codes.iter().filter(|code| !live.contains(code.path())) {
            fs.remove(stale.path());
        }

        log::debug!(
            "{} v{}: {} errors, {} generated documents",
            self.path,
            document.version(),
            parse.errors().len(),
            codes.len()
        );
        self.codes = codes;
        self.parse = Some(parse);
        self.parsed_version = Some(document.version());
        self.rebuilt = true;
        Ok(true)
    }

    /// First generated document that `offset` in the source maps into,
    /// with the mapped offset.
    pub fn virtual_code_at(&self, offset: TextSize) -> Option<(&VirtualCode, TextSize)> {
        self.codes
            .iter()
            .find_map(|code| code.source_map.mapped_offset(offset).map(|mapped| (code, mapped)))
    }

    /// Maps an offset in the generated document at `path` back to the source.
    pub fn source_position(&self, path: &Utf8Path, offset: TextSize) -> Option<TextSize> {
        self.virtual_code(path)?.source_map.source_offset(offset)
    }
}
