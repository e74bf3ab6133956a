use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};
use rustc_hash::FxHashMap;
use weft_config::WeftConfig;

use crate::source_file::{SourceFile, VirtualCode};
use crate::vfs::{Document, FileStore, OverlayFs, VfsError, normalize};

/// Open documents, the overlay holding them and their generated files.
#[derive(Debug, Default)]
pub struct Workspace {
    config: WeftConfig,
    fs: OverlayFs,
    files: FxHashMap<Utf8PathBuf, SourceFile>,
}

impl Workspace {
    pub fn new(config: WeftConfig) -> Self {
        Self { config, fs: OverlayFs::new(), files: FxHashMap::default() }
    }

    pub fn config(&self) -> &WeftConfig {
        &self.config
    }

    pub fn fs(&self) -> &OverlayFs {
        &self.fs
    }

    pub fn document(&self, path: &Utf8Path) -> Option<Rc<Document>> {
        self.fs.read_file(path)
    }

    /// Stores `text` and, for a hybrid document, brings its generated files
    /// up to date. Returns `None` for documents of no known dialect.
    pub fn open(
        &mut self,
        path: &Utf8Path,
        text: String,
    ) -> Result<Option<&SourceFile>, VfsError> {
        let path = normalize(path);
        self.fs.write_file(&path, text)?;
        self.update(&path)
    }

    pub fn change(
        &mut self,
        path: &Utf8Path,
        text: String,
    ) -> Result<Option<&SourceFile>, VfsError> {
        self.open(path, text)
    }

    /// Reparses `path` if its document changed since the last parse.
    pub fn update(&mut self, path: &Utf8Path) -> Result<Option<&SourceFile>, VfsError> {
        let path = normalize(path);
        let Some(options) = self.config.parser_options(&path) else {
            return Ok(None);
        };

        let file =
            self.files.entry(path.clone()).or_insert_with(|| SourceFile::new(path, options));
        file.update(&mut self.fs)?;
        Ok(Some(file))
    }

    /// Forgets `path` and every file generated from it.
    pub fn close(&mut self, path: &Utf8Path) -> bool {
        let path = normalize(path);
        if let Some(file) = self.files.remove(&path) {
            for code in file.virtual_codes() {
                self.fs.remove(code.path());
            }
        }
        self.fs.remove(&path)
    }

    pub fn source_file(&self, path: &Utf8Path) -> Option<&SourceFile> {
        self.files.get(&normalize(path))
    }

    /// The open document a generated file belongs to.
    pub fn source_for_virtual(&self, path: &Utf8Path) -> Option<(&SourceFile, &VirtualCode)> {
        let virtual_file = weft_transform::file_kind(path)?;
        let file = self.source_file(&virtual_file.source)?;
        Some((file, file.virtual_code(path)?))
    }
}
