use std::rc::Rc;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use line_index::LineIndex;
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VfsError {
    #[error("virtual paths must be absolute: {0}")]
    RelativePath(Utf8PathBuf),
}

/// One version of a file's text.
#[derive(Debug)]
pub struct Document {
    path: Utf8PathBuf,
    version: i32,
    text: String,
    line_index: LineIndex,
}

impl Document {
    pub fn new(path: Utf8PathBuf, version: i32, text: String) -> Self {
        let line_index = LineIndex::new(&text);
        Self { path, version, text, line_index }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }
}

pub trait FileStore {
    fn read_file(&self, path: &Utf8Path) -> Option<Rc<Document>>;

    /// Stores `text` at `path`. Writing the text a file already has keeps
    /// the existing document, version included.
    fn write_file(&mut self, path: &Utf8Path, text: String) -> Result<Rc<Document>, VfsError>;

    fn remove(&mut self, path: &Utf8Path) -> bool;
}

/// In-memory documents layered over the real filesystem. Files only on disk
/// are read-only and have version 0.
#[derive(Debug, Default)]
pub struct OverlayFs {
    files: FxHashMap<Utf8PathBuf, Rc<Document>>,
}

impl OverlayFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Utf8Path) -> bool {
        self.files.contains_key(&normalize(path))
    }

    /// Paths held in memory, sorted.
    pub fn paths(&self) -> Vec<&Utf8Path> {
        let mut paths = self.files.keys().map(Utf8PathBuf::as_path).collect::<Vec<_>>();
        paths.sort();
        paths
    }
}

impl FileStore for OverlayFs {
    fn read_file(&self, path: &Utf8Path) -> Option<Rc<Document>> {
        let path = normalize(path);
        if let Some(document) = self.files.get(&path) {
            return Some(document.clone());
        }

        let text = std::fs::read_to_string(&path).ok()?;
        Some(Rc::new(Document::new(path, 0, text)))
    }

    fn write_file(&mut self, path: &Utf8Path, text: String) -> Result<Rc<Document>, VfsError> {
        if !path.is_absolute() {
            return Err(VfsError::RelativePath(path.to_path_buf()));
        }
        let path = normalize(path);

        let version = match self.files.get(&path) {
            Some(existing) if existing.text == text => return Ok(existing.clone()),
            Some(existing) => existing.version + 1,
            None => 1,
        };

        log::trace!("write {path} v{version}");
        let document = Rc::new(Document::new(path.clone(), version, text));
        self.files.insert(path, document.clone());
        Ok(document)
    }

    fn remove(&mut self, path: &Utf8Path) -> bool {
        let removed = self.files.remove(&normalize(path)).is_some();
        if removed {
            log::trace!("remove {path}");
        }
        removed
    }
}

/// Resolves `.` and `..` without touching the filesystem.
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut normalized = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                normalized.pop();
            }
            component => normalized.push(component),
        }
    }
    normalized
}
