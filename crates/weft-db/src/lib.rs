//! Versioned documents and the files generated from them.
//!
//! Parsing is driven by document versions: a [`SourceFile`] reparses only
//! when the stored document is newer than the one it last parsed, and
//! writes its generated files back so that unchanged ones keep their
//! version.

mod source_file;
mod vfs;
mod workspace;

pub use source_file::{SourceFile, VirtualCode};
pub use vfs::{Document, FileStore, OverlayFs, VfsError, normalize};
pub use workspace::Workspace;
