use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use text_size::TextSize;
use weft_config::WeftConfig;
use weft_db::{Document, FileStore, OverlayFs, SourceFile, VfsError, Workspace};
use weft_parse::ParserOptions;
use weft_transform::ArtifactKind;

const PAGE: &str = "/docs/page.mdx";

fn blocks(last: &str) -> String {
    format!("```ts\nlet a = 1;\n```\n\n```ts\nlet b = 2;\n```\n\n```ts\n{last}\n```\n")
}

fn workspace_with(text: &str) -> Workspace {
    let mut workspace = Workspace::new(WeftConfig::default());
    workspace.open(Utf8Path::new(PAGE), text.to_owned()).unwrap();
    workspace
}

fn generated(workspace: &Workspace, name: &str) -> Rc<Document> {
    workspace.document(Utf8Path::new(&format!("{PAGE}{name}"))).unwrap()
}

#[test]
fn same_version_is_not_reparsed() {
    let mut workspace = workspace_with("# Title {x}\n");
    let path = Utf8Path::new(PAGE);
    assert!(workspace.source_file(path).unwrap().rebuilt());

    let file = workspace.update(path).unwrap().unwrap();
    assert!(!file.rebuilt());
    assert_eq!(file.version(), Some(1));

    let file = workspace.change(path, "# Title {x}\n".to_owned()).unwrap().unwrap();
    assert!(!file.rebuilt());

    let file = workspace.change(path, "# Title {y}\n".to_owned()).unwrap().unwrap();
    assert!(file.rebuilt());
    assert_eq!(file.version(), Some(2));
}

#[test]
fn unchanged_blocks_keep_their_version() {
    let mut workspace = workspace_with(&blocks("let c = 3;"));
    let old = [generated(&workspace, ".0._md_cb.ts"), generated(&workspace, ".1._md_cb.ts")];

    workspace.change(Utf8Path::new(PAGE), blocks("let c = 4;")).unwrap();

    let block = |index: usize| generated(&workspace, &format!(".{index}._md_cb.ts"));
    assert!(Rc::ptr_eq(&block(0), &old[0]));
    assert!(Rc::ptr_eq(&block(1), &old[1]));
    assert_eq!(block(0).version(), 1);
    assert_eq!(block(2).version(), 2);
    assert_eq!(block(2).text(), "let c = 4;\n\n;export {};\n");
    assert_eq!(generated(&workspace, "._mdx.jsx").version(), 1);
}

#[test]
fn removed_blocks_are_deleted() {
    let mut workspace = workspace_with(&blocks("let c = 3;"));
    workspace.change(Utf8Path::new(PAGE), "```ts\nlet a = 1;\n```\n".to_owned()).unwrap();

    let fs = workspace.fs();
    assert!(fs.contains(Utf8Path::new("/docs/page.mdx.0._md_cb.ts")));
    assert!(!fs.contains(Utf8Path::new("/docs/page.mdx.1._md_cb.ts")));
    assert!(!fs.contains(Utf8Path::new("/docs/page.mdx.2._md_cb.ts")));
}

#[test]
fn offsets_map_through_generated_code() {
    let workspace = workspace_with("Hello {name}\n");
    let file = workspace.source_file(Utf8Path::new(PAGE)).unwrap();

    let (code, mapped) = file.virtual_code_at(TextSize::new(7)).unwrap();
    assert_eq!(code.kind(), ArtifactKind::Script);
    assert_eq!(&code.document().text()[usize::from(mapped)..][..4], "name");
    assert_eq!(file.source_position(code.path(), mapped), Some(TextSize::new(7)));

    let (owner, script) =
        workspace.source_for_virtual(Utf8Path::new("/docs/./page.mdx._mdx.jsx")).unwrap();
    assert_eq!(owner.path().as_str(), PAGE);
    assert_eq!(script.kind(), ArtifactKind::Script);
}

#[test]
fn disk_files_are_read_at_version_zero() {
    let dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    std::fs::write(root.join("guide.mdx"), "import A from './a';\n").unwrap();

    let mut workspace = Workspace::new(WeftConfig::default());
    let file = workspace.update(&root.join("sub/../guide.mdx")).unwrap().unwrap();
    assert_eq!(file.version(), Some(0));
    assert!(file.errors().is_empty());

    let script = root.join("guide.mdx._mdx.jsx");
    assert!(workspace.fs().read_file(&script).unwrap().text().contains("import A from './a';"));
}

#[test]
fn close_forgets_generated_files() {
    let mut workspace = workspace_with(&blocks("let c = 3;"));
    assert!(workspace.close(Utf8Path::new(PAGE)));
    assert!(workspace.fs().paths().is_empty());
    assert!(workspace.source_file(Utf8Path::new(PAGE)).is_none());
}

#[test]
fn plain_files_have_no_source_file() {
    let mut workspace = Workspace::new(WeftConfig::default());
    let opened = workspace.open(Utf8Path::new("/src/a.ts"), "export {}".to_owned()).unwrap();
    assert!(opened.is_none());
    assert_eq!(workspace.document(Utf8Path::new("/src/a.ts")).unwrap().version(), 1);
}

/// Refuses writes to one path.
struct RefusingFs {
    inner: OverlayFs,
    refuse: Option<Utf8PathBuf>,
}

impl FileStore for RefusingFs {
    fn read_file(&self, path: &Utf8Path) -> Option<Rc<Document>> {
        self.inner.read_file(path)
    }

    fn write_file(&mut self, path: &Utf8Path, text: String) -> Result<Rc<Document>, VfsError> {
        if self.refuse.as_deref() == Some(path) {
            return Err(VfsError::RelativePath(path.to_path_buf()));
        }
        self.inner.write_file(path, text)
    }

    fn remove(&mut self, path: &Utf8Path) -> bool {
        self.inner.remove(path)
    }
}

#[test]
fn failed_write_keeps_previous_results() {
    let path = Utf8Path::new(PAGE);
    let mut fs = RefusingFs { inner: OverlayFs::new(), refuse: None };
    fs.write_file(path, blocks("let c = 3;")).unwrap();

    let mut file = SourceFile::new(path.to_path_buf(), ParserOptions::default());
    assert!(file.update(&mut fs).unwrap());
    let codes = file.virtual_codes().len();

    fs.write_file(path, "```ts\nlet a = 1;\n```\n".to_owned()).unwrap();
    fs.refuse = Some(Utf8PathBuf::from(format!("{PAGE}._mdx.jsx")));
    assert!(file.update(&mut fs).is_err());
    assert!(!file.rebuilt());
    assert_eq!(file.version(), Some(1));
    assert_eq!(file.virtual_codes().len(), codes);
    assert!(fs.inner.contains(Utf8Path::new("/docs/page.mdx.2._md_cb.ts")));

    fs.refuse = None;
    assert!(file.update(&mut fs).unwrap());
    assert_eq!(file.version(), Some(2));
    assert!(!fs.inner.contains(Utf8Path::new("/docs/page.mdx.2._md_cb.ts")));
    assert!(file.virtual_code(Utf8Path::new("/docs/page.mdx.2._md_cb.ts")).is_none());
}
