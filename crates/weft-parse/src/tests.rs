use std::fs;
use std::path::{Path, PathBuf};

use expect_test::expect_file;
use proptest::prelude::*;
use text_size::{TextRange, TextSize};
use weft_syntax::{Attribute, Dialect, NodeData, NodeKind};

use crate::{Location, ParserOptions, parse};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                Dialect::from_extension(path.extension()?.to_str()?)?;
                let expected = path.with_extension("tree");
                let text = fs::read_to_string(&path).ok()?;
                Some(Self { input: path, expected, text })
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }

    fn dialect(&self) -> Dialect {
        self.input
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Dialect::from_extension)
            .unwrap()
    }
}

#[test]
fn parse_test_data() {
    let cases = TestCase::list();
    assert!(!cases.is_empty());

    for case in cases {
        let options = ParserOptions { dialect: case.dialect(), ..ParserOptions::default() };
        let parse = parse(&case.text, &options);
        let diagnostics = parse
            .errors()
            .iter()
            .map(|d| {
                format!("  {:?} {}@{:?} {}\n", d.severity(), d.name(), d.range(), d.message())
            })
            .collect::<String>();

        let actual = format!("{}Errors:\n{diagnostics}", parse.tree().debug_tree());
        expect_file![&case.expected].assert_eq(&actual);
    }
}

#[test]
fn unterminated_fence_reports_once() {
    let text = "```js\nlet a = 1;\nlet b";
    let parse = parse(text, &ParserOptions::default());

    let unclosed = parse.errors().iter().filter(|d| d.name() == "tagUnClosed").collect::<Vec<_>>();
    assert_eq!(unclosed.len(), 1);
    assert_eq!(unclosed[0].range().start(), TextSize::new(0));
    assert_eq!(unclosed[0].range().end(), TextSize::of(text));

    let tree = parse.tree();
    let block = tree.preorder().find(|&id| tree.kind(id) == NodeKind::CodeBlock).unwrap();
    assert_eq!(tree.range(block).end(), TextSize::of(text));
}

#[test]
fn lint_errors_follow_parse_errors() {
    let text = "<p v-else></p></div>";
    let options = ParserOptions { dialect: Dialect::Template, ..ParserOptions::default() };
    let names = parse(text, &options).errors().iter().map(|d| d.name()).collect::<Vec<_>>();
    assert_eq!(names, ["extraCloseTag", "directive-if-chain"]);
}

#[test]
fn unclosed_mustache() {
    let options = ParserOptions { dialect: Dialect::Template, ..ParserOptions::default() };
    let parse = parse("<b>{{ a", &options);
    let names = parse.errors().iter().map(|d| d.name()).collect::<Vec<_>>();
    assert_eq!(names, ["mustacheEndExpected", "tagUnClosed"]);
}

fn attribute_value(text: &str) -> (Option<String>, Option<TextRange>, Vec<NodeKind>) {
    let options = ParserOptions { dialect: Dialect::Template, ..ParserOptions::default() };
    let parse = parse(text, &options);
    let tree = parse.tree();
    let id = tree.preorder().find(|&id| tree.kind(id) == NodeKind::Attribute).unwrap();
    let NodeData::Attribute(Attribute { value, value_range, .. }) = tree.data(id) else {
        unreachable!()
    };
    let children = tree.children(id).iter().map(|&child| tree.kind(child)).collect();
    (value.clone(), *value_range, children)
}

#[test]
fn attribute_values_keep_mustache_source() {
    let (value, range, children) = attribute_value(r#"<a title="x {{ msg }} y">t</a>"#);
    assert_eq!(value.as_deref(), Some("x {{ msg }} y"));
    assert_eq!(range, Some(TextRange::new(10.into(), 23.into())));
    assert_eq!(children, [NodeKind::Mustache]);

    let (value, range, _) = attribute_value(r#"<a title="{{ a }}"></a>"#);
    assert_eq!(value.as_deref(), Some("{{ a }}"));
    assert_eq!(range, Some(TextRange::new(10.into(), 17.into())));
}

#[test]
fn locations_are_zero_based() {
    let parse = parse("ab\ncd", &ParserOptions::default());
    assert_eq!(
        parse.location(TextSize::new(4)),
        Some(Location { line: 1, col: 1, offset: TextSize::new(4) })
    );
    assert_eq!(parse.location(TextSize::new(9)), None);

    let options = ParserOptions { location: false, ..ParserOptions::default() };
    let parse = crate::parse("ab\ncd", &options);
    assert!(parse.line_index().is_none());
    assert_eq!(parse.location(TextSize::new(1)), None);
}

fn dialect() -> impl Strategy<Value = Dialect> {
    prop_oneof![Just(Dialect::Markdown), Just(Dialect::Mdx), Just(Dialect::Template)]
}

proptest! {
    #[test]
    fn children_nest_inside_parents(
        dialect in dialect(),
        text in r"[a-z <>/{}=`\n\x22'!:@#.-]{0,64}",
    ) {
        let parse = parse(&text, &ParserOptions { dialect, ..ParserOptions::default() });
        let tree = parse.tree();
        prop_assert_eq!(tree.range(tree.root()).end(), TextSize::of(text.as_str()));

        for id in tree.preorder() {
            let range = tree.range(id);
            for &child in tree.children(id) {
                prop_assert!(range.contains_range(tree.range(child)));
                prop_assert_eq!(tree.parent(child), Some(id));
            }
        }
    }
}
