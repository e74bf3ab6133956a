use proptest::prelude::*;
use text_size::{TextRange, TextSize};
use weft_source_map::{CodeGen, Mapping, Mode, SourceMap};

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

fn single(mode: Mode, source: TextRange, mapped: TextRange) -> SourceMap {
    SourceMap::new("a.mdx", "a._mdx.jsx", vec![Mapping::new(mode, source, mapped)])
}

#[test]
fn offset_includes_the_range_end() {
    let map = single(Mode::Offset, range(10, 14), range(30, 34));
    assert_eq!(map.mapped_offset(14.into()), Some(34.into()));
    assert_eq!(map.source_offset(34.into()), Some(14.into()));
    assert_eq!(map.mapped_range(range(12, 14)), Some(range(32, 34)));
    assert_eq!(map.mapped_offset(15.into()), None);
}

#[test]
fn offset_clamps_to_a_shorter_target() {
    let map = single(Mode::Offset, range(10, 20), range(0, 5));
    assert_eq!(map.mapped_offset(12.into()), Some(2.into()));
    assert_eq!(map.mapped_offset(17.into()), Some(5.into()));
    assert_eq!(map.mapped_offset(20.into()), Some(5.into()));
    assert_eq!(map.mapped_range(range(12, 20)), Some(range(2, 5)));
}

#[test]
fn expand_covers_the_whole_target() {
    let map = single(Mode::Expand, range(5, 9), range(40, 60));
    assert_eq!(map.mapped_offset(5.into()), Some(40.into()));
    assert_eq!(map.mapped_offset(9.into()), Some(40.into()));
    assert_eq!(map.mapped_offset(10.into()), None);
    assert_eq!(map.mapped_range(range(6, 8)), Some(range(40, 60)));
    assert_eq!(map.mapped_range(range(5, 9)), Some(range(40, 60)));
    assert_eq!(map.mapped_range(range(4, 8)), None);
    assert_eq!(map.source_offset(50.into()), Some(5.into()));
    assert_eq!(map.source_range(range(40, 60)), Some(range(5, 9)));
}

fn pieces() -> impl Strategy<Value = Vec<(String, bool)>> {
    prop::collection::vec(("[a-z;{} ]{1,12}", any::<bool>()), 1..16)
}

proptest! {
    /// Copying pieces of a source with `Offset` mappings and synthesized
    /// glue in between: every copied offset maps to a byte that reads the
    /// same on both sides, and back to where it came from.
    #[test]
    fn offset_mappings_round_trip(pieces in pieces()) {
        let source = pieces.iter().map(|(text, _)| text.as_str()).collect::<String>();
        let mut codegen = CodeGen::new();
        let mut at = TextSize::new(0);
        for (text, copied) in &pieces {
            let range = TextRange::at(at, TextSize::of(text.as_str()));
            if *copied {
                codegen.add_code(text, Mode::Offset, range);
            } else {
                codegen.add_text("/* glue */");
            }
            at = range.end();
        }

        let (mapped, mappings) = codegen.finish();
        let map = SourceMap::new("a.mdx", "a._mdx.jsx", mappings.clone());
        for mapping in mappings {
            for offset in u32::from(mapping.source.start())..u32::from(mapping.source.end()) {
                let offset = TextSize::new(offset);
                let target = map.mapped_offset(offset).unwrap();
                let at = usize::from(offset);
                let target_at = usize::from(target);
                prop_assert_eq!(&source[at..=at], &mapped[target_at..=target_at]);
                prop_assert_eq!(map.source_offset(target), Some(offset));
            }
        }
    }
}
