//! Offset translation between a document and text generated from it.

mod codegen;

use std::cell::RefCell;

use camino::{Utf8Path, Utf8PathBuf};
use rustc_hash::FxHashMap;
use text_size::{TextRange, TextSize};

pub use codegen::CodeGen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Affine translation. Every offset inside the span maps, clamped to the
    /// end of the other side.
    Offset,
    /// Only the two endpoints map.
    Totally,
    /// Any offset inside the span maps to the start of the other side.
    Expand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mapping {
    pub mode: Mode,
    pub source: TextRange,
    pub mapped: TextRange,
}

impl Mapping {
    pub fn new(mode: Mode, source: TextRange, mapped: TextRange) -> Self {
        Self { mode, source, mapped }
    }

    fn sides(&self, direction: Direction) -> (TextRange, TextRange) {
        match direction {
            Direction::SourceToMapped => (self.source, self.mapped),
            Direction::MappedToSource => (self.mapped, self.source),
        }
    }

    fn map_offset(&self, offset: TextSize, direction: Direction) -> Option<TextSize> {
        let (from, to) = self.sides(direction);
        match self.mode {
            Mode::Totally if offset == from.start() => Some(to.start()),
            Mode::Totally if offset == from.end() => Some(to.end()),
            Mode::Totally => None,
            Mode::Offset if from.contains_inclusive(offset) => {
                Some((to.start() + (offset - from.start())).min(to.end()))
            }
            Mode::Expand if from.contains_inclusive(offset) => Some(to.start()),
            Mode::Offset | Mode::Expand => None,
        }
    }

    fn map_range(&self, range: TextRange, direction: Direction) -> Option<TextRange> {
        let (from, to) = self.sides(direction);
        match self.mode {
            Mode::Totally => (range == from).then_some(to),
            Mode::Expand => from.contains_range(range).then_some(to),
            Mode::Offset => {
                let start = self.map_offset(range.start(), direction)?;
                let end = self.map_offset(range.end(), direction)?;
                Some(TextRange::new(start, end))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    SourceToMapped,
    MappedToSource,
}

/// Mappings between one source document and one generated document.
///
/// Query results are memoized for the lifetime of the map. A changed
/// document gets a new `SourceMap`; nothing here is invalidated in place.
#[derive(Debug)]
pub struct SourceMap {
    source_path: Utf8PathBuf,
    mapped_path: Utf8PathBuf,
    mappings: Vec<Mapping>,
    range_cache: RefCell<FxHashMap<(TextRange, Direction), Vec<TextRange>>>,
    offset_cache: RefCell<FxHashMap<(TextSize, Direction), Vec<TextSize>>>,
}

impl SourceMap {
    pub fn new(
        source_path: impl Into<Utf8PathBuf>,
        mapped_path: impl Into<Utf8PathBuf>,
        mappings: Vec<Mapping>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            mapped_path: mapped_path.into(),
            mappings,
            range_cache: RefCell::default(),
            offset_cache: RefCell::default(),
        }
    }

    pub fn source_path(&self) -> &Utf8Path {
        &self.source_path
    }

    pub fn mapped_path(&self) -> &Utf8Path {
        &self.mapped_path
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Every candidate for `offset`, in mapping order.
    pub fn map_offsets(&self, offset: TextSize, direction: Direction) -> Vec<TextSize> {
        self.offset_cache
            .borrow_mut()
            .entry((offset, direction))
            .or_insert_with(|| {
                self.mappings.iter().filter_map(|m| m.map_offset(offset, direction)).collect()
            })
            .clone()
    }

    /// Every candidate for `range`, in mapping order.
    pub fn map_ranges(&self, range: TextRange, direction: Direction) -> Vec<TextRange> {
        self.range_cache
            .borrow_mut()
            .entry((range, direction))
            .or_insert_with(|| {
                self.mappings.iter().filter_map(|m| m.map_range(range, direction)).collect()
            })
            .clone()
    }

    pub fn mapped_offsets(&self, source: TextSize) -> Vec<TextSize> {
        self.map_offsets(source, Direction::SourceToMapped)
    }

    pub fn source_offsets(&self, mapped: TextSize) -> Vec<TextSize> {
        self.map_offsets(mapped, Direction::MappedToSource)
    }

    pub fn mapped_ranges(&self, source: TextRange) -> Vec<TextRange> {
        self.map_ranges(source, Direction::SourceToMapped)
    }

    pub fn source_ranges(&self, mapped: TextRange) -> Vec<TextRange> {
        self.map_ranges(mapped, Direction::MappedToSource)
    }

    pub fn mapped_offset(&self, source: TextSize) -> Option<TextSize> {
        self.mapped_offsets(source).first().copied()
    }

    pub fn source_offset(&self, mapped: TextSize) -> Option<TextSize> {
        self.source_offsets(mapped).first().copied()
    }

    pub fn mapped_range(&self, source: TextRange) -> Option<TextRange> {
        self.mapped_ranges(source).first().copied()
    }

    pub fn source_range(&self, mapped: TextRange) -> Option<TextRange> {
        self.source_ranges(mapped).first().copied()
    }

    pub fn is_source_offset(&self, offset: TextSize) -> bool {
        self.mapped_offset(offset).is_some()
    }

    pub fn is_mapped_offset(&self, offset: TextSize) -> bool {
        self.source_offset(offset).is_some()
    }

    pub fn is_source_range(&self, range: TextRange) -> bool {
        self.mapped_range(range).is_some()
    }

    pub fn is_mapped_range(&self, range: TextRange) -> bool {
        self.source_range(range).is_some()
    }
}
