//! Mark detection - finds sibling titles carrying an explicit order prefix
//!
//! A title such as `"2#Featured"` is *marked*: the part before the marker
//! is its display order, and marked siblings form the home-page allow-list
//! for large root sets.

use std::collections::BTreeSet;

use crate::RawCategoryNode;

/// Distinct marked titles of one sibling level.
///
/// Borrows the titles from the sibling slice it was computed from, so it
/// lives exactly as long as one level of assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkSet<'a> {
    titles: BTreeSet<&'a str>,
}

impl<'a> MarkSet<'a> {
    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.titles.iter().copied()
    }
}

impl<'a> FromIterator<&'a str> for MarkSet<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            titles: iter.into_iter().collect(),
        }
    }
}

/// Collect the titles among `siblings` that contain `marker`.
///
/// Titles are compared by exact string equality, duplicates collapse,
/// and empty titles never count as marked.
pub fn marked_titles(siblings: &[RawCategoryNode], marker: char) -> MarkSet<'_> {
    siblings
        .iter()
        .map(|node| node.title.as_str())
        .filter(|title| !title.is_empty() && title.contains(marker))
        .collect()
}
