//! View index ⇄ flat queue position arithmetic.
//!
//! A view row covers one queue slot (a track) or several (a folded album).
//! [`IndexTranslator`] converts between the two coordinate systems. Indices
//! past the end are clamped rather than rejected, so stale indices from an
//! older view still produce a usable answer.
//!
//! Flat positions only line up with the real queue for unfiltered views;
//! callers check [`crate::view::View::is_filtered`] before trusting them.

use std::ops::Range;

use crate::view::ViewRow;

/// Borrowing translator over one view's rows.
#[derive(Debug, Clone, Copy)]
pub struct IndexTranslator<'a> {
    rows: &'a [ViewRow],
}

impl<'a> IndexTranslator<'a> {
    pub fn new(rows: &'a [ViewRow]) -> Self {
        Self { rows }
    }

    /// Flat range covered by the row at `view_index`.
    ///
    /// `view_index` is clamped to `0..=len`; at `len` the range is empty and
    /// starts at [`total`](Self::total).
    pub fn to_flat_range(&self, view_index: usize) -> Range<usize> {
        let index = view_index.min(self.rows.len());
        let start = self.flat_span(0, index);
        let size = self.rows.get(index).map_or(0, ViewRow::size);
        start..start + size
    }

    /// Flat slots occupied by rows `low..high`.
    pub fn flat_span(&self, low: usize, high: usize) -> usize {
        let high = high.min(self.rows.len());
        let low = low.min(high);
        self.rows[low..high].iter().map(ViewRow::size).sum()
    }

    /// Row holding flat position `flat`, or `None` past the end.
    pub fn to_view_index(&self, flat: usize) -> Option<usize> {
        let mut start = 0;
        for (index, row) in self.rows.iter().enumerate() {
            let end = start + row.size();
            if flat < end {
                return Some(index);
            }
            start = end;
        }
        None
    }

    /// Flat slots covered by the whole view.
    pub fn total(&self) -> usize {
        self.flat_span(0, self.rows.len())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
