//! Inclusive index ranges into an item collection

use std::ops::RangeInclusive;

/// Requested range falls outside the collection or is reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRange {
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

impl std::fmt::Display for InvalidRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid range [{}, {}] for collection of {} items",
            self.start, self.end, self.len
        )
    }
}

impl std::error::Error for InvalidRange {}

/// Validated zero-based inclusive range `start..=end` with `end < len`.
///
/// Only constructible through [`FetchRange::validate`], so every value maps
/// offsets `0..len()` one-to-one onto collection indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRange {
    start: usize,
    end: usize,
}

// A validated range always holds at least one index
#[allow(clippy::len_without_is_empty)]
impl FetchRange {
    /// Check `start <= end < len`. Pure: no allocation, no side effects.
    pub fn validate(len: usize, start: usize, end: usize) -> Result<Self, InvalidRange> {
        if start > end || start >= len || end >= len {
            return Err(InvalidRange { start, end, len });
        }
        Ok(Self { start, end })
    }

    /// Range covering a whole collection, or `None` if it is empty.
    pub fn full(len: usize) -> Option<Self> {
        len.checked_sub(1).map(|end| Self { start: 0, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of indices covered (never zero)
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Collection index owned by result offset `offset`.
    pub fn index_at(&self, offset: usize) -> usize {
        self.start + offset
    }

    /// Result offset for collection index `index`, if it lies in the range.
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        self.indices()
            .contains(&index)
            .then(|| index - self.start)
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}
