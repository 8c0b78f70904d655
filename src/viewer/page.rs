//! Page indices of the album artwork.
//!
//! The artwork is a fixed sequence of four faces: the front cover, the two
//! sides of the lyrics sheet, and the back cover.
use std::fmt;

/// Number of artwork pages.
pub const PAGE_COUNT: usize = 4;

/// Index of one of the four artwork pages, always in `0..PAGE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PageIndex(u8);

impl PageIndex
{
    /// Front cover.
    pub const FRONT: Self = Self(0);
    /// Front of the lyrics sheet.
    pub const LYRICS: Self = Self(1);
    /// Back of the lyrics sheet.
    pub const LYRICS_BACK: Self = Self(2);
    /// Back cover.
    pub const BACK: Self = Self(3);

    /// All pages in display order.
    pub const ALL: [Self; PAGE_COUNT] =
        [Self::FRONT, Self::LYRICS, Self::LYRICS_BACK, Self::BACK];

    /// Creates a page index, rejecting anything outside `0..PAGE_COUNT`.
    ///
    /// # Arguments
    ///
    /// * `index` - Requested page, possibly negative or too large
    ///
    /// # Returns
    ///
    /// The page index, or `None` when out of range.
    #[must_use]
    pub const fn new(index: i64) -> Option<Self>
    {
        match index
        {
            0 => Some(Self::FRONT),
            1 => Some(Self::LYRICS),
            2 => Some(Self::LYRICS_BACK),
            3 => Some(Self::BACK),
            _ => None,
        }
    }

    /// Returns the index as a `usize`, for indexing into slices.
    #[must_use]
    pub fn get(self) -> usize
    {
        usize::from(self.0)
    }

    /// The following page, or `None` on the back cover.
    #[must_use]
    pub const fn forward(self) -> Option<Self>
    {
        if self.0 < Self::BACK.0 { Some(Self(self.0 + 1)) } else { None }
    }

    /// The preceding page, or `None` on the front cover.
    #[must_use]
    pub const fn backward(self) -> Option<Self>
    {
        if self.0 > Self::FRONT.0 { Some(Self(self.0 - 1)) } else { None }
    }

    /// The following page, wrapping from the back cover to the front.
    #[must_use]
    pub const fn next_wrapping(self) -> Self
    {
        match self.forward()
        {
            Some(next) => next,
            None => Self::FRONT,
        }
    }

    /// Whether two pages are neighbours in the fixed order.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool
    {
        self.0.abs_diff(other.0) == 1
    }

    /// Human readable name of the page.
    #[must_use]
    pub const fn label(self) -> &'static str
    {
        match self.0
        {
            0 => "Front cover",
            1 => "Lyrics",
            2 => "Lyrics (back)",
            _ => "Back cover",
        }
    }
}

impl fmt::Display for PageIndex
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(formatter, "{}", self.0)
    }
}

#[cfg(test)]
mod tests
{
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(-1)]
    #[case(4)]
    #[case(i64::MAX)]
    fn rejects_out_of_range(#[case] index: i64)
    {
        assert_eq!(PageIndex::new(index), None);
    }

    #[test]
    fn next_wrapping_cycles_with_period_four()
    {
        let mut page = PageIndex::LYRICS_BACK;
        let visited: Vec<usize> = (0..6)
            .map(|_| {
                page = page.next_wrapping();
                page.get()
            })
            .collect();

        assert_eq!(visited, vec![3, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn edges_have_no_neighbour_outward()
    {
        assert_eq!(PageIndex::FRONT.backward(), None);
        assert_eq!(PageIndex::BACK.forward(), None);
        assert_eq!(PageIndex::FRONT.forward(), Some(PageIndex::LYRICS));
        assert_eq!(PageIndex::BACK.backward(), Some(PageIndex::LYRICS_BACK));
    }

    #[test]
    fn adjacency_ignores_wrap()
    {
        assert!(PageIndex::LYRICS.is_adjacent(PageIndex::LYRICS_BACK));
        assert!(!PageIndex::BACK.is_adjacent(PageIndex::FRONT));
        assert!(!PageIndex::BACK.is_adjacent(PageIndex::BACK));
    }
}
