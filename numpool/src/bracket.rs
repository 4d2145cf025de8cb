use std::cmp::Ordering;

use crate::Entry;

/// Where a value sits relative to a sorted run of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// Inside the entry at this index.
    Within(usize),
    /// Before the first entry.
    Front,
    /// After the last entry, which is at this index.
    Back(usize),
    /// In the gap between this index and the next.
    Between(usize)
}

impl Bracket {
    pub fn left(self) -> Option<usize> {
        match self {
            Self::Within(i) | Self::Back(i) | Self::Between(i) => Some(i),
            Self::Front => None
        }
    }

    pub fn right(self) -> Option<usize> {
        match self {
            Self::Within(i) => Some(i),
            Self::Front => Some(0),
            Self::Back(_) => None,
            Self::Between(i) => Some(i + 1)
        }
    }
}

/// Binary search for the bracket around `value`.
///
/// `entries` must be sorted and disjoint. Panics if it is empty: there is
/// nothing to bracket against, and the pool handles that case itself.
pub fn find_bracket(entries: &[Entry], value: u32) -> Bracket {
    assert!(!entries.is_empty(), "find_bracket called on an empty pool");

    let found = entries.binary_search_by(|e| {
        if e.end() < value {
            Ordering::Less
        } else if e.begin() > value {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });

    match found {
        Ok(i) => Bracket::Within(i),
        Err(0) => Bracket::Front,
        Err(i) if i == entries.len() => Bracket::Back(i - 1),
        Err(i) => Bracket::Between(i - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn singles(values: &[u32]) -> Vec<Entry> {
        values.iter().copied().map(Entry::from).collect()
    }

    #[test]
    #[should_panic(expected = "empty pool")]
    fn empty_pool_is_fatal() {
        find_bracket(&[], 1);
    }

    #[test]
    fn one_single() {
        let pool = singles(&[10]);
        assert_eq!(find_bracket(&pool, 1), Bracket::Front);
        assert_eq!(find_bracket(&pool, 20), Bracket::Back(0));
        assert_eq!(find_bracket(&pool, 10), Bracket::Within(0));
    }

    #[test]
    fn three_singles() {
        let pool = singles(&[10, 20, 30]);
        let expected = [
            (5, Bracket::Front),
            (10, Bracket::Within(0)),
            (15, Bracket::Between(0)),
            (20, Bracket::Within(1)),
            (25, Bracket::Between(1)),
            (30, Bracket::Within(2)),
            (35, Bracket::Back(2))
        ];
        for (value, bracket) in expected {
            assert_eq!(find_bracket(&pool, value), bracket, "value {value}");
        }
    }

    #[test]
    fn touching_spans() {
        let pool = vec![
            Entry::span(5, 10),
            Entry::span(11, 20),
            Entry::span(21, 30),
            Entry::span(31, 40),
            Entry::span(41, 45)
        ];
        assert_eq!(find_bracket(&pool, 1), Bracket::Front);
        for (i, e) in pool.iter().enumerate() {
            assert_eq!(find_bracket(&pool, e.begin()), Bracket::Within(i));
            assert_eq!(find_bracket(&pool, e.end()), Bracket::Within(i));
        }
        assert_eq!(find_bracket(&pool, 50), Bracket::Back(4));
    }

    #[test]
    fn gapped_spans() {
        let pool = vec![Entry::span(5, 9), Entry::span(11, 19), Entry::span(21, 29)];
        assert_eq!(find_bracket(&pool, 10), Bracket::Between(0));
        assert_eq!(find_bracket(&pool, 7), Bracket::Within(0));
        assert_eq!(find_bracket(&pool, 20), Bracket::Between(1));
        assert_eq!(find_bracket(&pool, 50), Bracket::Back(2));

        let b = find_bracket(&pool, 10);
        assert_eq!((b.left(), b.right()), (Some(0), Some(1)));
        let b = find_bracket(&pool, 7);
        assert_eq!((b.left(), b.right()), (Some(0), Some(0)));
        let b = find_bracket(&pool, 50);
        assert_eq!((b.left(), b.right()), (Some(2), None));
        let b = find_bracket(&pool, 1);
        assert_eq!((b.left(), b.right()), (None, Some(0)));
    }
}
