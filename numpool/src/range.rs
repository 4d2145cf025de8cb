use std::{fmt, ops::RangeInclusive};

use crate::{PoolError, Result};

/// One run of free ids. A run of length one is always stored as `Single`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Single(u32),
    Span { begin: u32, end: u32 }
}

impl Entry {
    /// Builds the canonical entry for `begin..=end`.
    ///
    /// Panics if the bounds are inverted; callers inside the pool only ever
    /// shrink or grow an entry that was already valid.
    pub fn span(begin: u32, end: u32) -> Self {
        assert!(begin <= end, "inverted range {begin}-{end}");
        if begin == end {
            Self::Single(begin)
        } else {
            Self::Span { begin, end }
        }
    }

    pub fn begin(self) -> u32 {
        match self {
            Self::Single(v) => v,
            Self::Span { begin, .. } => begin
        }
    }

    pub fn end(self) -> u32 {
        match self {
            Self::Single(v) => v,
            Self::Span { end, .. } => end
        }
    }

    pub fn len(self) -> u32 {
        self.end() - self.begin() + 1
    }

    pub fn contains(self, value: u32) -> bool {
        self.begin() <= value && value <= self.end()
    }

    /// Checks that the entry is well formed and lies within `1..=max`.
    pub fn validate(self, max: u32) -> Result<()> {
        let (begin, end) = (self.begin(), self.end());
        if begin < 1 || begin > end {
            return Err(PoolError::MalformedRange { begin, end });
        }
        if end > max {
            return Err(PoolError::RangeOutOfBounds { begin, end, max });
        }
        Ok(())
    }

    /// Same run, canonical representation.
    pub(crate) fn normalize(self) -> Self {
        Self::span(self.begin(), self.end())
    }
}

impl From<u32> for Entry {
    fn from(value: u32) -> Self {
        Self::Single(value)
    }
}

impl From<Entry> for RangeInclusive<u32> {
    fn from(value: Entry) -> Self {
        value.begin()..=value.end()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Single(v) => write!(f, "{v}"),
            Self::Span { begin, end } => write!(f, "{begin}-{end}")
        }
    }
}
