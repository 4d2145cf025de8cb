use std::{collections::BTreeSet, fmt, ops::RangeInclusive};

use tracing::{debug, trace};

use crate::{find_bracket, Bracket, Entry, PoolError, Result};

pub const DEFAULT_MAX: u32 = 10_000_000;

/// Free list of ids in `1..=max`, kept as sorted, fully coalesced runs.
///
/// Ids are handed out from the top of the last run so that nearly all
/// mutation happens at the tail of the list. `0` is never a valid id and
/// doubles as the exhaustion sentinel returned by [`RangePool::allocate`].
///
/// The pool does no locking of its own; see [`crate::SharedPool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePool {
    max: u32,
    entries: Vec<Entry>
}

impl RangePool {
    pub fn new(max: u32) -> Result<Self> {
        if max < 1 {
            return Err(PoolError::InvalidMax { max });
        }
        debug!(max, "created pool");
        Ok(Self { max, entries: vec![Entry::span(1, max)] })
    }

    /// Builds a pool from an explicit free list, validating every entry and
    /// the ordering between them.
    pub fn from_entries(max: u32, entries: impl IntoIterator<Item = Entry>) -> Result<Self> {
        if max < 1 {
            return Err(PoolError::InvalidMax { max });
        }
        let entries = entries.into_iter()
            .map(|e| e.validate(max).map(|()| e.normalize()))
            .collect::<Result<Vec<_>>>()?;
        let pool = Self { max, entries };
        pool.check()?;
        Ok(pool)
    }

    /// Rebuilds the pool that results from `allocated` being the only ids
    /// handed out. Duplicate ids are ignored.
    pub fn with_allocated(max: u32, allocated: impl IntoIterator<Item = u32>) -> Result<Self> {
        if max < 1 {
            return Err(PoolError::InvalidMax { max });
        }
        let taken = allocated.into_iter()
            .map(|id| if (1..=max).contains(&id) { Ok(id) } else { Err(PoolError::NotAllocatable { id, max }) })
            .collect::<Result<BTreeSet<_>>>()?;

        let mut entries = Vec::new();
        let mut begin = Some(1);
        for id in taken {
            match begin {
                Some(b) if b < id => entries.push(Entry::span(b, id - 1)),
                _ => {}
            }
            begin = id.checked_add(1);
        }
        match begin {
            Some(b) if b <= max => entries.push(Entry::span(b, max)),
            _ => {}
        }

        let pool = Self { max, entries };
        pool.debug_check();
        Ok(pool)
    }

    /// Takes the highest free id, or returns 0 if the pool is exhausted.
    pub fn allocate(&mut self) -> u32 {
        let Some(last) = self.entries.last_mut() else {
            trace!("pool exhausted");
            return 0;
        };

        let id = match *last {
            Entry::Single(id) => {
                self.entries.pop();
                id
            }
            Entry::Span { begin, end } => {
                *last = Entry::span(begin, end - 1);
                end
            }
        };

        self.debug_check();
        id
    }

    /// Returns `id` to the pool.
    ///
    /// Returns false if `id` is outside `1..=max` or is already free, in
    /// which case the pool is left untouched.
    pub fn release(&mut self, id: u32) -> bool {
        if id < 1 || id > self.max {
            trace!(id, max = self.max, "release out of range");
            return false;
        }

        if self.entries.is_empty() {
            self.entries.push(Entry::Single(id));
            return true;
        }

        match find_bracket(&self.entries, id) {
            Bracket::Within(_) => {
                trace!(id, "release of an id that is already free");
                return false;
            }
            Bracket::Front => {
                if !self.merge_begin(id, 0) {
                    self.entries.insert(0, Entry::Single(id));
                }
            }
            Bracket::Back(last) => {
                if !self.merge_end(id, last) {
                    self.entries.push(Entry::Single(id));
                }
            }
            Bracket::Between(left) => {
                let right = left + 1;
                let merged_end = self.merge_end(id, left);
                let merged_begin = self.merge_begin(id, right);
                match (merged_end, merged_begin) {
                    (true, true) => {
                        let end = self.entries.remove(right).end();
                        let begin = self.entries[left].begin();
                        self.entries[left] = Entry::span(begin, end);
                        debug!(id, begin, end, "coalesced neighbouring ranges");
                    }
                    (false, false) => self.entries.insert(right, Entry::Single(id)),
                    _ => {}
                }
            }
        }

        self.debug_check();
        true
    }

    fn merge_end(&mut self, value: u32, index: usize) -> bool {
        let entry = &mut self.entries[index];
        if entry.end().checked_add(1) != Some(value) {
            return false;
        }
        *entry = Entry::span(entry.begin(), value);
        true
    }

    fn merge_begin(&mut self, value: u32, index: usize) -> bool {
        let entry = &mut self.entries[index];
        if value.checked_add(1) != Some(entry.begin()) {
            return false;
        }
        *entry = Entry::span(value, entry.end());
        true
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of free ids.
    pub fn available(&self) -> u32 {
        self.entries.iter().map(|e| e.len()).sum()
    }

    /// Number of ids currently handed out.
    pub fn allocated(&self) -> u32 {
        self.max - self.available()
    }

    pub fn is_exhausted(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is free.
    pub fn contains(&self, id: u32) -> bool {
        !self.entries.is_empty() && matches!(find_bracket(&self.entries, id), Bracket::Within(_))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn ranges(&self) -> impl Iterator<Item = RangeInclusive<u32>> + '_ {
        self.entries.iter().copied().map(RangeInclusive::from)
    }

    /// Validates every entry and that no two entries overlap or touch.
    pub fn check(&self) -> Result<()> {
        for e in &self.entries {
            e.validate(self.max)?;
        }
        for (i, pair) in self.entries.windows(2).enumerate() {
            if u64::from(pair[0].end()) + 1 >= u64::from(pair[1].begin()) {
                return Err(PoolError::Unordered { index: i + 1 });
            }
        }
        Ok(())
    }

    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            if let Err(e) = self.check() {
                panic!("pool invariant broken: {e} in {self}");
            }
        }
    }
}

impl Default for RangePool {
    fn default() -> Self {
        Self { max: DEFAULT_MAX, entries: vec![Entry::span(1, DEFAULT_MAX)] }
    }
}

impl fmt::Display for RangePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{e}")?;
        }
        f.write_str("]")
    }
}
