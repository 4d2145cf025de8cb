use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("pool upper bound must be at least 1, got {max}")]
    InvalidMax {
        max: u32
    },
    #[error("range {begin}-{end} is inverted or starts below 1")]
    MalformedRange {
        begin: u32,
        end: u32
    },
    #[error("range {begin}-{end} exceeds pool bound {max}")]
    RangeOutOfBounds {
        begin: u32,
        end: u32,
        max: u32
    },
    #[error("entry {index} overlaps or touches the entry before it")]
    Unordered {
        index: usize
    },
    #[error("id {id} is outside 1..={max}")]
    NotAllocatable {
        id: u32,
        max: u32
    }
}

pub type Result<T, E = PoolError> = std::result::Result<T, E>;
