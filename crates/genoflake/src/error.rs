use core::fmt;
use core::num::ParseIntError;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The coordinate that failed validation in [`Error::InvalidCoordinate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Coordinate {
    Datacenter,
    Node,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Datacenter => f.write_str("datacenter"),
            Self::Node => f.write_str("node"),
        }
    }
}

/// Errors produced while decoding an ID from its decimal form.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseIdError {
    /// The input was empty.
    #[error("empty snowflake id")]
    Empty,

    /// Byte input that is not valid UTF-8.
    #[error("snowflake id bytes are not valid utf-8")]
    InvalidUtf8,

    /// The input is not a base-10 `i64`.
    #[error("invalid snowflake id {input:?}: {source}")]
    InvalidDecimal {
        input: String,
        source: ParseIntError,
    },
}

/// All errors that `genoflake` can produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A datacenter or node coordinate outside `0..=7`.
    #[error("{coordinate} id must be within 0..=7, got {value}")]
    InvalidCoordinate { coordinate: Coordinate, value: i64 },

    /// A gene outside `0..=63`.
    #[error("gene must be within 0..=63, got {gene}")]
    InvalidGene { gene: i64 },

    /// Malformed decimal input to a parser or codec.
    #[error(transparent)]
    Parse(#[from] ParseIdError),

    /// A SQL value that is neither NULL, an integer, nor decimal bytes.
    #[error("unsupported sql value for snowflake id: {kind}")]
    UnsupportedSqlValue { kind: &'static str },

    /// The clock moved behind the last issued timestamp. Only returned by
    /// nodes configured with [`ClockPolicy::Reject`].
    ///
    /// [`ClockPolicy::Reject`]: crate::ClockPolicy::Reject
    #[error("clock moved backward: last {last_ms}ms, now {now_ms}ms")]
    ClockBackward { last_ms: i64, now_ms: i64 },

    /// The clock reports a time before [`EPOCH`](crate::EPOCH).
    #[error("clock is {now_ms}ms relative to the snowflake epoch")]
    ClockBeforeEpoch { now_ms: i64 },

    /// The clock reports a time past the 41-bit timestamp window.
    #[error("timestamp {now_ms}ms exceeds the 41-bit snowflake window")]
    TimestampOverflow { now_ms: i64 },

    /// The default node could not be brought up.
    #[error("default snowflake node bootstrap failed: {source}")]
    Bootstrap { source: Box<Error> },

    /// The node state lock was poisoned by a panicking thread.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("snowflake node lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
