/// Error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The submitted value is zero.
    #[error("invalid value: a score must be greater than zero")]
    InvalidValue,
    /// The display name is empty or too long.
    #[error("invalid name: {0}")]
    InvalidName(&'static str),
    /// The requested range is empty or reversed.
    #[error("invalid range: start {start} is not less than end {end}")]
    InvalidRange {
        /// Start of the range (inclusive).
        start: usize,
        /// End of the range (exclusive).
        end: usize,
    },
    /// The requested range reaches past the end of the ledger.
    #[error("range out of bounds: end {end} exceeds ledger length {len}")]
    RangeOutOfBounds {
        /// End of the range (exclusive).
        end: usize,
        /// Current ledger length.
        len: usize,
    },
    /// A ledger invariant does not hold.
    #[error("invariant violated: {0}")]
    Invariant(&'static str),
    /// Invalid configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}
