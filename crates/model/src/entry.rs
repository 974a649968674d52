/// A ranked record: an owner, its score and when the score was recorded.
pub trait RankedEntry {
    /// Identity type.
    type Id;

    /// Create a new entry.
    fn new(owner: Self::Id, value: u64, recorded_at: i64) -> Self
    where
        Self: Sized;

    /// Get the owner.
    fn owner(&self) -> &Self::Id;

    /// Get the score.
    fn value(&self) -> u64;

    /// Get the timestamp (unix seconds) at which the score was recorded.
    fn recorded_at(&self) -> i64;
}

/// In-memory ranked entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<Id> {
    /// Owner.
    pub owner: Id,
    /// Score.
    pub value: u64,
    /// Recorded at.
    pub recorded_at: i64,
}

impl<Id> RankedEntry for Entry<Id> {
    type Id = Id;

    fn new(owner: Id, value: u64, recorded_at: i64) -> Self {
        Self {
            owner,
            value,
            recorded_at,
        }
    }

    fn owner(&self) -> &Id {
        &self.owner
    }

    fn value(&self) -> u64 {
        self.value
    }

    fn recorded_at(&self) -> i64 {
        self.recorded_at
    }
}
