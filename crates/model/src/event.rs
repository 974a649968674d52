/// Notification emitted by a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Event<Id> {
    /// A new best score was recorded.
    ScoreSubmitted {
        /// Owner.
        owner: Id,
        /// Score.
        value: u64,
    },
    /// An owner's previous entry was replaced by a better one.
    ScoreRemoved {
        /// Owner.
        owner: Id,
    },
    /// A display name was bound.
    NameSet {
        /// Owner.
        owner: Id,
        /// Display name.
        name: String,
    },
}

impl<Id> Event<Id> {
    /// Get the owner the event is about.
    pub fn owner(&self) -> &Id {
        match self {
            Self::ScoreSubmitted { owner, .. }
            | Self::ScoreRemoved { owner }
            | Self::NameSet { owner, .. } => owner,
        }
    }
}
