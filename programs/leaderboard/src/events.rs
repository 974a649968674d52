use anchor_lang::prelude::*;

/// A new best score was recorded.
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmitted {
    /// The leaderboard.
    pub leaderboard: Pubkey,
    /// The owner of the score.
    pub owner: Pubkey,
    /// The score.
    pub value: u64,
}

/// An owner's previous entry was replaced by a better one.
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRemoved {
    /// The leaderboard.
    pub leaderboard: Pubkey,
    /// The owner of the replaced entry.
    pub owner: Pubkey,
}

/// A display name was bound.
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSet {
    /// The leaderboard.
    pub leaderboard: Pubkey,
    /// The named owner.
    pub owner: Pubkey,
    /// The display name.
    pub name: String,
}
