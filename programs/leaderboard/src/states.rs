use anchor_lang::prelude::*;
use hiscore_model::{NameRegistry, NameRegistryExt, RankedEntry, RankedLedger, Registry};

/// Leaderboard errors.
#[error_code]
pub enum LeaderboardError {
    /// A score must be greater than zero.
    #[msg("Invalid value")]
    InvalidValue,
    /// The display name is empty or too long.
    #[msg("Invalid name")]
    InvalidName,
    /// The range start is not less than its end.
    #[msg("Invalid range")]
    InvalidRange,
    /// The range reaches past the end of the leaderboard.
    #[msg("Range out of bounds")]
    RangeOutOfBounds,
    /// The account does not belong to the signer.
    #[msg("Invalid owner")]
    InvalidOwner,
    /// The leaderboard state is inconsistent.
    #[msg("Invariant violated")]
    InvariantViolated,
    /// Invalid configuration.
    #[msg("Invalid config")]
    InvalidConfig,
}

impl From<hiscore_model::Error> for LeaderboardError {
    fn from(err: hiscore_model::Error) -> Self {
        use hiscore_model::Error;

        match err {
            Error::InvalidValue => Self::InvalidValue,
            Error::InvalidName(_) => Self::InvalidName,
            Error::InvalidRange { .. } => Self::InvalidRange,
            Error::RangeOutOfBounds { .. } => Self::RangeOutOfBounds,
            Error::Invariant(_) => Self::InvariantViolated,
            Error::InvalidConfig(_) => Self::InvalidConfig,
        }
    }
}

/// The seed for [`Profile`] account.
#[constant]
pub const PROFILE_SEED: &[u8] = b"profile";

/// The seed for [`NameRecord`] account.
#[constant]
pub const NAME_SEED: &[u8] = b"name";

/// The seed of the [`NameRecord`] of `name`.
///
/// Names are hashed so the seed is 32 bytes whatever the input length.
pub fn name_seed(name: &str) -> [u8; 32] {
    anchor_lang::solana_program::hash::hash(name.as_bytes()).to_bytes()
}

/// Find the [`Profile`] address of `owner`.
pub fn find_profile_address(leaderboard: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROFILE_SEED, leaderboard.as_ref(), owner.as_ref()],
        &crate::ID,
    )
}

/// Find the [`NameRecord`] address of `name`.
pub fn find_name_record_address(leaderboard: &Pubkey, name: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[NAME_SEED, leaderboard.as_ref(), name_seed(name).as_ref()],
        &crate::ID,
    )
}

/// The maximum number of leaderboard entries kept on chain.
#[constant]
pub const MAX_LEADERBOARD_LEN: u8 = 100;

/// The maximum length of a display name in bytes.
#[constant]
pub const MAX_NAME_LEN: u8 = 32;

/// A single leaderboard record.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, InitSpace, Debug,
)]
pub struct LeaderEntry {
    /// The owner address.
    pub owner: Pubkey,
    /// The score.
    pub value: u64,
    /// The unix timestamp at which the score was recorded.
    pub recorded_at: i64,
}

impl RankedEntry for LeaderEntry {
    type Id = Pubkey;

    fn new(owner: Pubkey, value: u64, recorded_at: i64) -> Self {
        Self {
            owner,
            value,
            recorded_at,
        }
    }

    fn owner(&self) -> &Pubkey {
        &self.owner
    }

    fn value(&self) -> u64 {
        self.value
    }

    fn recorded_at(&self) -> i64 {
        self.recorded_at
    }
}

/// The best score of a ranked owner.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, PartialEq, Eq, InitSpace, Debug,
)]
pub struct BestRecord {
    /// The owner address.
    pub owner: Pubkey,
    /// The best score.
    pub value: u64,
}

/// The leaderboard.
///
/// Queries are provided by [`RankedLedgerExt`](hiscore_model::RankedLedgerExt)
/// on the deserialized account.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Leaderboard {
    /// The address that initialized the leaderboard.
    pub authority: Pubkey,
    /// Entries sorted by score, descending.
    #[max_len(MAX_LEADERBOARD_LEN)]
    pub entries: Vec<LeaderEntry>,
    /// Best score of every ranked owner.
    #[max_len(MAX_LEADERBOARD_LEN)]
    pub bests: Vec<BestRecord>,
}

impl Leaderboard {
    /// Reset to an empty leaderboard owned by `authority`.
    pub fn init(&mut self, authority: Pubkey) {
        self.authority = authority;
        self.entries = Vec::new();
        self.bests = Vec::new();
    }
}

impl RankedLedger for Leaderboard {
    type Id = Pubkey;
    type Entry = LeaderEntry;

    fn capacity(&self) -> usize {
        MAX_LEADERBOARD_LEN.into()
    }

    fn entries(&self) -> &[LeaderEntry] {
        &self.entries
    }

    fn entries_mut(&mut self) -> &mut Vec<LeaderEntry> {
        &mut self.entries
    }

    fn best_of(&self, owner: &Pubkey) -> u64 {
        self.bests
            .iter()
            .find(|record| record.owner == *owner)
            .map(|record| record.value)
            .unwrap_or(0)
    }

    fn set_best(&mut self, owner: &Pubkey, value: u64) {
        let idx = self.bests.iter().position(|record| record.owner == *owner);
        match (idx, value) {
            (Some(idx), 0) => {
                self.bests.swap_remove(idx);
            }
            (Some(idx), value) => self.bests[idx].value = value,
            (None, 0) => {}
            (None, value) => self.bests.push(BestRecord {
                owner: *owner,
                value,
            }),
        }
    }
}

/// The display name of an owner.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Profile {
    /// Bump.
    pub bump: u8,
    /// The leaderboard.
    pub leaderboard: Pubkey,
    /// The owner.
    pub owner: Pubkey,
    /// The display name, empty if not set.
    #[max_len(MAX_NAME_LEN)]
    pub name: String,
}

impl Profile {
    /// Returns whether the display name has been set.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Reverse lookup from a display name to its owner.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct NameRecord {
    /// Bump.
    pub bump: u8,
    /// The leaderboard.
    pub leaderboard: Pubkey,
    /// The owner, the default address if unbound.
    pub owner: Pubkey,
    /// The display name.
    #[max_len(MAX_NAME_LEN)]
    pub name: String,
}

impl NameRecord {
    /// Returns whether the name has been bound.
    pub fn is_bound(&self) -> bool {
        self.owner != Pubkey::default()
    }
}

/// A [`NameRegistry`] view over the [`Profile`] of an owner and the
/// [`NameRecord`] of a name.
pub struct ProfileBinding<'a> {
    profile: &'a mut Profile,
    record: &'a mut NameRecord,
}

impl<'a> ProfileBinding<'a> {
    /// Create from parts.
    pub fn new(profile: &'a mut Profile, record: &'a mut NameRecord) -> Self {
        Self { profile, record }
    }
}

impl NameRegistry for ProfileBinding<'_> {
    type Id = Pubkey;

    fn name_of(&self, owner: &Pubkey) -> Option<&str> {
        (self.profile.owner == *owner && self.profile.is_named())
            .then_some(self.profile.name.as_str())
    }

    fn identity_of(&self, name: &str) -> Option<&Pubkey> {
        (self.record.is_bound() && self.record.name == name).then_some(&self.record.owner)
    }

    fn bind(&mut self, owner: &Pubkey, name: &str) {
        self.profile.owner = *owner;
        self.profile.name = name.to_owned();
        self.record.owner = *owner;
        self.record.name = name.to_owned();
    }

    fn max_name_len(&self) -> usize {
        MAX_NAME_LEN.into()
    }
}

/// Build a [`Registry`] from fetched [`Profile`]s, to join display names with
/// the entries of the given [`Leaderboard`] off-chain.
///
/// Profiles of other leaderboards and unnamed profiles are skipped. If two
/// profiles claim the same name, the first one wins.
pub fn registry_from_profiles<'a>(
    leaderboard: &Pubkey,
    profiles: impl IntoIterator<Item = &'a Profile>,
) -> hiscore_model::Result<Registry<Pubkey>> {
    let mut registry = Registry::new();
    for profile in profiles
        .into_iter()
        .filter(|profile| profile.leaderboard == *leaderboard && profile.is_named())
    {
        registry.set_display_name(&profile.owner, &profile.name)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use hiscore_model::{NameBinding, RankedLedgerExt};

    use super::*;

    #[test]
    fn leaderboard_fits_in_an_initial_allocation() {
        assert!(8 + Leaderboard::INIT_SPACE <= 10_240);
    }

    #[test]
    fn leaderboard_keeps_the_top_entries() {
        let mut leaderboard = Leaderboard::default();
        let owners = (0..=MAX_LEADERBOARD_LEN)
            .map(|_| Pubkey::new_unique())
            .collect::<Vec<_>>();
        for (idx, owner) in owners.iter().enumerate() {
            let value = (idx as u64 + 1) * 10;
            leaderboard.submit(owner, value, idx as i64).unwrap();
        }

        assert_eq!(leaderboard.len(), usize::from(MAX_LEADERBOARD_LEN));
        assert_eq!(leaderboard.bests.len(), usize::from(MAX_LEADERBOARD_LEN));
        assert_eq!(leaderboard.value_at(99), 20);
        assert_eq!(leaderboard.best_of(&owners[0]), 0);
        assert_eq!(leaderboard.owner_at(0), owners.last());
        leaderboard.check_invariants().unwrap();
    }

    #[test]
    fn leaderboard_replaces_stale_entries() {
        let mut leaderboard = Leaderboard::default();
        let owner = Pubkey::new_unique();
        leaderboard.submit(&owner, 100, 1).unwrap();
        assert!(!leaderboard.submit(&owner, 50, 2).unwrap().is_recorded());
        let outcome = leaderboard.submit(&owner, 200, 3).unwrap();
        assert_eq!(outcome.replaced().map(|e| e.value), Some(100));
        assert_eq!(
            leaderboard.entries,
            [LeaderEntry {
                owner,
                value: 200,
                recorded_at: 3
            }]
        );
        assert_eq!(leaderboard.bests.len(), 1);
    }

    #[test]
    fn zero_value_maps_to_program_error() {
        let mut leaderboard = Leaderboard::default();
        let err = leaderboard
            .submit(&Pubkey::new_unique(), 0, 0)
            .unwrap_err();
        assert!(matches!(
            LeaderboardError::from(err),
            LeaderboardError::InvalidValue
        ));
    }

    #[test]
    fn profile_binding_is_first_write_wins() {
        let owner = Pubkey::new_unique();
        let mut profile = Profile {
            owner,
            ..Default::default()
        };

        let mut record = NameRecord::default();
        let binding = ProfileBinding::new(&mut profile, &mut record)
            .set_display_name(&owner, "alice")
            .unwrap();
        assert_eq!(binding, NameBinding::Bound);
        assert_eq!(record.owner, owner);

        let mut other = NameRecord::default();
        let binding = ProfileBinding::new(&mut profile, &mut other)
            .set_display_name(&owner, "bob")
            .unwrap();
        assert_eq!(binding, NameBinding::AlreadyNamed);
        assert_eq!(profile.name, "alice");
        assert!(!other.is_bound());
    }

    #[test]
    fn taken_names_are_left_alone() {
        let alice = Pubkey::new_unique();
        let mut record = NameRecord {
            owner: alice,
            name: "alice".to_owned(),
            ..Default::default()
        };
        let mallory = Pubkey::new_unique();
        let mut profile = Profile {
            owner: mallory,
            ..Default::default()
        };
        let binding = ProfileBinding::new(&mut profile, &mut record)
            .set_display_name(&mallory, "alice")
            .unwrap();
        assert_eq!(binding, NameBinding::NameTaken);
        assert!(!profile.is_named());
        assert_eq!(record.owner, alice);
    }

    #[test]
    fn name_seeds_fit_any_name_length() {
        let leaderboard = Pubkey::new_unique();
        let long = "x".repeat(usize::from(MAX_NAME_LEN) + 1);
        let (address, _) = find_name_record_address(&leaderboard, &long);
        assert_ne!(address, find_name_record_address(&leaderboard, "x").0);
        assert_ne!(
            find_name_record_address(&leaderboard, "alice").0,
            find_name_record_address(&Pubkey::new_unique(), "alice").0
        );
        assert_eq!(name_seed("alice"), name_seed("alice"));
    }

    #[test]
    fn init_resets_the_leaderboard() {
        let authority = Pubkey::new_unique();
        let mut leaderboard = Leaderboard::default();
        leaderboard.submit(&Pubkey::new_unique(), 10, 0).unwrap();
        leaderboard.init(authority);
        assert_eq!(leaderboard.authority, authority);
        assert!(leaderboard.is_empty());
        assert!(leaderboard.bests.is_empty());
    }

    #[test]
    fn profiles_join_leaderboard_names() {
        let leaderboard_key = Pubkey::new_unique();
        let (alice, bob, carol) = (
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
        );
        let profiles = [
            Profile {
                leaderboard: leaderboard_key,
                owner: alice,
                name: "alice".to_owned(),
                ..Default::default()
            },
            Profile {
                leaderboard: leaderboard_key,
                owner: bob,
                ..Default::default()
            },
            Profile {
                leaderboard: Pubkey::new_unique(),
                owner: carol,
                name: "carol".to_owned(),
                ..Default::default()
            },
        ];
        let registry = registry_from_profiles(&leaderboard_key, &profiles).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.identity_of("carol"), None);

        let mut leaderboard = Leaderboard::default();
        leaderboard.submit(&alice, 10, 0).unwrap();
        leaderboard.submit(&bob, 20, 0).unwrap();
        leaderboard.submit(&carol, 5, 0).unwrap();
        assert_eq!(leaderboard.all_names(&registry), ["", "alice", ""]);
        assert_eq!(registry.identity_of("alice"), Some(&alice));
    }
}
