use std::{collections::BTreeMap, fmt};

use crate::{
    entry::{Entry, RankedEntry},
    registry::NameRegistry,
    Error, LedgerConfig, DEFAULT_CAPACITY,
};

/// Outcome of [`RankedLedgerExt::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<E> {
    /// The value did not beat the owner's current best. Nothing changed.
    Ignored {
        /// The owner's current best.
        best: u64,
    },
    /// The value became the owner's new best.
    Recorded {
        /// The owner's previous entry, removed before the new one was inserted.
        replaced: Option<E>,
        /// The lowest ranked entry, removed because the ledger overflowed.
        evicted: Option<E>,
    },
}

impl<E> SubmitOutcome<E> {
    /// Returns whether the submission was recorded.
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded { .. })
    }

    /// Get the replaced entry.
    pub fn replaced(&self) -> Option<&E> {
        match self {
            Self::Recorded { replaced, .. } => replaced.as_ref(),
            Self::Ignored { .. } => None,
        }
    }

    /// Get the evicted entry.
    pub fn evicted(&self) -> Option<&E> {
        match self {
            Self::Recorded { evicted, .. } => evicted.as_ref(),
            Self::Ignored { .. } => None,
        }
    }
}

/// Storage of a ranked ledger.
///
/// Implementors only provide raw access to the entries and to the
/// current-best cache; every algorithm lives in [`RankedLedgerExt`].
pub trait RankedLedger {
    /// Identity type.
    type Id: Eq + Clone + fmt::Debug;

    /// Entry type.
    type Entry: RankedEntry<Id = Self::Id>;

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Get the entries in rank order.
    fn entries(&self) -> &[Self::Entry];

    /// Get a mutable reference to the entries.
    fn entries_mut(&mut self) -> &mut Vec<Self::Entry>;

    /// Get the best value recorded for the given owner, `0` if it has none.
    fn best_of(&self, owner: &Self::Id) -> u64;

    /// Set the best value of the given owner. Setting `0` clears it.
    fn set_best(&mut self, owner: &Self::Id, value: u64);
}

/// Extension trait for [`RankedLedger`].
pub trait RankedLedgerExt: RankedLedger {
    /// Submit a score for `owner`.
    ///
    /// A value that does not beat the owner's current best is ignored. Otherwise
    /// the owner's previous entry is removed, the new entry is appended, the
    /// ledger is re-sorted and, if it overflowed, its last entry is evicted.
    ///
    /// Ties keep their relative order: a new entry lands after existing entries
    /// of equal value.
    ///
    /// # Errors
    /// Returns [`Error::InvalidValue`] if `value` is zero. State is untouched.
    fn submit(
        &mut self,
        owner: &Self::Id,
        value: u64,
        recorded_at: i64,
    ) -> crate::Result<SubmitOutcome<Self::Entry>> {
        if value == 0 {
            return Err(Error::InvalidValue);
        }

        let best = self.best_of(owner);
        if value <= best {
            tracing::trace!(?owner, value, best, "ignored submission");
            return Ok(SubmitOutcome::Ignored { best });
        }

        let replaced = if best > 0 {
            swap_remove_owner(self, owner)
        } else {
            None
        };

        self.entries_mut()
            .push(Self::Entry::new(owner.clone(), value, recorded_at));
        self.set_best(owner, value);
        self.entries_mut()
            .sort_by(|a, b| b.value().cmp(&a.value()));

        let evicted = evict_overflow(self);

        Ok(SubmitOutcome::Recorded { replaced, evicted })
    }

    /// Number of ranked entries.
    fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns whether the ledger has no entries.
    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Returns whether the ledger is at capacity.
    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// All entries in rank order.
    fn top_n(&self) -> &[Self::Entry] {
        self.entries()
    }

    /// All values in rank order.
    fn values_only(&self) -> Vec<u64> {
        self.entries().iter().map(|e| e.value()).collect()
    }

    /// Value at the given position, `0` if out of range.
    fn value_at(&self, pos: usize) -> u64 {
        self.entries().get(pos).map(|e| e.value()).unwrap_or(0)
    }

    /// Owner at the given position.
    fn owner_at(&self, pos: usize) -> Option<&Self::Id> {
        self.entries().get(pos).map(|e| e.owner())
    }

    /// Timestamp at the given position, `0` if out of range.
    fn timestamp_at(&self, pos: usize) -> i64 {
        self.entries()
            .get(pos)
            .map(|e| e.recorded_at())
            .unwrap_or(0)
    }

    /// Position of the given owner, if ranked.
    fn rank_of(&self, owner: &Self::Id) -> Option<usize> {
        self.entries().iter().position(|e| e.owner() == owner)
    }

    /// Display name of the owner at the given position.
    ///
    /// Returns an empty string if the position is out of range or the owner
    /// has no name.
    fn name_at<'a, R>(&self, registry: &'a R, pos: usize) -> &'a str
    where
        R: NameRegistry<Id = Self::Id>,
    {
        self.owner_at(pos)
            .and_then(|owner| registry.name_of(owner))
            .unwrap_or_default()
    }

    /// Display names of all ranked owners, in rank order.
    fn all_names<'a, R>(&self, registry: &'a R) -> Vec<&'a str>
    where
        R: NameRegistry<Id = Self::Id>,
    {
        self.entries()
            .iter()
            .map(|e| registry.name_of(e.owner()).unwrap_or_default())
            .collect()
    }

    /// Display names of the owners ranked in `[start, end)`.
    ///
    /// # Errors
    /// - [`Error::InvalidRange`] if `start >= end`.
    /// - [`Error::RangeOutOfBounds`] if `end` is past the ledger length.
    fn names_in_range<'a, R>(
        &self,
        registry: &'a R,
        start: usize,
        end: usize,
    ) -> crate::Result<Vec<&'a str>>
    where
        R: NameRegistry<Id = Self::Id>,
    {
        if start >= end {
            return Err(Error::InvalidRange { start, end });
        }
        let len = self.len();
        if end > len {
            return Err(Error::RangeOutOfBounds { end, len });
        }
        Ok(self.entries()[start..end]
            .iter()
            .map(|e| registry.name_of(e.owner()).unwrap_or_default())
            .collect())
    }

    /// Check the ledger invariants: bounded length, non-increasing order,
    /// unique owners, and a best-value cache matching every entry.
    fn check_invariants(&self) -> crate::Result<()> {
        let entries = self.entries();
        if entries.len() > self.capacity() {
            return Err(Error::Invariant("ledger exceeds its capacity"));
        }
        if entries.windows(2).any(|w| w[0].value() < w[1].value()) {
            return Err(Error::Invariant("ledger is not sorted"));
        }
        for (idx, entry) in entries.iter().enumerate() {
            if entry.value() == 0 {
                return Err(Error::Invariant("ledger contains a zero value"));
            }
            if entries[idx + 1..].iter().any(|e| e.owner() == entry.owner()) {
                return Err(Error::Invariant("owner ranked more than once"));
            }
            if self.best_of(entry.owner()) != entry.value() {
                return Err(Error::Invariant("best value does not match entry"));
            }
        }
        Ok(())
    }
}

impl<L: RankedLedger + ?Sized> RankedLedgerExt for L {}

fn swap_remove_owner<L: RankedLedger + ?Sized>(
    ledger: &mut L,
    owner: &L::Id,
) -> Option<L::Entry> {
    let idx = ledger.entries().iter().position(|e| e.owner() == owner)?;
    Some(ledger.entries_mut().swap_remove(idx))
}

fn evict_overflow<L: RankedLedger + ?Sized>(ledger: &mut L) -> Option<L::Entry> {
    if ledger.entries().len() <= ledger.capacity() {
        return None;
    }
    let evicted = ledger.entries_mut().pop()?;
    // Only clear the cache if it still refers to the evicted entry.
    if ledger.best_of(evicted.owner()) == evicted.value() {
        ledger.set_best(evicted.owner(), 0);
    }
    tracing::debug!(
        owner = ?evicted.owner(),
        value = evicted.value(),
        "evicted lowest ranked entry"
    );
    Some(evicted)
}

/// In-memory ranked ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "Id: serde::Serialize",
        deserialize = "Id: serde::Deserialize<'de> + Ord"
    ))
)]
pub struct Ledger<Id> {
    capacity: usize,
    entries: Vec<Entry<Id>>,
    best: BTreeMap<Id, u64>,
}

impl<Id: Ord> Default for Ledger<Id> {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            entries: Vec::with_capacity(DEFAULT_CAPACITY + 1),
            best: BTreeMap::new(),
        }
    }
}

impl<Id: Ord> Ledger<Id> {
    /// Create an empty ledger holding at most [`DEFAULT_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty ledger with the capacity of the given config.
    pub fn with_config(config: &LedgerConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            capacity: config.capacity,
            entries: Vec::with_capacity(config.capacity.saturating_add(1)),
            best: BTreeMap::new(),
        })
    }
}

impl<Id: Ord + Clone + fmt::Debug> RankedLedger for Ledger<Id> {
    type Id = Id;
    type Entry = Entry<Id>;

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn entries(&self) -> &[Entry<Id>] {
        &self.entries
    }

    fn entries_mut(&mut self) -> &mut Vec<Entry<Id>> {
        &mut self.entries
    }

    fn best_of(&self, owner: &Id) -> u64 {
        self.best.get(owner).copied().unwrap_or(0)
    }

    fn set_best(&mut self, owner: &Id, value: u64) {
        if value == 0 {
            self.best.remove(owner);
        } else {
            self.best.insert(owner.clone(), value);
        }
    }
}
