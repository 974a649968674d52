use std::fmt;

use crate::{
    clock::{Clock, SystemClock},
    entry::Entry,
    event::Event,
    ledger::{Ledger, RankedLedger, RankedLedgerExt, SubmitOutcome},
    registry::{NameBinding, NameRegistry, NameRegistryExt, Registry},
    LedgerConfig,
};

/// A ranked ledger joined with a display name registry.
///
/// Every mutating operation takes the caller identity, which becomes the owner
/// of the record. Successful mutations queue [`Event`]s that can be collected
/// with [`Scoreboard::drain_events`].
#[derive(Debug, Clone)]
pub struct Scoreboard<Id, C = SystemClock> {
    ledger: Ledger<Id>,
    registry: Registry<Id>,
    clock: C,
    last_timestamp: i64,
    events: Vec<Event<Id>>,
}

impl<Id: Ord> Default for Scoreboard<Id, SystemClock> {
    fn default() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<Id: Ord> Scoreboard<Id, SystemClock> {
    /// Create an empty scoreboard using the system clock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Id: Ord, C: Clock> Scoreboard<Id, C> {
    /// Create an empty scoreboard with the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            ledger: Ledger::new(),
            registry: Registry::new(),
            clock,
            last_timestamp: 0,
            events: Vec::new(),
        }
    }

    /// Create an empty scoreboard from config.
    pub fn with_config(config: &LedgerConfig, clock: C) -> crate::Result<Self> {
        Ok(Self {
            ledger: Ledger::with_config(config)?,
            registry: Registry::with_config(config)?,
            clock,
            last_timestamp: 0,
            events: Vec::new(),
        })
    }

    /// Get the ledger.
    pub fn ledger(&self) -> &Ledger<Id> {
        &self.ledger
    }

    /// Get the registry.
    pub fn registry(&self) -> &Registry<Id> {
        &self.registry
    }

    /// Take the queued notifications.
    pub fn drain_events(&mut self) -> Vec<Event<Id>> {
        std::mem::take(&mut self.events)
    }

    /// Never goes backwards, even if the clock does.
    fn next_timestamp(&self) -> i64 {
        self.last_timestamp.max(self.clock.now())
    }
}

impl<Id, C> Scoreboard<Id, C>
where
    Id: Ord + Clone + fmt::Debug,
    C: Clock,
{
    /// Submit a score on behalf of `caller`.
    ///
    /// See [`RankedLedgerExt::submit`] for the ranking rules.
    pub fn submit(&mut self, caller: &Id, value: u64) -> crate::Result<SubmitOutcome<Entry<Id>>> {
        if value == 0 {
            return Err(crate::Error::InvalidValue);
        }
        let now = self.next_timestamp();
        let outcome = self.ledger.submit(caller, value, now)?;
        if let SubmitOutcome::Recorded { replaced, evicted } = &outcome {
            self.last_timestamp = now;
            if replaced.is_some() {
                self.events.push(Event::ScoreRemoved {
                    owner: caller.clone(),
                });
            }
            self.events.push(Event::ScoreSubmitted {
                owner: caller.clone(),
                value,
            });
            tracing::debug!(
                owner = ?caller,
                value,
                rank = ?self.ledger.rank_of(caller),
                evicted = ?evicted.as_ref().map(|e| &e.owner),
                "recorded score"
            );
        }
        Ok(outcome)
    }

    /// Set the display name of `caller`. Names can only be set once.
    pub fn set_display_name(&mut self, caller: &Id, name: &str) -> crate::Result<NameBinding> {
        let binding = self.registry.set_display_name(caller, name)?;
        match binding {
            NameBinding::Bound => {
                self.events.push(Event::NameSet {
                    owner: caller.clone(),
                    name: name.to_owned(),
                });
                tracing::debug!(owner = ?caller, name, "bound display name");
            }
            NameBinding::AlreadyNamed | NameBinding::NameTaken => {
                tracing::trace!(owner = ?caller, name, ?binding, "display name unchanged");
            }
        }
        Ok(binding)
    }

    /// All entries in rank order.
    pub fn top_n(&self) -> &[Entry<Id>] {
        self.ledger.top_n()
    }

    /// All values in rank order.
    pub fn values_only(&self) -> Vec<u64> {
        self.ledger.values_only()
    }

    /// Value at the given position, `0` if out of range.
    pub fn value_at(&self, pos: usize) -> u64 {
        self.ledger.value_at(pos)
    }

    /// Owner at the given position.
    pub fn owner_at(&self, pos: usize) -> Option<&Id> {
        self.ledger.owner_at(pos)
    }

    /// Timestamp at the given position, `0` if out of range.
    pub fn timestamp_at(&self, pos: usize) -> i64 {
        self.ledger.timestamp_at(pos)
    }

    /// Display name at the given position, empty if out of range or unnamed.
    pub fn name_at(&self, pos: usize) -> &str {
        self.ledger.name_at(&self.registry, pos)
    }

    /// Display names in rank order.
    pub fn all_names(&self) -> Vec<&str> {
        self.ledger.all_names(&self.registry)
    }

    /// Display names ranked in `[start, end)`.
    pub fn names_in_range(&self, start: usize, end: usize) -> crate::Result<Vec<&str>> {
        self.ledger.names_in_range(&self.registry, start, end)
    }

    /// Best value of the given identity, `0` if unranked.
    pub fn best_of(&self, owner: &Id) -> u64 {
        self.ledger.best_of(owner)
    }

    /// Position of the given identity, if ranked.
    pub fn rank_of(&self, owner: &Id) -> Option<usize> {
        self.ledger.rank_of(owner)
    }

    /// Display name of the given identity.
    pub fn name_of(&self, owner: &Id) -> Option<&str> {
        self.registry.name_of(owner)
    }

    /// Identity the given name is bound to.
    pub fn identity_of(&self, name: &str) -> Option<&Id> {
        self.registry.identity_of(name)
    }
}
