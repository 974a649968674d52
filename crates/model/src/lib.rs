#![deny(missing_docs)]
#![deny(unreachable_pub)]

//! # Hiscore Model
//!
//! A bounded, rank-ordered ledger of best scores per identity, together with
//! a one-time-settable display name registry.
//!
//! The algorithms are written against the storage traits [`RankedLedger`] and
//! [`NameRegistry`], so the same code runs over the in-memory [`Ledger`] and
//! [`Registry`] and over on-chain account layouts.

/// Error type.
pub mod error;

/// Configuration and constants.
pub mod config;

/// Ranked entries.
pub mod entry;

/// Ranked ledger.
pub mod ledger;

/// Display name registry.
pub mod registry;

/// Notifications.
pub mod event;

/// Clock.
pub mod clock;

/// Scoreboard, the combined public surface.
pub mod scoreboard;

pub use self::{
    clock::{Clock, SystemClock},
    config::{LedgerConfig, DEFAULT_CAPACITY, MAX_NAME_LEN},
    entry::{Entry, RankedEntry},
    error::Error,
    event::Event,
    ledger::{Ledger, RankedLedger, RankedLedgerExt, SubmitOutcome},
    registry::{validate_display_name, NameBinding, NameRegistry, NameRegistryExt, Registry},
    scoreboard::Scoreboard,
};

/// Alias of [`Result`](std::result::Result) with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
