use typed_builder::TypedBuilder;

use crate::Error;

/// The default maximum number of entries kept in a ledger.
pub const DEFAULT_CAPACITY: usize = 100;

/// The maximum length of a display name, in bytes.
pub const MAX_NAME_LEN: usize = 32;

/// Ledger and registry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerConfig {
    /// Maximum number of ranked entries.
    #[builder(default = DEFAULT_CAPACITY)]
    pub capacity: usize,
    /// Maximum display name length in bytes.
    #[builder(default = MAX_NAME_LEN)]
    pub max_name_len: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LedgerConfig {
    /// Validate the config.
    pub fn validate(&self) -> crate::Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfig("capacity must be at least one"));
        }
        if self.max_name_len == 0 {
            return Err(Error::InvalidConfig(
                "max name length must be at least one",
            ));
        }
        Ok(())
    }
}
