use std::collections::BTreeMap;

use crate::{Error, LedgerConfig, MAX_NAME_LEN};

/// Validate a display name.
///
/// # Errors
/// Returns [`Error::InvalidName`] if the name is empty or longer than
/// `max_len` bytes.
pub fn validate_display_name(name: &str, max_len: usize) -> crate::Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName("name is empty"));
    }
    if name.len() > max_len {
        return Err(Error::InvalidName("name is too long"));
    }
    Ok(())
}

/// Result of [`NameRegistryExt::set_display_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameBinding {
    /// The name is now bound to the identity.
    Bound,
    /// The identity already has a name. Names are permanent.
    AlreadyNamed,
    /// The name belongs to another identity.
    NameTaken,
}

impl NameBinding {
    /// Returns whether a new binding was created.
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound)
    }
}

/// Storage of a display name registry.
pub trait NameRegistry {
    /// Identity type.
    type Id: Eq;

    /// Get the display name of the given identity.
    fn name_of(&self, owner: &Self::Id) -> Option<&str>;

    /// Get the identity the given name is bound to.
    fn identity_of(&self, name: &str) -> Option<&Self::Id>;

    /// Bind `owner` and `name` in both directions without any check.
    fn bind(&mut self, owner: &Self::Id, name: &str);

    /// Maximum display name length in bytes.
    fn max_name_len(&self) -> usize {
        MAX_NAME_LEN
    }
}

/// Extension trait for [`NameRegistry`].
pub trait NameRegistryExt: NameRegistry {
    /// Set the display name of `owner`, first write wins.
    ///
    /// # Errors
    /// Returns [`Error::InvalidName`] if the name is empty or too long.
    fn set_display_name(&mut self, owner: &Self::Id, name: &str) -> crate::Result<NameBinding> {
        validate_display_name(name, self.max_name_len())?;
        if self.name_of(owner).is_some() {
            return Ok(NameBinding::AlreadyNamed);
        }
        if self.identity_of(name).is_some() {
            return Ok(NameBinding::NameTaken);
        }
        self.bind(owner, name);
        Ok(NameBinding::Bound)
    }
}

impl<R: NameRegistry + ?Sized> NameRegistryExt for R {}

/// In-memory display name registry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "Id: serde::Serialize",
        deserialize = "Id: serde::Deserialize<'de> + Ord"
    ))
)]
pub struct Registry<Id> {
    max_name_len: usize,
    names: BTreeMap<Id, String>,
    owners: BTreeMap<String, Id>,
}

impl<Id: Ord> Default for Registry<Id> {
    fn default() -> Self {
        Self {
            max_name_len: MAX_NAME_LEN,
            names: BTreeMap::new(),
            owners: BTreeMap::new(),
        }
    }
}

impl<Id: Ord> Registry<Id> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the name limit of the given config.
    pub fn with_config(config: &LedgerConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            max_name_len: config.max_name_len,
            ..Default::default()
        })
    }

    /// Number of named identities.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether no identity is named.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<Id: Ord + Clone> NameRegistry for Registry<Id> {
    type Id = Id;

    fn name_of(&self, owner: &Id) -> Option<&str> {
        self.names.get(owner).map(String::as_str)
    }

    fn identity_of(&self, name: &str) -> Option<&Id> {
        self.owners.get(name)
    }

    fn bind(&mut self, owner: &Id, name: &str) {
        self.names.insert(owner.clone(), name.to_owned());
        self.owners.insert(name.to_owned(), owner.clone());
    }

    fn max_name_len(&self) -> usize {
        self.max_name_len
    }
}
