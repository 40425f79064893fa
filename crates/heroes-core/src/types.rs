//! Shared types used across the superheroes directory.
//!
//! This module defines the identifier newtype and the two enumerated record
//! attributes, with their canonical lowercase wire spellings.

use crate::error::InvalidIdError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Newtype for superhero identifiers with validation.
///
/// Superhero IDs are lowercase UUID v4 strings generated by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuperheroId(String);

impl SuperheroId {
    /// Create a new `SuperheroId` from a string.
    ///
    /// # Errors
    /// Returns `InvalidIdError` if the ID is not a valid UUID v4.
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidIdError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Create a new random `SuperheroId` using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), InvalidIdError> {
        static UUID_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = UUID_REGEX.get_or_init(|| {
            Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
                .expect("valid regex")
        });

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(InvalidIdError(id.to_string()))
        }
    }
}

impl fmt::Display for SuperheroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SuperheroId {
    type Err = InvalidIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Whether a character fights for or against the good guys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// A hero
    Hero,
    /// A villain
    Villain,
}

impl Alignment {
    /// Every accepted value, in display order.
    pub const ALL: [Self; 2] = [Self::Hero, Self::Villain];

    /// Canonical lowercase spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Villain => "villain",
        }
    }

    /// Parse the canonical spelling; anything else is `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The publishing universe a character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Universe {
    /// Marvel
    Marvel,
    /// DC
    Dc,
    /// Anything else
    Other,
}

impl Universe {
    /// Every accepted value, in display order.
    pub const ALL: [Self; 3] = [Self::Marvel, Self::Dc, Self::Other];

    /// Canonical lowercase spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marvel => "marvel",
            Self::Dc => "dc",
            Self::Other => "other",
        }
    }

    /// Parse the canonical spelling; anything else is `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == s)
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
