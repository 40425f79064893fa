//! The superhero record and its write-side shapes.
//!
//! - [`Superhero`] is a persisted record as returned by the store and the API.
//! - [`SuperheroInput`] is the untrusted create/update payload.
//! - [`SuperheroDraft`] is a payload that passed normalization and validation.

use crate::error::ValidationErrors;
use crate::types::{Alignment, SuperheroId, Universe};
use crate::validation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted superhero record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Superhero {
    /// Store-assigned identifier
    pub id: SuperheroId,
    /// Display name, unique across the directory
    pub name: String,
    /// Secret identity
    pub real_name: String,
    /// Non-empty list of powers
    pub powers: Vec<String>,
    /// Origin story
    pub origin_story: String,
    /// Absolute http(s) URL of a portrait
    pub image_url: String,
    /// Hero or villain
    pub alignment: Alignment,
    /// Publishing universe
    pub universe: Universe,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload as received from a client.
///
/// Every field is plain text so that invalid enum values can be reported as
/// validation messages instead of deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuperheroInput {
    /// Display name
    pub name: String,
    /// Secret identity
    pub real_name: String,
    /// Powers, possibly with blank entries
    pub powers: Vec<String>,
    /// Origin story
    pub origin_story: String,
    /// Portrait URL
    pub image_url: String,
    /// `hero` or `villain`
    pub alignment: String,
    /// `marvel`, `dc` or `other`
    pub universe: String,
}

impl SuperheroInput {
    /// Trim every text field, trim each power and drop the blank ones.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            real_name: self.real_name.trim().to_string(),
            powers: self
                .powers
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            origin_story: self.origin_story.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            alignment: self.alignment.trim().to_string(),
            universe: self.universe.trim().to_string(),
        }
    }

    /// Normalize, validate, and convert into a typed draft.
    ///
    /// # Errors
    /// Returns every field violation found, not just the first.
    pub fn into_draft(self) -> Result<SuperheroDraft, ValidationErrors> {
        let input = self.normalized();
        let errors = validation::validate(&input);
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let alignment = Alignment::parse(&input.alignment)
            .ok_or_else(|| ValidationErrors::single("alignment", validation::ALIGNMENT_MESSAGE))?;
        let universe = Universe::parse(&input.universe)
            .ok_or_else(|| ValidationErrors::single("universe", validation::UNIVERSE_MESSAGE))?;

        Ok(SuperheroDraft {
            name: input.name,
            real_name: input.real_name,
            powers: input.powers,
            origin_story: input.origin_story,
            image_url: input.image_url,
            alignment,
            universe,
        })
    }
}

impl From<&Superhero> for SuperheroInput {
    fn from(hero: &Superhero) -> Self {
        Self {
            name: hero.name.clone(),
            real_name: hero.real_name.clone(),
            powers: hero.powers.clone(),
            origin_story: hero.origin_story.clone(),
            image_url: hero.image_url.clone(),
            alignment: hero.alignment.to_string(),
            universe: hero.universe.to_string(),
        }
    }
}

/// A normalized, validated record body ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperheroDraft {
    /// Display name
    pub name: String,
    /// Secret identity
    pub real_name: String,
    /// Non-empty list of trimmed powers
    pub powers: Vec<String>,
    /// Origin story
    pub origin_story: String,
    /// Portrait URL
    pub image_url: String,
    /// Hero or villain
    pub alignment: Alignment,
    /// Publishing universe
    pub universe: Universe,
}

impl SuperheroDraft {
    /// Whether a stored record carries exactly this body.
    #[must_use]
    pub fn matches(&self, hero: &Superhero) -> bool {
        self.name == hero.name
            && self.real_name == hero.real_name
            && self.powers == hero.powers
            && self.origin_story == hero.origin_story
            && self.image_url == hero.image_url
            && self.alignment == hero.alignment
            && self.universe == hero.universe
    }
}
