//! The create/edit form.
//!
//! The form only checks what a user can fix on the spot: required fields,
//! at least one power, and an image URL that points at an image file. Length
//! limits and enum membership are left to the server.

use crate::error::{ClientError, Result};
use heroes_core::{
    Alignment, FieldError, Superhero, SuperheroId, SuperheroInput, Universe, ValidationErrors,
};
use regex::Regex;
use std::sync::OnceLock;

/// Message shown when the image URL is not a link to an image file.
pub const IMAGE_URL_MESSAGE: &str = "Please provide a valid image URL (jpg, jpeg, png, gif, webp)";

static IMAGE_FILE_REGEX: OnceLock<Regex> = OnceLock::new();

fn image_file_regex() -> &'static Regex {
    IMAGE_FILE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^https?://.+\.(jpg|jpeg|png|gif|webp)$").expect("valid regex")
    })
}

/// Whether `url` links to an image file the card can display.
#[must_use]
pub fn is_image_url(url: &str) -> bool {
    image_file_regex().is_match(url)
}

/// Form state for creating or editing one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperheroForm {
    /// Superhero name
    pub name: String,
    /// Real name
    pub real_name: String,
    /// One entry per power input; never empty
    powers: Vec<String>,
    /// Origin story
    pub origin_story: String,
    /// Image URL
    pub image_url: String,
    /// Alignment selector
    pub alignment: Alignment,
    /// Universe selector
    pub universe: Universe,
    editing: Option<SuperheroId>,
}

impl Default for SuperheroForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            real_name: String::new(),
            powers: vec![String::new()],
            origin_story: String::new(),
            image_url: String::new(),
            alignment: Alignment::Hero,
            universe: Universe::Marvel,
            editing: None,
        }
    }
}

impl SuperheroForm {
    /// An empty form for a new record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A form prefilled from an existing record.
    #[must_use]
    pub fn for_edit(hero: &Superhero) -> Self {
        let powers = if hero.powers.is_empty() {
            vec![String::new()]
        } else {
            hero.powers.clone()
        };

        Self {
            name: hero.name.clone(),
            real_name: hero.real_name.clone(),
            powers,
            origin_story: hero.origin_story.clone(),
            image_url: hero.image_url.clone(),
            alignment: hero.alignment,
            universe: hero.universe,
            editing: Some(hero.id.clone()),
        }
    }

    /// Id of the record being edited, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&SuperheroId> {
        self.editing.as_ref()
    }

    /// Power inputs, in display order.
    #[must_use]
    pub fn powers(&self) -> &[String] {
        &self.powers
    }

    /// Change the power input at `index`. Returns `false` if out of range.
    pub fn set_power(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.powers.get_mut(index) {
            Some(power) => {
                *power = value.into();
                true
            }
            None => false,
        }
    }

    /// Append an empty power input.
    pub fn add_power(&mut self) {
        self.powers.push(String::new());
    }

    /// Remove the power input at `index`, keeping at least one input.
    pub fn remove_power(&mut self, index: usize) -> bool {
        if self.powers.len() <= 1 || index >= self.powers.len() {
            return false;
        }
        self.powers.remove(index);
        true
    }

    /// Check the form, collecting one message per failing field.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Superhero name is required"));
        }
        if self.real_name.trim().is_empty() {
            errors.push(FieldError::new("realName", "Real name is required"));
        }
        if self.filled_powers().next().is_none() {
            errors.push(FieldError::new("powers", "At least one power is required"));
        }
        if self.origin_story.trim().is_empty() {
            errors.push(FieldError::new("originStory", "Origin story is required"));
        }
        if self.image_url.trim().is_empty() {
            errors.push(FieldError::new("imageUrl", "Image URL is required"));
        } else if !is_image_url(&self.image_url) {
            errors.push(FieldError::new("imageUrl", IMAGE_URL_MESSAGE));
        }

        ValidationErrors::new(errors)
    }

    fn filled_powers(&self) -> impl Iterator<Item = &String> {
        self.powers.iter().filter(|p| !p.trim().is_empty())
    }

    /// Build the request payload, dropping blank power inputs.
    ///
    /// # Errors
    /// Returns `ClientError::InvalidForm` if local validation fails.
    pub fn to_payload(&self) -> Result<SuperheroInput> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ClientError::InvalidForm(errors));
        }

        Ok(SuperheroInput {
            name: self.name.clone(),
            real_name: self.real_name.clone(),
            powers: self.filled_powers().cloned().collect(),
            origin_story: self.origin_story.clone(),
            image_url: self.image_url.clone(),
            alignment: self.alignment.to_string(),
            universe: self.universe.to_string(),
        })
    }
}
