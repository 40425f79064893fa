//! Field-level validation of superhero payloads.
//!
//! [`validate`] is pure and collects every violation. [`SuperheroInput::from_json`]
//! checks the shape of an untyped JSON body first, so a malformed payload
//! (for example `powers` sent as a string) is reported as a validation
//! failure rather than surfacing as an internal error.

use crate::error::{FieldError, ValidationErrors};
use crate::superhero::SuperheroInput;
use crate::types::{Alignment, Universe};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Maximum length of `name`, in characters.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of `realName`, in characters.
pub const MAX_REAL_NAME_LEN: usize = 100;
/// Maximum length of `originStory`, in characters.
pub const MAX_ORIGIN_STORY_LEN: usize = 1000;

/// Message used for any alignment outside the accepted set.
pub const ALIGNMENT_MESSAGE: &str = "Alignment must be either hero or villain";
/// Message used for any universe outside the accepted set.
pub const UNIVERSE_MESSAGE: &str = "Universe must be marvel, dc, or other";

const TEXT_FIELDS: [(&str, &str); 6] = [
    ("name", "Superhero name"),
    ("realName", "Real name"),
    ("originStory", "Origin story"),
    ("imageUrl", "Image URL"),
    ("alignment", "Alignment"),
    ("universe", "Universe"),
];

fn image_url_regex() -> &'static Regex {
    static IMAGE_URL_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_URL_REGEX.get_or_init(|| Regex::new(r"(?i)^https?://.+").expect("valid regex"))
}

/// Whether `url` looks like an absolute http(s) URL.
#[must_use]
pub fn is_http_url(url: &str) -> bool {
    image_url_regex().is_match(url)
}

/// Validate every field of `input`, returning all violations in field order.
///
/// Values are checked after trimming, so the input does not need to be
/// normalized first.
#[must_use]
pub fn validate(input: &SuperheroInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_text(
        &mut errors,
        "name",
        &input.name,
        "Superhero name is required",
        MAX_NAME_LEN,
        "Name cannot be more than 100 characters",
    );
    check_text(
        &mut errors,
        "realName",
        &input.real_name,
        "Real name is required",
        MAX_REAL_NAME_LEN,
        "Real name cannot be more than 100 characters",
    );

    if input.powers.iter().all(|p| p.trim().is_empty()) {
        errors.push(FieldError::new("powers", "At least one power is required"));
    }

    check_text(
        &mut errors,
        "originStory",
        &input.origin_story,
        "Origin story is required",
        MAX_ORIGIN_STORY_LEN,
        "Origin story cannot be more than 1000 characters",
    );

    let image_url = input.image_url.trim();
    if image_url.is_empty() {
        errors.push(FieldError::new("imageUrl", "Image URL is required"));
    } else if !is_http_url(image_url) {
        errors.push(FieldError::new("imageUrl", "Please provide a valid image URL"));
    }

    let alignment = input.alignment.trim();
    if alignment.is_empty() {
        errors.push(FieldError::new("alignment", "Alignment is required"));
    } else if Alignment::parse(alignment).is_none() {
        errors.push(FieldError::new("alignment", ALIGNMENT_MESSAGE));
    }

    let universe = input.universe.trim();
    if universe.is_empty() {
        errors.push(FieldError::new("universe", "Universe is required"));
    } else if Universe::parse(universe).is_none() {
        errors.push(FieldError::new("universe", UNIVERSE_MESSAGE));
    }

    errors
}

fn check_text(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    required_message: &str,
    max_len: usize,
    too_long_message: &str,
) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, required_message));
    } else if value.chars().count() > max_len {
        errors.push(FieldError::new(field, too_long_message));
    }
}

impl SuperheroInput {
    /// Build an input from an untyped JSON body, checking its shape.
    ///
    /// Missing or `null` fields become empty values and are reported later by
    /// [`validate`]. Fields of the wrong JSON type are reported here.
    ///
    /// # Errors
    /// Returns a validation error for a non-object body, a non-string text
    /// field, or a `powers` value that is not an array of strings.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let Value::Object(map) = body else {
            return Err(ValidationErrors::single(
                "body",
                "Request body must be a JSON object",
            ));
        };

        let mut errors = Vec::new();
        let mut text = |key: &'static str, label: &str| -> String {
            match map.get(key) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(_) => {
                    errors.push(FieldError::new(key, format!("{label} must be text")));
                    String::new()
                }
            }
        };

        let [name, real_name, origin_story, image_url, alignment, universe] =
            TEXT_FIELDS.map(|(key, label)| text(key, label));
        let powers = match read_powers(map) {
            Ok(powers) => powers,
            Err(error) => {
                errors.push(error);
                Vec::new()
            }
        };

        if !errors.is_empty() {
            return Err(errors.into());
        }

        Ok(Self {
            name,
            real_name,
            powers,
            origin_story,
            image_url,
            alignment,
            universe,
        })
    }
}

fn read_powers(map: &Map<String, Value>) -> Result<Vec<String>, FieldError> {
    let shape_error = || FieldError::new("powers", "Powers must be a list of text entries");

    match map.get("powers") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(shape_error))
            .collect(),
        Some(_) => Err(shape_error()),
    }
}
