//! Heroes Core - Foundation crate for the superheroes directory.
//!
//! This crate provides the record model, validation rules, error types and
//! configuration that the store, the API server and the client depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Shared newtypes and enums (`SuperheroId`, `Alignment`, `Universe`)
//! - [`superhero`] - The persisted record and its write-side shapes
//! - [`validation`] - Field-level and shape validation of payloads
//!
//! # Example
//!
//! ```rust
//! use heroes_core::{SuperheroInput, Alignment};
//!
//! let input = SuperheroInput {
//!     name: " Nova ".to_string(),
//!     real_name: "Rich Rider".to_string(),
//!     powers: vec!["Flight".to_string(), " ".to_string()],
//!     origin_story: "Chosen by the Nova Corps.".to_string(),
//!     image_url: "https://x.test/a.png".to_string(),
//!     alignment: "hero".to_string(),
//!     universe: "marvel".to_string(),
//! };
//!
//! let draft = input.into_draft().expect("valid input");
//! assert_eq!(draft.name, "Nova");
//! assert_eq!(draft.powers, vec!["Flight"]);
//! assert_eq!(draft.alignment, Alignment::Hero);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod superhero;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use error::{ConfigError, ConfigResult, FieldError, InvalidIdError, ValidationErrors};
pub use superhero::{Superhero, SuperheroDraft, SuperheroInput};
pub use types::{Alignment, SuperheroId, Universe};
pub use validation::validate;
