//! Client side of the superheroes directory.
//!
//! Two layers:
//!
//! - [`SuperheroApi`] talks HTTP to the directory service and implements
//!   [`SuperheroBackend`].
//! - [`Directory`] is the screen's state model (list, filters, form, delete
//!   confirmation, error banner) driven against any [`SuperheroBackend`].
//!
//! # Example
//!
//! ```ignore
//! use heroes_client::{Directory, SuperheroApi};
//!
//! let mut directory = Directory::new(SuperheroApi::with_url("http://localhost:5000/api")?);
//! directory.refresh().await;
//! println!("{}", directory.summary());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod api;
pub mod directory;
pub mod error;
pub mod filters;
pub mod form;

pub use api::{SuperheroApi, SuperheroBackend, DEFAULT_BASE_URL, FALLBACK_ERROR_MESSAGE};
pub use directory::{ConfirmOverlay, Directory, FetchStatus, FetchTicket, FormOverlay};
pub use error::{ClientError, Result};
pub use filters::Filters;
pub use form::SuperheroForm;
