//! State model for the directory screen.
//!
//! [`Directory`] owns everything the screen renders: the record list, fetch
//! status, filters, the create/edit form, the delete confirmation and the
//! error banner. Every mutation goes through a method here, so a view only
//! has to read state back after each call.
//!
//! List fetches are tagged with a generation number. A response is applied
//! only if no newer fetch has started since, so a slow answer for old
//! filters can never overwrite the list for the current ones.

use crate::api::SuperheroBackend;
use crate::error::{ClientError, Result};
use crate::filters::Filters;
use crate::form::SuperheroForm;
use heroes_core::{Alignment, Superhero, SuperheroId, Universe, ValidationErrors};

/// Banner text when listing fails without a server message.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch superheroes";

/// Banner text when saving fails without a server message.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save superhero";

/// Banner text when deleting fails without a server message.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete superhero";

/// Progress of the latest list fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// No fetch in flight; the list is current
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The latest fetch failed; the previous list is kept
    Error,
}

/// The create/edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormOverlay {
    /// Not shown
    #[default]
    Closed,
    /// Shown with the current input and the failures of the last submit
    Open {
        /// Field values
        form: SuperheroForm,
        /// Local validation failures from the last submit attempt
        errors: ValidationErrors,
    },
}

impl FormOverlay {
    /// Whether the dialog edits an existing record.
    #[must_use]
    pub fn editing(&self) -> Option<&SuperheroId> {
        match self {
            Self::Open { form, .. } => form.editing(),
            Self::Closed => None,
        }
    }
}

/// The delete confirmation dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmOverlay {
    /// Not shown
    #[default]
    Closed,
    /// Asking whether to delete this record
    Open {
        /// Record to delete
        id: SuperheroId,
        /// Its name, for the prompt
        name: String,
    },
}

impl ConfirmOverlay {
    /// The prompt shown to the user.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Open { name, .. } => Some(format!(
                "Are you sure you want to delete \"{name}\"? This action cannot be undone."
            )),
            Self::Closed => None,
        }
    }
}

/// Identifies one list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    filters: Filters,
}

impl FetchTicket {
    /// Sequence number of this fetch.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Filters the fetch was issued with.
    #[must_use]
    pub fn filters(&self) -> &Filters {
        &self.filters
    }
}

/// The directory screen.
#[derive(Debug)]
pub struct Directory<B> {
    backend: B,
    superheroes: Vec<Superhero>,
    status: FetchStatus,
    filters: Filters,
    form: FormOverlay,
    confirm: ConfirmOverlay,
    error: Option<String>,
    generation: u64,
    saving: bool,
    deleting: bool,
}

impl<B: SuperheroBackend> Directory<B> {
    /// Create an empty screen. Call [`Directory::refresh`] to load it.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            superheroes: Vec::new(),
            status: FetchStatus::Idle,
            filters: Filters::default(),
            form: FormOverlay::Closed,
            confirm: ConfirmOverlay::Closed,
            error: None,
            generation: 0,
            saving: false,
            deleting: false,
        }
    }

    /// The backend in use.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Records currently shown.
    pub fn superheroes(&self) -> &[Superhero] {
        &self.superheroes
    }

    /// Status of the latest fetch.
    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Active filters.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// The create/edit dialog.
    pub fn form(&self) -> &FormOverlay {
        &self.form
    }

    /// The delete confirmation dialog.
    pub fn confirm(&self) -> &ConfirmOverlay {
        &self.confirm
    }

    /// Banner text, if an error is showing.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a save is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Whether a delete is in flight.
    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Result count line, e.g. `3 superheroes found`.
    pub fn summary(&self) -> String {
        let count = self.superheroes.len();
        let plural = if count == 1 { "" } else { "es" };
        format!("{count} superhero{plural} found")
    }

    /// Hide the error banner.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Start a list fetch for the current filters.
    ///
    /// Any fetch started earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.status = FetchStatus::Loading;
        self.error = None;
        FetchTicket {
            generation: self.generation,
            filters: self.filters.clone(),
        }
    }

    /// Apply the outcome of a fetch. Returns `false` if the ticket is stale
    /// and the outcome was dropped.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, result: Result<Vec<Superhero>>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Dropping stale fetch {} (latest is {})",
                ticket.generation,
                self.generation
            );
            return false;
        }

        match result {
            Ok(superheroes) => {
                self.superheroes = superheroes;
                self.status = FetchStatus::Idle;
            }
            Err(err) => {
                tracing::warn!("Error fetching superheroes: {}", err);
                self.error = Some(err.banner_message(FETCH_FAILED_MESSAGE));
                self.status = FetchStatus::Error;
            }
        }
        true
    }

    /// Reload the list for the current filters.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let result = self.backend.list(ticket.filters()).await;
        self.complete_fetch(&ticket, result);
    }

    /// Search for `text` (blank clears the search) and reload.
    pub async fn set_search(&mut self, text: &str) {
        self.filters.set_search(text);
        self.refresh().await;
    }

    /// Change the alignment filter and reload.
    pub async fn set_alignment(&mut self, alignment: Option<Alignment>) {
        self.filters.set_alignment(alignment);
        self.refresh().await;
    }

    /// Change the universe filter and reload.
    pub async fn set_universe(&mut self, universe: Option<Universe>) {
        self.filters.set_universe(universe);
        self.refresh().await;
    }

    /// Drop every filter and reload.
    pub async fn clear_filters(&mut self) {
        self.filters.clear_all();
        self.refresh().await;
    }

    /// Open an empty form.
    pub fn open_create(&mut self) {
        self.form = FormOverlay::Open {
            form: SuperheroForm::new(),
            errors: ValidationErrors::default(),
        };
    }

    /// Open the form prefilled from a listed record.
    ///
    /// Returns `false` if `id` is not in the current list.
    pub fn open_edit(&mut self, id: &SuperheroId) -> bool {
        let Some(hero) = self.superheroes.iter().find(|h| &h.id == id) else {
            return false;
        };
        self.form = FormOverlay::Open {
            form: SuperheroForm::for_edit(hero),
            errors: ValidationErrors::default(),
        };
        true
    }

    /// Field access for the open form.
    pub fn form_mut(&mut self) -> Option<&mut SuperheroForm> {
        match &mut self.form {
            FormOverlay::Open { form, .. } => Some(form),
            FormOverlay::Closed => None,
        }
    }

    /// Discard the form.
    pub fn close_form(&mut self) {
        self.form = FormOverlay::Closed;
    }

    /// Validate and save the open form.
    ///
    /// On success the list is reloaded and the form closes. Local validation
    /// failures stay on the form; server failures go to the banner and leave
    /// the form open.
    ///
    /// # Errors
    /// Returns `ClientError::InvalidForm` without any request when the form
    /// is closed or invalid, or the backend error when the save fails.
    pub async fn submit_form(&mut self) -> Result<Superhero> {
        let (payload, editing) = {
            let FormOverlay::Open { form, errors } = &mut self.form else {
                return Err(ClientError::InvalidForm(ValidationErrors::single(
                    "form",
                    "No form is open",
                )));
            };

            match form.to_payload() {
                Ok(payload) => {
                    *errors = ValidationErrors::default();
                    (payload, form.editing().cloned())
                }
                Err(err) => {
                    if let ClientError::InvalidForm(found) = &err {
                        errors.clone_from(found);
                    }
                    return Err(err);
                }
            }
        };

        self.saving = true;
        self.error = None;

        let result = match &editing {
            Some(id) => self.backend.update(id, &payload).await,
            None => self.backend.create(&payload).await,
        };

        let outcome = match result {
            Ok(hero) => {
                tracing::debug!("Saved superhero {}", hero.id);
                self.refresh().await;
                self.close_form();
                Ok(hero)
            }
            Err(err) => {
                tracing::warn!("Error saving superhero: {}", err);
                self.error = Some(err.banner_message(SAVE_FAILED_MESSAGE));
                Err(err)
            }
        };

        self.saving = false;
        outcome
    }

    /// Ask for confirmation before deleting a listed record.
    ///
    /// Returns `false` if `id` is not in the current list.
    pub fn request_delete(&mut self, id: &SuperheroId) -> bool {
        let Some(hero) = self.superheroes.iter().find(|h| &h.id == id) else {
            return false;
        };
        self.confirm = ConfirmOverlay::Open {
            id: hero.id.clone(),
            name: hero.name.clone(),
        };
        true
    }

    /// Dismiss the confirmation without deleting.
    pub fn cancel_delete(&mut self) {
        self.confirm = ConfirmOverlay::Closed;
    }

    /// Delete the record awaiting confirmation.
    ///
    /// Returns `Ok(false)` if nothing was awaiting confirmation. On failure
    /// the dialog stays open and the banner shows the error.
    ///
    /// # Errors
    /// Returns the backend error when the delete fails.
    pub async fn confirm_delete(&mut self) -> Result<bool> {
        let ConfirmOverlay::Open { id, .. } = &self.confirm else {
            return Ok(false);
        };
        let id = id.clone();

        self.deleting = true;
        self.error = None;

        let outcome = match self.backend.delete(&id).await {
            Ok(()) => {
                self.refresh().await;
                self.confirm = ConfirmOverlay::Closed;
                Ok(true)
            }
            Err(err) => {
                tracing::warn!("Error deleting superhero: {}", err);
                self.error = Some(err.banner_message(DELETE_FAILED_MESSAGE));
                Err(err)
            }
        };

        self.deleting = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use heroes_core::SuperheroInput;
    use std::sync::Mutex;

    /// In-memory backend; newest records first, like the real service.
    #[derive(Default)]
    struct FakeBackend {
        records: Mutex<Vec<Superhero>>,
        calls: Mutex<Vec<String>>,
        last_filters: Mutex<Option<Filters>>,
        fail_next: Mutex<Option<ClientError>>,
    }

    impl FakeBackend {
        fn with(names: &[(&str, Alignment)]) -> Self {
            let backend = Self::default();
            for (name, alignment) in names {
                backend
                    .records
                    .lock()
                    .unwrap()
                    .insert(0, record(name, *alignment));
            }
            backend
        }

        fn fail_with(&self, err: ClientError) {
            *self.fail_next.lock().unwrap() = Some(err);
        }

        fn take_failure(&self) -> Result<()> {
            match self.fail_next.lock().unwrap().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn record_call(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn record(name: &str, alignment: Alignment) -> Superhero {
        let now = Utc::now();
        Superhero {
            id: SuperheroId::generate(),
            name: name.to_string(),
            real_name: format!("{name} Secret"),
            powers: vec!["Flight".to_string()],
            origin_story: format!("The origin of {name}."),
            image_url: "https://x.test/a.png".to_string(),
            alignment,
            universe: Universe::Marvel,
            created_at: now,
            updated_at: now,
        }
    }

    fn from_input(id: SuperheroId, data: &SuperheroInput) -> Result<Superhero> {
        let draft = data.clone().into_draft().map_err(ClientError::InvalidForm)?;
        let now = Utc::now();
        Ok(Superhero {
            id,
            name: draft.name,
            real_name: draft.real_name,
            powers: draft.powers,
            origin_story: draft.origin_story,
            image_url: draft.image_url,
            alignment: draft.alignment,
            universe: draft.universe,
            created_at: now,
            updated_at: now,
        })
    }

    #[async_trait]
    impl SuperheroBackend for FakeBackend {
        async fn list(&self, filters: &Filters) -> Result<Vec<Superhero>> {
            self.record_call("list");
            *self.last_filters.lock().unwrap() = Some(filters.clone());
            self.take_failure()?;

            let search = filters.search.as_deref().map(str::to_lowercase);
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|h| filters.alignment.map_or(true, |a| h.alignment == a))
                .filter(|h| filters.universe.map_or(true, |u| h.universe == u))
                .filter(|h| {
                    search
                        .as_deref()
                        .map_or(true, |s| h.name.to_lowercase().contains(s))
                })
                .cloned()
                .collect())
        }

        async fn get(&self, id: &SuperheroId) -> Result<Superhero> {
            self.record_call("get");
            self.take_failure()?;
            self.records
                .lock()
                .unwrap()
                .iter()
                .find(|h| &h.id == id)
                .cloned()
                .ok_or(ClientError::Api {
                    status: 404,
                    message: "Superhero not found".to_string(),
                })
        }

        async fn create(&self, data: &SuperheroInput) -> Result<Superhero> {
            self.record_call("create");
            self.take_failure()?;
            let hero = from_input(SuperheroId::generate(), data)?;
            self.records.lock().unwrap().insert(0, hero.clone());
            Ok(hero)
        }

        async fn update(&self, id: &SuperheroId, data: &SuperheroInput) -> Result<Superhero> {
            self.record_call("update");
            self.take_failure()?;
            let hero = from_input(id.clone(), data)?;
            let mut records = self.records.lock().unwrap();
            let slot = records.iter_mut().find(|h| &h.id == id).ok_or(ClientError::Api {
                status: 404,
                message: "Superhero not found".to_string(),
            })?;
            *slot = hero.clone();
            Ok(hero)
        }

        async fn delete(&self, id: &SuperheroId) -> Result<()> {
            self.record_call("delete");
            self.take_failure()?;
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|h| &h.id != id);
            if records.len() == before {
                return Err(ClientError::Api {
                    status: 404,
                    message: "Superhero not found".to_string(),
                });
            }
            Ok(())
        }
    }

    fn fill(form: &mut SuperheroForm, name: &str) {
        form.name = name.to_string();
        form.real_name = "Rich Rider".to_string();
        form.set_power(0, "Flight");
        form.origin_story = "Chosen by the Nova Corps.".to_string();
        form.image_url = "https://x.test/a.png".to_string();
    }

    fn names<B: SuperheroBackend>(directory: &Directory<B>) -> Vec<&str> {
        directory
            .superheroes()
            .iter()
            .map(|h| h.name.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_refresh_loads_list() {
        let backend = FakeBackend::with(&[("Batman", Alignment::Hero), ("Joker", Alignment::Villain)]);
        let mut directory = Directory::new(backend);
        assert_eq!(directory.status(), FetchStatus::Idle);
        assert_eq!(directory.summary(), "0 superheroes found");

        directory.refresh().await;

        assert_eq!(directory.status(), FetchStatus::Idle);
        assert_eq!(names(&directory), vec!["Joker", "Batman"]);
        assert_eq!(directory.summary(), "2 superheroes found");
    }

    #[tokio::test]
    async fn test_filter_changes_refetch() {
        let backend = FakeBackend::with(&[("Batman", Alignment::Hero), ("Joker", Alignment::Villain)]);
        let mut directory = Directory::new(backend);
        directory.refresh().await;

        directory.set_alignment(Some(Alignment::Villain)).await;
        assert_eq!(names(&directory), vec!["Joker"]);

        directory.set_search("  bat ").await;
        assert!(directory.superheroes().is_empty());
        assert_eq!(directory.summary(), "0 superheroes found");
        assert_eq!(
            directory.backend().last_filters.lock().unwrap().clone(),
            Some(Filters {
                search: Some("bat".to_string()),
                alignment: Some(Alignment::Villain),
                universe: None,
            })
        );

        directory.clear_filters().await;
        assert_eq!(names(&directory), vec!["Joker", "Batman"]);
        assert_eq!(directory.backend().calls().len(), 4);
    }

    #[tokio::test]
    async fn test_stale_fetch_is_discarded() {
        let backend = FakeBackend::with(&[("Batman", Alignment::Hero)]);
        let mut directory = Directory::new(backend);

        let first = directory.begin_fetch();
        directory.filters.set_search("nova");
        let second = directory.begin_fetch();
        assert!(second.generation() > first.generation());
        assert_eq!(second.filters().search.as_deref(), Some("nova"));

        assert!(directory.complete_fetch(&second, Ok(Vec::new())));
        let late = vec![record("Batman", Alignment::Hero)];
        assert!(!directory.complete_fetch(&first, Ok(late)));

        assert!(directory.superheroes().is_empty());
        assert_eq!(directory.status(), FetchStatus::Idle);
    }

    #[tokio::test]
    async fn test_fetch_failure_shows_banner() {
        let backend = FakeBackend::with(&[("Batman", Alignment::Hero)]);
        let mut directory = Directory::new(backend);
        directory.refresh().await;

        directory
            .backend()
            .fail_with(ClientError::Decode("unexpected body".to_string()));
        directory.refresh().await;

        assert_eq!(directory.status(), FetchStatus::Error);
        assert_eq!(directory.error(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(names(&directory), vec!["Batman"]);

        directory.dismiss_error();
        assert_eq!(directory.error(), None);
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let mut directory = Directory::new(FakeBackend::default());
        directory.open_create();

        let result = directory.submit_form().await;
        assert!(matches!(result, Err(ClientError::InvalidForm(_))));
        assert!(directory.backend().calls().is_empty());

        match directory.form() {
            FormOverlay::Open { errors, .. } => {
                assert!(errors.has_field("name"));
                assert!(errors.has_field("powers"));
            }
            FormOverlay::Closed => panic!("form should stay open"),
        }
        assert_eq!(directory.error(), None);
    }

    #[tokio::test]
    async fn test_create_closes_form_and_reloads() {
        let mut directory = Directory::new(FakeBackend::default());
        directory.refresh().await;
        directory.open_create();
        fill(directory.form_mut().expect("form open"), "Nova");

        let hero = directory.submit_form().await.expect("submit");

        assert_eq!(hero.name, "Nova");
        assert_eq!(directory.form(), &FormOverlay::Closed);
        assert_eq!(names(&directory), vec!["Nova"]);
        assert!(!directory.is_saving());
        assert_eq!(directory.backend().calls(), vec!["list", "create", "list"]);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_form_open() {
        let mut directory = Directory::new(FakeBackend::default());
        directory.open_create();
        fill(directory.form_mut().expect("form open"), "Nova");

        directory.backend().fail_with(ClientError::Api {
            status: 400,
            message: "A superhero with this name already exists".to_string(),
        });
        let result = directory.submit_form().await;

        assert!(result.is_err());
        assert_eq!(
            directory.error(),
            Some("A superhero with this name already exists")
        );
        assert!(matches!(directory.form(), FormOverlay::Open { .. }));
        assert!(!directory.is_saving());
    }

    #[tokio::test]
    async fn test_edit_updates_record() {
        let backend = FakeBackend::with(&[("Nova", Alignment::Hero)]);
        let mut directory = Directory::new(backend);
        directory.refresh().await;

        let id = directory.superheroes()[0].id.clone();
        assert!(!directory.open_edit(&SuperheroId::generate()));
        assert!(directory.open_edit(&id));
        assert_eq!(directory.form().editing(), Some(&id));

        directory.form_mut().expect("form open").name = "Nova Prime".to_string();
        let hero = directory.submit_form().await.expect("submit");

        assert_eq!(hero.id, id);
        assert_eq!(names(&directory), vec!["Nova Prime"]);
        assert!(directory.backend().calls().contains(&"update".to_string()));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let backend = FakeBackend::with(&[("Batman", Alignment::Hero), ("Joker", Alignment::Villain)]);
        let mut directory = Directory::new(backend);
        directory.refresh().await;

        assert!(!directory.confirm_delete().await.expect("nothing pending"));

        let joker = directory.superheroes()[0].id.clone();
        assert!(directory.request_delete(&joker));
        assert_eq!(
            directory.confirm().message().as_deref(),
            Some("Are you sure you want to delete \"Joker\"? This action cannot be undone.")
        );

        directory.cancel_delete();
        assert_eq!(directory.confirm(), &ConfirmOverlay::Closed);
        assert_eq!(directory.superheroes().len(), 2);

        directory.request_delete(&joker);
        assert!(directory.confirm_delete().await.expect("delete"));
        assert_eq!(directory.confirm(), &ConfirmOverlay::Closed);
        assert_eq!(names(&directory), vec!["Batman"]);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_dialog() {
        let backend = FakeBackend::with(&[("Batman", Alignment::Hero)]);
        let mut directory = Directory::new(backend);
        directory.refresh().await;

        let id = directory.superheroes()[0].id.clone();
        directory.request_delete(&id);
        directory
            .backend()
            .fail_with(ClientError::Decode("connection reset".to_string()));

        assert!(directory.confirm_delete().await.is_err());
        assert_eq!(directory.error(), Some(DELETE_FAILED_MESSAGE));
        assert!(matches!(directory.confirm(), ConfirmOverlay::Open { .. }));
        assert!(!directory.is_deleting());
    }
}
