//! Generic list view: the authoritative collection of one kind plus its
//! filtered projection, create/edit form and delete confirmation.

use biblioteca_http::{ApiError, CatalogService};
use biblioteca_kernel::filter::filter_entities;
use biblioteca_kernel::{Card, CatalogEntity, EntityForm, FormError, Submission};
use thiserror::Error;

use super::Notice;

/// Skeleton cards shown while a load is in flight.
pub const LOADING_PLACEHOLDERS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Error(String),
}

/// What the list shows right now.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Loading { placeholders: usize },
    Empty(String),
    Cards(Vec<Card>),
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct ListView<E, S> {
    service: S,
    all: Vec<E>,
    query: String,
    state: LoadState,
    form: EntityForm<E>,
    pending_delete: Option<E>,
    notices: Vec<Notice>,
}

impl<E, S> ListView<E, S>
where
    E: CatalogEntity,
    S: CatalogService<E>,
{
    pub fn new(service: S) -> Self {
        Self {
            service,
            all: Vec::new(),
            query: String::new(),
            state: LoadState::Idle,
            form: EntityForm::new(),
            pending_delete: None,
            notices: Vec::new(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn all(&self) -> &[E] {
        &self.all
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn form(&self) -> &EntityForm<E> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntityForm<E> {
        &mut self.form
    }

    pub fn pending_delete(&self) -> Option<&E> {
        self.pending_delete.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Refetch the whole collection. On failure the previous collection is
    /// kept and the error is recorded.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.state = LoadState::Loading;
        match self.service.list().await {
            Ok(items) => {
                tracing::info!(kind = %E::KIND, count = items.len(), "collection loaded");
                self.all = items;
                self.state = LoadState::Idle;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Error(err.to_string());
                self.notify(Notice::error(format!("Failed to load {}: {}", E::KIND, err)));
                Err(err)
            }
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn filtered(&self) -> Vec<&E> {
        filter_entities(&self.all, &self.query)
    }

    pub fn render(&self) -> View {
        if self.state == LoadState::Loading {
            return View::Loading {
                placeholders: LOADING_PLACEHOLDERS,
            };
        }

        let visible = self.filtered();
        if visible.is_empty() {
            let message = if self.query.trim().is_empty() {
                format!("No {} registered", E::KIND)
            } else {
                format!("No {} match the search", E::KIND)
            };
            return View::Empty(message);
        }

        View::Cards(visible.into_iter().map(|entity| entity.card()).collect())
    }

    pub fn open_create(&mut self, current_year: i32) {
        self.form.open_create(current_year);
    }

    pub fn open_edit(&mut self, entity: &E, current_year: i32) -> Result<(), FormError> {
        self.form.open_edit(entity, current_year)
    }

    /// Validate and send the open form. Invalid input never reaches the
    /// service; a backend failure keeps the form open with its data.
    pub async fn submit_form(&mut self, current_year: i32) -> Result<E, ConsoleError> {
        let submission = self.form.submit(current_year)?;

        let (result, verb) = match &submission {
            Submission::Create(entity) => (self.service.create(entity).await, "created"),
            Submission::Update(id, entity) => (self.service.update(*id, entity).await, "updated"),
        };

        match result {
            Ok(saved) => {
                self.form.close();
                self.notify(Notice::success(format!(
                    "{} {}",
                    capitalize(E::KIND.singular()),
                    verb
                )));
                self.refresh().await;
                Ok(saved)
            }
            Err(err) => {
                let fallback = format!("Failed to save the {}", E::KIND.singular());
                let message = err.detail_or(&fallback);
                self.form.fail(message.clone());
                self.notify(Notice::error(message));
                Err(err.into())
            }
        }
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    /// Open the confirmation step for `entity`.
    pub fn request_delete(&mut self, entity: E) {
        self.pending_delete = Some(entity);
    }

    /// Dismiss the confirmation without touching the backend.
    pub fn cancel_delete(&mut self) -> Option<E> {
        self.pending_delete.take()
    }

    /// Delete the pending entity. The confirmation closes whatever the
    /// outcome. Returns `Ok(false)` when nothing was pending.
    pub async fn confirm_delete(&mut self) -> Result<bool, ApiError> {
        let Some(entity) = self.pending_delete.take() else {
            return Ok(false);
        };
        let Some(id) = entity.id() else {
            let err = ApiError::InvalidRequest(format!(
                "the {} has no id and cannot be deleted",
                E::KIND.singular()
            ));
            self.notify(Notice::error(err.to_string()));
            return Err(err);
        };

        match self.service.delete(id).await {
            Ok(()) => {
                self.notify(Notice::success(format!(
                    "{} deleted",
                    capitalize(E::KIND.singular())
                )));
                self.refresh().await;
                Ok(true)
            }
            Err(err) => {
                let fallback = format!("Failed to delete the {}", E::KIND.singular());
                self.notify(Notice::error(err.detail_or(&fallback)));
                Err(err)
            }
        }
    }

    /// Post-mutation refetch; a failure is already recorded by `load`.
    async fn refresh(&mut self) {
        let _ = self.load().await;
    }

    fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!(kind = %E::KIND, message = %notice.message, "action failed");
        } else {
            tracing::info!(kind = %E::KIND, message = %notice.message, "action succeeded");
        }
        self.notices.push(notice);
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::MemoryService;
    use crate::modules::Book;

    fn book(id: i64, title: &str, author: &str) -> Book {
        Book {
            id: Some(id),
            title: title.to_string(),
            author: author.to_string(),
            publication_year: 1949,
            isbn: format!("978000000000{}", id),
            page_count: 300,
            genre: None,
            publisher: None,
            language: None,
            price: None,
            stock: None,
            description: None,
            available: Some(true),
            created_at: None,
            updated_at: None,
        }
    }

    fn shelf() -> Vec<Book> {
        vec![
            book(1, "Nineteen Eighty-Four", "George Orwell"),
            book(2, "Animal Farm", "George Orwell"),
            book(3, "Dune", "Frank Herbert"),
        ]
    }

    async fn loaded(items: Vec<Book>) -> ListView<Book, MemoryService<Book>> {
        let mut view = ListView::new(MemoryService::with(items));
        view.load().await.unwrap();
        view
    }

    #[tokio::test]
    async fn query_narrows_and_clearing_restores() {
        let mut view = loaded(shelf()).await;

        view.set_query("Orwell");
        let titles: Vec<&str> = view.filtered().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Nineteen Eighty-Four", "Animal Farm"]);
        assert_eq!(view.all().len(), 3);

        view.clear_query();
        assert_eq!(view.filtered().len(), 3);
    }

    #[tokio::test]
    async fn empty_state_depends_on_query() {
        let mut view = loaded(Vec::new()).await;
        assert_eq!(view.render(), View::Empty("No books registered".to_string()));

        let mut view = loaded(shelf()).await;
        view.set_query("tolkien");
        assert_eq!(
            view.render(),
            View::Empty("No books match the search".to_string())
        );

        view.set_query("dune");
        let View::Cards(cards) = view.render() else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Dune");
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_collection() {
        let mut view = loaded(shelf()).await;
        view.service()
            .fail_with(500, r#"{"message":"database offline"}"#);

        assert!(view.load().await.is_err());
        assert_eq!(view.all().len(), 3);
        assert!(matches!(view.state(), LoadState::Error(_)));
        let notice = view.last_notice().unwrap();
        assert!(notice.is_error());
        assert!(notice.message.starts_with("Failed to load books"));
    }

    #[tokio::test]
    async fn cancelled_delete_makes_no_call() {
        let mut view = loaded(shelf()).await;
        view.request_delete(book(2, "Animal Farm", "George Orwell"));
        assert!(view.pending_delete().is_some());

        let dismissed = view.cancel_delete().unwrap();
        assert_eq!(dismissed.id, Some(2));
        assert!(view.pending_delete().is_none());
        assert_eq!(view.service().count("delete"), 0);
        assert_eq!(view.all().len(), 3);

        assert!(!view.confirm_delete().await.unwrap());
        assert_eq!(view.service().count("delete"), 0);
    }

    #[tokio::test]
    async fn confirmed_delete_refetches() {
        let mut view = loaded(shelf()).await;
        view.request_delete(book(3, "Dune", "Frank Herbert"));

        assert!(view.confirm_delete().await.unwrap());
        assert_eq!(view.service().count("delete"), 1);
        assert_eq!(view.service().count("list"), 2);
        assert_eq!(view.all().len(), 2);
        assert_eq!(view.last_notice().unwrap().message, "Book deleted");
    }

    #[tokio::test]
    async fn failed_delete_still_closes_confirmation() {
        let mut view = loaded(shelf()).await;
        view.request_delete(book(3, "Dune", "Frank Herbert"));
        view.service().fail_with(500, "");

        assert!(view.confirm_delete().await.is_err());
        assert!(view.pending_delete().is_none());
        assert_eq!(view.last_notice().unwrap().message, "Failed to delete the book");
    }

    #[tokio::test]
    async fn invalid_form_makes_no_network_call() {
        let mut view = loaded(shelf()).await;
        view.open_create(2024);
        view.form_mut().set("title", "").unwrap();
        view.form_mut().set("price", "-1").unwrap();

        let err = view.submit_form(2024).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Form(FormError::Invalid(_))));
        assert!(view.form().is_open());
        assert_eq!(view.form().field_error("title"), Some("title is required"));
        assert_eq!(view.service().calls(), vec!["list"]);
    }

    #[tokio::test]
    async fn create_closes_form_and_refetches() {
        let mut view = loaded(shelf()).await;
        view.open_create(2024);
        for (field, value) in [
            ("title", "Brave New World"),
            ("author", "Aldous Huxley"),
            ("isbn", "9780060850524"),
            ("page_count", "288"),
        ] {
            view.form_mut().set(field, value).unwrap();
        }

        let created = view.submit_form(2024).await.unwrap();
        assert_eq!(created.id, Some(4));
        assert!(!view.form().is_open());
        assert_eq!(view.all().len(), 4);
        assert_eq!(view.last_notice().unwrap().message, "Book created");
    }

    #[tokio::test]
    async fn backend_rejection_keeps_form_data() {
        let mut view = loaded(shelf()).await;
        let dune = view.all()[2].clone();
        view.open_edit(&dune, 2024).unwrap();
        view.form_mut().set("title", "Dune Messiah").unwrap();

        view.service()
            .fail_with(400, r#"{"message":"ISBN already registered"}"#);
        assert!(view.submit_form(2024).await.is_err());
        assert!(view.form().is_open());
        assert_eq!(view.form().value("title"), Some("Dune Messiah"));
        assert_eq!(view.form().submit_error(), Some("ISBN already registered"));

        view.service().fail_with(500, "");
        assert!(view.submit_form(2024).await.is_err());
        assert_eq!(view.form().submit_error(), Some("Failed to save the book"));

        view.service().recover();
        let updated = view.submit_form(2024).await.unwrap();
        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(view.last_notice().unwrap().message, "Book updated");
        assert_eq!(view.all()[2].title, "Dune Messiah");
    }

    #[test]
    fn capitalize_handles_acronyms() {
        assert_eq!(capitalize("book"), "Book");
        assert_eq!(capitalize("DVD"), "DVD");
    }
}
