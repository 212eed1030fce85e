//! Create/edit form state for one catalog kind.
//!
//! The form is a small state machine: `Closed`, `OpenCreate` or
//! `OpenEdit(id)`. Inputs are kept as text and only parsed on submit, so a
//! rejected submission leaves exactly what the user typed.

use std::marker::PhantomData;

use serde_json::Value;
use thiserror::Error;

use crate::catalog::{CatalogEntity, CatalogKind, EntityId};
use crate::schema::{FormValues, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    OpenCreate,
    OpenEdit(EntityId),
}

/// A validated payload ready for the service layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<E> {
    Create(E),
    Update(EntityId, E),
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("the form is not open")]
    Closed,

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("the {0} has no id and cannot be edited")]
    MissingId(&'static str),

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("payload does not match the {kind} shape: {source}")]
    Payload {
        kind: CatalogKind,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug)]
pub struct EntityForm<E> {
    state: DialogState,
    values: FormValues,
    errors: Option<ValidationErrors>,
    submit_error: Option<String>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: CatalogEntity> EntityForm<E> {
    pub fn new() -> Self {
        Self {
            state: DialogState::Closed,
            values: FormValues::new(),
            errors: None,
            submit_error: None,
            _entity: PhantomData,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    pub fn open_create(&mut self, current_year: i32) {
        self.reset();
        self.values = E::schema().defaults(current_year);
        self.state = DialogState::OpenCreate;
    }

    /// Open pre-populated with `entity`; nulls fall back to create defaults.
    pub fn open_edit(&mut self, entity: &E, current_year: i32) -> Result<(), FormError> {
        let id = entity.id().ok_or(FormError::MissingId(E::KIND.singular()))?;
        let json = serde_json::to_value(entity).map_err(|source| FormError::Payload {
            kind: E::KIND,
            source,
        })?;

        self.reset();
        self.values = E::schema()
            .fields()
            .iter()
            .map(|field| {
                let text = match json.get(field.key) {
                    None | Some(Value::Null) => field.default_text(current_year),
                    Some(Value::String(s)) if s.is_empty() => field.default_text(current_year),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                };
                (field.key, text)
            })
            .collect();
        self.state = DialogState::OpenEdit(id);
        Ok(())
    }

    /// Set one input by wire key or snake_case name.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), FormError> {
        if !self.is_open() {
            return Err(FormError::Closed);
        }
        let spec = E::schema()
            .field(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        self.values.insert(spec.key, value.into());
        Ok(())
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        let spec = E::schema().field(field)?;
        self.values.get(spec.key).map(String::as_str)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        let spec = E::schema().field(field)?;
        self.errors.as_ref()?.get(spec.key)
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Validate and coerce the inputs. Errors are kept on the form and the
    /// dialog stays open.
    pub fn submit(&mut self, current_year: i32) -> Result<Submission<E>, FormError> {
        if !self.is_open() {
            return Err(FormError::Closed);
        }

        self.submit_error = None;
        let payload = match E::schema().validate(&self.values, current_year) {
            Ok(payload) => {
                self.errors = None;
                payload
            }
            Err(errors) => {
                tracing::debug!(kind = %E::KIND, failures = errors.len(), "form rejected");
                self.errors = Some(errors.clone());
                return Err(FormError::Invalid(errors));
            }
        };

        let entity: E =
            serde_json::from_value(Value::Object(payload)).map_err(|source| FormError::Payload {
                kind: E::KIND,
                source,
            })?;

        Ok(match self.state {
            DialogState::OpenEdit(id) => Submission::Update(id, entity),
            _ => Submission::Create(entity),
        })
    }

    /// Record a backend failure; entered data stays intact.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.submit_error = Some(message.into());
    }

    /// Close or cancel. Nothing typed survives into the next open.
    pub fn close(&mut self) {
        self.reset();
        self.state = DialogState::Closed;
    }

    fn reset(&mut self) {
        self.values.clear();
        self.errors = None;
        self.submit_error = None;
    }
}

impl<E: CatalogEntity> Default for EntityForm<E> {
    fn default() -> Self {
        Self::new()
    }
}
