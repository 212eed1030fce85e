//! Core traits, settings and form logic shared by every catalog kind.

pub mod card;
pub mod catalog;
pub mod filter;
pub mod form;
pub mod schema;
pub mod settings;

pub use card::{Badge, Card, CardLine, Tone};
pub use catalog::{CatalogEntity, CatalogKind, EntityId, FilterShape, FilterSpec};
pub use form::{DialogState, EntityForm, FormError, Submission};
pub use schema::{current_year, FieldKind, FieldSpec, FormValues, Schema, ValidationErrors};
