use biblioteca_kernel::EntityId;
use serde::{Deserialize, Serialize};

/// A book as exchanged with `/api/libros`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Assigned by the backend; absent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "anoPublicacion")]
    pub publication_year: i32,
    pub isbn: String,
    #[serde(rename = "numeroPaginas")]
    pub page_count: i32,
    #[serde(rename = "genero", default)]
    pub genre: Option<String>,
    #[serde(rename = "editorial", default)]
    pub publisher: Option<String>,
    #[serde(rename = "idioma", default)]
    pub language: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    /// Absent or null reads as available.
    #[serde(rename = "disponible", default)]
    pub available: Option<bool>,
    #[serde(rename = "fechaCreacion", default, skip_serializing)]
    pub created_at: Option<String>,
    #[serde(rename = "fechaActualizacion", default, skip_serializing)]
    pub updated_at: Option<String>,
}
