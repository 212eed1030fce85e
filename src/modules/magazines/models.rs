use biblioteca_kernel::EntityId;
use serde::{Deserialize, Serialize};

/// A magazine issue as exchanged with `/api/revistas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Magazine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "anoPublicacion")]
    pub publication_year: i32,
    #[serde(rename = "numeroEdicion")]
    pub edition_number: i32,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "periodicidad", default)]
    pub periodicity: Option<String>,
    #[serde(default)]
    pub issn: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
    #[serde(rename = "numeroPaginas", default)]
    pub page_count: Option<i32>,
    #[serde(rename = "editorial", default)]
    pub publisher: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "disponible", default)]
    pub available: Option<bool>,
    #[serde(rename = "fechaCreacion", default, skip_serializing)]
    pub created_at: Option<String>,
    #[serde(rename = "fechaActualizacion", default, skip_serializing)]
    pub updated_at: Option<String>,
}
