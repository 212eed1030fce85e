use biblioteca_kernel::EntityId;
use serde::{Deserialize, Serialize};

/// A DVD as exchanged with `/api/dvds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dvd {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(rename = "anoLanzamiento")]
    pub release_year: i32,
    #[serde(rename = "genero", default)]
    pub genre: Option<String>,
    /// Minutes.
    #[serde(rename = "duracion", default)]
    pub duration: Option<i32>,
    #[serde(rename = "clasificacion", default)]
    pub rating: Option<String>,
    #[serde(rename = "actores", default)]
    pub actors: Option<String>,
    #[serde(rename = "sinopsis", default)]
    pub synopsis: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
    #[serde(rename = "disponible", default)]
    pub available: Option<bool>,
    #[serde(rename = "fechaCreacion", default, skip_serializing)]
    pub created_at: Option<String>,
    #[serde(rename = "fechaActualizacion", default, skip_serializing)]
    pub updated_at: Option<String>,
}
