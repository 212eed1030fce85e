use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::card::Card;
use crate::schema::Schema;

/// Backend-assigned identifier.
pub type EntityId = i64;

/// The three catalog verticals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Books,
    Magazines,
    Dvds,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [
        CatalogKind::Books,
        CatalogKind::Magazines,
        CatalogKind::Dvds,
    ];

    /// REST resource segment under `/api`.
    pub fn resource(self) -> &'static str {
        match self {
            CatalogKind::Books => "libros",
            CatalogKind::Magazines => "revistas",
            CatalogKind::Dvds => "dvds",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            CatalogKind::Books => "books",
            CatalogKind::Magazines => "magazines",
            CatalogKind::Dvds => "DVDs",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            CatalogKind::Books => "book",
            CatalogKind::Magazines => "magazine",
            CatalogKind::Dvds => "DVD",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

impl FromStr for CatalogKind {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "books" | "book" | "libros" => Ok(CatalogKind::Books),
            "magazines" | "magazine" | "revistas" => Ok(CatalogKind::Magazines),
            "dvds" | "dvd" => Ok(CatalogKind::Dvds),
            other => Err(anyhow!(
                "unknown catalog kind '{}'; expected books/magazines/dvds",
                other
            )),
        }
    }
}

/// How a backend filter endpoint takes its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterShape {
    /// `GET /{resource}/{segment}?{segment}=value`, returns a list.
    Query,
    /// `GET /{resource}/{segment}/{value}`, returns one entity.
    Path,
    /// `GET /{resource}/{segment}?{min}=a&{max}=b`, value written `a..b`.
    Range {
        min_param: &'static str,
        max_param: &'static str,
    },
}

/// One field-filtered query the backend offers for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub name: &'static str,
    pub segment: &'static str,
    pub shape: FilterShape,
}

impl FilterSpec {
    pub const fn query(name: &'static str, segment: &'static str) -> Self {
        Self {
            name,
            segment,
            shape: FilterShape::Query,
        }
    }

    pub const fn path(name: &'static str, segment: &'static str) -> Self {
        Self {
            name,
            segment,
            shape: FilterShape::Path,
        }
    }

    pub const fn range(
        name: &'static str,
        segment: &'static str,
        min_param: &'static str,
        max_param: &'static str,
    ) -> Self {
        Self {
            name,
            segment,
            shape: FilterShape::Range {
                min_param,
                max_param,
            },
        }
    }
}

/// Per-kind configuration driving the generic list view, form, card and
/// service.
pub trait CatalogEntity:
    Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
    const KIND: CatalogKind;

    fn id(&self) -> Option<EntityId>;

    fn title(&self) -> &str;

    fn is_available(&self) -> bool;

    /// Values matched by the free-text list filter; absent optionals are `None`.
    fn searchable_fields(&self) -> Vec<Option<&str>>;

    fn schema() -> &'static Schema;

    fn filters() -> &'static [FilterSpec] {
        &[]
    }

    fn card(&self) -> Card;

    fn filter_by_name(name: &str) -> Option<&'static FilterSpec> {
        Self::filters().iter().find(|filter| filter.name == name)
    }
}
