pub mod models;

use biblioteca_kernel::schema::FieldDefault;
use biblioteca_kernel::{
    Card, CatalogEntity, CatalogKind, EntityId, FieldSpec, FilterSpec, Schema, Tone,
};
use once_cell::sync::Lazy;

use crate::utils::{format_duration, format_price};
pub use models::Dvd;

static DVD_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        FieldSpec::text("titulo", "title", "title")
            .required()
            .max_len(255),
        FieldSpec::text("director", "director", "director").max_len(255),
        FieldSpec::integer("anoLanzamiento", "release_year", "release year")
            .required()
            .min(1888.0, "invalid year")
            .max_years_ahead(5, "year too far in the future")
            .default_value(FieldDefault::CurrentYear),
        FieldSpec::text("genero", "genre", "genre").max_len(100),
        FieldSpec::integer("duracion", "duration", "duration")
            .min(1.0, "duration must be at least 1 minute"),
        FieldSpec::text("clasificacion", "rating", "rating").max_len(10),
        FieldSpec::text("actores", "actors", "actors").max_len(500),
        FieldSpec::text("sinopsis", "synopsis", "synopsis").max_len(2000),
        FieldSpec::decimal("precio", "price", "price").min(0.0, "price cannot be negative"),
        FieldSpec::flag("disponible", "available", "available"),
    ])
});

static DVD_FILTERS: [FilterSpec; 4] = [
    FilterSpec::query("genre", "genero"),
    FilterSpec::query("director", "director"),
    FilterSpec::query("rating", "clasificacion"),
    FilterSpec::range("duration", "duracion", "minDuracion", "maxDuracion"),
];

impl CatalogEntity for Dvd {
    const KIND: CatalogKind = CatalogKind::Dvds;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn is_available(&self) -> bool {
        self.available.unwrap_or(true)
    }

    fn searchable_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.title.as_str()),
            self.director.as_deref(),
            self.genre.as_deref(),
            self.rating.as_deref(),
            self.actors.as_deref(),
        ]
    }

    fn schema() -> &'static Schema {
        &DVD_SCHEMA
    }

    fn filters() -> &'static [FilterSpec] {
        &DVD_FILTERS
    }

    fn card(&self) -> Card {
        Card::new(self.id, &self.title)
            .line_opt("Director", self.director.as_deref())
            .line("Year", self.release_year.to_string())
            .line_opt("Duration", self.duration.map(format_duration))
            .line_opt("Actors", self.actors.as_deref())
            .line_opt("Price", self.price.map(format_price))
            .badge_opt(self.genre.as_deref(), Tone::Primary)
            .badge_opt(self.rating.as_deref(), Tone::Secondary)
            .availability(self.is_available())
    }
}
