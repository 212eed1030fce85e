pub mod models;

use biblioteca_kernel::schema::FieldDefault;
use biblioteca_kernel::{
    Card, CatalogEntity, CatalogKind, EntityId, FieldSpec, FilterSpec, Schema, Tone,
};
use once_cell::sync::Lazy;

use crate::utils::format_price;
pub use models::Magazine;

static MAGAZINE_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        FieldSpec::text("titulo", "title", "title")
            .required()
            .max_len(255),
        FieldSpec::text("autor", "author", "author")
            .required()
            .max_len(255),
        FieldSpec::integer("anoPublicacion", "publication_year", "publication year")
            .required()
            .min(1000.0, "invalid year")
            .max_years_ahead(1, "year cannot be in the future")
            .default_value(FieldDefault::CurrentYear),
        FieldSpec::integer("numeroEdicion", "edition_number", "edition number")
            .required()
            .min(1.0, "edition must be at least 1"),
        FieldSpec::text("categoria", "category", "category").max_len(100),
        FieldSpec::text("periodicidad", "periodicity", "periodicity").max_len(50),
        FieldSpec::text("issn", "issn", "ISSN").max_len(20),
        FieldSpec::decimal("precio", "price", "price").min(0.0, "price cannot be negative"),
        FieldSpec::integer("numeroPaginas", "page_count", "page count")
            .min(1.0, "must have at least 1 page"),
        FieldSpec::text("editorial", "publisher", "publisher").max_len(255),
        FieldSpec::text("descripcion", "description", "description").max_len(1000),
        FieldSpec::flag("disponible", "available", "available"),
    ])
});

static MAGAZINE_FILTERS: [FilterSpec; 4] = [
    FilterSpec::query("category", "categoria"),
    FilterSpec::query("periodicity", "periodicidad"),
    FilterSpec::query("publisher", "editorial"),
    FilterSpec::query("author", "autor"),
];

impl CatalogEntity for Magazine {
    const KIND: CatalogKind = CatalogKind::Magazines;

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
            Some(self.author.as_str()),
            self.category.as_deref(),
            self.publisher.as_deref(),
            self.issn.as_deref(),
        ]
    }

    fn schema() -> &'static Schema {
        &MAGAZINE_SCHEMA
    }

    fn filters() -> &'static [FilterSpec] {
        &MAGAZINE_FILTERS
    }

    fn card(&self) -> Card {
        Card::new(self.id, &self.title)
            .line("Author", &self.author)
            .line("Year", self.publication_year.to_string())
            .line_opt("Publisher", self.publisher.as_deref())
            .line("Edition", format!("#{}", self.edition_number))
            .line_opt("ISSN", self.issn.as_deref())
            .line_opt("Periodicity", self.periodicity.as_deref())
            .line_opt("Price", self.price.map(format_price))
            .badge_opt(self.category.as_deref(), Tone::Primary)
            .availability(self.is_available())
    }
}
