pub mod models;

use biblioteca_kernel::schema::FieldDefault;
use biblioteca_kernel::{
    Card, CatalogEntity, CatalogKind, EntityId, FieldSpec, FilterSpec, Schema, Tone,
};
use once_cell::sync::Lazy;

use crate::utils::format_price;
pub use models::Book;

static BOOK_SCHEMA: Lazy<Schema> = Lazy::new(|| {
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
        FieldSpec::text("isbn", "isbn", "ISBN").required().max_len(20),
        FieldSpec::integer("numeroPaginas", "page_count", "page count")
            .required()
            .min(1.0, "must have at least 1 page"),
        FieldSpec::text("genero", "genre", "genre").max_len(100),
        FieldSpec::text("editorial", "publisher", "publisher").max_len(255),
        FieldSpec::text("idioma", "language", "language").max_len(50),
        FieldSpec::decimal("precio", "price", "price").min(0.0, "price cannot be negative"),
        FieldSpec::integer("stock", "stock", "stock")
            .min(0.0, "stock cannot be negative")
            .default_value(FieldDefault::Text("1")),
        FieldSpec::text("descripcion", "description", "description").max_len(1000),
        FieldSpec::flag("disponible", "available", "available"),
    ])
});

static BOOK_FILTERS: [FilterSpec; 4] = [
    FilterSpec::query("genre", "genero"),
    FilterSpec::query("publisher", "editorial"),
    FilterSpec::query("author", "autor"),
    FilterSpec::path("isbn", "isbn"),
];

impl CatalogEntity for Book {
    const KIND: CatalogKind = CatalogKind::Books;

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
            self.genre.as_deref(),
            self.publisher.as_deref(),
            Some(self.isbn.as_str()),
        ]
    }

    fn schema() -> &'static Schema {
        &BOOK_SCHEMA
    }

    fn filters() -> &'static [FilterSpec] {
        &BOOK_FILTERS
    }

    fn card(&self) -> Card {
        Card::new(self.id, &self.title)
            .line("Author", &self.author)
            .line("Year", self.publication_year.to_string())
            .line_opt("Publisher", self.publisher.as_deref())
            .line("ISBN", &self.isbn)
            .line("Pages", self.page_count.to_string())
            .line_opt("Price", self.price.map(format_price))
            .badge_opt(self.genre.as_deref(), Tone::Primary)
            .availability(self.is_available())
            .badge_opt(
                self.stock
                    .filter(|stock| *stock > 0)
                    .map(|stock| format!("Stock: {}", stock)),
                Tone::Info,
            )
    }
}
