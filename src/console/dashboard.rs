//! Catalog totals across the three kinds.

use std::fmt;

use biblioteca_http::CatalogService;
use biblioteca_kernel::CatalogEntity;

use crate::modules::{Book, Dvd, Magazine};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub books: usize,
    pub magazines: usize,
    pub dvds: usize,
    pub total: usize,
    pub available: usize,
    pub unavailable: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct KindCount {
    total: usize,
    available: usize,
}

/// Fetch the three collections concurrently. A kind whose request fails
/// counts as zero.
pub async fn load_stats<B, M, D>(books: &B, magazines: &M, dvds: &D) -> DashboardStats
where
    B: CatalogService<Book>,
    M: CatalogService<Magazine>,
    D: CatalogService<Dvd>,
{
    let (books, magazines, dvds) = tokio::join!(
        count::<Book, _>(books),
        count::<Magazine, _>(magazines),
        count::<Dvd, _>(dvds)
    );

    let total = books.total + magazines.total + dvds.total;
    let available = books.available + magazines.available + dvds.available;
    let stats = DashboardStats {
        books: books.total,
        magazines: magazines.total,
        dvds: dvds.total,
        total,
        available,
        unavailable: total - available,
    };

    tracing::info!(
        books = stats.books,
        magazines = stats.magazines,
        dvds = stats.dvds,
        total = stats.total,
        "dashboard loaded"
    );
    stats
}

async fn count<E, S>(service: &S) -> KindCount
where
    E: CatalogEntity,
    S: CatalogService<E>,
{
    match service.list().await {
        Ok(items) => KindCount {
            total: items.len(),
            available: items.iter().filter(|item| item.is_available()).count(),
        },
        Err(err) => {
            tracing::warn!(kind = %E::KIND, error = %err, "count unavailable, using 0");
            KindCount::default()
        }
    }
}

impl fmt::Display for DashboardStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Books:       {}", self.books)?;
        writeln!(f, "Magazines:   {}", self.magazines)?;
        writeln!(f, "DVDs:        {}", self.dvds)?;
        writeln!(f, "Total:       {}", self.total)?;
        writeln!(f, "Available:   {}", self.available)?;
        write!(f, "Unavailable: {}", self.unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::MemoryService;
    use serde_json::json;

    fn items<E: CatalogEntity>(
        count: usize,
        unavailable: usize,
        base: serde_json::Value,
    ) -> Vec<E> {
        (0..count)
            .map(|i| {
                let mut value = base.clone();
                value["id"] = json!(i + 1);
                value["disponible"] = json!(i >= unavailable);
                serde_json::from_value(value).unwrap()
            })
            .collect()
    }

    fn books(count: usize, unavailable: usize) -> Vec<Book> {
        items(
            count,
            unavailable,
            json!({
                "titulo": "T", "autor": "A", "anoPublicacion": 2000,
                "isbn": "1", "numeroPaginas": 10
            }),
        )
    }

    fn dvds(count: usize) -> Vec<Dvd> {
        items(count, 0, json!({ "titulo": "T", "anoLanzamiento": 2000 }))
    }

    #[tokio::test]
    async fn failing_kind_counts_as_zero() {
        let magazines = MemoryService::<Magazine>::with(Vec::new());
        magazines.fail_with(500, "");

        let stats = load_stats(
            &MemoryService::with(books(5, 1)),
            &magazines,
            &MemoryService::with(dvds(2)),
        )
        .await;

        assert_eq!(stats.books, 5);
        assert_eq!(stats.magazines, 0);
        assert_eq!(stats.dvds, 2);
        assert_eq!(stats.total, 7);
        assert_eq!(stats.available, 6);
        assert_eq!(stats.unavailable, 1);
        assert_eq!(magazines.count("list"), 1);
    }

    #[test]
    fn display_lists_every_total() {
        let rendered = DashboardStats {
            books: 5,
            dvds: 2,
            total: 7,
            available: 7,
            ..Default::default()
        }
        .to_string();
        assert!(rendered.contains("Total:       7"));
        assert!(rendered.ends_with("Unavailable: 0"));
    }
}
