//! The three catalog kinds and their per-kind configuration.

pub mod books;
pub mod dvds;
pub mod magazines;

pub use books::Book;
pub use dvds::Dvd;
pub use magazines::Magazine;
