//! Biblioteca application library
//!
//! Catalog entities, the console list views and the dashboard built on top
//! of the kernel and HTTP crates.

pub mod console;
pub mod modules;
pub mod utils;

pub use console::{
    load_stats, ConsoleError, DashboardStats, ListView, LoadState, Notice, NoticeLevel, View,
};
pub use modules::*;
