//! Search and catalog services.

mod catalog;
mod client;

pub use catalog::{CatalogService, URL_KEY_FIELD};
pub use client::SearchClient;
