//! Data module - CSV loading and cleaning

mod cleaner;
mod loader;
pub mod schema;

pub use cleaner::{CleanerError, DataCleaner};
pub use loader::{DataLoader, LoaderError};
