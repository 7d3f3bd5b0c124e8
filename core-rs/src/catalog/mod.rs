//! Role catalog configuration

pub mod config;
pub mod standard;

pub use config::{CatalogSpec, CatalogUser, RoleCatalog};
