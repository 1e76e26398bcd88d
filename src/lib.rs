pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{
    cli::{FileSource, LocalStorage},
    http::HttpSource,
    CliConfig, Settings,
};
pub use core::{catalog::Catalog, filter::FilterEngine, store::CardStore};
pub use domain::model::{Card, CardId, CatalogView, Category, DeleteOutcome, Summary};
pub use utils::error::{CatalogError, Result};
