pub mod aggregate;
pub mod catalog;
pub mod filter;
pub mod grade;
pub mod loader;
pub mod population;
pub mod store;

pub use crate::domain::model::{Card, CardId, CatalogView, Category, DeleteOutcome, Summary};
pub use crate::domain::ports::{AutoConfirm, CardSource, Confirm, Storage};
pub use crate::utils::error::Result;
