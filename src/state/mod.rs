mod catalog;
mod persistence;
mod store;

pub use catalog::MealCatalog;
pub use persistence::{load_catalog, load_config, load_report, parse_catalog, save_report};
pub use store::ResultStore;
