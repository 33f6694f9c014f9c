//! SQLite persistence: schema, the writable store and the read-only catalog.

mod catalog;
mod schema;
mod store;

pub use catalog::{
    Catalog, ClassRow, EquipmentGroup, EquipmentRow, FeatRow, FeatureRow, RaceRow, SpellRow,
    TableCount,
};
pub use schema::{create_schema, quote_ident, table_names, TABLES};
pub use store::{remove_store_file, SrdStore};
