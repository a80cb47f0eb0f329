pub mod entity_store;
pub mod table_store;

pub use entity_store::EntityStore;
pub use table_store::DynamicTableStore;
