pub mod entity_store_impl;
pub mod preferences_impl;
pub mod table_store_impl;

pub use entity_store_impl::InMemoryEntityStore;
pub use preferences_impl::InMemoryPreferences;
pub use table_store_impl::InMemoryTableStore;
