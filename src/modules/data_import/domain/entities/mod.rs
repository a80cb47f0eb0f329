pub mod dynamic_table;
pub mod entity_record;
pub mod fixed_schemas;
pub mod schema;
pub mod source_matrix;

pub use dynamic_table::{DynamicTable, NewDynamicTable, TableColumn, TableRow, TableUpdate};
pub use entity_record::{EntityRecord, RecordFields, RecordFilter};
pub use fixed_schemas::FixedEntityKind;
pub use schema::{FieldType, ImportSchema, SchemaField, SchemaSource};
pub use source_matrix::SourceMatrix;
