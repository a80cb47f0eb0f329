pub mod data_import;
