// Service exports
pub mod dataset;

pub use dataset::{load_raw_tables, read_table, DatasetError};
