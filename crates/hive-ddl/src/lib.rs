//! Hive DDL builder
//!
//! Describe a table once as a [`TableSchema`] (columns, partitions, bucketing,
//! row format) and render `CREATE TABLE`, `ALTER TABLE ... ADD COLUMNS` and
//! `ALTER TABLE ... REPLACE COLUMNS` statements from it.
//!
//! ```
//! use hive_ddl::{TableOptions, TableSchema};
//!
//! let mut schema = TableSchema::new("events", None, TableOptions::external("/data/events"));
//! schema.add_column("id", "bigint", None)?;
//! assert!(schema.create_table_statement().starts_with("CREATE EXTERNAL TABLE `events`"));
//! # Ok::<(), hive_ddl::SchemaError>(())
//! ```

mod clustering;
mod column;
mod definition;
mod error;
mod row_format;
mod table;

pub use clustering::Clustering;
pub use column::Column;
pub use definition::{ClusteringDefinition, ColumnDefinition, SerdeDefinition, TableDefinition};
pub use error::{Result, SchemaError};
pub use row_format::{
    RowFormat, DEFAULT_COLLECTION_SEPARATOR, DEFAULT_FIELD_SEPARATOR, DEFAULT_LINE_SEPARATOR,
};
pub use table::{TableOptions, TableSchema};
