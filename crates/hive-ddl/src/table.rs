//! Table schema aggregate and statement assembly

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::clustering::Clustering;
use crate::column::{column_list, Column};
use crate::error::Result;
use crate::row_format::{
    RowFormat, DEFAULT_COLLECTION_SEPARATOR, DEFAULT_FIELD_SEPARATOR, DEFAULT_LINE_SEPARATOR,
};

/// Construction options. Anything left as `None` takes its default.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Storage location; when set the table is created `EXTERNAL`.
    pub location: Option<String>,
    pub field_separator: Option<String>,
    pub line_separator: Option<String>,
    pub collection_separator: Option<String>,
}

impl TableOptions {
    pub fn external(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlterKind {
    Add,
    Replace,
}

impl AlterKind {
    fn keyword(self) -> &'static str {
        match self {
            AlterKind::Add => "ADD",
            AlterKind::Replace => "REPLACE",
        }
    }
}

/// In-memory description of a Hive table, rendered into DDL on demand.
///
/// Mutators append or overwrite in place and return `&mut Self` so calls
/// chain. Rendering never mutates and never fails.
#[derive(Debug, Clone, Serialize)]
pub struct TableSchema {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    columns: Vec<Column>,
    partitions: Vec<Column>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clustering: Option<Clustering>,
    row_format: RowFormat,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, comment: Option<&str>, options: TableOptions) -> Self {
        let TableOptions {
            location,
            field_separator,
            line_separator,
            collection_separator,
        } = options;

        Self {
            name: name.into(),
            comment: comment.map(str::to_string),
            location,
            columns: Vec::new(),
            partitions: Vec::new(),
            clustering: None,
            row_format: RowFormat::Delimited {
                field_separator: field_separator
                    .unwrap_or_else(|| DEFAULT_FIELD_SEPARATOR.to_string()),
                line_separator: line_separator.unwrap_or_else(|| DEFAULT_LINE_SEPARATOR.to_string()),
                collection_separator: collection_separator
                    .unwrap_or_else(|| DEFAULT_COLLECTION_SEPARATOR.to_string()),
            },
        }
    }

    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        data_type: impl Into<String>,
        comment: Option<&str>,
    ) -> Result<&mut Self> {
        let column = Column::new(name, data_type, comment)?;
        trace!(table = %self.name, column = %column.name(), "column added");
        self.columns.push(column);
        Ok(self)
    }

    pub fn add_partition(
        &mut self,
        name: impl Into<String>,
        data_type: impl Into<String>,
        comment: Option<&str>,
    ) -> Result<&mut Self> {
        let column = Column::new(name, data_type, comment)?;
        trace!(table = %self.name, partition = %column.name(), "partition column added");
        self.partitions.push(column);
        Ok(self)
    }

    /// Replaces any clustering set earlier.
    pub fn set_clustering<I, S>(
        &mut self,
        columns: I,
        number_of_buckets: u32,
        sort_by: Option<&str>,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let clustering = Clustering::new(columns, number_of_buckets, sort_by)?;
        trace!(table = %self.name, buckets = number_of_buckets, "clustering set");
        self.clustering = Some(clustering);
        Ok(self)
    }

    /// Switches the row format to a named SerDe. There is no way back to
    /// delimited mode.
    pub fn set_serializer<I, K, V>(&mut self, name: impl Into<String>, properties: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let properties: BTreeMap<String, String> = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.row_format = RowFormat::Serde {
            name: name.into(),
            properties,
        };
        trace!(table = %self.name, "serializer set");
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn is_external(&self) -> bool {
        self.location.is_some()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn partitions(&self) -> &[Column] {
        &self.partitions
    }

    pub fn clustering(&self) -> Option<&Clustering> {
        self.clustering.as_ref()
    }

    pub fn row_format(&self) -> &RowFormat {
        &self.row_format
    }

    pub fn create_table_statement(&self) -> String {
        let external = if self.is_external() { "EXTERNAL " } else { "" };
        let location = match &self.location {
            Some(path) => format!("\n  LOCATION '{}'", path),
            None => String::new(),
        };

        let statement = format!(
            "CREATE {}TABLE {}\n  ROW FORMAT {}\n  STORED AS TEXTFILE{}",
            external,
            self,
            self.row_format_statement(),
            location
        );
        debug!(table = %self.name, external = self.is_external(), "rendered CREATE TABLE");
        statement
    }

    pub fn row_format_statement(&self) -> String {
        self.row_format.to_string()
    }

    pub fn add_columns_statement(&self) -> String {
        self.alter_columns_statement(AlterKind::Add)
    }

    pub fn replace_columns_statement(&self) -> String {
        self.alter_columns_statement(AlterKind::Replace)
    }

    /// Lowercase hex SHA-256 of the `CREATE TABLE` statement.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.create_table_statement().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn alter_columns_statement(&self, kind: AlterKind) -> String {
        debug!(table = %self.name, kind = kind.keyword(), "rendered ALTER TABLE");
        format!(
            "ALTER TABLE `{}` {} COLUMNS {}",
            self.name,
            kind.keyword(),
            column_list(&self.columns)
        )
    }

    fn partition_statement(&self) -> String {
        if self.partitions.is_empty() {
            return String::new();
        }
        format!("PARTITIONED BY {}", column_list(&self.partitions))
    }

    fn clustering_statement(&self) -> String {
        self.clustering
            .as_ref()
            .map(Clustering::to_string)
            .unwrap_or_default()
    }
}

/// The table clause: name, columns, comment, partitions and clustering.
impl fmt::Display for TableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` {}", self.name, column_list(&self.columns))?;
        if let Some(comment) = &self.comment {
            write!(f, " COMMENT '{}'", comment)?;
        }
        write!(
            f,
            "\n{}\n{}",
            self.partition_statement(),
            self.clustering_statement()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> TableSchema {
        let mut schema = TableSchema::new("events", None, TableOptions::default());
        schema
            .add_column("id", "bigint", None)
            .unwrap()
            .add_column("name", "string", None)
            .unwrap();
        schema
    }

    #[test]
    fn test_managed_table_layout() {
        let expected = "CREATE TABLE `events` (\n`id` BIGINT,\n`name` STRING\n)\n\n\n  \
ROW FORMAT DELIMITED\n  FIELDS TERMINATED BY '\t'\n  COLLECTION ITEMS TERMINATED BY '|'\n  LINES TERMINATED BY '\n'\n  \
STORED AS TEXTFILE";
        assert_eq!(events().create_table_statement(), expected);
    }

    #[test]
    fn test_full_table_layout() {
        let mut schema = TableSchema::new(
            "page_views",
            Some("raw page views"),
            TableOptions::external("/data/page_views"),
        );
        schema
            .add_column("user_id", "bigint", Some("viewer"))
            .unwrap()
            .add_partition("dt", "string", None)
            .unwrap()
            .set_clustering(["user_id"], 16, Some("user_id ASC"))
            .unwrap()
            .set_serializer("org.openx.data.jsonserde.JsonSerDe", [("ignore.malformed.json", "true")]);

        let expected = "CREATE EXTERNAL TABLE `page_views` (\n`user_id` BIGINT COMMENT 'viewer'\n) COMMENT 'raw page views'\n\
PARTITIONED BY (\n`dt` STRING\n)\n\
CLUSTERED BY (user_id) SORTED BY (user_id ASC) INTO 16 BUCKETS\n  \
ROW FORMAT SERDE 'org.openx.data.jsonserde.JsonSerDe'\nWITH SERDEPROPERTIES (\"ignore.malformed.json\" = \"true\")\n  \
STORED AS TEXTFILE\n  \
LOCATION '/data/page_views'";
        assert_eq!(schema.create_table_statement(), expected);
    }

    #[test]
    fn test_custom_separators() {
        let options = TableOptions {
            field_separator: Some(",".to_string()),
            line_separator: Some("\r\n".to_string()),
            collection_separator: Some(";".to_string()),
            ..Default::default()
        };
        let schema = TableSchema::new("csv", None, options);
        let ddl = schema.create_table_statement();
        assert!(ddl.contains("FIELDS TERMINATED BY ','"));
        assert!(ddl.contains("COLLECTION ITEMS TERMINATED BY ';'"));
        assert!(ddl.contains("LINES TERMINATED BY '\r\n'"));
    }

    #[test]
    fn test_clustering_last_call_wins() {
        let mut schema = events();
        schema.set_clustering(["id"], 4, None).unwrap();
        schema.set_clustering(["name"], 8, None).unwrap();

        let ddl = schema.create_table_statement();
        assert_eq!(ddl.matches("CLUSTERED BY").count(), 1);
        assert!(ddl.contains("CLUSTERED BY (name) INTO 8 BUCKETS"));
    }

    #[test]
    fn test_failed_mutation_leaves_schema_untouched() {
        let mut schema = events();
        assert!(schema.add_column("", "int", None).is_err());
        assert!(schema.set_clustering(["id"], 0, None).is_err());
        assert_eq!(schema.columns().len(), 2);
        assert!(schema.clustering().is_none());
    }

    #[test]
    fn test_alter_statements() {
        let schema = events();
        assert_eq!(
            schema.add_columns_statement(),
            "ALTER TABLE `events` ADD COLUMNS (\n`id` BIGINT,\n`name` STRING\n)"
        );
        assert_eq!(
            schema.replace_columns_statement(),
            "ALTER TABLE `events` REPLACE COLUMNS (\n`id` BIGINT,\n`name` STRING\n)"
        );
    }

    #[test]
    fn test_rename_is_reflected_in_statements() {
        let mut schema = events();
        schema.set_name("events_v2");
        assert!(schema.create_table_statement().starts_with("CREATE TABLE `events_v2`"));
        assert!(schema.add_columns_statement().starts_with("ALTER TABLE `events_v2`"));
    }

    #[test]
    fn test_display_is_table_clause() {
        let schema = events();
        assert_eq!(schema.to_string(), "`events` (\n`id` BIGINT,\n`name` STRING\n)\n\n");
    }

    #[test]
    fn test_serializes_row_format_mode() {
        let mut schema = events();
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["row_format"]["mode"], "delimited");
        assert_eq!(json["columns"][0]["type"], "bigint");
        assert!(json.get("location").is_none());

        schema.set_serializer("x.Serde", [("k", "v")]);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["row_format"]["mode"], "serde");
        assert_eq!(json["row_format"]["properties"]["k"], "v");
    }

    #[test]
    fn test_fingerprint_tracks_definition() {
        let a = events();
        let mut b = events();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);

        b.add_column("extra", "int", None).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
