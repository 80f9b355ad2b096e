//! Declarative table definitions loaded from JSON or YAML
//!
//! A definition is plain data. `into_schema` replays it through the
//! `TableSchema` mutators, so it is validated exactly like hand-built schemas.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::{TableOptions, TableSchema};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_separator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_separator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_separator: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnDefinition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partitions: Vec<ColumnDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clustering: Option<ClusteringDefinition>,

    #[serde(rename = "serde", default, skip_serializing_if = "Option::is_none")]
    pub serializer: Option<SerdeDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringDefinition {
    pub columns: Vec<String>,
    pub buckets: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerdeDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl TableDefinition {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_yaml(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Build a schema by applying columns, partitions, clustering and serde in
    /// that order.
    pub fn into_schema(self) -> Result<TableSchema> {
        let options = TableOptions {
            location: self.location,
            field_separator: self.field_separator,
            line_separator: self.line_separator,
            collection_separator: self.collection_separator,
        };
        let mut schema = TableSchema::new(self.name, self.comment.as_deref(), options);

        for col in self.columns {
            schema.add_column(col.name, col.data_type, col.comment.as_deref())?;
        }
        for col in self.partitions {
            schema.add_partition(col.name, col.data_type, col.comment.as_deref())?;
        }
        if let Some(clustering) = self.clustering {
            schema.set_clustering(
                clustering.columns,
                clustering.buckets,
                clustering.sort_by.as_deref(),
            )?;
        }
        if let Some(serializer) = self.serializer {
            schema.set_serializer(serializer.name, serializer.properties);
        }

        Ok(schema)
    }
}
