//! Column clause: `` `name` TYPE [COMMENT '...'] ``

use std::fmt;

use serde::Serialize;

use crate::error::{Result, SchemaError};

/// A single column of a table or of its partition key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    name: String,
    #[serde(rename = "type")]
    data_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl Column {
    pub fn new(
        name: impl Into<String>,
        data_type: impl Into<String>,
        comment: Option<&str>,
    ) -> Result<Self> {
        let name = name.into();
        let data_type = data_type.into();

        if name.is_empty() {
            return Err(SchemaError::invalid("column", "name", "must not be empty"));
        }
        if data_type.is_empty() {
            return Err(SchemaError::invalid(
                "column",
                "type",
                format!("must not be empty (column `{}`)", name),
            ));
        }

        Ok(Self {
            name,
            data_type,
            comment: comment.map(str::to_string),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` {}", self.name, self.data_type.to_uppercase())?;
        if let Some(comment) = &self.comment {
            write!(f, " COMMENT '{}'", comment)?;
        }
        Ok(())
    }
}

/// Parenthesised column list, one column per line.
pub(crate) fn column_list(columns: &[Column]) -> String {
    let cols = columns
        .iter()
        .map(Column::to_string)
        .collect::<Vec<_>>()
        .join(",\n");
    format!("(\n{}\n)", cols)
}
