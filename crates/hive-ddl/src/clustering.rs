//! Bucketing clause: `CLUSTERED BY (...) [SORTED BY (...) ]INTO n BUCKETS`

use std::fmt;

use serde::Serialize;

use crate::error::{Result, SchemaError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clustering {
    columns: Vec<String>,
    number_of_buckets: u32,
    /// Raw SQL fragment placed inside `SORTED BY (...)`, not parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_by: Option<String>,
}

impl Clustering {
    pub fn new<I, S>(columns: I, number_of_buckets: u32, sort_by: Option<&str>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        if columns.is_empty() {
            return Err(SchemaError::invalid(
                "clustering",
                "columns",
                "must name at least one column",
            ));
        }
        if number_of_buckets == 0 {
            return Err(SchemaError::invalid(
                "clustering",
                "number_of_buckets",
                "must be a positive integer, got 0",
            ));
        }

        Ok(Self {
            columns,
            number_of_buckets,
            sort_by: sort_by.map(str::to_string),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn number_of_buckets(&self) -> u32 {
        self.number_of_buckets
    }

    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }
}

impl fmt::Display for Clustering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CLUSTERED BY ({}) ", self.columns.join(", "))?;
        if let Some(sort_by) = &self.sort_by {
            write!(f, "SORTED BY ({}) ", sort_by)?;
        }
        write!(f, "INTO {} BUCKETS", self.number_of_buckets)
    }
}
