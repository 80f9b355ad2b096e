//! `ROW FORMAT` clause: delimited text or a named SerDe

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

pub const DEFAULT_FIELD_SEPARATOR: &str = "\t";
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";
pub const DEFAULT_COLLECTION_SEPARATOR: &str = "|";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RowFormat {
    Delimited {
        field_separator: String,
        line_separator: String,
        collection_separator: String,
    },
    Serde {
        name: String,
        /// Sorted by key, which fixes the `WITH SERDEPROPERTIES` order.
        properties: BTreeMap<String, String>,
    },
}

impl RowFormat {
    pub fn is_delimited(&self) -> bool {
        matches!(self, RowFormat::Delimited { .. })
    }
}

impl Default for RowFormat {
    fn default() -> Self {
        RowFormat::Delimited {
            field_separator: DEFAULT_FIELD_SEPARATOR.to_string(),
            line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
            collection_separator: DEFAULT_COLLECTION_SEPARATOR.to_string(),
        }
    }
}

impl fmt::Display for RowFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFormat::Delimited {
                field_separator,
                line_separator,
                collection_separator,
            } => write!(
                f,
                "DELIMITED\n  FIELDS TERMINATED BY '{}'\n  COLLECTION ITEMS TERMINATED BY '{}'\n  LINES TERMINATED BY '{}'",
                field_separator, collection_separator, line_separator
            ),
            RowFormat::Serde { name, properties } => {
                write!(f, "SERDE '{}'", name)?;
                if !properties.is_empty() {
                    let kvs = properties
                        .iter()
                        .map(|(k, v)| format!("\"{}\" = \"{}\"", k, v))
                        .collect::<Vec<_>>()
                        .join(",\n");
                    write!(f, "\nWITH SERDEPROPERTIES ({})", kvs)?;
                }
                Ok(())
            }
        }
    }
}
