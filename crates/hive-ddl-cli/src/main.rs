//! `hive-ddl` - render Hive DDL from a declarative table definition
//!
//! ```bash
//! hive-ddl tables/events.yaml
//! hive-ddl --statement create --statement add-columns tables/events.json
//! LOG_FORMAT=json RUST_LOG=debug hive-ddl --config hive-ddl.yaml tables/events.yaml
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use hive_ddl::{TableDefinition, TableSchema};
use tracing::info;

mod config;
mod logging;

use config::{Config, OutputConfig, StatementKind};

#[derive(Debug, Parser)]
#[command(author, version, about = "Render Hive DDL from a table definition", long_about = None)]
struct Args {
    /// Table definition file (.json, .yaml or .yml)
    #[arg(required = true)]
    definition: PathBuf,

    /// Configuration file (defaults to ./hive-ddl.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Statement to print; repeat for several. Overrides the configured list.
    #[arg(long = "statement", value_enum)]
    statements: Vec<StatementKind>,

    /// Print the SHA-256 fingerprint of the CREATE TABLE statement instead
    #[arg(long)]
    fingerprint: bool,
}

fn load_definition(path: &Path) -> anyhow::Result<TableDefinition> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading table definition {}", path.display()))?;

    let definition = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => TableDefinition::from_json(&contents),
        _ => TableDefinition::from_yaml(&contents),
    }
    .with_context(|| format!("parsing table definition {}", path.display()))?;

    Ok(definition)
}

fn render(schema: &TableSchema, kind: StatementKind) -> String {
    match kind {
        StatementKind::Create => schema.create_table_statement(),
        StatementKind::AddColumns => schema.add_columns_statement(),
        StatementKind::ReplaceColumns => schema.replace_columns_statement(),
    }
}

fn render_all(schema: &TableSchema, output: &OutputConfig) -> String {
    output
        .statements
        .iter()
        .map(|kind| format!("{}{}", render(schema, *kind), output.terminator))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::discover(args.config.as_deref()).context("loading configuration")?;
    logging::init(&config.logging);

    if !args.statements.is_empty() {
        config.output.statements = args.statements;
    }

    let schema = load_definition(&args.definition)?
        .into_schema()
        .with_context(|| format!("building table from {}", args.definition.display()))?;
    info!(
        table = %schema.name(),
        columns = schema.columns().len(),
        partitions = schema.partitions().len(),
        "table definition loaded"
    );

    if args.fingerprint {
        println!("{}", schema.fingerprint());
    } else {
        println!("{}", render_all(&schema, &config.output));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn schema() -> TableSchema {
        TableDefinition::from_json(r#"{"name": "t", "columns": [{"name": "a", "type": "int"}]}"#)
            .unwrap()
            .into_schema()
            .unwrap()
    }

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_statement_flags() {
        let args = Args::parse_from([
            "hive-ddl",
            "--statement",
            "add-columns",
            "--statement",
            "replace-columns",
            "t.yaml",
        ]);
        assert_eq!(
            args.statements,
            vec![StatementKind::AddColumns, StatementKind::ReplaceColumns]
        );
        assert!(!args.fingerprint);
    }

    #[test]
    fn test_render_all_joins_with_terminator() {
        let output = OutputConfig {
            statements: vec![StatementKind::AddColumns, StatementKind::ReplaceColumns],
            terminator: ";".to_string(),
        };
        assert_eq!(
            render_all(&schema(), &output),
            "ALTER TABLE `t` ADD COLUMNS (\n`a` INT\n);\n\nALTER TABLE `t` REPLACE COLUMNS (\n`a` INT\n);"
        );
    }

    #[test]
    fn test_load_definition_by_extension() {
        let dir = std::env::temp_dir();
        let json = dir.join("hive_ddl_cli_def.json");
        let yaml = dir.join("hive_ddl_cli_def.yml");
        std::fs::write(&json, r#"{"name": "j", "columns": [{"name": "a", "type": "int"}]}"#).unwrap();
        std::fs::write(&yaml, "name: y\ncolumns:\n  - { name: a, type: int }\n").unwrap();

        assert_eq!(load_definition(&json).unwrap().name, "j");
        assert_eq!(load_definition(&yaml).unwrap().name, "y");
        assert!(load_definition(&dir.join("hive_ddl_cli_missing.yaml")).is_err());

        std::fs::remove_file(json).ok();
        std::fs::remove_file(yaml).ok();
    }
}
