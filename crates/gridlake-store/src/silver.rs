use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use gridlake_core::Table;
use serde::Serialize;

use crate::{join_relative, StoreError};

/// Normalized CSV tables under `{root}/{source}/{descriptor}/{table}.csv`.
#[derive(Debug, Clone)]
pub struct SilverStore {
    root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SilverTableReport {
    pub source: String,
    pub descriptor: String,
    pub table: String,
    pub rows: usize,
    pub path: PathBuf,
}

impl SilverStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    pub fn table_path(
        &self,
        source: &str,
        descriptor: &str,
        table: &str,
    ) -> Result<PathBuf, StoreError> {
        join_relative(&self.root, &format!("{source}/{descriptor}/{table}.csv"))
    }

    /// Normalizes `table` and replaces the file at its table path.
    pub fn write_table(
        &self,
        source: &str,
        descriptor: &str,
        table_name: &str,
        mut table: Table,
    ) -> Result<SilverTableReport, StoreError> {
        table.normalize();
        let path = self.table_path(source, descriptor, table_name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&path)?);
        write_csv_line(&mut writer, table.columns())?;
        for row in table.rows() {
            write_csv_line(&mut writer, row)?;
        }
        writer.flush()?;

        tracing::info!(
            source,
            descriptor,
            rows = table.len(),
            path = %path.display(),
            "wrote silver table"
        );
        Ok(SilverTableReport {
            source: source.to_owned(),
            descriptor: descriptor.to_owned(),
            table: table_name.to_owned(),
            rows: table.len(),
            path,
        })
    }
}

fn write_csv_line<W: Write>(writer: &mut W, fields: &[String]) -> Result<(), std::io::Error> {
    let line: Vec<String> = fields.iter().map(|field| escape_csv_field(field)).collect();
    writeln!(writer, "{}", line.join(","))
}

/// Quotes fields holding a separator, quote or line break.
fn escape_csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridlake_core::{LoadRecord, UtcDateTime};
    use tempfile::tempdir;

    fn load(timestamp: &str, mw: f64) -> LoadRecord {
        LoadRecord {
            timestamp_utc: UtcDateTime::parse(timestamp).expect("valid timestamp"),
            load_mw: mw,
        }
    }

    #[test]
    fn writes_sorted_deduplicated_csv() {
        let temp = tempdir().expect("tempdir");
        let store = SilverStore::new(temp.path());
        let table = Table::from_records(&[
            load("2024-01-15T00:30:00Z", 2.5),
            load("2024-01-15T00:00:00Z", 1.0),
            load("2024-01-15T00:30:00Z", 2.5),
        ]);

        let report = store
            .write_table("entsoe", "total_load", "load", table)
            .expect("write succeeds");

        assert_eq!(report.rows, 2);
        assert_eq!(report.path, temp.path().join("entsoe/total_load/load.csv"));
        let content = fs::read_to_string(&report.path).expect("readable");
        assert_eq!(
            content,
            "timestamp_utc,load_mw\n2024-01-15T00:00:00Z,1\n2024-01-15T00:30:00Z,2.5\n"
        );
    }

    #[test]
    fn escapes_separators_and_quotes() {
        assert_eq!(escape_csv_field("plain"), "plain");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
