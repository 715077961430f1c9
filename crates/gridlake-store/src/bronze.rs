use std::fs;
use std::path::{Path, PathBuf};

use gridlake_core::RawPayload;
use serde::Serialize;

use crate::{join_relative, StoreError};

/// Raw response bodies, stored verbatim under `{root}/{source}/{logical_path}`.
#[derive(Debug, Clone)]
pub struct BronzeStore {
    root: PathBuf,
}

/// A payload file found under a source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BronzeFile {
    pub source: String,
    /// First component of the logical path: the report or query name.
    pub descriptor: String,
    pub logical_path: String,
    pub path: PathBuf,
}

/// Outcome of persisting one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BronzeWriteReport {
    pub written: usize,
    pub skipped_empty: usize,
    pub paths: Vec<PathBuf>,
}

impl BronzeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Writes one payload; blank bodies are skipped and return `None`.
    pub fn write(&self, payload: &RawPayload) -> Result<Option<PathBuf>, StoreError> {
        if payload.payload.trim().is_empty() {
            tracing::warn!(
                source = %payload.source_name,
                path = %payload.logical_path,
                "skipping empty payload"
            );
            return Ok(None);
        }

        let source_root = join_relative(&self.root, &payload.source_name)?;
        let path = join_relative(&source_root, &payload.logical_path)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, payload.payload.as_bytes())?;
        tracing::debug!(path = %path.display(), bytes = payload.payload.len(), "wrote bronze payload");
        Ok(Some(path))
    }

    pub fn write_all(&self, payloads: &[RawPayload]) -> Result<BronzeWriteReport, StoreError> {
        let mut report = BronzeWriteReport::default();
        for payload in payloads {
            match self.write(payload)? {
                Some(path) => {
                    report.written += 1;
                    report.paths.push(path);
                }
                None => report.skipped_empty += 1,
            }
        }
        tracing::info!(
            root = %self.root.display(),
            written = report.written,
            skipped = report.skipped_empty,
            "bronze write complete"
        );
        Ok(report)
    }

    /// Every payload file of `source`, sorted by logical path. A source that
    /// was never extracted has no files.
    pub fn list(&self, source: &str) -> Result<Vec<BronzeFile>, StoreError> {
        let source_root = join_relative(&self.root, source)?;
        if !source_root.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        collect_files(&source_root, &mut paths)?;

        let mut files: Vec<BronzeFile> = paths
            .into_iter()
            .filter_map(|path| {
                let relative = path.strip_prefix(&source_root).ok()?;
                let descriptor = relative
                    .components()
                    .next()?
                    .as_os_str()
                    .to_string_lossy()
                    .into_owned();
                let logical_path = relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                Some(BronzeFile {
                    source: source.to_owned(),
                    descriptor,
                    logical_path,
                    path,
                })
            })
            .collect();
        files.sort_by(|left, right| left.logical_path.cmp(&right.logical_path));
        Ok(files)
    }

    pub fn read(&self, file: &BronzeFile) -> Result<String, StoreError> {
        let bytes = fs::read(&file.path)?;
        String::from_utf8(bytes).map_err(|_| StoreError::NotUtf8 {
            path: file.path.clone(),
        })
    }
}

/// Recursively collect regular files from a directory.
fn collect_files(root: &Path, files: &mut Vec<PathBuf>) -> Result<(), std::io::Error> {
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(path.as_path(), files)?;
            continue;
        }
        files.push(path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn payload(path: &str, body: &str) -> RawPayload {
        RawPayload {
            payload: body.to_owned(),
            source_name: String::from("elexon"),
            logical_path: path.to_owned(),
        }
    }

    #[test]
    fn writes_payload_under_source_and_logical_path() {
        let temp = tempdir().expect("tempdir");
        let store = BronzeStore::new(temp.path());

        let written = store
            .write(&payload("total_load/2024-01-15.json", "{\"data\":[]}"))
            .expect("write succeeds")
            .expect("non-empty payload is written");

        assert_eq!(written, temp.path().join("elexon/total_load/2024-01-15.json"));
        assert_eq!(fs::read_to_string(written).expect("readable"), "{\"data\":[]}");
    }

    #[test]
    fn blank_payloads_are_counted_not_written() {
        let temp = tempdir().expect("tempdir");
        let store = BronzeStore::new(temp.path());

        let report = store
            .write_all(&[
                payload("a/2024-01-01.xml", "<a/>"),
                payload("a/2024-01-02.xml", "  \n"),
            ])
            .expect("write succeeds");

        assert_eq!(report.written, 1);
        assert_eq!(report.skipped_empty, 1);
        assert!(!temp.path().join("elexon/a/2024-01-02.xml").exists());
    }

    #[test]
    fn lists_files_sorted_with_descriptor() {
        let temp = tempdir().expect("tempdir");
        let store = BronzeStore::new(temp.path());
        store
            .write_all(&[
                payload("b/2024-01-02.xml", "<b/>"),
                payload("a/2024-01-01_P02.xml", "<a/>"),
                payload("a/2024-01-01_P01.xml", "<a/>"),
            ])
            .expect("write succeeds");

        let files = store.list("elexon").expect("list succeeds");
        let logical: Vec<&str> = files.iter().map(|f| f.logical_path.as_str()).collect();
        assert_eq!(
            logical,
            vec!["a/2024-01-01_P01.xml", "a/2024-01-01_P02.xml", "b/2024-01-02.xml"]
        );
        assert_eq!(files[2].descriptor, "b");
        assert_eq!(store.read(&files[2]).expect("readable"), "<b/>");
        assert!(store.list("entsoe").expect("missing source is fine").is_empty());
    }

    #[test]
    fn refuses_paths_outside_the_root() {
        let temp = tempdir().expect("tempdir");
        let store = BronzeStore::new(temp.path());
        let err = store
            .write(&payload("../escape.xml", "<x/>"))
            .expect_err("must fail");
        assert!(matches!(err, StoreError::UnsafePath(_)));
    }
}
