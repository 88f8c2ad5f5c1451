use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

/// Reads a whole JSON document from `path`.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))
}

/// Like [`read_json_file`], but `Ok(None)` when the file does not exist.
pub fn read_json_file_if_exists<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    read_json_file(path).map(Some)
}

/// Write-then-rename wrapper: the target is replaced only once the whole
/// document has been written and synced.
pub struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

impl PendingWrite {
    pub fn open(target: &Path) -> Result<Self> {
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
        let tmp = NamedTempFile::new_in(parent).context("create temp file")?;
        Ok(Self { target: target.to_path_buf(), tmp })
    }

    pub fn finalize(self) -> Result<()> {
        self.tmp.as_file().sync_all().ok(); // best-effort fsync file
        self.tmp.persist(&self.target)
            .with_context(|| format!("rename to {}", self.target.display()))?;
        if let Some(dir) = self.target.parent() {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
        Ok(())
    }
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.tmp.write(buf) }
    fn flush(&mut self) -> std::io::Result<()> { self.tmp.flush() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle { Compact, Pretty }

/// Serializes `value` to `path` atomically. On error the previous file, if
/// any, is left untouched.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T, style: JsonStyle) -> Result<()> {
    let mut pending = PendingWrite::open(path)?;
    {
        let mut out = BufWriter::new(&mut pending);
        match style {
            JsonStyle::Compact => serde_json::to_writer(&mut out, value),
            JsonStyle::Pretty => serde_json::to_writer_pretty(&mut out, value),
        }
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
        out.flush().with_context(|| format!("write {}", path.display()))?;
    }
    pending.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn writes_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/doc.json");
        write_json_atomic(&path, &json!({ "a": [1, 2] }), JsonStyle::Pretty).unwrap();
        let back: Value = read_json_file(&path).unwrap();
        assert_eq!(back, json!({ "a": [1, 2] }));
    }

    #[test]
    fn replaces_existing_file_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, "old").unwrap();
        write_json_atomic(&path, &json!([1]), JsonStyle::Compact).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1]");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let got: Option<Value> = read_json_file_if_exists(&dir.path().join("nope.json")).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn invalid_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_json_file::<Value>(&path).unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
    }
}
