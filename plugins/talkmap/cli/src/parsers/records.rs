use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

/// Decoded conversation records plus the count of undecodable ones.
///
/// Undecodable records stay in `records` as `Value::Null` so they still count
/// as (empty) conversations.
#[derive(Debug, Default)]
pub struct LoadedRecords {
    pub records: Vec<Value>,
    pub skipped: usize,
}

impl LoadedRecords {
    fn push_malformed(&mut self) {
        self.records.push(Value::Null);
        self.skipped += 1;
    }

    pub fn extend(&mut self, other: LoadedRecords) {
        self.records.extend(other.records);
        self.skipped += other.skipped;
    }
}

fn is_record_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("json") | Some("jsonl")
    )
}

/// Expand a file or directory into the record files it names.
///
/// Directories are scanned one level deep, sorted by path.
pub fn list_record_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        anyhow::bail!("Input not found: {}", path.display());
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)
        .with_context(|| format!("Failed to read directory: {}", path.display()))?
    {
        let entry = entry?;
        let file_path = entry.path();
        if file_path.is_file() && is_record_file(&file_path) {
            files.push(file_path);
        }
    }

    files.sort();
    Ok(files)
}

/// Load one record file.
///
/// `.jsonl`: one conversation per non-empty line. Anything else: one JSON
/// document, where a top-level array is a list of conversations.
pub fn load_record_file(path: &Path) -> Result<LoadedRecords> {
    let is_jsonl = path.extension().and_then(|s| s.to_str()) == Some("jsonl");
    let loaded = if is_jsonl {
        load_jsonl(path)?
    } else {
        load_document(path)?
    };
    debug!(
        "loaded {} records from {} ({} malformed)",
        loaded.records.len(),
        path.display(),
        loaded.skipped
    );
    Ok(loaded)
}

fn load_document(path: &Path) -> Result<LoadedRecords> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to open record file: {}", path.display()))?;

    let mut loaded = LoadedRecords::default();
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Array(items)) => loaded.records.extend(items),
        Ok(record) => loaded.records.push(record),
        Err(e) => {
            warn!("skipping malformed record {}: {}", path.display(), e);
            loaded.push_malformed();
        }
    }
    Ok(loaded)
}

/// Lines are split on raw bytes so an undecodable line only costs that record.
fn load_jsonl(path: &Path) -> Result<LoadedRecords> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open record file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut loaded = LoadedRecords::default();
    for (line_num, line) in reader.split(b'\n').enumerate() {
        let line = line.with_context(|| format!("Failed to read record file: {}", path.display()))?;

        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match serde_json::from_slice::<Value>(&line) {
            Ok(record) => loaded.records.push(record),
            Err(e) => {
                warn!(
                    "skipping malformed record at line {} in {}: {}",
                    line_num + 1,
                    path.display(),
                    e
                );
                loaded.push_malformed();
            }
        }
    }
    Ok(loaded)
}

/// Load every record named by `inputs`, in argument order then file order.
/// Returns the files read alongside the records.
pub fn load_inputs(inputs: &[PathBuf]) -> Result<(Vec<PathBuf>, LoadedRecords)> {
    let mut files = Vec::new();
    let mut loaded = LoadedRecords::default();

    for input in inputs {
        for file in list_record_files(input)? {
            loaded.extend(load_record_file(&file)?);
            files.push(file);
        }
    }

    Ok((files, loaded))
}
