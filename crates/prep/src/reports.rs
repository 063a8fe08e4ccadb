//! JSON artifact files consumed by the external benchmark code.
//!
//! One artifact set per dataset name, under the output directory:
//!
//! - `queries/<Name>_queries.json`: array of query indices.
//! - `radii/<Name>_radii.json`: object mapping each selectivity's string
//!   representation to its calibrated radius.
//! - `pivots/<Name>_pivots_<P>.json`: array of pivot indices, one file per
//!   pivot count P.
//!
//! Writers create destination directories as needed and overwrite existing
//! artifacts; there are no append or merge semantics.

use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Writes the query sample for the named dataset.
///
/// # Errors
///
/// * If the destination directory cannot be created.
/// * If the file cannot be created or written.
pub fn write_queries<P: AsRef<Path>>(out_dir: P, name: &str, queries: &[usize]) -> Result<PathBuf, String> {
    let path = artifact_path(out_dir, "queries", &format!("{name}_queries.json"))?;
    write_json(&path, &queries)?;
    Ok(path)
}

/// Reads a query sample back from the given path.
///
/// # Errors
///
/// * If the file cannot be opened or does not parse as an array of indices.
pub fn read_queries<P: AsRef<Path>>(path: P) -> Result<Vec<usize>, String> {
    read_json(path.as_ref())
}

/// Writes the radius table for the named dataset, keyed by each
/// selectivity's string representation.
///
/// # Errors
///
/// * If the destination directory cannot be created.
/// * If the file cannot be created or written.
pub fn write_radii<P: AsRef<Path>>(out_dir: P, name: &str, table: &[(f32, f32)]) -> Result<PathBuf, String> {
    let table = table
        .iter()
        .map(|&(s, radius)| (format!("{s}"), radius))
        .collect::<BTreeMap<_, _>>();
    let path = artifact_path(out_dir, "radii", &format!("{name}_radii.json"))?;
    write_json(&path, &table)?;
    Ok(path)
}

/// Reads a radius table back from the given path.
///
/// # Errors
///
/// * If the file cannot be opened or does not parse as a radius table.
pub fn read_radii<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, f32>, String> {
    read_json(path.as_ref())
}

/// Writes one pivot set for the named dataset and pivot count.
///
/// # Errors
///
/// * If the destination directory cannot be created.
/// * If the file cannot be created or written.
pub fn write_pivots<P: AsRef<Path>>(out_dir: P, name: &str, pivots: &[usize]) -> Result<PathBuf, String> {
    let file_name = format!("{name}_pivots_{}.json", pivots.len());
    let path = artifact_path(out_dir, "pivots", &file_name)?;
    write_json(&path, &pivots)?;
    Ok(path)
}

/// Reads a pivot set back from the given path.
///
/// # Errors
///
/// * If the file cannot be opened or does not parse as an array of indices.
pub fn read_pivots<P: AsRef<Path>>(path: P) -> Result<Vec<usize>, String> {
    read_json(path.as_ref())
}

/// Builds the path for an artifact file, creating its directory as needed.
fn artifact_path<P: AsRef<Path>>(out_dir: P, sub_dir: &str, file_name: &str) -> Result<PathBuf, String> {
    let dir = out_dir.as_ref().join(sub_dir);
    std::fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
    Ok(dir.join(file_name))
}

/// Serializes the given value to the given path as pretty JSON.
fn write_json<S: serde::Serialize>(path: &Path, value: &S) -> Result<(), String> {
    let file = std::fs::File::create(path).map_err(|e| e.to_string())?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|e| e.to_string())
}

/// Deserializes a value from the JSON file at the given path.
fn read_json<D: serde::de::DeserializeOwned>(path: &Path) -> Result<D, String> {
    let file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| e.to_string())
}
