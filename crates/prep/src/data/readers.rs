//! Readers for the raw dataset files.
//!
//! Each reader handles one of the closed set of input formats from the
//! dataset registry. The format is chosen by configuration, never inferred
//! from file contents. Malformed, non-numeric, or non-UTF-8 lines are
//! skipped on a best-effort basis, and rows that do not match the dataset's
//! dimensionality are dropped; both are counted and logged as inherited
//! data loss.

use std::io::BufRead;

use super::FlatVec;

/// Reads a vector dataset whose first line holds the dimensionality.
///
/// Every following line is a space-separated vector of that many floats.
///
/// # Errors
///
/// * If the file cannot be opened or read.
/// * If the header line is missing or does not parse as a dimensionality.
/// * If no valid rows remain.
pub fn read_headered<P: AsRef<std::path::Path>>(path: P) -> Result<FlatVec<Vec<f32>>, String> {
    let path = path.as_ref();
    let mut lines = open_lines(path)?;

    let header = lines.next().ok_or_else(|| format!("Empty dataset file: {path:?}"))??;
    let header = String::from_utf8(header).map_err(|e| format!("Bad header line in {path:?}: {e}"))?;
    let dim = header
        .split_whitespace()
        .next()
        .ok_or_else(|| format!("Blank header line in {path:?}"))?
        .parse::<usize>()
        .map_err(|e| format!("Bad dimensionality header in {path:?}: {e}"))?;

    let mut skipped = 0;
    let mut rows = Vec::new();
    for line in lines {
        match core::str::from_utf8(&line?).ok().and_then(parse_row) {
            Some(row) if row.len() == dim => rows.push(row),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        ftlog::warn!("Dropped {skipped} malformed or off-dimension row(s) from {path:?}.");
    }

    FlatVec::new(rows).map(|data| data.with_dim_lower_bound(dim).with_dim_upper_bound(dim))
}

/// Reads a vector dataset without a header line.
///
/// Every line is a space-separated float vector; the dimensionality is
/// inferred from the first row that parses. Rows of any other dimensionality
/// are dropped.
///
/// # Errors
///
/// * If the file cannot be opened or read.
/// * If no valid rows remain.
pub fn read_headerless<P: AsRef<std::path::Path>>(path: P) -> Result<FlatVec<Vec<f32>>, String> {
    let path = path.as_ref();

    let mut skipped = 0;
    let mut dim = None;
    let mut rows = Vec::new();
    for line in open_lines(path)? {
        match core::str::from_utf8(&line?).ok().and_then(parse_row) {
            Some(row) if !row.is_empty() => {
                let d = *dim.get_or_insert(row.len());
                if row.len() == d {
                    rows.push(row);
                } else {
                    skipped += 1;
                }
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        ftlog::warn!("Dropped {skipped} malformed or off-dimension row(s) from {path:?}.");
    }

    let dim = dim.unwrap_or_default();
    FlatVec::new(rows).map(|data| data.with_dim_lower_bound(dim).with_dim_upper_bound(dim))
}

/// Reads a string dataset with one item per line; empty and non-UTF-8 lines
/// are skipped.
///
/// # Errors
///
/// * If the file cannot be opened or read.
/// * If no non-empty lines remain.
pub fn read_lines<P: AsRef<std::path::Path>>(path: P) -> Result<FlatVec<String>, String> {
    let path = path.as_ref();

    let mut skipped = 0;
    let mut items = Vec::new();
    for line in open_lines(path)? {
        match String::from_utf8(line?) {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    items.push(line.to_string());
                }
            }
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        ftlog::warn!("Dropped {skipped} non-UTF-8 line(s) from {path:?}.");
    }

    FlatVec::new(items)
}

/// Opens the file at the given path as an iterator of raw lines, split on
/// `\n` with any trailing `\r` removed.
///
/// Lines come out as bytes so that undecodable content corrupts only its own
/// line; the callers decide whether to decode, skip, or fail.
fn open_lines(path: &std::path::Path) -> Result<impl Iterator<Item = Result<Vec<u8>, String>>, String> {
    if !path.exists() {
        return Err(format!("Path {path:?} does not exist!"));
    }
    let file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut reader = std::io::BufReader::new(file);
    Ok(core::iter::from_fn(move || {
        let mut buf = Vec::new();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
                Some(Ok(buf))
            }
            Err(e) => Some(Err(e.to_string())),
        }
    }))
}

/// Parses one line as a space-separated float vector, or `None` if any field
/// fails to parse.
fn parse_row(line: &str) -> Option<Vec<f32>> {
    line.split_whitespace().map(|field| field.parse::<f32>().ok()).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::data::Dataset;

    use super::{read_headered, read_headerless, read_lines};

    /// Writes the given bytes to a file in the given directory.
    fn write_bytes(dir: &tempdir::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap_or_else(|e| unreachable!("{e}"));
        file.write_all(contents).unwrap_or_else(|e| unreachable!("{e}"));
        path
    }

    /// Writes the given contents to a file in the given directory.
    fn write_file(dir: &tempdir::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        write_bytes(dir, name, contents.as_bytes())
    }

    #[test]
    fn headered() -> Result<(), String> {
        let dir = tempdir::TempDir::new("readers").map_err(|e| e.to_string())?;
        let path = write_file(&dir, "la.txt", "2 12345\n0.0 1.0\n2.0 3.0\nnot numbers\n4.0 5.0 6.0\n7.0 8.0\n");

        let data = read_headered(&path)?;
        assert_eq!(data.cardinality(), 3);
        assert_eq!(data.dimensionality_hint(), (2, Some(2)));
        assert_eq!(data.get(2), &vec![7.0, 8.0]);

        assert!(read_headered(dir.path().join("missing.txt")).is_err());

        Ok(())
    }

    #[test]
    fn headerless() -> Result<(), String> {
        let dir = tempdir::TempDir::new("readers").map_err(|e| e.to_string())?;
        let path = write_file(&dir, "color.txt", "0.0 1.0 2.0\n3.0 4.0 5.0\n6.0 7.0\n8.0 9.0 10.0\n");

        let data = read_headerless(&path)?;
        assert_eq!(data.cardinality(), 3);
        assert_eq!(data.dimensionality_hint(), (3, Some(3)));
        assert_eq!(data.get(1), &vec![3.0, 4.0, 5.0]);

        let empty = write_file(&dir, "empty.txt", "");
        assert!(read_headerless(&empty).is_err());

        Ok(())
    }

    #[test]
    fn lines() -> Result<(), String> {
        let dir = tempdir::TempDir::new("readers").map_err(|e| e.to_string())?;
        let path = write_file(&dir, "words.txt", "alpha\n\nbeta\n  \ngamma\n");

        let data = read_lines(&path)?;
        assert_eq!(data.cardinality(), 3);
        assert_eq!(data.get(0), "alpha");
        assert_eq!(data.get(2), "gamma");

        Ok(())
    }

    #[test]
    fn non_utf8_lines_are_skipped() -> Result<(), String> {
        let dir = tempdir::TempDir::new("readers").map_err(|e| e.to_string())?;

        // "ca\xf1on" is latin-1; only that line is dropped.
        let path = write_bytes(&dir, "words.txt", b"alpha\nca\xf1on\nbeta\n");
        let data = read_lines(&path)?;
        assert_eq!(data.cardinality(), 2);
        assert_eq!(data.get(0), "alpha");
        assert_eq!(data.get(1), "beta");

        let path = write_bytes(&dir, "color.txt", b"0.0 1.0\n2.0 \xff\n4.0 5.0\n");
        let data = read_headerless(&path)?;
        assert_eq!(data.cardinality(), 2);
        assert_eq!(data.get(1), &vec![4.0, 5.0]);

        Ok(())
    }
}
