//! Delimited dictionary source.
//!
//! File format: `id\toriginal\tcorrected\than[\t...]`, no header. Empty
//! lines are skipped by the csv reader; any other line with fewer than four
//! fields fails the whole read.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use taigi_core::build::DictionaryRow;

const MIN_COLUMNS: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected at least 4 fields, found {columns}")]
    ShortRow { line: u64, columns: usize },
}

/// Read every row of the file at `path`.
pub fn read_rows(path: &Path, delimiter: u8) -> Result<Vec<DictionaryRow>, SourceError> {
    eprintln!("Reading {}...", path.display());
    let file = File::open(path)?;
    parse_rows(file, delimiter)
}

/// Parse rows from any reader.
pub fn parse_rows(reader: impl Read, delimiter: u8) -> Result<Vec<DictionaryRow>, SourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() < MIN_COLUMNS {
            return Err(SourceError::ShortRow {
                line,
                columns: record.len(),
            });
        }
        rows.push(DictionaryRow {
            line,
            original: record[1].to_string(),
            corrected: record[2].to_string(),
            han: record[3].to_string(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv() {
        let input = "1\ttsa-pou\ttsa-pou\t查埔\n\
                     2\tpa5\tpa5\t爬\textra\n";
        let rows = parse_rows(input.as_bytes(), b'\t').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].original, "tsa-pou");
        assert_eq!(rows[0].corrected, "tsa-pou");
        assert_eq!(rows[0].han, "查埔");
        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[1].han, "爬");
        assert_eq!(rows[1].line, 2);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let input = "1\tpa5\tpa5\t爬\n\n2\tho2\tho2\t好\n";
        let rows = parse_rows(input.as_bytes(), b'\t').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].original, "ho2");
    }

    #[test]
    fn test_short_row_is_fatal() {
        let input = "1\tpa5\tpa5\t爬\n2\tho2\tho2\n";
        let err = parse_rows(input.as_bytes(), b'\t').unwrap_err();
        assert!(matches!(
            err,
            SourceError::ShortRow {
                line: 2,
                columns: 3
            }
        ));
    }

    #[test]
    fn test_custom_delimiter() {
        let rows = parse_rows("1,pa5,pa5,爬\n".as_bytes(), b',').unwrap();
        assert_eq!(rows[0].han, "爬");
    }

    #[test]
    fn test_read_rows_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db2.csv");
        std::fs::write(&path, "1\tpa5\tpa5\t爬\n").unwrap();
        let rows = read_rows(&path, b'\t').unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_rows(&dir.path().join("missing.csv"), b'\t').unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }
}
