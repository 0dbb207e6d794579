//! Fixed-width text.
//!
//! Column boundaries are the runs of character positions that hold a
//! non-whitespace character on at least one line; positions blank on every
//! line are gutters. The first non-blank line is the header. Every column is
//! read as text, and empty fields are null.

use std::path::Path;

use polars::prelude::*;

use super::{io_error, unique_names};
use crate::error::{IngestError, Result};

/// Read a fixed-width text file.
pub fn read_fixed_width(path: &Path) -> Result<DataFrame> {
    let content = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_fixed_width(&content)?.ok_or_else(|| IngestError::NoHeaderDetected {
        path: path.to_path_buf(),
    })
}

/// Parse fixed-width text; `None` when there is no header line.
pub fn parse_fixed_width(content: &str) -> Result<Option<DataFrame>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let lines: Vec<Vec<char>> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().collect())
        .collect();

    let Some((header, rows)) = lines.split_first() else {
        return Ok(None);
    };
    let spans = column_spans(&lines);
    if spans.is_empty() {
        return Ok(None);
    }

    let names = header_names(header, &spans);
    let columns: Vec<Column> = spans
        .iter()
        .zip(names)
        .map(|(&(start, end), name)| {
            let values: Vec<Option<String>> = rows
                .iter()
                .map(|row| Some(field(row, start, end)).filter(|value| !value.is_empty()))
                .collect();
            Series::new(name.into(), values).into_column()
        })
        .collect();

    Ok(Some(DataFrame::new(columns)?))
}

/// `[start, end)` character ranges of each column.
fn column_spans(lines: &[Vec<char>]) -> Vec<(usize, usize)> {
    let width = lines.iter().map(Vec::len).max().unwrap_or(0);
    let occupied = |pos: usize| {
        lines
            .iter()
            .any(|line| line.get(pos).is_some_and(|ch| !ch.is_whitespace()))
    };

    let mut spans = Vec::new();
    let mut start = None;
    for pos in 0..width {
        match (occupied(pos), start) {
            (true, None) => start = Some(pos),
            (false, Some(begin)) => {
                spans.push((begin, pos));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(begin) = start {
        spans.push((begin, width));
    }
    spans
}

fn header_names(header: &[char], spans: &[(usize, usize)]) -> Vec<String> {
    unique_names(
        spans
            .iter()
            .map(|&(start, end)| Some(field(header, start, end)).filter(|name| !name.is_empty())),
    )
}

fn field(line: &[char], start: usize, end: usize) -> String {
    let end = end.min(line.len());
    if start >= end {
        return String::new();
    }
    line[start..end].iter().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gutters_split_columns() {
        let text = "id  country      code\n1   Canada       CA\n2   Bulgaria\n";
        let df = parse_fixed_width(text).unwrap().unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["id", "country", "code"]);
        assert_eq!(df.height(), 2);

        let code = df.column("code").unwrap().str().unwrap();
        assert_eq!(code.get(0), Some("CA"));
        assert_eq!(code.get(1), None);
    }

    #[test]
    fn test_duplicate_and_blank_headers() {
        let text = "a    a\nx  y z\n";
        let df = parse_fixed_width(text).unwrap().unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, ["a", "column_2", "a_2"]);
    }

    #[test]
    fn test_blank_input() {
        assert!(parse_fixed_width("\n   \n").unwrap().is_none());
    }
}
