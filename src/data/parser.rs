//! Text Parser Module
//! Reads the whitespace-delimited files shipped with the dataset.
//!
//! Every file is headerless. Values are separated by one or more spaces and
//! lines may carry leading padding, so splitting on whitespace is enough.
//! Blank lines are skipped and line numbers in errors are 1-based.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("line {line}: '{token}' is not a number")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: expected {expected} values, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: missing name after id")]
    MissingName { line: usize },
}

/// Non-blank lines with their 1-based line numbers.
fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Parse a float matrix, one row per line.
pub fn parse_matrix(text: &str) -> Result<Vec<Vec<f64>>, ParseError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (line_no, line) in data_lines(text) {
        let row = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                    line: line_no,
                    token: tok.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(ParseError::RaggedRow {
                    line: line_no,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Parse a single integer per line (subjects, labels).
pub fn parse_int_column(text: &str) -> Result<Vec<i64>, ParseError> {
    data_lines(text)
        .map(|(line_no, line)| {
            let mut tokens = line.split_whitespace();
            let tok = tokens.next().unwrap_or_default();
            let found = 1 + tokens.count();
            if found != 1 {
                return Err(ParseError::RaggedRow {
                    line: line_no,
                    expected: 1,
                    found,
                });
            }
            tok.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
                line: line_no,
                token: tok.to_string(),
            })
        })
        .collect()
}

/// Parse `<id> <name>` lines (activity labels, feature names).
pub fn parse_name_table(text: &str) -> Result<Vec<(i64, String)>, ParseError> {
    data_lines(text)
        .map(|(line_no, line)| {
            let (id, name) = line
                .split_once(char::is_whitespace)
                .ok_or(ParseError::MissingName { line: line_no })?;
            let id = id.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
                line: line_no,
                token: id.to_string(),
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ParseError::MissingName { line: line_no });
            }
            Ok((id, name.to_string()))
        })
        .collect()
}
