//! Parser for labeled vector files
//!
//! One object per line, values separated by whitespace. Every token that
//! can be read as a number is an attribute, the other tokens are joined
//! (with a space) into the object label. Empty lines and lines starting
//! with `#` are ignored. All objects must have the same dimensionality.
//!
//! Besides decimal numbers, only the exact words `NaN` and `Infinity`
//! (optionally signed) are read as numbers; they are then rejected since
//! attributes must be finite. Any other word (`nan`, `inf`, ...) is a label.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::info;
use ndarray::Array1;

use crate::data::LabeledDataset;
use crate::error::{KnnError, Result};

pub const COMMENT: &str = "#";

/// Separator between the label tokens of an object
pub const LABEL_CONCATENATION: &str = " ";

/// Parses labeled vectors from a reader
pub fn parse_reader<R: BufRead>(reader: R) -> Result<LabeledDataset> {
    let mut dataset = LabeledDataset::new();

    for (ix, line) in reader.lines().enumerate() {
        let line_number = ix + 1;
        let line = line?;
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }

        let (attributes, label) = parse_line(&line);
        if attributes.is_empty() && label.is_empty() {
            continue;
        }

        if let Some(value) = attributes.iter().find(|x| !x.is_finite()) {
            return Err(KnnError::InvalidAttribute {
                line: line_number,
                value: *value,
            });
        }

        if let Some(expected) = dataset.dimensionality() {
            if expected != attributes.len() {
                return Err(KnnError::DimensionMismatch {
                    line: line_number,
                    expected,
                    actual: attributes.len(),
                });
            }
        }
        dataset.push(Array1::from(attributes), label)?;
    }

    Ok(dataset)
}

/// Parses a labeled vector file
pub fn parse_file(path: &Path) -> Result<LabeledDataset> {
    let file = File::options().read(true).open(path)?;
    let dataset = parse_reader(BufReader::new(file))?;
    info!(
        "Read {} objects of dimension {} from {}",
        dataset.len(),
        dataset.dimensionality().unwrap_or(0),
        path.display()
    );
    Ok(dataset)
}

fn parse_line(line: &str) -> (Vec<f64>, String) {
    let mut attributes = Vec::new();
    let mut label = String::new();

    for token in line.split_whitespace() {
        match parse_number(token) {
            Some(value) => attributes.push(value),
            None => {
                if !label.is_empty() {
                    label.push_str(LABEL_CONCATENATION);
                }
                label.push_str(token);
            }
        }
    }

    (attributes, label)
}

/// Reads a number; Rust also accepts `inf`, `nan`, `infinity` in any case,
/// which are labels here
fn parse_number(token: &str) -> Option<f64> {
    let unsigned = token.trim_start_matches(['+', '-']);
    match unsigned {
        "NaN" | "Infinity" => {}
        _ if unsigned
            .chars()
            .any(|c| c.is_alphabetic() && c != 'e' && c != 'E') =>
        {
            return None
        }
        _ => {}
    }
    token.parse::<f64>().ok()
}
