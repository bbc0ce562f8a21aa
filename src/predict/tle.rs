use std::fs;
use std::path::Path;

use sgp4::{Constants, Elements};

use super::error::PredictError;

/// A parsed three-line element record: object name plus the two element
/// lines, ready for propagation.
#[derive(Debug)]
pub struct TleRecord {
    pub name: String,
    pub elements: Elements,
    pub constants: Constants,
}

/// Load a three-line TLE file (name, line 1, line 2).
pub fn load_tle_file(path: &Path) -> Result<TleRecord, PredictError> {
    let content = fs::read_to_string(path)?;
    parse_tle(&content, &path.display().to_string())
}

fn parse_tle(content: &str, file: &str) -> Result<TleRecord, PredictError> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() != 3 {
        return Err(PredictError::InvalidTle {
            file: file.to_string(),
            message: format!(
                "expected 3 lines (name plus two element lines), found {}",
                lines.len()
            ),
        });
    }

    let elements = Elements::from_tle(
        Some(lines[0].to_string()),
        lines[1].as_bytes(),
        lines[2].as_bytes(),
    )
    .map_err(|e| PredictError::InvalidTle {
        file: file.to_string(),
        message: e.to_string(),
    })?;
    let constants = Constants::from_elements(&elements).map_err(|e| PredictError::InvalidTle {
        file: file.to_string(),
        message: e.to_string(),
    })?;
    let name = elements
        .object_name
        .clone()
        .unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

    Ok(TleRecord {
        name,
        elements,
        constants,
    })
}
