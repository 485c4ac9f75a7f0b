//! Text Float Files
//!
//! Whitespace separated numbers; `#` starts a comment that runs to the end of
//! the line.

use crate::cosbos::Float;
use crate::error::*;
use crate::geometry::Point3f;
use std::fs;

/// Parses the contents of a float file.
///
/// * `contents` - The text.
/// * `name`     - Name used in error messages.
pub fn parse_floats(contents: &str, name: &str) -> Result<Vec<Float>> {
    let mut values = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        for word in line.split_whitespace() {
            let v = word.parse::<Float>().map_err(|e| {
                Error::Parse(format!("{name}:{}: unexpected text '{word}': {e}", line_no + 1))
            })?;
            values.push(v);
        }
    }
    Ok(values)
}

/// Reads a float file.
///
/// * `path` - Input file path.
pub fn read_float_file(path: &str) -> Result<Vec<Float>> {
    let contents = fs::read_to_string(path)?;
    let values = parse_floats(&contents, path)?;
    debug!("Read {} values from {path}", values.len());
    Ok(values)
}

/// Groups a flat list of `x y z` triples into points.
///
/// * `values` - The flat list; its length must be a multiple of 3.
/// * `name`   - Name used in error messages.
pub fn points_from_floats(values: &[Float], name: &str) -> Result<Vec<Point3f>> {
    if values.len() % 3 != 0 {
        return Err(Error::Parse(format!(
            "{name}: expected x y z triples, found {} values",
            values.len()
        )));
    }
    Ok(values
        .chunks_exact(3)
        .map(|c| Point3f::from([c[0], c[1], c[2]]))
        .collect())
}

/// Reads a file of `x y z` rows.
///
/// * `path` - Input file path.
pub fn read_points(path: &str) -> Result<Vec<Point3f>> {
    points_from_floats(&read_float_file(path)?, path)
}
