//! Reads the list of place names, one per line.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// Reads the place names in the file at `path`.
pub fn read_place_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let f = File::open(path.as_ref())?;
    let names = place_names_from_reader(BufReader::new(f))?;
    info!(
        "Read {} place names from {}.",
        names.len(),
        path.as_ref().display()
    );
    Ok(names)
}

/// Reads place names from `reader`, in file order.
///
/// Names are trimmed and blank lines dropped. A line that isn't valid UTF-8 is skipped rather
/// than failing the whole read; I/O errors still fail.
pub fn place_names_from_reader<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut names = vec![];
    for (i, line) in reader.split(b'\n').enumerate() {
        let line = match String::from_utf8(line?) {
            Ok(line) => line,
            Err(e) => {
                debug!("Skipping place name on line {}: {}", i + 1, e);
                continue;
            }
        };
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
