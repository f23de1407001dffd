//! Identifier column selection

use csv::ByteRecord;
use tracing::{info, warn};

/// Pick the identifier column
///
/// A header name match wins over `position`. Header cells are compared
/// byte for byte; if several cells match, the last one is used.
pub fn select_column(header: &ByteRecord, name: Option<&str>, position: usize) -> usize {
    let Some(name) = name else {
        return position;
    };

    let matched = header
        .iter()
        .enumerate()
        .filter(|(_, cell)| *cell == name.as_bytes())
        .map(|(index, _)| index)
        .last();

    match matched {
        Some(index) => {
            info!(column = index, "Column header '{}' translated to column {}", name, index);
            index
        }
        None => {
            warn!(
                column = position,
                "No header matches '{}', falling back to column position {}",
                name,
                position
            );
            position
        }
    }
}
