//! CSV pin table loader.
//!
//! # CSV format
//!
//! One row per pin, in pin-number order.  Header required.
//!
//! ```csv
//! name,on_time,off_time
//! CLK,0,0
//! DATA,5n,5n
//! LED,1500,1500
//! ```
//!
//! **Time fields** accept either a bare integer (picoseconds) or a number
//! with an SI multiplier and an optional trailing `s` (`5n` = `5ns` = 5 ns,
//! `1.5u` = 1.5 µs).  Any other spelling (`2.0`, `1e3`, `5s`) is rejected
//! as malformed.  An empty time field means zero.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use vsm_core::RelTime;
use vsm_core::props::si_multiplier;

use crate::decl::{PinDecl, PinTable, validate_table};
use crate::{PinError, PinResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PinRecord {
    name:     String,
    #[serde(default)]
    on_time:  String,
    #[serde(default)]
    off_time: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a pin table from a CSV file.
pub fn load_pin_table_csv(path: &Path) -> PinResult<PinTable> {
    let file = std::fs::File::open(path).map_err(PinError::Io)?;
    load_pin_table_reader(file)
}

/// Like [`load_pin_table_csv`] but accepts any `Read` source.
///
/// The returned table has passed [`validate_table`]; capacity is checked
/// later, when the registry is built.
pub fn load_pin_table_reader<R: Read>(reader: R) -> PinResult<PinTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = PinTable::new();
    for (i, result) in csv_reader.deserialize::<PinRecord>().enumerate() {
        let row = result.map_err(|e| PinError::Parse(e.to_string()))?;
        let entry = i + 1;
        table.push(PinDecl {
            on_time:  parse_time(&row.on_time, entry)?,
            off_time: parse_time(&row.off_time, entry)?,
            name:     row.name,
        });
    }

    validate_table(&table)?;
    Ok(table)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_time(field: &str, entry: usize) -> PinResult<RelTime> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(RelTime::ZERO);
    }
    if let Ok(ps) = field.parse::<u64>() {
        return Ok(RelTime(ps));
    }
    let malformed = || PinError::Malformed {
        entry,
        reason: format!("invalid time {field:?}: expected integer picoseconds or a value like \"5n\""),
    };

    let mut chars = field.strip_suffix('s').unwrap_or(field).chars();
    let scale = chars.next_back().and_then(si_multiplier).ok_or_else(malformed)?;
    let value: f64 = chars.as_str().trim().parse().map_err(|_| malformed())?;
    if !value.is_finite() || value < 0.0 {
        return Err(malformed());
    }
    Ok(RelTime::from_secs_f64(value * scale))
}
