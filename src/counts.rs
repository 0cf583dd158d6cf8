use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::access::{AccessCount, AccessRole};
use super::config_utils::parse_value;
use super::error::{OdError, Result};

pub const ACCESS_TYPE_COL: &str = "access_type";
pub const DIRECTION_COL: &str = "direction";
pub const AVENUE_COL: &str = "avenue_name";
pub const COUNT_COL: &str = "vehicle_count_per_hour";

// A convenience type for parsing csv data
type Row = HashMap<String, String>;


/// Reads hourly access counts from a csv file with one row per access point.
pub fn counts_from_csv(csvpath: &Path) -> Result<Vec<AccessCount>> {
    let file = File::open(csvpath)?;
    let counts = counts_from_reader(file)?;
    log::info!("read {} access counts from {}", counts.len(), csvpath.display());
    Ok(counts)
}

pub fn counts_from_reader<R: Read>(reader: R) -> Result<Vec<AccessCount>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut counts = vec![];
    for result in reader.deserialize() {
        let row: Row = result?;
        let role = AccessRole::from_direction(column(&row, DIRECTION_COL)?)?;
        let vehicles_per_hour = parse_value(COUNT_COL, column(&row, COUNT_COL)?)?;
        let count = AccessCount::new(column(&row, ACCESS_TYPE_COL)?.trim(), role,
                                     column(&row, AVENUE_COL)?.trim(), vehicles_per_hour)?;
        counts.push(count);
    }
    Ok(counts)
}

fn column<'a>(row: &'a Row, name: &str) -> Result<&'a str> {
    row.get(name)
       .map(|value| value.as_str())
       .ok_or_else(|| OdError::Config(format!("counts table has no {:?} column", name)))
}
