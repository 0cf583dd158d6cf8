use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::error::Result;
use super::gravity::OdMatrix;

static HEADER: [&str; 3] = ["origen", "destino", "viajes"];


#[derive(PartialEq, Eq, Debug, Clone)]
pub struct OdRow {
    pub origin: String,
    pub destination: String,
    pub trips: u64,
}

/// Whole-trip counts for every origin-destination pair, in the order they were distributed.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct OdTable {
    rows: Vec<OdRow>,
}

impl OdTable {
    /// Rounds each volume to the nearest whole trip (ties to even).  Pairs with no trips are kept.
    pub fn from_matrix(od: &OdMatrix) -> OdTable {
        let rows = od.iter().map(|(origin, destination, volume)| OdRow {
            origin: String::from(origin),
            destination: String::from(destination),
            trips: volume.max(0.).round_ties_even() as u64,
        }).collect();
        OdTable {rows}
    }

    pub fn rows(&self) -> &[OdRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_trips(&self) -> u64 {
        self.rows.iter().map(|row| row.trips).sum()
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.to_writer(file)?;
        log::info!("wrote {} od pairs to {}", self.rows.len(), path.display());
        Ok(())
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&HEADER)?;
        for row in &self.rows {
            writer.write_record(&[&row.origin, &row.destination, &row.trips.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::costs::CostMatrix;
    use crate::gravity::{distribute, DEFAULT_BETA};
    use crate::test_utils::totals;

    fn scenario_table() -> OdTable {
        let gg = totals(&[("in_a", 100.), ("in_b", 50.)]);
        let aa = totals(&[("out_x", 80.), ("out_y", 70.)]);
        let mut cc = CostMatrix::new();
        cc.insert((String::from("in_a"), String::from("out_x")), 5.);
        cc.insert((String::from("in_a"), String::from("out_y")), 10.);
        cc.insert((String::from("in_b"), String::from("out_x")), 2.);
        OdTable::from_matrix(&distribute(&gg, &aa, &cc, DEFAULT_BETA))
    }

    #[test]
    fn test_from_matrix() {
        let table = scenario_table();
        let trips: Vec<(&str, &str, u64)> = table.rows().iter()
            .map(|row| (row.origin.as_str(), row.destination.as_str(), row.trips))
            .collect();
        assert_eq!(trips, vec![
            ("in_a", "out_x", 48),
            ("in_a", "out_y", 70),
            ("in_b", "out_x", 32),
            // no route, but still listed
            ("in_b", "out_y", 0),
        ]);
        assert_eq!(table.total_trips(), 150);
    }

    #[test]
    fn test_rounding_ties_to_even() {
        let gg = totals(&[("in_a", 5.), ("in_b", 5.)]);
        let aa = totals(&[("out_x", 2.5), ("out_y", 3.5)]);
        let mut cc = CostMatrix::new();
        cc.insert((String::from("in_a"), String::from("out_x")), 1.);
        cc.insert((String::from("in_b"), String::from("out_y")), 1.);
        let table = OdTable::from_matrix(&distribute(&gg, &aa, &cc, DEFAULT_BETA));
        let trips: Vec<u64> = table.rows().iter().map(|row| row.trips).collect();
        assert_eq!(trips, vec![2, 0, 0, 4]);
    }

    #[test]
    fn test_to_writer() {
        let table = scenario_table();
        let mut buffer = vec![];
        table.to_writer(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "origen,destino,viajes\nin_a,out_x,48\nin_a,out_y,70\n\
                          in_b,out_x,32\nin_b,out_y,0\n");
    }
}
