use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::rc::Rc;

use super::access::Totals;
use super::error::{OdError, Result};
use super::oracle::CostOracle;


/// Checks that the contents of two hashmaps are the same.
pub fn compare_hashmaps<KK, VV>(query_map: &HashMap<KK, VV>, true_map: &HashMap<KK, VV>)
    where KK: Debug + Eq + std::hash::Hash,
    VV: Debug + PartialEq,
{
    assert_eq!(query_map.len(), true_map.len());
    for (true_key, true_val) in true_map {
        match query_map.get(true_key) {
            Some(val) => assert_eq!(val, true_val),
            None => panic!("Key {:?} missing!", true_key),
        }
    }
}

pub fn totals(pairs: &[(&str, f64)]) -> Totals {
    pairs.iter().map(|(id, count)| (String::from(*id), *count)).collect()
}

/// An oracle that answers from a fixed table of route times and counts how often it's closed.
pub struct TableOracle {
    times: HashMap<(String, String), f64>,
    known: HashSet<String>,
    queries: Rc<Cell<usize>>,
    closes: Rc<Cell<usize>>,
}

impl TableOracle {
    pub fn new(times: &[(&str, &str, f64)], known: &[&str]) -> TableOracle {
        TableOracle {
            times: times.iter()
                        .map(|(oo, dd, tt)| ((String::from(*oo), String::from(*dd)), *tt))
                        .collect(),
            known: known.iter().map(|id| String::from(*id)).collect(),
            queries: Rc::new(Cell::new(0)),
            closes: Rc::new(Cell::new(0)),
        }
    }

    pub fn close_counter(&self) -> Rc<Cell<usize>> {
        self.closes.clone()
    }

    pub fn query_counter(&self) -> Rc<Cell<usize>> {
        self.queries.clone()
    }
}

impl CostOracle for TableOracle {
    fn find_route(&mut self, from: &str, to: &str) -> Result<Option<f64>> {
        self.queries.set(self.queries.get() + 1);
        for point in &[from, to] {
            if !self.known.contains(*point) {
                return Err(OdError::UnknownPoint(String::from(*point)));
            }
        }
        Ok(self.times.get(&(String::from(from), String::from(to))).cloned())
    }

    fn close(&mut self) {
        self.closes.set(self.closes.get() + 1);
    }
}
