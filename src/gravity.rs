use ndarray::prelude::*;

use super::access::Totals;
use super::costs::CostMatrix;

/// Default rate at which interaction decays with travel cost.
pub const DEFAULT_BETA: f64 = 0.2;


/// Trip volumes between every origin and every destination.  Rows follow the origins and
/// columns the destinations, each in the order of the totals the matrix was built from.
#[derive(PartialEq, Debug, Clone)]
pub struct OdMatrix {
    origins: Vec<String>,
    destinations: Vec<String>,
    volumes: Array<f64, Ix2>,
}

impl OdMatrix {
    /// Unbalanced gravity interactions: G[o] * A[d] * exp(-beta * cost), or zero where there is
    /// no route between o and d.
    pub fn raw_interactions(generation: &Totals, attraction: &Totals, costs: &CostMatrix,
                            beta: f64) -> OdMatrix {
        let origins: Vec<String> = generation.keys().cloned().collect();
        let destinations: Vec<String> = attraction.keys().cloned().collect();
        let mut volumes = Array::zeros((origins.len(), destinations.len()));
        // pairs outside generation x attraction are ignored; pairs with no cost stay at zero
        for ((origin, destination), cost) in costs {
            if let (Some((ii, _, produced)), Some((jj, _, attracted))) =
                (generation.get_full(origin), attraction.get_full(destination)) {
                volumes[[ii, jj]] = produced * attracted * (-beta * cost).exp();
            }
        }
        OdMatrix {origins, destinations, volumes}
    }

    /// Scales each row so it sums to its origin's generation total.  Rows summing to zero are
    /// left as they are.
    pub fn balance_rows(&mut self, generation: &Totals) {
        for (origin, mut row) in self.origins.iter().zip(self.volumes.axis_iter_mut(Axis(0))) {
            let target = generation.get(origin).cloned().unwrap_or(0.);
            let total = row.sum();
            if total > 0. {
                row *= target / total;
            } else if target > 0. {
                log::warn!("origin {} reaches no destination; its {} trips are lost", origin,
                           target);
            }
        }
    }

    /// Scales each column so it sums to its destination's attraction total.  Columns summing to
    /// zero are left as they are.
    pub fn balance_columns(&mut self, attraction: &Totals) {
        for (destination, mut col) in self.destinations.iter()
                                           .zip(self.volumes.axis_iter_mut(Axis(1))) {
            let target = attraction.get(destination).cloned().unwrap_or(0.);
            let total = col.sum();
            if total > 0. {
                col *= target / total;
            } else if target > 0. {
                log::warn!("destination {} is reached by no origin; its {} trips are lost",
                           destination, target);
            }
        }
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }

    pub fn volumes(&self) -> &Array<f64, Ix2> {
        &self.volumes
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn get(&self, origin: &str, destination: &str) -> Option<f64> {
        let ii = self.origins.iter().position(|oo| oo == origin)?;
        let jj = self.destinations.iter().position(|dd| dd == destination)?;
        Some(self.volumes[[ii, jj]])
    }

    /// Iterates over (origin, destination, volume), origin-major.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.volumes.indexed_iter().map(move |((ii, jj), volume)| {
            (self.origins[ii].as_str(), self.destinations[jj].as_str(), *volume)
        })
    }

    pub fn row_sums(&self) -> Array<f64, Ix1> {
        self.volumes.sum_axis(Axis(1))
    }

    pub fn column_sums(&self) -> Array<f64, Ix1> {
        self.volumes.sum_axis(Axis(0))
    }
}


/// Distributes trips between origins and destinations with a doubly-constrained gravity model.
///
/// The raw interactions are balanced with exactly one row pass followed by one column pass;
/// there's no iteration to convergence.  After the column pass every reachable destination
/// receives exactly its attraction total, while row sums may drift from the generation totals.
/// Origins or destinations with no route to the other side keep all-zero rows or columns, so
/// their demand is lost rather than reassigned.
///
/// The result always covers every pair in generation x attraction.
pub fn distribute(generation: &Totals, attraction: &Totals, costs: &CostMatrix, beta: f64)
                  -> OdMatrix {
    let mut matrix = OdMatrix::raw_interactions(generation, attraction, costs, beta);
    matrix.balance_rows(generation);
    matrix.balance_columns(attraction);
    log::info!("distributed {:.2} trips over {} origins and {} destinations",
               matrix.volumes.sum(), matrix.origins.len(), matrix.destinations.len());
    matrix
}
