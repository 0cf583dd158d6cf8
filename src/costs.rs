use std::collections::HashMap;

use itertools::iproduct;

use super::error::Result;
use super::oracle::{CostOracle, OracleSession};

/// Travel cost between (origin, destination) pairs.  A missing pair has no route.
pub type CostMatrix = HashMap<(String, String), f64>;


/// Prices every origin-destination pair with the given oracle, which is closed before this
/// returns, whether or not pricing succeeded.
///
/// Self-pairs are never queried.  Pairs with no route are left out of the result, and costs are
/// rounded to two decimal places.  An unknown point aborts the whole build.
pub fn build_costs<OO>(origins: &[String], destinations: &[String], oracle: OO)
                       -> Result<CostMatrix>
    where OO: CostOracle
{
    let mut session = OracleSession::open(oracle);
    let mut costs = HashMap::new();
    for (origin, destination) in iproduct!(origins, destinations) {
        if origin == destination {
            continue;
        }
        match session.find_route(origin, destination)? {
            Some(time) => {
                let cost = round_to_hundredths(time);
                log::debug!("cost {} -> {}: {}", origin, destination, cost);
                costs.insert((origin.clone(), destination.clone()), cost);
            }
            None => log::debug!("no route {} -> {}", origin, destination),
        }
    }
    session.close();

    log::info!("priced {} of {} origin-destination pairs", costs.len(),
               origins.len() * destinations.len());
    Ok(costs)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.).round_ties_even() / 100.
}
