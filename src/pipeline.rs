use super::access::{split_by_role, Totals};
use super::costs::{build_costs, CostMatrix};
use super::counts::counts_from_csv;
use super::error::Result;
use super::gravity::distribute;
use super::model_config::ModelConfig;
use super::network::RoadNetwork;
use super::od_table::OdTable;


/// Runs a full estimation: read the network and the counts, price routes between the counted
/// access points the network knows, distribute the counts with the gravity model, and write the
/// table if an output path is configured.  Any error aborts the run before a table is produced.
///
/// Whether an access point is an origin or a destination comes from the counts' direction
/// column, never from the edge id.
pub fn run_pipeline(cfg: &ModelConfig) -> Result<OdTable> {
    log::info!("reading network");
    let network = RoadNetwork::from_xml(&cfg.network_path)?;

    log::info!("reading counts");
    let counts = counts_from_csv(&cfg.counts_path)?;
    let (generation, attraction) = split_by_role(&counts);
    let origins = routable_ids(&network, &generation, "origin");
    let destinations = routable_ids(&network, &attraction, "destination");

    log::info!("building cost matrix");
    let costs = build_costs(&origins, &destinations, network.oracle())?;

    let table = estimate(&generation, &attraction, &costs, cfg.beta);
    if let Some(path) = &cfg.output_path {
        table.write_csv(path)?;
    }
    Ok(table)
}

/// Distributes the totals over the priced pairs and rounds the result to whole trips.
pub fn estimate(generation: &Totals, attraction: &Totals, costs: &CostMatrix, beta: f64)
                -> OdTable {
    log::debug!("distributing with beta {}", beta);
    let od = distribute(generation, attraction, costs, beta);
    OdTable::from_matrix(&od)
}

/// The counted ids that are edges of the network.  The rest can't be priced, so their demand
/// stays undistributed.
fn routable_ids(network: &RoadNetwork, totals: &Totals, role: &str) -> Vec<String> {
    totals.keys().filter(|id| {
        let known = network.get_edge(id).is_some();
        if !known {
            log::warn!("counted {} {} is not an edge of the network", role, id);
        }
        known
    }).cloned().collect()
}
