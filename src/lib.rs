//! Estimates an origin-destination trip matrix for a road network with a doubly-constrained
//! gravity model, from hourly counts at the network's access points and the travel times
//! between them.

mod access;
pub use access::{classify, split_by_role, AccessCount, AccessRole, Totals, DESTINATION_TAG,
                 ORIGIN_TAG};

mod config_utils;

mod costs;
pub use costs::{build_costs, CostMatrix};

mod counts;
pub use counts::{counts_from_csv, counts_from_reader};

mod error;
pub use error::{OdError, Result};

mod gravity;
pub use gravity::{distribute, OdMatrix, DEFAULT_BETA};

mod model_config;
pub use model_config::ModelConfig;

mod network;
pub use network::{NetworkEdge, NetworkOracle, RoadNetwork};

mod od_table;
pub use od_table::{OdRow, OdTable};

mod oracle;
pub use oracle::{CostOracle, OracleSession};

mod pipeline;
pub use pipeline::{estimate, run_pipeline};

#[cfg(test)]
mod test_utils;
