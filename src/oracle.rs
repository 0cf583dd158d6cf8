use super::error::Result;


/// Something that can price the fastest route between two named points of a network.
pub trait CostOracle {
    /// Returns the travel time of the fastest route from `from` to `to`, or `None` if `to` can't
    /// be reached.  Naming a point the network doesn't know is an error.
    fn find_route(&mut self, from: &str, to: &str) -> Result<Option<f64>>;

    /// Releases the oracle.  Called once, after the last query.
    fn close(&mut self) {}
}

/// Holds an oracle for the span of a batch of queries and closes it when dropped, so it is
/// released on every way out of that span.
pub struct OracleSession<OO: CostOracle> {
    oracle: OO,
    closed: bool,
}

impl<OO: CostOracle> OracleSession<OO> {
    pub fn open(oracle: OO) -> OracleSession<OO> {
        log::debug!("opened path cost oracle session");
        OracleSession {oracle, closed: false}
    }

    pub fn find_route(&mut self, from: &str, to: &str) -> Result<Option<f64>> {
        self.oracle.find_route(from, to)
    }

    /// Closes the oracle now rather than at the end of scope.
    pub fn close(mut self) {
        self.close_once();
    }

    fn close_once(&mut self) {
        if !self.closed {
            self.closed = true;
            self.oracle.close();
            log::debug!("closed path cost oracle session");
        }
    }
}

impl<OO: CostOracle> Drop for OracleSession<OO> {
    fn drop(&mut self) {
        self.close_once();
    }
}
