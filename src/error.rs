use thiserror::Error;


/// Everything that can abort an OD estimation run.
#[derive(Debug, Error)]
pub enum OdError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed network xml: {0}")]
    Xml(#[from] xml::reader::Error),
    #[error("malformed counts table: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed yaml config: {0}")]
    Yaml(#[from] yaml_rust::ScanError),
    #[error("bad config: {0}")]
    Config(String),
    #[error("could not parse {field} value {value:?}")]
    Parse { field: String, value: String },
    #[error("network has no edge named {0:?}")]
    UnknownPoint(String),
    #[error("unrecognised direction {0:?} (expected \"in\" or \"out\")")]
    UnknownDirection(String),
    #[error("count for {id:?} must be a finite non-negative number, got {count}")]
    InvalidCount { id: String, count: f64 },
    #[error("access id {0:?} carries both the origin and the destination tag")]
    AmbiguousRole(String),
}

pub type Result<T> = std::result::Result<T, OdError>;
