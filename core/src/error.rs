use crate::placement::{DatabaseFamily, Operation};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("scenario {operation} is not implemented for {family}")]
    Unsupported {
        family: DatabaseFamily,
        operation: Operation,
    },
    #[error("a run is already in progress")]
    RunInProgress,
    #[error("animator failure: {0}")]
    Animator(String),
    #[error("selection store failure: {0}")]
    Store(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("cannot parse {what} from {value:?}")]
    Parse { what: &'static str, value: String },
    #[error("histogram failure: {0}")]
    Histogram(String),
    #[error("run stalled with no pending events")]
    Stalled,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
