use crate::car_status::CarKind;

/// Errors raised while building, routing or running requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unknown car type: {0:?}")]
    UnknownCarType(String),
    #[error("no {0} car is available to take this request")]
    NoSuchCar(CarKind),
    #[error("the {0} car worker has stopped")]
    WorkerGone(CarKind),
    #[error("could not start the {0} car worker: {1}")]
    WorkerSpawn(CarKind, String),
}

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value {value:?} for {flag}")]
    InvalidArgument { flag: String, value: String },
}
