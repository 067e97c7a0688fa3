use thiserror::Error;

/// Errors raised when a simpack's step functions cannot be normalized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidSimpack {
    #[error(
        "simpack `{simpack}` defines both history-dependent and history-independent step functions"
    )]
    MixedHistoryDependence { simpack: String },

    #[error("simpack `{simpack}` defines no step function")]
    NoStepFunction { simpack: String },

    #[error("default step function `{function}` of simpack `{simpack}` has the wrong history dependence")]
    DefaultFlavorMismatch { simpack: String, function: String },
}
