use crate::model::Mode;
use std::fmt::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Parameter {name} does not apply to {mode} mode")]
    ModeMismatch { name: String, mode: Mode },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, FacetError>;

/// Failure to convert one parameter value to or from its textual form.
///
/// These never reach callers of the URL adapter or the startup resolver:
/// they are folded into "value absent" by [`or_absent`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("`{raw}` is not a base-10 integer")]
    InvalidNumber { raw: String },

    #[error("`{raw}` is not `true` or `false`")]
    InvalidBoolean { raw: String },

    #[error("`{raw}` is not one of {options:?}")]
    UnknownOption {
        raw: String,
        options: &'static [&'static str],
    },

    #[error("token `{raw}` is not valid percent-escaped UTF-8")]
    InvalidToken { raw: String },

    #[error("expected a {expected} value")]
    ShapeMismatch { expected: &'static str },
}

/// The single point where decode and load failures become "absent".
///
/// `Ok(Some)` passes through, `Ok(None)` stays absent, and `Err` is logged
/// and treated as absent. `what` names the value for the log line.
pub(crate) fn or_absent<T, E: Display>(
    outcome: std::result::Result<Option<T>, E>,
    what: impl Display,
) -> Option<T> {
    match outcome {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(%err, "dropping {what}");
            None
        }
    }
}
