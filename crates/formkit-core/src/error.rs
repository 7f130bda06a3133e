use thiserror::Error;

/// Failures when parsing style values supplied as strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("invalid hex color '{0}': expected #RRGGBB or #RRGGBBAA")]
    InvalidHex(String),
    #[error("invalid length '{0}': expected a number with an optional px, em or % suffix")]
    InvalidLength(String),
}

pub type StyleResult<T> = Result<T, StyleError>;
