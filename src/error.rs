//! Configuration errors.
//!
//! The DP itself never fails: empty inputs, infinite costs and unknown mode
//! names are all handled as policy. Only malformed option assignments are
//! reported back to the caller.

/// Error returned when an option assignment cannot be applied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid value for option '{option}': expected {expected}")]
    InvalidValue {
        option: &'static str,
        expected: &'static str,
    },
    #[error("invalid constant cost {value} for option '{option}': costs must be non-negative")]
    InvalidCost { option: &'static str, value: f64 },
}
