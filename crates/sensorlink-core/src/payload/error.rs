use thiserror::Error;

/// Errors returned by uplink decoding and profile configuration.
///
/// # Examples
/// ```
/// use sensorlink_core::DecodeError;
///
/// let err = DecodeError::TruncatedPayload { needed: 12, actual: 3 };
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TruncatedPayload { needed: usize, actual: usize },
    #[error("invalid byte value at index {index}: {value} (expected 0..=255)")]
    InvalidByteValue { index: usize, value: i64 },
    #[error("unknown field name: '{name}'")]
    UnknownField { name: String },
}
