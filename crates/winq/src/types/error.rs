/*! Error types for winq operations. */

use crate::platform::PropertyKey;

/// Errors surfaced when a window system cannot be set up.
///
/// Queries themselves never fail; they answer with sentinel or empty values.
#[derive(Debug, thiserror::Error)]
pub enum WinqError {
  #[error("Cannot reach the window server: {0}")]
  Connection(String),

  #[error("Operation not supported: {0}")]
  NotSupported(String),

  #[error("Invalid window fixture: {0}")]
  Fixture(#[from] serde_json::Error),
}

/// Result type for winq operations.
pub type WinqResult<T> = Result<T, WinqError>;

/// Why a native window property could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
  #[error("property {0:?} is missing")]
  Missing(PropertyKey),

  #[error("property {key:?} is not a {expected}")]
  TypeMismatch {
    key: PropertyKey,
    expected: &'static str,
  },

  #[error("property {key:?} value {value} is out of range")]
  OutOfRange { key: PropertyKey, value: i64 },

  #[error("property {0:?} holds a reserved value")]
  Reserved(PropertyKey),

  #[error("property {key:?} unavailable: {reason}")]
  Unavailable { key: PropertyKey, reason: String },
}
