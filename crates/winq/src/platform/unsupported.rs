/*! Placeholder window server for targets without a backend. */

use std::time::Duration;

use super::{PropertyKey, WindowProperties, WindowServer};
use crate::config::ListFilter;
use crate::types::{DecodeError, Rect, WindowId, WinqError, WinqResult};

/// Window server for targets with no native backend. Cannot be connected.
#[derive(Debug)]
pub struct UnsupportedWindowServer {
  _private: (),
}

impl UnsupportedWindowServer {
  /// Always fails with [`WinqError::NotSupported`].
  pub fn connect() -> WinqResult<Self> {
    Err(WinqError::NotSupported(std::env::consts::OS.to_string()))
  }
}

/// Record type of [`UnsupportedWindowServer`]. Has no values.
#[derive(Debug, Clone, Copy)]
pub enum UnsupportedRecord {}

impl WindowProperties for UnsupportedRecord {
  fn integer(&self, _key: PropertyKey) -> Result<i64, DecodeError> {
    match *self {}
  }

  fn text(&self, _key: PropertyKey) -> Result<String, DecodeError> {
    match *self {}
  }

  fn bounds(&self, _key: PropertyKey) -> Result<Rect, DecodeError> {
    match *self {}
  }
}

impl WindowServer for UnsupportedWindowServer {
  type Record = UnsupportedRecord;

  fn list_windows(&self, _filter: ListFilter) -> Vec<UnsupportedRecord> {
    Vec::new()
  }

  fn window(&self, _id: WindowId) -> Option<UnsupportedRecord> {
    None
  }

  fn idle(&self) -> Duration {
    Duration::ZERO
  }
}
