/*!
Platform abstraction traits.

These traits define the contract between the facade and window-server backends.
A backend answers three native questions (bulk list, scoped lookup, idle seconds)
and hands back opaque property records. Everything else (decoding policy, ordering,
heuristics) lives in the shared core and never touches platform types.
*/

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ListFilter;
use crate::types::{DecodeError, Rect, WindowId};

/// Per-window properties the core reads from native records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyKey {
  /// Numeric window identifier.
  WindowNumber,
  /// Numeric stacking layer.
  Layer,
  /// Nested bounds record (origin and size).
  Bounds,
  /// Window name as set by the application.
  Name,
  /// Name of the application owning the window.
  OwnerName,
}

/// Typed access to one opaque native window record.
///
/// Each accessor reports why a value is unusable instead of guessing a default;
/// callers pick the fallback.
pub trait WindowProperties {
  /// Read an integer property.
  fn integer(&self, key: PropertyKey) -> Result<i64, DecodeError>;

  /// Read a string property.
  fn text(&self, key: PropertyKey) -> Result<String, DecodeError>;

  /// Read a rectangle property.
  fn bounds(&self, key: PropertyKey) -> Result<Rect, DecodeError>;
}

/// Native window-server queries. One implementation per platform.
///
/// Implementations hold no query state; every call goes to the server.
pub trait WindowServer {
  /// Record type produced by this server.
  type Record: WindowProperties;

  /// All windows matching `filter`, in the server's front-to-back order.
  fn list_windows(&self, filter: ListFilter) -> Vec<Self::Record>;

  /// The record for exactly one window, or `None` if no window has this id.
  fn window(&self, id: WindowId) -> Option<Self::Record>;

  /// Time since the last input event of any kind, across the session.
  fn idle(&self) -> Duration;
}

impl<S: WindowServer + ?Sized> WindowServer for &S {
  type Record = S::Record;

  fn list_windows(&self, filter: ListFilter) -> Vec<Self::Record> {
    (**self).list_windows(filter)
  }

  fn window(&self, id: WindowId) -> Option<Self::Record> {
    (**self).window(id)
  }

  fn idle(&self) -> Duration {
    (**self).idle()
  }
}

impl<S: WindowServer + ?Sized> WindowServer for std::sync::Arc<S> {
  type Record = S::Record;

  fn list_windows(&self, filter: ListFilter) -> Vec<Self::Record> {
    (**self).list_windows(filter)
  }

  fn window(&self, id: WindowId) -> Option<Self::Record> {
    (**self).window(id)
  }

  fn idle(&self) -> Duration {
    (**self).idle()
  }
}
