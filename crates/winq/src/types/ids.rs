/*! Branded ID types for native window handles and stacking layers. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Native top-level window identifier.
///
/// Unique for the lifetime of the window; a closed and reopened window may get a
/// different id. [`WindowId::NOT_FOUND`] stands in for "no window".
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From, Into,
)]
pub struct WindowId(pub u64);

impl WindowId {
  /// Sentinel returned by lookups that match no window.
  pub const NOT_FOUND: Self = Self(0);

  /// True unless this is [`WindowId::NOT_FOUND`].
  pub const fn is_found(self) -> bool {
    self.0 != Self::NOT_FOUND.0
  }
}

/// Coarse z-order class reported by the window server.
///
/// Not a stacking index: many windows share a layer. Only
/// [`StackLayer::ORDINARY`] carries meaning across platforms.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From, Into,
)]
pub struct StackLayer(pub i32);

impl StackLayer {
  /// Layer of ordinary application windows.
  pub const ORDINARY: Self = Self(0);

  /// The layer property could not be decoded.
  ///
  /// Sits just above `i32::MIN`, so windows carrying it sort ahead of every layer
  /// an ordinary window server reports.
  pub const UNKNOWN: Self = Self(-2_147_483_626);
}
