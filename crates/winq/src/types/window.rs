/*! Window record produced by enumeration. */

use super::{StackLayer, WindowId};
use serde::{Deserialize, Serialize};

/// One enumerated window.
///
/// Title and geometry are not part of the record; they are fetched per id on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowRecord {
  pub id: WindowId,
  pub layer: StackLayer,
}

impl WindowRecord {
  pub const fn new(id: WindowId, layer: StackLayer) -> Self {
    Self { id, layer }
  }
}
