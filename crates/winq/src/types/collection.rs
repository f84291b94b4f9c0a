/*!
Layer-ordered window collection.

Behaves like a multimap keyed by [`StackLayer`]: records are kept in ascending layer
order, and records sharing a layer stay in the order they were inserted. Enumeration
inserts in native order, which the window servers report front-to-back, so iterating
a collection visits the topmost window of each layer first.
*/

use super::{StackLayer, WindowId, WindowRecord};

/// Result of one window enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowCollection {
  records: Vec<WindowRecord>,
}

impl WindowCollection {
  pub const fn new() -> Self {
    Self {
      records: Vec::new(),
    }
  }

  /// Insert a window after every record whose layer is `<= layer`.
  pub fn insert(&mut self, layer: StackLayer, id: WindowId) {
    let at = self.records.partition_point(|record| record.layer <= layer);
    self.records.insert(at, WindowRecord::new(id, layer));
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Records in collection order.
  pub fn iter(&self) -> std::slice::Iter<'_, WindowRecord> {
    self.records.iter()
  }

  /// Window ids in collection order, layers dropped.
  pub fn ids(&self) -> impl Iterator<Item = WindowId> + '_ {
    self.records.iter().map(|record| record.id)
  }

  /// First window (in collection order) at `layer`.
  pub fn first_at(&self, layer: StackLayer) -> Option<WindowId> {
    self
      .records
      .iter()
      .find(|record| record.layer == layer)
      .map(|record| record.id)
  }

  /// Layer recorded for `id`, if it was enumerated.
  pub fn layer_of(&self, id: WindowId) -> Option<StackLayer> {
    self
      .records
      .iter()
      .find(|record| record.id == id)
      .map(|record| record.layer)
  }

  pub fn contains(&self, id: WindowId) -> bool {
    self.records.iter().any(|record| record.id == id)
  }
}

impl IntoIterator for WindowCollection {
  type Item = WindowRecord;
  type IntoIter = std::vec::IntoIter<WindowRecord>;

  fn into_iter(self) -> Self::IntoIter {
    self.records.into_iter()
  }
}

impl<'a> IntoIterator for &'a WindowCollection {
  type Item = &'a WindowRecord;
  type IntoIter = std::slice::Iter<'a, WindowRecord>;

  fn into_iter(self) -> Self::IntoIter {
    self.records.iter()
  }
}

impl FromIterator<(StackLayer, WindowId)> for WindowCollection {
  fn from_iter<I: IntoIterator<Item = (StackLayer, WindowId)>>(iter: I) -> Self {
    let mut collection = Self::new();
    for (layer, id) in iter {
      collection.insert(layer, id);
    }
    collection
  }
}
