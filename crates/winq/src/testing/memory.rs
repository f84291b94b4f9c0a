/*! Window server backed by a list of synthetic records. */

use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};

use super::record::NativeRecord;
use crate::config::ListFilter;
use crate::platform::{PropertyKey, WindowProperties, WindowServer};
use crate::types::{WindowId, WinqResult};

/// In-memory window server.
///
/// Records are kept front-to-back: index 0 is the topmost window. Interior
/// mutability lets tests change the "screen" between queries through a shared
/// reference, the way a real window server changes under a running program.
#[derive(Debug)]
pub struct MemoryWindowServer {
  windows: RwLock<Vec<NativeRecord>>,
  last_input: Mutex<Instant>,
}

impl Default for MemoryWindowServer {
  fn default() -> Self {
    Self::new()
  }
}

impl MemoryWindowServer {
  /// An empty screen with input received just now.
  pub fn new() -> Self {
    Self::with_windows(Vec::new())
  }

  /// A screen showing `windows`, frontmost first.
  pub fn with_windows(windows: Vec<NativeRecord>) -> Self {
    Self {
      windows: RwLock::new(windows),
      last_input: Mutex::new(Instant::now()),
    }
  }

  /// Load a screen from a JSON array of records, frontmost first.
  pub fn from_json(json: &str) -> WinqResult<Self> {
    let windows: Vec<NativeRecord> = serde_json::from_str(json)?;
    log::debug!("loaded {} synthetic windows", windows.len());
    Ok(Self::with_windows(windows))
  }

  /// Add a window behind all existing ones.
  pub fn push(&self, record: NativeRecord) {
    self.windows.write().push(record);
  }

  /// Add a window in front of all existing ones.
  pub fn push_front(&self, record: NativeRecord) {
    self.windows.write().insert(0, record);
  }

  /// Move a window to the front. Returns false if no record has this id.
  pub fn raise(&self, id: WindowId) -> bool {
    let mut windows = self.windows.write();
    let Some(index) = windows.iter().position(|record| has_id(record, id)) else {
      return false;
    };
    let record = windows.remove(index);
    windows.insert(0, record);
    true
  }

  /// Close a window. Returns false if no record has this id.
  pub fn remove(&self, id: WindowId) -> bool {
    let mut windows = self.windows.write();
    let before = windows.len();
    windows.retain(|record| !has_id(record, id));
    windows.len() != before
  }

  /// Replace every window.
  pub fn set_windows(&self, windows: Vec<NativeRecord>) {
    *self.windows.write() = windows;
  }

  pub fn clear(&self) {
    self.windows.write().clear();
  }

  /// Snapshot of the current records, frontmost first.
  pub fn records(&self) -> Vec<NativeRecord> {
    self.windows.read().clone()
  }

  /// Record a synthetic input event now.
  pub fn input_event(&self) {
    *self.last_input.lock() = Instant::now();
  }

  /// Pretend the last input event happened `idle` ago.
  pub fn set_idle(&self, idle: Duration) {
    let now = Instant::now();
    *self.last_input.lock() = now.checked_sub(idle).unwrap_or(now);
  }
}

fn has_id(record: &NativeRecord, id: WindowId) -> bool {
  match (record.integer(PropertyKey::WindowNumber), i64::try_from(id.0)) {
    (Ok(number), Ok(wanted)) => number == wanted,
    _ => false,
  }
}

impl WindowServer for MemoryWindowServer {
  type Record = NativeRecord;

  fn list_windows(&self, filter: ListFilter) -> Vec<NativeRecord> {
    self
      .windows
      .read()
      .iter()
      .filter(|record| !filter.on_screen_only || record.on_screen)
      .filter(|record| !filter.exclude_desktop_elements || !record.desktop_element)
      .cloned()
      .collect()
  }

  fn window(&self, id: WindowId) -> Option<NativeRecord> {
    self
      .windows
      .read()
      .iter()
      .find(|record| has_id(record, id))
      .cloned()
  }

  fn idle(&self) -> Duration {
    self.last_input.lock().elapsed()
  }
}
