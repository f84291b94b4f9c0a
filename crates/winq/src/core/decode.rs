/*!
Decoding of native window records.

Small pure functions from a record to a typed value. They only report failure;
each call site decides whether a failure skips the window or falls back to a
sentinel.
*/

use std::time::Duration;

use crate::platform::{PropertyKey, WindowProperties};
use crate::types::{DecodeError, Rect, StackLayer, WindowId};

/// Window name some native windows carry instead of a real title.
pub(crate) const PLACEHOLDER_TITLE: &str = "Item-0";

/// Decode the window identifier. The "not found" sentinel is rejected.
pub(crate) fn window_id<R: WindowProperties + ?Sized>(record: &R) -> Result<WindowId, DecodeError> {
  let key = PropertyKey::WindowNumber;
  let raw = record.integer(key)?;
  let raw = u64::try_from(raw).map_err(|_| DecodeError::OutOfRange { key, value: raw })?;
  let id = WindowId(raw);
  if id.is_found() {
    Ok(id)
  } else {
    Err(DecodeError::Reserved(key))
  }
}

/// Decode the stacking layer.
pub(crate) fn stack_layer<R: WindowProperties + ?Sized>(
  record: &R,
) -> Result<StackLayer, DecodeError> {
  let key = PropertyKey::Layer;
  let raw = record.integer(key)?;
  let layer = i32::try_from(raw).map_err(|_| DecodeError::OutOfRange { key, value: raw })?;
  Ok(StackLayer(layer))
}

/// Decode the display title, substituting the owner name for the placeholder.
pub(crate) fn title<R: WindowProperties + ?Sized>(record: &R) -> Result<String, DecodeError> {
  let name = record.text(PropertyKey::Name)?;
  if name == PLACEHOLDER_TITLE {
    record.text(PropertyKey::OwnerName)
  } else {
    Ok(name)
  }
}

/// Decode the window bounds.
pub(crate) fn geometry<R: WindowProperties + ?Sized>(record: &R) -> Result<Rect, DecodeError> {
  record.bounds(PropertyKey::Bounds)
}

/// Whole milliseconds of an idle duration, truncated and saturating at `u64::MAX`.
pub(crate) fn idle_millis(idle: Duration) -> u64 {
  u64::try_from(idle.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::NativeRecord;

  mod window_id {
    use super::*;

    #[test]
    fn decodes_number() {
      let record = NativeRecord::new().with(PropertyKey::WindowNumber, 4711);
      assert_eq!(window_id(&record), Ok(WindowId(4711)));
    }

    #[test]
    fn missing_number() {
      let record = NativeRecord::new();
      assert_eq!(
        window_id(&record),
        Err(DecodeError::Missing(PropertyKey::WindowNumber))
      );
    }

    #[test]
    fn rejects_sentinel() {
      let record = NativeRecord::new().with(PropertyKey::WindowNumber, 0);
      assert_eq!(
        window_id(&record),
        Err(DecodeError::Reserved(PropertyKey::WindowNumber))
      );
    }

    #[test]
    fn rejects_negative() {
      let record = NativeRecord::new().with(PropertyKey::WindowNumber, -5);
      assert!(matches!(
        window_id(&record),
        Err(DecodeError::OutOfRange { value: -5, .. })
      ));
    }

    #[test]
    fn rejects_text() {
      let record = NativeRecord::new().with(PropertyKey::WindowNumber, "12");
      assert!(matches!(
        window_id(&record),
        Err(DecodeError::TypeMismatch { .. })
      ));
    }
  }

  mod stack_layer {
    use super::*;

    #[test]
    fn decodes_negative_layers() {
      let record = NativeRecord::new().with(PropertyKey::Layer, -20);
      assert_eq!(stack_layer(&record), Ok(StackLayer(-20)));
    }

    #[test]
    fn out_of_i32_range() {
      let record = NativeRecord::new().with(PropertyKey::Layer, i64::from(i32::MAX) + 1);
      assert!(matches!(
        stack_layer(&record),
        Err(DecodeError::OutOfRange { .. })
      ));
    }
  }

  mod title {
    use super::*;

    #[test]
    fn uses_window_name() {
      let record = NativeRecord::new()
        .with(PropertyKey::Name, "notes.txt")
        .with(PropertyKey::OwnerName, "TextEdit");
      assert_eq!(title(&record).as_deref(), Ok("notes.txt"));
    }

    #[test]
    fn placeholder_falls_back_to_owner() {
      let record = NativeRecord::new()
        .with(PropertyKey::Name, "Item-0")
        .with(PropertyKey::OwnerName, "Finder");
      assert_eq!(title(&record).as_deref(), Ok("Finder"));
    }

    #[test]
    fn fallback_is_single_level() {
      let record = NativeRecord::new()
        .with(PropertyKey::Name, "Item-0")
        .with(PropertyKey::OwnerName, "Item-0");
      assert_eq!(title(&record).as_deref(), Ok("Item-0"));
    }

    #[test]
    fn placeholder_without_owner_fails() {
      let record = NativeRecord::new().with(PropertyKey::Name, "Item-0");
      assert_eq!(
        title(&record),
        Err(DecodeError::Missing(PropertyKey::OwnerName))
      );
    }

    #[test]
    fn placeholder_match_is_exact() {
      let record = NativeRecord::new()
        .with(PropertyKey::Name, "item-0")
        .with(PropertyKey::OwnerName, "Finder");
      assert_eq!(title(&record).as_deref(), Ok("item-0"));
    }
  }

  mod idle_millis {
    use super::*;

    #[test]
    fn truncates() {
      assert_eq!(idle_millis(Duration::from_micros(1_234_900)), 1234);
      assert_eq!(idle_millis(Duration::from_micros(900)), 0);
    }

    #[test]
    fn exact_milliseconds_are_kept() {
      let lost: Vec<u64> = (0..100_000u64)
        .filter(|ms| idle_millis(Duration::from_millis(*ms)) != *ms)
        .collect();
      assert!(lost.is_empty(), "{lost:?}");
    }

    #[test]
    fn saturates() {
      assert_eq!(idle_millis(Duration::MAX), u64::MAX);
      assert_eq!(idle_millis(Duration::from_millis(u64::MAX)), u64::MAX);
    }
  }
}
