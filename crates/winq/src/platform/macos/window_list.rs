/*! Window enumeration for macOS.

Uses `CGWindowListCopyWindowInfo` both for the bulk listing and, with
`OptionIncludingWindow`, for single-window lookups. Listings come back in
z-order, frontmost first.
*/

#![allow(unsafe_code)]

use std::time::Duration;

use super::cf_utils::{
  get_cf_bounds, get_cf_integer, get_cf_string, retain_cf_dictionary,
};
use crate::config::ListFilter;
use crate::platform::{PropertyKey, WindowProperties, WindowServer};
use crate::types::{DecodeError, Rect, WindowId};
use objc2_core_foundation::{CFArray, CFDictionary, CFRetained};
use objc2_core_graphics::{
  kCGNullWindowID, CGEventSource, CGEventSourceStateID, CGEventType, CGWindowListCopyWindowInfo,
  CGWindowListOption,
};

/// `kCGAnyInputEventType`.
const ANY_INPUT_EVENT: CGEventType = CGEventType(!0);

/// Idle seconds as a `Duration`. NaN and negative values give zero; overflow saturates.
fn idle_from_secs(seconds: f64) -> Duration {
  Duration::try_from_secs_f64(seconds).unwrap_or(if seconds > 0.0 {
    Duration::MAX
  } else {
    Duration::ZERO
  })
}

/// Window server for the macOS window server.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuartzWindowServer;

impl QuartzWindowServer {
  /// The window server needs no connection; this never fails.
  pub const fn new() -> Self {
    Self
  }
}

/// One window-info dictionary from a window list.
#[derive(Debug)]
pub struct QuartzRecord {
  dict: CFRetained<CFDictionary>,
}

impl WindowProperties for QuartzRecord {
  fn integer(&self, key: PropertyKey) -> Result<i64, DecodeError> {
    get_cf_integer(&self.dict, key)
  }

  fn text(&self, key: PropertyKey) -> Result<String, DecodeError> {
    get_cf_string(&self.dict, key)
  }

  fn bounds(&self, key: PropertyKey) -> Result<Rect, DecodeError> {
    let cg_rect = get_cf_bounds(&self.dict, key)?;
    Ok(Rect::from_f64(
      cg_rect.origin.x,
      cg_rect.origin.y,
      cg_rect.size.width,
      cg_rect.size.height,
    ))
  }
}

/// Copy a window list and retain each entry.
fn copy_window_list(option: CGWindowListOption, relative_to: u32) -> Vec<QuartzRecord> {
  // IMPORTANT: Wrap in autorelease pool to prevent memory leaks.
  objc2::rc::autoreleasepool(|_pool| {
    let Some(window_list_info) = CGWindowListCopyWindowInfo(option, relative_to) else {
      log::debug!("CGWindowListCopyWindowInfo returned no list");
      return Vec::new();
    };

    let windows_count = CFArray::count(&window_list_info);

    (0..windows_count)
      .filter_map(|idx| {
        let window_cf_dictionary_ref =
          unsafe { CFArray::value_at_index(&window_list_info, idx).cast::<CFDictionary>() };
        retain_cf_dictionary(window_cf_dictionary_ref)
      })
      .map(|dict| QuartzRecord { dict })
      .collect()
  })
}

impl WindowServer for QuartzWindowServer {
  type Record = QuartzRecord;

  fn list_windows(&self, filter: ListFilter) -> Vec<QuartzRecord> {
    let mut option = CGWindowListOption::OptionAll;
    if filter.on_screen_only {
      option = option | CGWindowListOption::OptionOnScreenOnly;
    }
    if filter.exclude_desktop_elements {
      option = option | CGWindowListOption::ExcludeDesktopElements;
    }

    copy_window_list(option, kCGNullWindowID)
  }

  fn window(&self, id: WindowId) -> Option<QuartzRecord> {
    let window_number = u32::try_from(id.0).ok()?;
    copy_window_list(CGWindowListOption::OptionIncludingWindow, window_number)
      .into_iter()
      .next()
  }

  fn idle(&self) -> Duration {
    #[allow(unused_unsafe)]
    let seconds = unsafe {
      CGEventSource::seconds_since_last_event_type(
        CGEventSourceStateID::CombinedSessionState,
        ANY_INPUT_EVENT,
      )
    };
    idle_from_secs(seconds)
  }
}
