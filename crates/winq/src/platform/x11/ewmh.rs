/*!
EWMH interpretation helpers.

X11 has no window layers of its own. The EWMH stacking layers (desktop, below,
normal, dock, above) are the closest equivalent, so window type and state hints
map onto those, with ordinary client windows at layer 0.
*/

use x11rb::protocol::xproto::Window;

use crate::config::ListFilter;
use crate::types::StackLayer;

/// Window-type and state hints read from `_NET_WM_WINDOW_TYPE` / `_NET_WM_STATE`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct EwmhHints {
  pub(super) desktop: bool,
  pub(super) dock: bool,
  pub(super) above: bool,
  pub(super) below: bool,
  pub(super) hidden: bool,
}

impl EwmhHints {
  /// EWMH stacking layer, bottom to top.
  pub(super) const fn layer(self) -> StackLayer {
    if self.desktop {
      StackLayer(-2)
    } else if self.below {
      StackLayer(-1)
    } else if self.above {
      StackLayer(2)
    } else if self.dock {
      StackLayer(1)
    } else {
      StackLayer::ORDINARY
    }
  }

  /// Whether a window with these hints is listed under `filter`.
  ///
  /// `viewable` is the window's map state; it only matters for on-screen listings.
  pub(super) const fn passes(self, filter: ListFilter, viewable: bool) -> bool {
    if filter.exclude_desktop_elements && self.desktop {
      return false;
    }
    !filter.on_screen_only || (viewable && !self.hidden)
  }
}

/// Reverse a bottom-to-top window list (`_NET_CLIENT_LIST_STACKING`, `QueryTree`)
/// into front-to-back order.
pub(super) fn front_to_back(mut windows: Vec<Window>) -> Vec<Window> {
  windows.reverse();
  windows
}

/// Class part of a `WM_CLASS` value (`instance\0class\0`).
///
/// Falls back to the instance name when no class is set.
pub(super) fn class_name(raw: &[u8]) -> Option<String> {
  let mut parts = raw
    .split(|byte| *byte == 0)
    .filter(|part| !part.is_empty())
    .map(|part| String::from_utf8_lossy(part).into_owned());
  let instance = parts.next()?;
  Some(parts.next().unwrap_or(instance))
}

/// Decode an ICCCM `STRING` property (ISO 8859-1).
pub(super) fn latin1(raw: &[u8]) -> String {
  raw
    .iter()
    .take_while(|byte| **byte != 0)
    .map(|byte| char::from(*byte))
    .collect()
}
