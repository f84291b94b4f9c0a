/*!
X11 window server.

Reads the EWMH properties a window manager publishes on the root window:
`_NET_CLIENT_LIST_STACKING` for the stacking order, per-window type and state
hints for the layer, and the usual title and class properties. Idle time comes
from the MIT-SCREEN-SAVER extension.

Property reads happen when a record is decoded, not when it is listed, so an
enumeration only pays for the ids and layers it actually needs.
*/

mod ewmh;

use std::sync::Arc;
use std::time::Duration;

use x11rb::connection::Connection;
use x11rb::errors::ReplyError;
use x11rb::protocol::screensaver::ConnectionExt as _;
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt as _, MapState, Window};
use x11rb::rust_connection::RustConnection;

use self::ewmh::EwmhHints;
use super::{PropertyKey, WindowProperties, WindowServer};
use crate::config::ListFilter;
use crate::types::{DecodeError, Rect, WindowId, WinqError, WinqResult};

x11rb::atom_manager! {
  pub(crate) Atoms: AtomsCookie {
    _NET_CLIENT_LIST_STACKING,
    _NET_WM_NAME,
    _NET_WM_STATE,
    _NET_WM_STATE_ABOVE,
    _NET_WM_STATE_BELOW,
    _NET_WM_STATE_HIDDEN,
    _NET_WM_WINDOW_TYPE,
    _NET_WM_WINDOW_TYPE_DESKTOP,
    _NET_WM_WINDOW_TYPE_DOCK,
    UTF8_STRING,
  }
}

/// One X connection shared by the server and the records it hands out.
struct Session {
  conn: RustConnection,
  root: Window,
  atoms: Atoms,
}

impl Session {
  fn property32(
    &self,
    window: Window,
    property: impl Into<Atom>,
    type_: impl Into<Atom>,
  ) -> Result<Vec<u32>, ReplyError> {
    let reply = self
      .conn
      .get_property(false, window, property, type_, 0, u32::MAX)?
      .reply()?;
    Ok(reply.value32().map(Iterator::collect).unwrap_or_default())
  }

  fn property_bytes(
    &self,
    window: Window,
    property: impl Into<Atom>,
    type_: impl Into<Atom>,
  ) -> Result<Vec<u8>, ReplyError> {
    let reply = self
      .conn
      .get_property(false, window, property, type_, 0, u32::MAX)?
      .reply()?;
    Ok(reply.value)
  }

  /// Managed windows, front-to-back.
  fn stacking_order(&self) -> Result<Vec<Window>, ReplyError> {
    let mut windows = self.property32(
      self.root,
      self.atoms._NET_CLIENT_LIST_STACKING,
      AtomEnum::WINDOW,
    )?;

    if windows.is_empty() {
      log::debug!("no _NET_CLIENT_LIST_STACKING, falling back to root children");
      windows = self.conn.query_tree(self.root)?.reply()?.children;
    }

    Ok(ewmh::front_to_back(windows))
  }

  fn hints(&self, window: Window) -> Result<EwmhHints, ReplyError> {
    let atoms = &self.atoms;
    let types = self.property32(window, atoms._NET_WM_WINDOW_TYPE, AtomEnum::ATOM)?;
    let states = self.property32(window, atoms._NET_WM_STATE, AtomEnum::ATOM)?;

    Ok(EwmhHints {
      desktop: types.contains(&atoms._NET_WM_WINDOW_TYPE_DESKTOP),
      dock: types.contains(&atoms._NET_WM_WINDOW_TYPE_DOCK),
      above: states.contains(&atoms._NET_WM_STATE_ABOVE),
      below: states.contains(&atoms._NET_WM_STATE_BELOW),
      hidden: states.contains(&atoms._NET_WM_STATE_HIDDEN),
    })
  }

  fn is_viewable(&self, window: Window) -> Result<bool, ReplyError> {
    let attributes = self.conn.get_window_attributes(window)?.reply()?;
    Ok(attributes.map_state == MapState::VIEWABLE)
  }

  /// Hints of a window that passes `filter`, `None` if it is filtered out.
  fn listed(&self, window: Window, filter: ListFilter) -> Result<Option<EwmhHints>, ReplyError> {
    let hints = self.hints(window)?;
    let viewable = if filter.on_screen_only && !hints.hidden {
      self.is_viewable(window)?
    } else {
      true
    };
    Ok(hints.passes(filter, viewable).then_some(hints))
  }

  fn window_name(&self, window: Window) -> Result<Option<String>, ReplyError> {
    let utf8 = self.property_bytes(window, self.atoms._NET_WM_NAME, self.atoms.UTF8_STRING)?;
    if !utf8.is_empty() {
      return Ok(Some(String::from_utf8_lossy(&utf8).into_owned()));
    }

    let legacy = self.property_bytes(window, AtomEnum::WM_NAME, AtomEnum::STRING)?;
    if legacy.is_empty() {
      Ok(None)
    } else {
      Ok(Some(ewmh::latin1(&legacy)))
    }
  }

  fn class_name(&self, window: Window) -> Result<Option<String>, ReplyError> {
    let raw = self.property_bytes(window, AtomEnum::WM_CLASS, AtomEnum::STRING)?;
    Ok(ewmh::class_name(&raw))
  }

  /// Window rectangle in root coordinates, without window-manager frame.
  fn geometry(&self, window: Window) -> Result<Rect, ReplyError> {
    let geometry = self.conn.get_geometry(window)?.reply()?;
    let origin = self
      .conn
      .translate_coordinates(window, self.root, 0, 0)?
      .reply()?;
    Ok(Rect::new(
      i32::from(origin.dst_x),
      i32::from(origin.dst_y),
      i32::from(geometry.width),
      i32::from(geometry.height),
    ))
  }
}

/// Window server for X11 sessions.
pub struct X11WindowServer {
  session: Arc<Session>,
}

impl std::fmt::Debug for X11WindowServer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("X11WindowServer")
      .field("root", &self.session.root)
      .finish_non_exhaustive()
  }
}

impl X11WindowServer {
  /// Connect to the display named by `$DISPLAY`.
  pub fn connect() -> WinqResult<Self> {
    Self::connect_to(None)
  }

  /// Connect to a specific display, e.g. `":1"`.
  pub fn connect_to(display: Option<&str>) -> WinqResult<Self> {
    let (conn, screen_number) = RustConnection::connect(display).map_err(connection_error)?;

    let root = conn
      .setup()
      .roots
      .get(screen_number)
      .map(|screen| screen.root)
      .ok_or_else(|| WinqError::Connection(format!("screen {screen_number} does not exist")))?;

    let atoms = Atoms::new(&conn)
      .map_err(connection_error)?
      .reply()
      .map_err(connection_error)?;

    log::debug!("X11 window server connected (screen {screen_number}, root {root:#x})");

    Ok(Self {
      session: Arc::new(Session { conn, root, atoms }),
    })
  }

  fn record(&self, window: Window, hints: Option<EwmhHints>) -> X11Record {
    X11Record {
      session: Arc::clone(&self.session),
      window,
      hints,
    }
  }
}

fn connection_error(error: impl std::fmt::Display) -> WinqError {
  WinqError::Connection(error.to_string())
}

impl WindowServer for X11WindowServer {
  type Record = X11Record;

  fn list_windows(&self, filter: ListFilter) -> Vec<X11Record> {
    let windows = match self.session.stacking_order() {
      Ok(windows) => windows,
      Err(error) => {
        log::warn!("cannot read X11 stacking order: {error}");
        return Vec::new();
      }
    };

    windows
      .into_iter()
      .filter_map(|window| match self.session.listed(window, filter) {
        Ok(hints) => hints.map(|hints| self.record(window, Some(hints))),
        Err(error) => {
          // Usually a window destroyed while we were listing.
          log::trace!("skipping X11 window {window:#x}: {error}");
          None
        }
      })
      .collect()
  }

  fn window(&self, id: WindowId) -> Option<X11Record> {
    let window = Window::try_from(id.0).ok()?;
    self
      .session
      .conn
      .get_window_attributes(window)
      .ok()?
      .reply()
      .ok()?;
    Some(self.record(window, None))
  }

  fn idle(&self) -> Duration {
    let info = self
      .session
      .conn
      .screensaver_query_info(self.session.root)
      .map_err(ReplyError::from)
      .and_then(|cookie| cookie.reply());

    match info {
      Ok(info) => Duration::from_millis(u64::from(info.ms_since_user_input)),
      Err(error) => {
        log::warn!("X11 idle query failed: {error}");
        Duration::ZERO
      }
    }
  }
}

/// A window listed by [`X11WindowServer`]. Properties are read on access.
///
/// Records from a listing keep the EWMH hints read while filtering, so the layer
/// costs no extra round trip. Scoped lookups read them on demand.
pub struct X11Record {
  session: Arc<Session>,
  window: Window,
  hints: Option<EwmhHints>,
}

impl X11Record {
  fn hints(&self) -> Result<EwmhHints, ReplyError> {
    match self.hints {
      Some(hints) => Ok(hints),
      None => self.session.hints(self.window),
    }
  }
}

impl std::fmt::Debug for X11Record {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("X11Record")
      .field("window", &self.window)
      .finish_non_exhaustive()
  }
}

fn unavailable(key: PropertyKey, error: &ReplyError) -> DecodeError {
  DecodeError::Unavailable {
    key,
    reason: error.to_string(),
  }
}

impl WindowProperties for X11Record {
  fn integer(&self, key: PropertyKey) -> Result<i64, DecodeError> {
    match key {
      PropertyKey::WindowNumber => Ok(i64::from(self.window)),
      PropertyKey::Layer => self
        .hints()
        .map(|hints| i64::from(hints.layer().0))
        .map_err(|error| unavailable(key, &error)),
      PropertyKey::Bounds | PropertyKey::Name | PropertyKey::OwnerName => {
        Err(DecodeError::TypeMismatch {
          key,
          expected: "integer",
        })
      }
    }
  }

  fn text(&self, key: PropertyKey) -> Result<String, DecodeError> {
    let value = match key {
      PropertyKey::Name => self.session.window_name(self.window),
      PropertyKey::OwnerName => self.session.class_name(self.window),
      PropertyKey::WindowNumber | PropertyKey::Layer | PropertyKey::Bounds => {
        return Err(DecodeError::TypeMismatch {
          key,
          expected: "string",
        });
      }
    };

    value
      .map_err(|error| unavailable(key, &error))?
      .ok_or(DecodeError::Missing(key))
  }

  fn bounds(&self, key: PropertyKey) -> Result<Rect, DecodeError> {
    match key {
      PropertyKey::Bounds => self
        .session
        .geometry(self.window)
        .map_err(|error| unavailable(key, &error)),
      PropertyKey::WindowNumber | PropertyKey::Layer | PropertyKey::Name | PropertyKey::OwnerName => {
        Err(DecodeError::TypeMismatch {
          key,
          expected: "bounds record",
        })
      }
    }
  }
}
