/*!
Platform Abstraction Layer

Each supported platform provides a [`WindowServer`]; [`NativeWindowServer`]
names the one compiled for the current target.
*/

mod traits;

pub use traits::{PropertyKey, WindowProperties, WindowServer};

use crate::types::WinqResult;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(any(
  target_os = "linux",
  target_os = "freebsd",
  target_os = "openbsd",
  target_os = "netbsd"
))]
pub mod x11;

#[cfg(not(any(
  target_os = "macos",
  target_os = "linux",
  target_os = "freebsd",
  target_os = "openbsd",
  target_os = "netbsd"
)))]
pub mod unsupported;

/// Window server for the current target.
#[cfg(target_os = "macos")]
pub type NativeWindowServer = macos::QuartzWindowServer;

/// Window server for the current target.
#[cfg(any(
  target_os = "linux",
  target_os = "freebsd",
  target_os = "openbsd",
  target_os = "netbsd"
))]
pub type NativeWindowServer = x11::X11WindowServer;

/// Window server for the current target.
#[cfg(not(any(
  target_os = "macos",
  target_os = "linux",
  target_os = "freebsd",
  target_os = "openbsd",
  target_os = "netbsd"
)))]
pub type NativeWindowServer = unsupported::UnsupportedWindowServer;

/// Connect to the current target's window server.
pub(crate) fn connect() -> WinqResult<NativeWindowServer> {
  #[cfg(target_os = "macos")]
  let server = Ok(macos::QuartzWindowServer::new());

  #[cfg(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd"
  ))]
  let server = x11::X11WindowServer::connect();

  #[cfg(not(any(
    target_os = "macos",
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd"
  )))]
  let server = unsupported::UnsupportedWindowServer::connect();

  if let Err(error) = &server {
    log::warn!("window server unavailable: {error}");
  }
  server
}
