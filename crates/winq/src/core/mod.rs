/*!
Core window-system facade.

# Module Structure

- `mod.rs` - `WindowSystem` struct, construction, builder
- `decode.rs` - pure decoding of native records into typed values
- `queries.rs` - enumeration and every query built on top of it

# Example

```no_run
use winq::{Point, WindowSystem};

let system = WindowSystem::new()?;

let active = system.active_window();
println!("{} at {:?}", system.window_title(active), system.window_geometry(active));

let under_cursor = system.window_at(Point::new(200, 300));
println!("window {under_cursor} under the cursor, idle for {} ms", system.idle_time());
# Ok::<(), winq::WinqError>(())
```
*/

pub(crate) mod decode;
mod queries;

use crate::config::ListFilter;
use crate::platform::{self, NativeWindowServer, WindowServer};
use crate::types::WinqResult;

/// Cross-platform window-system queries over one window server.
///
/// Holds no query state: every call goes back to the window server, so answers
/// reflect the screen at the time of the call. Share freely across threads when
/// the server allows it.
pub struct WindowSystem<S = NativeWindowServer> {
  server: S,
  filter: ListFilter,
}

impl<S> std::fmt::Debug for WindowSystem<S> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WindowSystem")
      .field("filter", &self.filter)
      .finish_non_exhaustive()
  }
}

/// Builder for configuring a `WindowSystem`.
///
/// # Example
///
/// ```no_run
/// use winq::WindowSystem;
///
/// let system = WindowSystem::builder()
///     .on_screen_only(true)
///     .exclude_desktop_elements(false)
///     .build()?;
/// # Ok::<(), winq::WinqError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
#[must_use = "Builder does nothing until .build() or .with_server() is called"]
pub struct WindowSystemBuilder {
  filter: ListFilter,
}

impl WindowSystemBuilder {
  /// Only enumerate windows that are on screen. Default: true.
  pub const fn on_screen_only(mut self, on_screen_only: bool) -> Self {
    self.filter.on_screen_only = on_screen_only;
    self
  }

  /// Leave desktop background windows out of enumeration. Default: true.
  pub const fn exclude_desktop_elements(mut self, exclude: bool) -> Self {
    self.filter.exclude_desktop_elements = exclude;
    self
  }

  /// Replace the whole enumeration filter.
  pub const fn filter(mut self, filter: ListFilter) -> Self {
    self.filter = filter;
    self
  }

  /// Connect to this platform's window server.
  ///
  /// Fails if the server is unreachable (e.g. no X display) or the platform has
  /// no backend.
  pub fn build(self) -> WinqResult<WindowSystem> {
    let server = platform::connect()?;
    Ok(self.with_server(server))
  }

  /// Use an already constructed window server.
  pub const fn with_server<S: WindowServer>(self, server: S) -> WindowSystem<S> {
    WindowSystem {
      server,
      filter: self.filter,
    }
  }
}

impl WindowSystem {
  /// Connect to this platform's window server with default options.
  ///
  /// For custom configuration, use [`WindowSystem::builder()`].
  pub fn new() -> WinqResult<Self> {
    Self::builder().build()
  }

  /// Create a builder for configuring a new `WindowSystem`.
  pub fn builder() -> WindowSystemBuilder {
    WindowSystemBuilder::default()
  }
}

impl<S: WindowServer> WindowSystem<S> {
  /// Wrap a window server with the default enumeration filter.
  pub fn with_server(server: S) -> Self {
    WindowSystemBuilder::default().with_server(server)
  }

  /// The window server answering queries.
  pub const fn server(&self) -> &S {
    &self.server
  }

  /// The enumeration filter in use.
  pub const fn filter(&self) -> ListFilter {
    self.filter
  }
}
