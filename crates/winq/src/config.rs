/*!
Configuration for window enumeration.

All values have sensible defaults. Override through the builder:

```
use winq::testing::MemoryWindowServer;
use winq::WindowSystem;

let system = WindowSystem::builder()
    .on_screen_only(false)
    .with_server(MemoryWindowServer::new());
assert!(!system.filter().on_screen_only);
```
*/

use serde::{Deserialize, Serialize};

/// Which windows the bulk native query reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListFilter {
  /// Only report windows currently on screen.
  /// Default: true.
  pub on_screen_only: bool,

  /// Leave out desktop background and desktop icon windows.
  /// Default: true.
  pub exclude_desktop_elements: bool,
}

impl Default for ListFilter {
  fn default() -> Self {
    Self::new()
  }
}

impl ListFilter {
  /// The default filter: on-screen windows, desktop elements excluded.
  pub const fn new() -> Self {
    Self {
      on_screen_only: true,
      exclude_desktop_elements: true,
    }
  }

  /// Report every window the server knows about.
  pub const fn everything() -> Self {
    Self {
      on_screen_only: false,
      exclude_desktop_elements: false,
    }
  }
}
