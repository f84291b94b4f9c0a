/*!
Winq - Window System Queries

Enumerate top-level windows, resolve their titles and screen geometry, find the
active window or the window under a point, and measure input idle time, on
whichever window server the process runs against.

```no_run
use winq::{Point, WindowSystem};

let system = WindowSystem::new()?;

// Layer-ordered ids, frontmost first within a layer
for id in system.windows() {
    println!("{id}: {:?} {:?}", system.window_title(id), system.window_geometry(id));
}

let active = system.active_window();
let by_title = system.find_window("Terminal");
let under_point = system.window_at(Point::new(640, 400));
let idle_ms = system.idle_time();
# Ok::<(), winq::WinqError>(())
```

Misses never error: unknown windows resolve to [`WindowId::NOT_FOUND`], an empty
title or [`Rect::EMPTY`]. Only connecting to the window server can fail.
*/

mod config;
mod core;
pub mod platform;
pub mod testing;

mod types;
pub use types::*;

pub use crate::config::ListFilter;
pub use crate::core::{WindowSystem, WindowSystemBuilder};
pub use crate::platform::{NativeWindowServer, PropertyKey, WindowProperties, WindowServer};
