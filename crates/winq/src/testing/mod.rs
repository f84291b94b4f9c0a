/*!
In-memory window server for tests.

[`MemoryWindowServer`] keeps a list of synthetic native records and answers the
same three native questions a platform backend does, so the whole query pipeline
(decoding, ordering, heuristics) runs unchanged without touching a real screen.

```
use winq::testing::{MemoryWindowServer, NativeRecord};
use winq::{Rect, WindowId, WindowSystem};

let server = MemoryWindowServer::new();
server.push(NativeRecord::window(7, 0).named("Item-0").owned_by("Finder"));

let system = WindowSystem::with_server(server);
assert_eq!(system.active_window(), WindowId(7));
assert_eq!(system.window_title(WindowId(7)), "Finder");
assert_eq!(system.window_geometry(WindowId(7)), Rect::EMPTY);
```
*/

mod memory;
mod record;

pub use memory::MemoryWindowServer;
pub use record::{NativeRecord, PropertyValue};
