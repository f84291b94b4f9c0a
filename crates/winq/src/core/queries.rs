/*!
Window queries.

Enumeration decodes the bulk native listing into a [`WindowCollection`]; every
derived query walks that collection in order and resolves per-window metadata
with a scoped native lookup. Failures collapse to sentinels here and nowhere else.
*/

use super::{decode, WindowSystem};
use crate::platform::WindowServer;
use crate::types::{DecodeError, Point, Rect, StackLayer, WindowCollection, WindowId};

impl<S: WindowServer> WindowSystem<S> {
  /// Enumerate windows, ordered by ascending layer then front-to-back.
  ///
  /// Records whose id cannot be decoded are skipped. Records whose layer cannot be
  /// decoded are kept at [`StackLayer::UNKNOWN`].
  pub fn enumerate(&self) -> WindowCollection {
    let records = self.server.list_windows(self.filter);
    let listed = records.len();
    let mut windows = WindowCollection::new();

    for record in &records {
      let id = match decode::window_id(record) {
        Ok(id) => id,
        Err(error) => {
          log::trace!("skipping window record: {error}");
          continue;
        }
      };

      let layer = decode::stack_layer(record).unwrap_or_else(|error| {
        log::trace!("window {id}: {error}, layer unknown");
        StackLayer::UNKNOWN
      });

      windows.insert(layer, id);
    }

    if windows.len() < listed {
      log::debug!("enumerated {} of {listed} window records", windows.len());
    }

    windows
  }

  /// Ids of enumerated windows in collection order.
  pub fn windows(&self) -> Vec<WindowId> {
    self.enumerate().ids().collect()
  }

  /// The frontmost ordinary (layer 0) window.
  ///
  /// Window servers do not flag the focused window in their listings; the first
  /// layer-0 window in stacking order stands in for it on every platform.
  /// Returns [`WindowId::NOT_FOUND`] when there is none.
  pub fn active_window(&self) -> WindowId {
    self
      .enumerate()
      .first_at(StackLayer::ORDINARY)
      .unwrap_or(WindowId::NOT_FOUND)
  }

  /// Title of a window, or an empty string if it is gone or untitled.
  ///
  /// Windows named with the `"Item-0"` placeholder report their owning
  /// application's name instead.
  pub fn window_title(&self, id: WindowId) -> String {
    self.lookup(id, decode::title).unwrap_or_default()
  }

  /// Titles of all enumerated windows, in collection order.
  pub fn window_titles(&self) -> Vec<String> {
    self
      .enumerate()
      .ids()
      .map(|id| self.window_title(id))
      .collect()
  }

  /// Screen rectangle of a window, or [`Rect::EMPTY`] if unavailable.
  pub fn window_geometry(&self, id: WindowId) -> Rect {
    self.lookup(id, decode::geometry).unwrap_or_default()
  }

  /// First window in collection order whose title equals `title` exactly.
  pub fn find_window(&self, title: &str) -> WindowId {
    self
      .enumerate()
      .ids()
      .find(|id| self.window_title(*id) == title)
      .unwrap_or(WindowId::NOT_FOUND)
  }

  /// First window in collection order whose geometry contains `point`.
  ///
  /// Overlapping windows resolve to the one stacked in front.
  pub fn window_at(&self, point: impl Into<Point>) -> WindowId {
    let point = point.into();
    self
      .enumerate()
      .ids()
      .find(|id| self.window_geometry(*id).contains(point))
      .unwrap_or(WindowId::NOT_FOUND)
  }

  /// Milliseconds since the last user input event, truncated.
  pub fn idle_time(&self) -> u64 {
    decode::idle_millis(self.server.idle())
  }

  /// Scoped lookup of one window followed by a decode step.
  fn lookup<T>(
    &self,
    id: WindowId,
    decode_with: impl FnOnce(&S::Record) -> Result<T, DecodeError>,
  ) -> Option<T> {
    if !id.is_found() {
      return None;
    }

    let Some(record) = self.server.window(id) else {
      log::trace!("window {id} not found");
      return None;
    };

    decode_with(&record)
      .map_err(|error| log::trace!("window {id}: {error}"))
      .ok()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;
  use std::thread;
  use std::time::Duration;

  use super::*;
  use crate::config::ListFilter;
  use crate::platform::PropertyKey;
  use crate::testing::{MemoryWindowServer, NativeRecord};

  const DESKTOP: &str = include_str!("../testing/fixtures/desktop.json");

  fn init_logging() {
    drop(env_logger::builder().is_test(true).try_init());
  }

  fn desktop() -> WindowSystem<MemoryWindowServer> {
    init_logging();
    let server = MemoryWindowServer::from_json(DESKTOP).unwrap();
    WindowSystem::with_server(server)
  }

  fn layers(system: &WindowSystem<MemoryWindowServer>) -> Vec<StackLayer> {
    system.enumerate().iter().map(|record| record.layer).collect()
  }

  mod enumeration {
    use super::*;

    #[test]
    fn fixture_order() {
      let system = desktop();
      assert_eq!(
        system.windows(),
        vec![WindowId(77), WindowId(412), WindowId(388), WindowId(31)]
      );
    }

    #[test]
    fn repeated_calls_agree() {
      let system = desktop();
      assert_eq!(system.windows(), system.windows());
    }

    #[test]
    fn layers_never_decrease() {
      let system = desktop();
      let layers = layers(&system);
      assert!(layers.windows(2).all(|pair| pair[0] <= pair[1]), "{layers:?}");
    }

    #[test]
    fn native_order_kept_within_layer() {
      let server = MemoryWindowServer::with_windows(vec![
        NativeRecord::window(5, 0),
        NativeRecord::window(9, 3),
        NativeRecord::window(2, 0),
        NativeRecord::window(7, 0),
      ]);
      let system = WindowSystem::with_server(server);
      assert_eq!(
        system.windows(),
        vec![WindowId(5), WindowId(2), WindowId(7), WindowId(9)]
      );
    }

    #[test]
    fn undecodable_layer_sorts_first_as_unknown() {
      let system = desktop();
      let collection = system.enumerate();
      assert_eq!(collection.layer_of(WindowId(77)), Some(StackLayer::UNKNOWN));
      assert_eq!(layers(&system).first(), Some(&StackLayer::UNKNOWN));
    }

    #[test]
    fn missing_layer_is_unknown_not_ordinary() {
      let server = MemoryWindowServer::with_windows(vec![
        NativeRecord::window(3, 0).without(PropertyKey::Layer)
      ]);
      let system = WindowSystem::with_server(server);
      assert_eq!(system.enumerate().layer_of(WindowId(3)), Some(StackLayer::UNKNOWN));
      assert_eq!(system.active_window(), WindowId::NOT_FOUND);
    }

    #[test]
    fn bad_ids_are_skipped() {
      let server = MemoryWindowServer::with_windows(vec![
        NativeRecord::new().with(PropertyKey::Layer, 0),
        NativeRecord::new()
          .with(PropertyKey::WindowNumber, "42")
          .with(PropertyKey::Layer, 0),
        NativeRecord::new()
          .with(PropertyKey::WindowNumber, -4)
          .with(PropertyKey::Layer, 0),
        NativeRecord::window(0, 0),
        NativeRecord::window(8, 0),
      ]);
      let system = WindowSystem::with_server(server);
      assert_eq!(system.windows(), vec![WindowId(8)]);
    }

    #[test]
    fn filter_comes_from_builder() {
      init_logging();
      let server = MemoryWindowServer::from_json(DESKTOP).unwrap();
      let system = WindowSystem::builder()
        .filter(ListFilter::everything())
        .with_server(server);
      assert_eq!(
        system.windows(),
        vec![
          WindowId(77),
          WindowId(12),
          WindowId(412),
          WindowId(388),
          WindowId(405),
          WindowId(31)
        ]
      );
    }

    #[test]
    fn empty_screen() {
      let system = desktop();
      system.server().clear();
      assert!(system.windows().is_empty());
      assert!(system.window_titles().is_empty());
      assert_eq!(system.active_window(), WindowId::NOT_FOUND);
    }
  }

  mod active_window {
    use super::*;

    #[test]
    fn first_ordinary_window() {
      let system = desktop();
      assert_eq!(system.active_window(), WindowId(412));
    }

    #[test]
    fn active_window_is_listed_at_layer_zero() {
      let system = desktop();
      let active = system.active_window();
      assert!(active.is_found());
      assert_eq!(system.enumerate().layer_of(active), Some(StackLayer::ORDINARY));
      assert!(system.windows().contains(&active));
    }

    #[test]
    fn new_front_window_becomes_active() {
      let system = desktop();
      system.server().push_front(NativeRecord::window(500, 0).named("Untitled"));
      assert_eq!(system.active_window(), WindowId(500));
      assert_eq!(system.find_window("Untitled"), WindowId(500));
    }

    #[test]
    fn follows_raise() {
      let system = desktop();
      assert!(system.server().raise(WindowId(388)));
      assert_eq!(system.active_window(), WindowId(388));
    }

    #[test]
    fn none_without_ordinary_windows() {
      let server = MemoryWindowServer::with_windows(vec![
        NativeRecord::window(1, 25),
        NativeRecord::window(2, 3),
      ]);
      let system = WindowSystem::with_server(server);
      assert_eq!(system.active_window(), WindowId::NOT_FOUND);
    }
  }

  mod metadata {
    use super::*;

    #[test]
    fn placeholder_title_uses_owner() {
      let system = desktop();
      assert_eq!(system.window_title(WindowId(388)), "Finder");
      assert_eq!(system.window_title(WindowId(412)), "notes.txt");
    }

    #[test]
    fn placeholder_without_owner_is_empty() {
      let server =
        MemoryWindowServer::with_windows(vec![NativeRecord::window(4, 0).named("Item-0")]);
      let system = WindowSystem::with_server(server);
      assert_eq!(system.window_title(WindowId(4)), "");
    }

    #[test]
    fn titles_in_collection_order() {
      let system = desktop();
      assert_eq!(
        system.window_titles(),
        vec!["Inspector", "notes.txt", "Finder", "SystemUIServer"]
      );
    }

    #[test]
    fn geometry_from_bounds() {
      let system = desktop();
      assert_eq!(
        system.window_geometry(WindowId(412)),
        Rect::new(100, 100, 800, 600)
      );
      assert_eq!(system.window_geometry(WindowId(77)), Rect::EMPTY, "no bounds");
    }

    #[test]
    fn scoped_lookup_sees_offscreen_windows() {
      let system = desktop();
      assert_eq!(system.window_title(WindowId(405)), "Downloads");
    }

    #[test]
    fn closed_window_resolves_empty() {
      let system = desktop();
      let listed = system.windows();
      assert!(system.server().remove(WindowId(412)));

      assert!(listed.contains(&WindowId(412)));
      assert_eq!(system.window_title(WindowId(412)), "");
      assert_eq!(system.window_geometry(WindowId(412)), Rect::EMPTY);
    }

    #[test]
    fn answers_follow_replaced_screen() {
      let system = desktop();
      system.server().set_windows(vec![
        NativeRecord::window(9, 0).named("Mail").bounded(Rect::new(0, 0, 10, 10))
      ]);
      assert_eq!(system.windows(), vec![WindowId(9)]);
      assert_eq!(system.window_title(WindowId(412)), "");
      assert_eq!(system.window_at((5, 5)), WindowId(9));
    }

    #[test]
    fn sentinel_resolves_empty() {
      let system = desktop();
      assert_eq!(system.window_title(WindowId::NOT_FOUND), "");
      assert_eq!(system.window_geometry(WindowId::NOT_FOUND), Rect::EMPTY);
    }
  }

  mod lookup {
    use super::*;

    #[test]
    fn find_by_exact_title() {
      let system = desktop();
      assert_eq!(system.find_window("notes.txt"), WindowId(412));
      assert_eq!(system.find_window("Finder"), WindowId(388));
      assert_eq!(system.find_window("finder"), WindowId::NOT_FOUND);
    }

    #[test]
    fn find_only_searches_enumerated_windows() {
      let system = desktop();
      assert_eq!(system.find_window("Downloads"), WindowId::NOT_FOUND);
    }

    #[test]
    fn unknown_title_and_point_are_not_found() {
      let system = desktop();
      assert_eq!(system.find_window("no-such-title-exists"), WindowId::NOT_FOUND);
      assert_eq!(system.window_at(Point::new(-99999, -99999)), WindowId::NOT_FOUND);
    }

    #[test]
    fn front_window_wins_overlap() {
      let system = desktop();
      assert_eq!(system.window_at(Point::new(500, 400)), WindowId(412));
      assert_eq!(system.window_at((1000, 800)), WindowId(388));
    }

    #[test]
    fn point_on_far_edge_is_outside() {
      let server = MemoryWindowServer::with_windows(vec![
        NativeRecord::window(1, 0).bounded(Rect::new(0, 0, 100, 100))
      ]);
      let system = WindowSystem::with_server(server);
      assert_eq!(system.window_at((0, 0)), WindowId(1));
      assert_eq!(system.window_at((99, 99)), WindowId(1));
      assert_eq!(system.window_at((100, 50)), WindowId::NOT_FOUND);
    }

    #[test]
    fn lower_layer_wins_even_when_behind() {
      let server = MemoryWindowServer::with_windows(vec![
        NativeRecord::window(1, 25).bounded(Rect::new(0, 0, 50, 50)),
        NativeRecord::window(2, 0).bounded(Rect::new(0, 0, 50, 50)),
      ]);
      let system = WindowSystem::with_server(server);
      assert_eq!(system.window_at((10, 10)), WindowId(2));
    }
  }

  mod idle {
    use super::*;

    #[test]
    fn fresh_input_is_recent() {
      let system = WindowSystem::with_server(MemoryWindowServer::new());
      system.server().input_event();
      assert!(system.idle_time() < 100);
    }

    #[test]
    fn reports_milliseconds() {
      let system = WindowSystem::with_server(MemoryWindowServer::new());
      system.server().set_idle(Duration::from_secs(3));
      let idle = system.idle_time();
      assert!((3000..60_000).contains(&idle), "{idle}");
    }
  }

  mod sharing {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shared_server_is_thread_safe() {
      assert_send_sync::<WindowSystem<Arc<MemoryWindowServer>>>();
      assert_send_sync::<WindowSystem<&MemoryWindowServer>>();
    }

    #[test]
    fn concurrent_queries_see_consistent_answers() {
      init_logging();
      let server = Arc::new(MemoryWindowServer::from_json(DESKTOP).unwrap());
      let system = WindowSystem::with_server(Arc::clone(&server));

      thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
          .map(|_| {
            scope.spawn(|| {
              (0..200)
                .map(|_| (system.active_window(), system.window_at((500, 400))))
                .collect::<Vec<_>>()
            })
          })
          .collect();

        assert!(server.remove(WindowId(412)));

        for reader in readers {
          for (active, at_point) in reader.join().unwrap() {
            assert!(
              [WindowId(412), WindowId(388)].contains(&active),
              "{active}"
            );
            assert!(
              [WindowId(412), WindowId(388)].contains(&at_point),
              "{at_point}"
            );
          }
        }
      });

      assert_eq!(system.active_window(), WindowId(388));
      assert_eq!(system.window_at((500, 400)), WindowId(388));
      assert_eq!(system.window_title(WindowId(412)), "");
    }

    #[test]
    fn borrowed_server_sees_caller_changes() {
      let server = MemoryWindowServer::new();
      let system = WindowSystem::with_server(&server);
      assert_eq!(system.active_window(), WindowId::NOT_FOUND);

      server.push(NativeRecord::window(3, 0).named("Terminal"));
      assert_eq!(system.find_window("Terminal"), WindowId(3));
    }
  }
}
