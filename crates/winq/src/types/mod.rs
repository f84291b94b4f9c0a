/*! Core types for winq. */

#![allow(missing_docs)]

mod collection;
mod error;
mod geometry;
mod ids;
mod window;

pub use collection::WindowCollection;
pub use error::{DecodeError, WinqError, WinqResult};
pub use geometry::{Point, Rect};
pub use ids::{StackLayer, WindowId};
pub use window::WindowRecord;
