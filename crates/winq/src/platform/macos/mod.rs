/*!
macOS window server.

Backed by Quartz Window Services (`CGWindowListCopyWindowInfo`) for window
listings and Quartz Event Services for idle time.
*/

mod cf_utils;
mod window_list;

pub use window_list::{QuartzRecord, QuartzWindowServer};
