//! Terminal rendering of resource pages.
//!
//! Turns a [`PageView`](crate::view::PageView) into an aligned text table
//! with a pagination strip, or into a JSON document for scripting.

mod table;

pub use table::{OutputFormat, TableRenderer, render_strip};
