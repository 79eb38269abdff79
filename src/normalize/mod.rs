//! Server-to-view normalization.
//!
//! Each resource declares a [`FieldMapping`]: an ordered table of view
//! fields, the server fields they may be read from, and how to coerce them.
//! The same table writes view fields back under their server names when a
//! record is sent to the backend.

mod mapping;

pub use mapping::{FieldKind, FieldMapping, FieldRule};
