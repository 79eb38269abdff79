//! Data models for fieldstore.
//!
//! Records carry an explicit [`RecordId`] that says whether the server has
//! confirmed them, and stores report their connectivity as a [`StoreMode`].

mod mode;
mod record;

pub use mode::StoreMode;
pub use record::{LocalId, Record, RecordId, ServerId, value_text};
