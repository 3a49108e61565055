//! Data models for digdag session listings.
//!
//! - [`SessionRecord`] - One session attempt decoded from a `digdag sessions` block
//! - [`SessionParams`] - The scheduling timestamps embedded in a session's params

pub mod params;
pub mod session;

pub use params::SessionParams;
pub use session::{SESSION_FIELD_COUNT, SessionRecord};
