//! Data models for the school records backend.
//!
//! Records are schema-driven JSON objects; the response bodies keep the field
//! names clients of the original API expect.

mod record;
mod responses;

pub use record::*;
pub use responses::*;
