//! Tagset System
//!
//! The closed rule tables (tags, features, lexical overrides) as versioned
//! data rather than code.

pub mod registry;
pub mod schema;

pub use registry::{TagsetRegistry, DEFAULT_TAGSET};
pub use schema::{Refinements, Tagset, TagsetFile, TagsetMeta};
