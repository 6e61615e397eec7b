//! # Google Classroom client
//!
//! Typed facade over the Classroom REST API: courses, course work, student
//! submissions, rosters, user profiles, and grade patches.
//!
//! ## Submodules
//! - `client`: the facade itself, one method per remote operation.
//! - `types`: the resource and envelope structures serialized to and
//!   deserialized from the API.

pub mod client;
pub mod types;

pub use client::Classroom;
pub use types::*;
