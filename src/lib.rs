//! # classgrade
//!
//! Client library and CLI for grading workflows on Google Classroom:
//! service-account authentication with domain-wide delegation, a typed
//! facade over the Classroom REST API, and bounded Drive downloads for
//! submitted files.

/// Service-account credential loading and token exchange.
pub mod auth;

/// Classroom API facade and resource types.
pub mod classroom;

/// Shared blocking HTTP client.
pub mod client;

/// Bounded Drive media downloads.
pub mod drive;

pub mod error;

/// Wire types for the OAuth token flow.
pub mod types;

pub use classroom::Classroom;
pub use error::ClassroomError;
