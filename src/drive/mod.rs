//! # Google Drive client
//!
//! Limited to one capability: bounded media downloads keyed by file
//! identifier.

pub mod client;

pub use client::{CHUNK_SIZE, download_file};
