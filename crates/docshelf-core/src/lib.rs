//! # docshelf core
//!
//! Pure document indexing and retrieval logic for docshelf: the page
//! model, fixed-size pagination, content fingerprints, a corpus-relative
//! TF-IDF scorer, and keyword search over paginated documents.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other
//! native-only dependencies. Storage and file handling live in the
//! `docshelf` application crate.

pub mod error;
pub mod hash;
pub mod models;
pub mod paginate;
pub mod search;
pub mod tfidf;

pub use error::{Error, Result};
