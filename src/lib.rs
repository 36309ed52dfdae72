//! # docshelf
//!
//! A small document-management backend: store text documents as fixed-size
//! pages, search them by keyword, score query text against the stored
//! corpus with TF-IDF, and detect unsaved changes by content hash.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────────┐   ┌──────────┐
//! │ import     │──▶│ paginate + hash  │──▶│  SQLite  │
//! │ .txt / .md │   │ (docshelf-core)  │   │ pages    │
//! └────────────┘   └──────────────────┘   └────┬─────┘
//!                                              │
//!                       ┌──────────────────────┤
//!                       ▼                      ▼
//!                 ┌──────────┐          ┌────────────┐
//!                 │ keyword  │          │  TF-IDF    │
//!                 │ search   │          │  score     │
//!                 └──────────┘          └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! shelf init
//! shelf import notes.md
//! shelf search "deployment"
//! shelf score "rare words here"
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`store`] | Document and page persistence |
//! | [`import`] | Text file import |
//! | [`export`] | Text file export |
//! | [`autosave`] | Word-count auto-save check |
//! | [`transliterate`] | Arabic-to-Latin transliteration |
//! | [`ingest`] | Import/update/export/delete commands |
//! | [`search`] | Keyword search and TF-IDF scoring commands |
//! | [`get`] | Document listing and retrieval |
//! | [`inspect`] | Database-free utilities |

pub mod autosave;
pub mod config;
pub mod db;
pub mod export;
pub mod get;
pub mod import;
pub mod ingest;
pub mod inspect;
pub mod migrate;
pub mod search;
pub mod store;
pub mod transliterate;
