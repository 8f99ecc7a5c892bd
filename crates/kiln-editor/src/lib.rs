//! # kiln-editor — Editor core for kiln
//!
//! Everything the editor knows about text, independent of the terminal:
//!
//! - **[`row`]** / **[`document`]** — rows of raw bytes with their rendered
//!   form and highlight tags, and the document that edits, loads and saves them
//! - **[`column`]** — raw ↔ render column mapping (tab expansion)
//! - **[`syntax`]** / **[`highlight`]** — the highlight database and the
//!   per-row classifier with block-comment carry between rows
//! - **[`search`]** — incremental find with a transient match overlay
//! - **[`cursor`]**, **[`view`]**, **[`prompt`]**, **[`key`]** — the screen
//!   editor surface the binary drives
//! - **[`transform`]** — whole-document rewrites such as prototype generation

pub mod column;
pub mod config;
pub mod cursor;
pub mod document;
pub mod error;
pub mod highlight;
pub mod key;
pub mod position;
pub mod prompt;
pub mod row;
pub mod search;
pub mod syntax;
pub mod transform;
pub mod view;

pub use error::{Error, Result};
