//! Core data models shared by pagination, search, and storage.
//!
//! A [`Document`] owns its [`Page`]s in reading order. Pages carry a
//! back-reference to their document id but no ownership edge.

use serde::{Deserialize, Serialize};

/// A fixed-size contiguous slice of a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Id of the owning document.
    pub document_id: String,
    /// 1-based, sequential within a document.
    pub page_number: u32,
    /// 0-based position within the document (`page_number - 1`).
    pub page_index: usize,
    /// Page text, at most [`crate::paginate::PAGE_SIZE`] characters.
    pub content: String,
}

impl Page {
    pub fn new(document_id: impl Into<String>, page_number: u32, content: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            page_number,
            page_index: page_number.saturating_sub(1) as usize,
            content: content.into(),
        }
    }
}

/// A named document split into ordered pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique within a collection.
    pub id: String,
    /// Display label; not required to be unique.
    pub name: String,
    /// Pages in `page_number` order.
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(id: impl Into<String>, name: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pages,
        }
    }

    /// Reassemble the document text by concatenating page contents.
    pub fn text(&self) -> String {
        self.pages.iter().map(|p| p.content.as_str()).collect()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
