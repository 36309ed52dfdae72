//! Fixed-size text paginator.
//!
//! Splits document text into [`Page`]s of exactly [`PAGE_SIZE`]
//! characters, the last page holding the remainder. Splits happen on
//! `char` boundaries, so a multi-byte code point is never cut in half.
//!
//! # Guarantees
//!
//! - At least one page is always returned (an empty page for empty text).
//! - Page numbers are contiguous: `1, 2, …, N` with `N = ceil(L / PAGE_SIZE)`.
//! - Concatenating page contents in order reproduces the input exactly.
//!
//! # Example
//!
//! ```rust
//! use docshelf_core::paginate::paginate;
//!
//! let pages = paginate("doc-1", &"a".repeat(250));
//! let lens: Vec<usize> = pages.iter().map(|p| p.content.len()).collect();
//! assert_eq!(lens, vec![100, 100, 50]);
//! ```

use crate::models::Page;

/// Characters per page.
pub const PAGE_SIZE: usize = 100;

/// Split `text` into pages of [`PAGE_SIZE`] characters.
pub fn paginate(document_id: &str, text: &str) -> Vec<Page> {
    if text.is_empty() {
        return vec![Page::new(document_id, 1, "")];
    }

    let mut pages = Vec::with_capacity(page_count(text));
    let mut start = 0;
    let mut chars_in_page = 0;

    for (offset, _) in text.char_indices() {
        if chars_in_page == PAGE_SIZE {
            pages.push(make_page(document_id, pages.len(), &text[start..offset]));
            start = offset;
            chars_in_page = 0;
        }
        chars_in_page += 1;
    }
    pages.push(make_page(document_id, pages.len(), &text[start..]));

    pages
}

/// Like [`paginate`], treating a missing text as empty.
pub fn paginate_opt(document_id: &str, text: Option<&str>) -> Vec<Page> {
    paginate(document_id, text.unwrap_or_default())
}

/// Number of pages [`paginate`] produces for `text`.
pub fn page_count(text: &str) -> usize {
    text.chars().count().div_ceil(PAGE_SIZE).max(1)
}

fn make_page(document_id: &str, index: usize, content: &str) -> Page {
    Page::new(document_id, index as u32 + 1, content)
}
