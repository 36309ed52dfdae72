//! Keyword search over paginated documents.
//!
//! Scans documents in the order given and their pages in `page_number`
//! order. The first page that contains the keyword ends the scan of that
//! document, so each document contributes at most one match.
//!
//! # Matching
//!
//! 1. Trim the keyword; fewer than [`MIN_KEYWORD_LEN`] characters is an
//!    [`Error::InvalidArgument`], raised before any document is scanned.
//! 2. Lowercase keyword and page content char by char and look for the
//!    keyword as a substring.
//! 3. On a hit, widen the match to whole words and prepend the word that
//!    precedes it on the same page, if any.
//! 4. Render `"<name>: <context>"`.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Document, Page};

/// Shortest accepted keyword, in characters, after trimming.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Separator between document name and context in rendered results.
pub const RESULT_SEPARATOR: &str = ": ";

/// The first keyword hit within one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordMatch {
    pub document_id: String,
    pub document_name: String,
    pub page_number: u32,
    /// Matched word(s) plus the preceding word on the same page.
    pub context: String,
}

impl fmt::Display for KeywordMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.document_name, RESULT_SEPARATOR, self.context)
    }
}

/// Trim `keyword` and check its length.
pub fn validate_keyword(keyword: &str) -> Result<&str> {
    let trimmed = keyword.trim();
    let len = trimmed.chars().count();
    if len < MIN_KEYWORD_LEN {
        return Err(Error::InvalidArgument(format!(
            "keyword must be at least {} characters, got {}",
            MIN_KEYWORD_LEN, len
        )));
    }
    Ok(trimmed)
}

/// Find the first matching page of each document.
///
/// `keyword` goes through [`validate_keyword`] here, so a caller that
/// already validated it can pass either the raw or the trimmed form.
pub fn find_matches(keyword: &str, documents: &[Document]) -> Result<Vec<KeywordMatch>> {
    let keyword = validate_keyword(keyword)?;
    let needle: Vec<char> = keyword.chars().flat_map(char::to_lowercase).collect();

    let mut matches = Vec::new();
    for doc in documents {
        if let Some(m) = first_match(doc, &needle) {
            matches.push(m);
        }
    }

    debug!(
        keyword,
        documents = documents.len(),
        matches = matches.len(),
        "keyword search finished"
    );
    Ok(matches)
}

/// Search `documents` for `keyword`, returning one rendered result per
/// matching document in input order.
pub fn search_keyword(keyword: &str, documents: &[Document]) -> Result<Vec<String>> {
    Ok(find_matches(keyword, documents)?
        .iter()
        .map(KeywordMatch::to_string)
        .collect())
}

fn first_match(doc: &Document, needle: &[char]) -> Option<KeywordMatch> {
    let mut pages: Vec<&Page> = doc.pages.iter().collect();
    pages.sort_by_key(|p| p.page_number);

    for page in pages {
        if let Some(context) = match_context(&page.content, needle) {
            return Some(KeywordMatch {
                document_id: doc.id.clone(),
                document_name: doc.name.clone(),
                page_number: page.page_number,
                context,
            });
        }
    }
    None
}

/// Context window for the first case-insensitive occurrence of `needle`.
fn match_context(content: &str, needle: &[char]) -> Option<String> {
    let (start, end) = find_folded(content, needle)?;

    let word_start = content[..start]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let word_end = content[end..]
        .find(char::is_whitespace)
        .map(|i| end + i)
        .unwrap_or(content.len());

    let before = content[..word_start].trim_end();
    let context_start = before
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let context_start = if before.is_empty() { word_start } else { context_start };

    Some(
        content[context_start..word_end]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Byte range in `haystack` of the first occurrence of the lowercased
/// `needle`, comparing lowercased chars.
fn find_folded(haystack: &str, needle: &[char]) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let folded: Vec<(usize, char)> = haystack
        .char_indices()
        .flat_map(|(i, c)| c.to_lowercase().map(move |l| (i, l)))
        .collect();
    if folded.len() < needle.len() {
        return None;
    }

    (0..=folded.len() - needle.len()).find_map(|s| {
        let window = &folded[s..s + needle.len()];
        if !window.iter().map(|(_, c)| *c).eq(needle.iter().copied()) {
            return None;
        }
        let last = window[needle.len() - 1].0;
        let last_len = haystack[last..].chars().next().map_or(0, char::len_utf8);
        Some((window[0].0, last + last_len))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, name: &str, pages: &[&str]) -> Document {
        let pages = pages
            .iter()
            .enumerate()
            .map(|(i, content)| Page::new(id, i as u32 + 1, *content))
            .collect();
        Document::new(id, name, pages)
    }

    #[test]
    fn test_keyword_found() {
        let docs = vec![doc("1", "TestDoc", &["This is a test document with keyword"])];
        let results = search_keyword("test", &docs).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].contains("test"));
    }

    #[test]
    fn test_keyword_not_found() {
        let docs = vec![doc("1", "TestDoc", &["This is a sample document"])];
        assert!(search_keyword("missing", &docs).unwrap().is_empty());
    }

    #[test]
    fn test_short_keyword_rejected() {
        let docs = vec![doc("1", "TestDoc", &["Some content here"])];
        let err = search_keyword("ab", &docs).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(matches!(search_keyword("@#", &docs), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_short_keyword_rejected_for_empty_collection() {
        assert!(matches!(search_keyword("ab", &[]), Err(Error::InvalidArgument(_))));
        assert!(matches!(search_keyword("  ab  ", &[]), Err(Error::InvalidArgument(_))));
        assert!(matches!(search_keyword("", &[]), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_three_characters_accepted() {
        let docs = vec![doc("1", "TestDoc", &["The cat sat on the mat"])];
        let results = search_keyword("cat", &docs).unwrap();
        assert_eq!(results, vec!["TestDoc: The cat".to_string()]);
        assert!(search_keyword("  cat ", &docs).is_ok());
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(validate_keyword("عرب").is_ok());
        assert!(validate_keyword("éé").is_err());
    }

    #[test]
    fn test_case_insensitive() {
        let docs = vec![doc("1", "TestDoc", &["This document contains KEYWORD in caps"])];
        let results = search_keyword("keyword", &docs).unwrap();
        assert_eq!(results, vec!["TestDoc: contains KEYWORD".to_string()]);
        assert_eq!(search_keyword("KeyWord", &docs).unwrap().len(), 1);
    }

    #[test]
    fn test_multiple_documents_keep_input_order() {
        let docs = vec![
            doc("1", "Doc1", &["First document with target word"]),
            doc("2", "Doc2", &["Second document with target word"]),
            doc("3", "Doc3", &["Third document without it"]),
        ];
        let results = search_keyword("target", &docs).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].starts_with("Doc1"));
        assert!(results[1].starts_with("Doc2"));
    }

    #[test]
    fn test_includes_preceding_word() {
        let docs = vec![doc("1", "TestDoc", &["The quick brown fox jumps"])];
        let results = search_keyword("brown", &docs).unwrap();
        assert!(results[0].contains("quick brown"));
        assert_eq!(results[0], "TestDoc: quick brown");
    }

    #[test]
    fn test_match_at_start_has_no_preceding_word() {
        let docs = vec![doc("1", "TestDoc", &["keyword is at the beginning"])];
        let results = search_keyword("keyword", &docs).unwrap();
        assert_eq!(results, vec!["TestDoc: keyword".to_string()]);
    }

    #[test]
    fn test_substring_widens_to_word() {
        let docs = vec![doc("1", "TestDoc", &["Document with special@chars inside"])];
        let results = search_keyword("special", &docs).unwrap();
        assert_eq!(results, vec!["TestDoc: with special@chars".to_string()]);
    }

    #[test]
    fn test_numbers() {
        let docs = vec![doc("1", "TestDoc", &["Document with number 123 inside"])];
        assert_eq!(search_keyword("123", &docs).unwrap(), vec!["TestDoc: number 123".to_string()]);
    }

    #[test]
    fn test_multiple_whitespace() {
        let docs = vec![doc("1", "TestDoc", &["Multiple   spaces   between   words"])];
        let results = search_keyword("spaces", &docs).unwrap();
        assert_eq!(results, vec!["TestDoc: Multiple spaces".to_string()]);
    }

    #[test]
    fn test_found_on_first_page() {
        let docs = vec![doc("1", "MultiPageDoc", &["First page with target", "Second page content"])];
        let matches = find_matches("target", &docs).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].page_number, 1);
    }

    #[test]
    fn test_stops_at_first_matching_page() {
        let docs = vec![doc("1", "Doc", &["First page with keyword", "Second page with keyword"])];
        let matches = find_matches("keyword", &docs).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].page_number, 1);
        assert_eq!(matches[0].context, "with keyword");
    }

    #[test]
    fn test_first_occurrence_on_page() {
        let docs = vec![doc("1", "Doc", &["alpha keyword beta keyword"])];
        let results = search_keyword("keyword", &docs).unwrap();
        assert_eq!(results, vec!["Doc: alpha keyword".to_string()]);
    }

    #[test]
    fn test_match_on_later_page() {
        let docs = vec![doc("1", "Doc", &["nothing here", "later page has needle"])];
        let matches = find_matches("needle", &docs).unwrap();
        assert_eq!(matches[0].page_number, 2);
        assert_eq!(matches[0].context, "has needle");
    }

    #[test]
    fn test_pages_scanned_in_page_number_order() {
        let mut d = doc("1", "Doc", &[]);
        d.pages.push(Page::new("1", 2, "second keyword"));
        d.pages.push(Page::new("1", 1, "first keyword"));
        let matches = find_matches("keyword", &[d]).unwrap();
        assert_eq!(matches[0].page_number, 1);
        assert_eq!(matches[0].context, "first keyword");
    }

    #[test]
    fn test_preceding_word_not_taken_from_previous_page() {
        let docs = vec![doc("1", "Doc", &["ends with word", "keyword starts page"])];
        let results = search_keyword("keyword", &docs).unwrap();
        assert_eq!(results, vec!["Doc: keyword".to_string()]);
    }

    #[test]
    fn test_multi_word_keyword() {
        let docs = vec![doc("1", "Doc", &["The quick brown fox"])];
        let results = search_keyword("quick brown", &docs).unwrap();
        assert_eq!(results, vec!["Doc: The quick brown".to_string()]);
    }

    #[test]
    fn test_document_name_is_prefix() {
        let docs = vec![doc("1", "MyDocument", &["Content with keyword here"])];
        let results = search_keyword("keyword", &docs).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].starts_with("MyDocument"));
        assert!(results[0].contains("keyword"));
    }

    #[test]
    fn test_empty_collection() {
        assert!(search_keyword("keyword", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_non_latin_content() {
        let docs = vec![doc("1", "Arabic", &["السلام عليكم ورحمة الله"])];
        let results = search_keyword("عليكم", &docs).unwrap();
        assert_eq!(results, vec!["Arabic: السلام عليكم".to_string()]);
    }

    #[test]
    fn test_display_matches_rendered_string() {
        let m = KeywordMatch {
            document_id: "1".into(),
            document_name: "Name".into(),
            page_number: 1,
            context: "a b".into(),
        };
        assert_eq!(m.to_string(), "Name: a b");
    }
}
