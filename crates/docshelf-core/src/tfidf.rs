//! Corpus-relative TF-IDF scoring.
//!
//! A [`CorpusIndex`] accumulates raw document texts over its lifetime and
//! scores arbitrary query text against them. The score is one scalar that
//! describes how distinctive the query is relative to the corpus.
//!
//! # Scoring
//!
//! For each distinct whitespace-delimited term `t` of the query:
//!
//! - `tf(t) = count(t in query) / total query tokens`
//! - `idf(t) = ln((1 + N) / (1 + df(t)))`, where `N` is the number of
//!   corpus documents and `df(t)` the number of them containing `t`.
//!
//! The document score is the mean of `tf(t) * idf(t)` over distinct
//! terms. Terms present in every corpus document contribute `0`; unseen
//! terms contribute `tf * ln(1 + N)`. An empty corpus scores everything
//! `0`, and an empty or whitespace-only query scores `0`.
//!
//! Tokenization is case-sensitive for both corpus and query.
//!
//! # Concurrency
//!
//! The index is a plain value. Hosts that share one across threads wrap it
//! in a `Mutex` or `RwLock`; scoring only needs `&self`.

use std::collections::{HashMap, HashSet};

use tracing::trace;

/// Split `text` into terms on runs of whitespace.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Append-only corpus of raw document texts with document frequencies.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    documents: Vec<String>,
    doc_frequency: HashMap<String, usize>,
}

/// Per-term contribution to a document score.
#[derive(Debug, Clone, PartialEq)]
pub struct TermWeight {
    pub term: String,
    pub tf: f64,
    pub idf: f64,
}

impl TermWeight {
    pub fn weight(&self) -> f64 {
        self.tf * self.idf
    }
}

impl CorpusIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document to the corpus. Empty and duplicate texts count.
    pub fn add_document(&mut self, text: impl Into<String>) {
        let text = text.into();
        let distinct: HashSet<&str> = tokenize(&text).collect();
        for term in distinct {
            *self.doc_frequency.entry(term.to_string()).or_insert(0) += 1;
        }
        self.documents.push(text);
        trace!(documents = self.documents.len(), "corpus document added");
    }

    /// Number of documents added so far.
    pub fn num_docs(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Raw corpus texts in insertion order.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Number of corpus documents containing `term`.
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.doc_frequency.get(term).copied().unwrap_or(0)
    }

    /// Smoothed inverse document frequency of `term`.
    pub fn idf(&self, term: &str) -> f64 {
        let n = self.num_docs() as f64;
        let df = self.doc_frequency(term) as f64;
        ((1.0 + n) / (1.0 + df)).ln()
    }

    /// Per-term TF and IDF for the distinct terms of `text`, in order of
    /// first occurrence.
    pub fn term_weights(&self, text: &str) -> Vec<TermWeight> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut total = 0usize;

        for term in tokenize(text) {
            total += 1;
            let count = counts.entry(term).or_insert(0);
            if *count == 0 {
                order.push(term);
            }
            *count += 1;
        }

        order
            .into_iter()
            .map(|term| TermWeight {
                term: term.to_string(),
                tf: counts[term] as f64 / total as f64,
                idf: self.idf(term),
            })
            .collect()
    }

    /// Mean TF-IDF weight of the distinct terms of `text`.
    ///
    /// Never fails: a query with no terms scores `0.0`.
    pub fn score(&self, text: &str) -> f64 {
        let weights = self.term_weights(text);
        if weights.is_empty() {
            return 0.0;
        }
        let sum: f64 = weights.iter().map(TermWeight::weight).sum();
        sum / weights.len() as f64
    }
}

impl<S: Into<String>> Extend<S> for CorpusIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for text in iter {
            self.add_document(text);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for CorpusIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const DELTA: f64 = 1e-9;

    fn corpus(docs: &[&str]) -> CorpusIndex {
        docs.iter().copied().collect()
    }

    #[test]
    fn test_known_values_in_range() {
        let index = corpus(&["cat dog", "dog bird", "bird fish"]);
        let score = index.score("cat dog");
        assert!(score.is_finite());
        assert!((-1.0..=1.0).contains(&score), "score out of range: {}", score);
        // cat: 0.5 * ln(4/2), dog: 0.5 * ln(4/3)
        let expected = (0.5 * 2f64.ln() + 0.5 * (4.0f64 / 3.0).ln()) / 2.0;
        assert!((score - expected).abs() < DELTA);
    }

    #[test]
    fn test_corpus_changes_score() {
        let empty = CorpusIndex::new();
        let index = corpus(&["cat dog", "dog bird", "bird fish"]);
        assert!(index.score("cat dog").is_finite());
        assert_ne!(index.score("cat dog"), empty.score("cat dog"));
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let document = "hello world test document";
        let index = corpus(&[document, "another test document here", "yet another example text"]);
        let s1 = index.score(document);
        let s2 = index.score(document);
        let s3 = index.score(document);
        assert!((s1 - s2).abs() < DELTA);
        assert!((s2 - s3).abs() < DELTA);
    }

    #[test]
    fn test_single_word_and_repeated_words() {
        let index = corpus(&["apple", "banana orange", "grape cherry"]);
        assert!(index.score("apple").is_finite());

        let index = corpus(&["word word word", "other text here"]);
        assert!(index.score("word word").is_finite());
    }

    #[test]
    fn test_multiple_documents() {
        let index = corpus(&[
            "machine learning is great",
            "deep learning is powerful",
            "artificial intelligence is amazing",
            "neural networks are complex",
        ]);
        assert!(index.score("machine learning deep learning").is_finite());
    }

    #[test]
    fn test_common_words_score_low() {
        let index = corpus(&[
            "the cat sat on the mat",
            "the dog sat on the floor",
            "the bird sat on the tree",
        ]);
        let score = index.score("the sat on");
        assert!(score < 0.5);
        assert!(score.abs() < DELTA, "terms in every document should weigh 0");
    }

    #[test]
    fn test_common_terms_score_below_absent_terms() {
        let index = corpus(&["common word text", "common word document", "common word file"]);
        let common = index.score("common word");
        let unique = index.score("unique special");
        assert!(unique.is_finite());
        assert!(common <= unique);
        assert!(unique > 0.0);
    }

    #[test]
    fn test_empty_and_whitespace_query() {
        let index = corpus(&["test document one", "test document two"]);
        assert_eq!(index.score(""), 0.0);
        assert_eq!(index.score("   \t\n  "), 0.0);
    }

    #[test]
    fn test_empty_corpus() {
        let index = CorpusIndex::new();
        let score = index.score("test document");
        assert!(!score.is_nan());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_unusual_tokens() {
        let index = corpus(&["normal text document", "another normal document"]);
        for query in [
            "!@#$%^&*()_+-={}[]|:;<>?,./",
            "123 456 789 000",
            "x y z",
            "English عربي 中文 русский",
        ] {
            assert!(index.score(query).is_finite(), "query {:?}", query);
        }
    }

    #[test]
    fn test_very_long_query() {
        let index = corpus(&["short doc", "another short"]);
        let query: String = (0..10_000).map(|i| format!("word{} ", i)).collect();
        let score = index.score(&query);
        assert!(score.is_finite());
        assert!(score > 0.0);
    }

    #[test]
    fn test_empty_documents_are_counted() {
        let mut index = CorpusIndex::new();
        index.add_document("");
        index.add_document("");
        index.add_document("actual content");
        assert_eq!(index.num_docs(), 3);
        assert_eq!(index.doc_frequency("content"), 1);
        assert!(index.score("test content here").is_finite());
    }

    #[test]
    fn test_duplicates_are_not_deduplicated() {
        let index = corpus(&["same text", "same text"]);
        assert_eq!(index.num_docs(), 2);
        assert_eq!(index.doc_frequency("same"), 2);
        assert_eq!(index.documents(), &["same text".to_string(), "same text".to_string()]);
    }

    #[test]
    fn test_empty_queries_do_not_disturb_state() {
        let index = corpus(&["document one", "document two"]);
        index.score("");
        index.score("");
        assert!(index.score("document").is_finite());
        assert_eq!(index.num_docs(), 2);
    }

    #[test]
    fn test_case_sensitive_terms() {
        let index = corpus(&["Rust"]);
        assert_eq!(index.doc_frequency("Rust"), 1);
        assert_eq!(index.doc_frequency("rust"), 0);
    }

    #[test]
    fn test_term_weights_order_and_tf() {
        let index = corpus(&["a b"]);
        let weights = index.term_weights("b a b c");
        let terms: Vec<&str> = weights.iter().map(|w| w.term.as_str()).collect();
        assert_eq!(terms, vec!["b", "a", "c"]);
        assert!((weights[0].tf - 0.5).abs() < DELTA);
        assert!((weights[1].tf - 0.25).abs() < DELTA);
        assert!((weights[2].idf - 2f64.ln()).abs() < DELTA);
    }

    #[test]
    fn test_shared_index_behind_mutex() {
        let shared = Arc::new(Mutex::new(CorpusIndex::new()));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    shared.lock().unwrap().add_document(format!("doc {}", i));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let index = shared.lock().unwrap();
        assert_eq!(index.num_docs(), 4);
        assert_eq!(index.doc_frequency("doc"), 4);
    }
}
