//! Word-count threshold check that decides when to persist automatically.

/// Default number of words a text must exceed to trigger an auto-save.
pub const DEFAULT_WORD_THRESHOLD: usize = 500;

/// Count whitespace-separated words. Empty or whitespace-only text has none.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True when `text` has strictly more than `threshold` words.
pub fn should_autosave(text: &str, threshold: usize) -> bool {
    should_autosave_by_count(count_words(text), threshold)
}

pub fn should_autosave_by_count(word_count: usize, threshold: usize) -> bool {
    word_count > threshold
}
