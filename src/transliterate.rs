//! Arabic-to-Latin transliteration.
//!
//! [`Transliterator`] is the seam for a conversion routine; [`Buckwalter`]
//! is the built-in one. [`TransliterateCommand`] wraps a transliterator
//! with the boolean-outcome contract used by the CLI.

use anyhow::Result;
use tracing::warn;

pub trait Transliterator {
    fn transliterate(&self, text: &str) -> Result<String>;
}

/// Buckwalter transliteration: one ASCII character per Arabic letter or
/// diacritic. Characters outside the table pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Buckwalter;

impl Buckwalter {
    fn map(c: char) -> Option<char> {
        let mapped = match c {
            '\u{0621}' => '\'',
            '\u{0622}' => '|',
            '\u{0623}' => '>',
            '\u{0624}' => '&',
            '\u{0625}' => '<',
            '\u{0626}' => '}',
            '\u{0627}' => 'A',
            '\u{0628}' => 'b',
            '\u{0629}' => 'p',
            '\u{062A}' => 't',
            '\u{062B}' => 'v',
            '\u{062C}' => 'j',
            '\u{062D}' => 'H',
            '\u{062E}' => 'x',
            '\u{062F}' => 'd',
            '\u{0630}' => '*',
            '\u{0631}' => 'r',
            '\u{0632}' => 'z',
            '\u{0633}' => 's',
            '\u{0634}' => '$',
            '\u{0635}' => 'S',
            '\u{0636}' => 'D',
            '\u{0637}' => 'T',
            '\u{0638}' => 'Z',
            '\u{0639}' => 'E',
            '\u{063A}' => 'g',
            '\u{0640}' => '_',
            '\u{0641}' => 'f',
            '\u{0642}' => 'q',
            '\u{0643}' => 'k',
            '\u{0644}' => 'l',
            '\u{0645}' => 'm',
            '\u{0646}' => 'n',
            '\u{0647}' => 'h',
            '\u{0648}' => 'w',
            '\u{0649}' => 'Y',
            '\u{064A}' => 'y',
            '\u{064B}' => 'F',
            '\u{064C}' => 'N',
            '\u{064D}' => 'K',
            '\u{064E}' => 'a',
            '\u{064F}' => 'u',
            '\u{0650}' => 'i',
            '\u{0651}' => '~',
            '\u{0652}' => 'o',
            '\u{0670}' => '`',
            '\u{0671}' => '{',
            _ => return None,
        };
        Some(mapped)
    }
}

impl Transliterator for Buckwalter {
    fn transliterate(&self, text: &str) -> Result<String> {
        Ok(text.chars().map(|c| Self::map(c).unwrap_or(c)).collect())
    }
}

/// Boolean-outcome wrapper: blank input succeeds with an empty result,
/// a failing transliterator leaves the result empty.
pub struct TransliterateCommand<'a, T: Transliterator + ?Sized> {
    transliterator: &'a T,
    text: String,
    result: String,
    success: bool,
}

impl<'a, T: Transliterator + ?Sized> TransliterateCommand<'a, T> {
    pub fn new(transliterator: &'a T, text: impl Into<String>) -> Self {
        Self {
            transliterator,
            text: text.into(),
            result: String::new(),
            success: false,
        }
    }

    pub fn execute(&mut self) -> bool {
        if self.text.trim().is_empty() {
            self.result.clear();
            self.success = true;
            return true;
        }

        match self.transliterator.transliterate(&self.text) {
            Ok(out) => {
                self.result = out;
                self.success = true;
            }
            Err(e) => {
                warn!("transliteration failed: {:#}", e);
                self.result.clear();
                self.success = false;
            }
        }
        self.success
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
