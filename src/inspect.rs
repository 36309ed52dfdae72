//! Commands that work on a file or string without opening the database.

use anyhow::Result;
use std::path::Path;

use docshelf_core::hash::content_hash;
use docshelf_core::paginate::paginate;

use crate::autosave;
use crate::import::read_normalized;
use crate::transliterate::{Buckwalter, TransliterateCommand};

/// Hash a file as `import` would store it, so the output is comparable
/// with a stored document's `content_hash`.
pub fn run_hash(path: &Path) -> Result<()> {
    println!("{}", content_hash(&read_normalized(path)?));
    Ok(())
}

pub fn run_paginate(path: &Path, json: bool) -> Result<()> {
    let text = read_normalized(path)?;
    let name = path.display().to_string();
    let pages = paginate(&name, &text);

    if json {
        println!("{}", serde_json::to_string_pretty(&pages)?);
        return Ok(());
    }

    println!("pages: {}", pages.len());
    for page in &pages {
        println!(
            "  page {}: {} chars",
            page.page_number,
            page.content.chars().count()
        );
    }
    Ok(())
}

pub fn run_wordcount(path: &Path, threshold: usize) -> Result<()> {
    let text = read_normalized(path)?;
    let words = autosave::count_words(&text);
    println!("words: {}", words);
    println!("threshold: {}", threshold);
    println!(
        "autosave: {}",
        if autosave::should_autosave_by_count(words, threshold) {
            "yes"
        } else {
            "no"
        }
    );
    Ok(())
}

pub fn run_transliterate(text: &str) -> Result<()> {
    let mut cmd = TransliterateCommand::new(&Buckwalter, text);
    if !cmd.execute() {
        anyhow::bail!("transliteration failed");
    }
    println!("{}", cmd.result());
    Ok(())
}
