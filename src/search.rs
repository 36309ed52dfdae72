use anyhow::Result;

use docshelf_core::models::Document;
use docshelf_core::search::{search_keyword, validate_keyword};
use docshelf_core::tfidf::CorpusIndex;

use crate::config::Config;
use crate::db;
use crate::store;

pub async fn run_search(config: &Config, keyword: &str) -> Result<()> {
    // Reject short keywords before touching the database; the trimmed
    // keyword is what gets searched.
    let keyword = validate_keyword(keyword)?;

    let pool = db::connect(config).await?;
    let documents = store::load_documents(&pool).await?;
    pool.close().await;

    let results = search_keyword(keyword, &documents)?;
    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for result in &results {
        println!("{}", result);
    }
    Ok(())
}

/// Score `text` against a corpus built from every stored document.
pub async fn run_score(config: &Config, text: &str, explain: bool) -> Result<()> {
    let pool = db::connect(config).await?;
    let documents = store::load_documents(&pool).await?;
    pool.close().await;

    let index: CorpusIndex = documents.iter().map(Document::text).collect();
    let score = index.score(text);

    println!("score: {:.6}", score);
    println!("  corpus documents: {}", index.num_docs());

    if explain {
        for w in index.term_weights(text) {
            println!(
                "  {}: tf={:.4} idf={:.4} weight={:.6}",
                w.term,
                w.tf,
                w.idf,
                w.weight()
            );
        }
    }
    Ok(())
}
