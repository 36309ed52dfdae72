//! Document listing and retrieval by id.

use anyhow::{bail, Result};
use serde::Serialize;

use docshelf_core::models::Page;

use crate::config::Config;
use crate::db;
use crate::store::{self, DocumentSummary};

/// A document with its metadata and pages, as printed by `shelf get --json`.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    #[serde(flatten)]
    pub summary: DocumentSummary,
    pub pages: Vec<Page>,
}

pub async fn get_document(config: &Config, id: &str) -> Result<DocumentResponse> {
    let pool = db::connect(config).await?;
    let summary = store::get_summary(&pool, id).await?;
    let document = store::load_document(&pool, id).await?;
    pool.close().await;

    match (summary, document) {
        (Some(summary), Some(document)) => Ok(DocumentResponse {
            summary,
            pages: document.pages,
        }),
        _ => bail!("document not found: {}", id),
    }
}

pub async fn run_get(config: &Config, id: &str, json: bool) -> Result<()> {
    let doc = get_document(config, id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("id: {}", doc.summary.id);
    println!("name: {}", doc.summary.name);
    println!("hash: {}", doc.summary.content_hash);
    println!("words: {}", doc.summary.word_count);
    println!("updated: {}", format_ts(doc.summary.updated_at));
    println!("pages: {}", doc.pages.len());
    for page in &doc.pages {
        println!();
        println!("--- page {} ---", page.page_number);
        println!("{}", page.content);
    }
    Ok(())
}

pub async fn run_list(config: &Config, json: bool) -> Result<()> {
    let pool = db::connect(config).await?;
    let documents = store::list_documents(&pool).await?;
    pool.close().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&documents)?);
        return Ok(());
    }

    if documents.is_empty() {
        println!("No documents.");
        return Ok(());
    }

    for doc in &documents {
        println!(
            "{}  {}  pages={} words={} updated={}",
            doc.id,
            doc.name,
            doc.page_count,
            doc.word_count,
            format_ts(doc.updated_at)
        );
    }
    Ok(())
}

fn format_ts(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}
