//! SQLite-backed document storage.
//!
//! Documents are stored as a metadata row plus their pages. Writing a
//! document always paginates and fingerprints the full text and replaces
//! all pages in one transaction; pages are never edited in place.

use anyhow::{bail, Result};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use docshelf_core::hash::content_hash;
use docshelf_core::models::{Document, Page};
use docshelf_core::paginate::paginate;

use crate::autosave::count_words;

/// Document metadata without page contents.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub name: String,
    pub content_hash: String,
    pub word_count: i64,
    pub page_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

const SUMMARY_SELECT: &str = r#"
    SELECT d.id, d.name, d.content_hash, d.word_count, d.created_at, d.updated_at,
           (SELECT COUNT(*) FROM pages p WHERE p.document_id = d.id) AS page_count
    FROM documents d
"#;

fn summary_from_row(row: &SqliteRow) -> DocumentSummary {
    DocumentSummary {
        id: row.get("id"),
        name: row.get("name"),
        content_hash: row.get("content_hash"),
        word_count: row.get("word_count"),
        page_count: row.get("page_count"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn page_from_row(row: &SqliteRow) -> Page {
    let page_number: i64 = row.get("page_number");
    let page_index: i64 = row.get("page_index");
    Page {
        document_id: row.get("document_id"),
        page_number: page_number as u32,
        page_index: page_index as usize,
        content: row.get("content"),
    }
}

/// Paginate and store a new document under a fresh id.
pub async fn create_document(pool: &SqlitePool, name: &str, text: &str) -> Result<DocumentSummary> {
    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().timestamp();
    let hash = content_hash(text);
    let word_count = count_words(text) as i64;
    let pages = paginate(&id, text);

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO documents (id, name, content_hash, word_count, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(name)
    .bind(&hash)
    .bind(word_count)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    insert_pages(&mut tx, &pages).await?;
    tx.commit().await?;

    info!(id = %id, name, pages = pages.len(), "document created");

    Ok(DocumentSummary {
        id,
        name: name.to_string(),
        content_hash: hash,
        word_count,
        page_count: pages.len() as i64,
        created_at: now,
        updated_at: now,
    })
}

/// Replace a document's text. Returns `false` when the fingerprint is
/// unchanged and nothing was written.
pub async fn update_document(pool: &SqlitePool, id: &str, text: &str) -> Result<bool> {
    let stored: Option<String> =
        sqlx::query_scalar("SELECT content_hash FROM documents WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    let stored = match stored {
        Some(h) => h,
        None => bail!("document not found: {}", id),
    };

    let hash = content_hash(text);
    if hash == stored {
        debug!(id, "content unchanged, skipping write");
        return Ok(false);
    }

    let pages = paginate(id, text);
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM pages WHERE document_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    insert_pages(&mut tx, &pages).await?;
    sqlx::query(
        "UPDATE documents SET content_hash = ?, word_count = ?, updated_at = ? WHERE id = ?",
    )
    .bind(&hash)
    .bind(count_words(text) as i64)
    .bind(chrono::Utc::now().timestamp())
    .bind(id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    info!(id, pages = pages.len(), "document updated");
    Ok(true)
}

async fn insert_pages(tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>, pages: &[Page]) -> Result<()> {
    for page in pages {
        sqlx::query(
            "INSERT INTO pages (document_id, page_number, page_index, content) VALUES (?, ?, ?, ?)",
        )
        .bind(&page.document_id)
        .bind(page.page_number as i64)
        .bind(page.page_index as i64)
        .bind(&page.content)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

pub async fn get_summary(pool: &SqlitePool, id: &str) -> Result<Option<DocumentSummary>> {
    let row = sqlx::query(&format!("{} WHERE d.id = ?", SUMMARY_SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(summary_from_row))
}

/// All documents in creation order.
pub async fn list_documents(pool: &SqlitePool) -> Result<Vec<DocumentSummary>> {
    let rows = sqlx::query(&format!("{} ORDER BY d.created_at, d.rowid", SUMMARY_SELECT))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(summary_from_row).collect())
}

/// Load one document with its pages in `page_number` order.
pub async fn load_document(pool: &SqlitePool, id: &str) -> Result<Option<Document>> {
    let name: Option<String> = sqlx::query_scalar("SELECT name FROM documents WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    let Some(name) = name else {
        return Ok(None);
    };

    let rows = sqlx::query(
        "SELECT document_id, page_number, page_index, content FROM pages \
         WHERE document_id = ? ORDER BY page_number ASC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(Document::new(id, name, rows.iter().map(page_from_row).collect())))
}

/// Load every document with its pages, in creation order.
pub async fn load_documents(pool: &SqlitePool) -> Result<Vec<Document>> {
    let doc_rows = sqlx::query("SELECT id, name FROM documents ORDER BY created_at, rowid")
        .fetch_all(pool)
        .await?;

    let page_rows = sqlx::query(
        "SELECT document_id, page_number, page_index, content FROM pages \
         ORDER BY document_id, page_number",
    )
    .fetch_all(pool)
    .await?;

    let mut pages_by_doc: HashMap<String, Vec<Page>> = HashMap::new();
    for row in &page_rows {
        let page = page_from_row(row);
        pages_by_doc
            .entry(page.document_id.clone())
            .or_default()
            .push(page);
    }

    let documents: Vec<Document> = doc_rows
        .iter()
        .map(|row| {
            let id: String = row.get("id");
            let pages = pages_by_doc.remove(&id).unwrap_or_default();
            Document::new(id, row.get::<String, _>("name"), pages)
        })
        .collect();

    debug!(documents = documents.len(), "documents loaded");
    Ok(documents)
}

/// Reassemble a document's text from its pages.
pub async fn document_text(pool: &SqlitePool, id: &str) -> Result<Option<String>> {
    Ok(load_document(pool, id).await?.map(|doc| doc.text()))
}

pub async fn delete_document(pool: &SqlitePool, id: &str) -> Result<bool> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM pages WHERE document_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM documents WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        info!(id, "document deleted");
    }
    Ok(deleted)
}

/// Compare `text` with the stored fingerprint. `None` for unknown ids.
pub async fn has_changed(pool: &SqlitePool, id: &str, text: &str) -> Result<Option<bool>> {
    let stored: Option<String> =
        sqlx::query_scalar("SELECT content_hash FROM documents WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(stored.map(|h| docshelf_core::hash::has_changed(&h, text)))
}
