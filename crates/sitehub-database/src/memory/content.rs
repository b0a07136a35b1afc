use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;

use sitehub_core::result::AppResult;
use sitehub_core::types::ContentId;
use sitehub_entity::content::{ContentEntry, ContentKind, SortKey, json_text};

use super::{MemoryDatabase, ilike};
use crate::store::{ContentPage, ContentQuery, ContentStore};

/// In-memory content store.
#[derive(Debug, Clone)]
pub struct MemoryContentStore {
    db: MemoryDatabase,
}

impl MemoryContentStore {
    /// Create a store over `db`.
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

fn matches(entry: &ContentEntry, query: &ContentQuery) -> bool {
    let filtered = query
        .filters
        .iter()
        .all(|(field, value)| entry.text(field).as_deref() == Some(value.as_str()));
    let searched = match &query.search {
        Some((fields, term)) if !fields.is_empty() => fields
            .iter()
            .any(|field| entry.text(field).is_some_and(|text| ilike(&text, term))),
        _ => true,
    };
    filtered && searched
}

/// NULL sorts above every value, as in PostgreSQL.
fn compare_nullable(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => x.cmp(y),
    }
}

fn compare_entries(a: &ContentEntry, b: &ContentEntry, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::CreatedAt => Ordering::Equal,
        SortKey::Field(_) => compare_nullable(&a.sort_value(key), &b.sort_value(key)),
    };
    primary
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn insert(&self, kind: ContentKind, data: serde_json::Value) -> AppResult<ContentEntry> {
        let mut tables = self.db.lock().await;
        let now = Utc::now();
        let entry = ContentEntry {
            id: ContentId::new(),
            kind,
            data,
            created_at: now,
            updated_at: now,
        };
        tables.content.push(entry.clone());
        Ok(entry)
    }

    async fn find(&self, kind: ContentKind, id: ContentId) -> AppResult<Option<ContentEntry>> {
        let tables = self.db.lock().await;
        Ok(tables
            .content
            .iter()
            .find(|e| e.kind == kind && e.id == id)
            .cloned())
    }

    async fn list(&self, kind: ContentKind, query: &ContentQuery) -> AppResult<ContentPage> {
        let tables = self.db.lock().await;
        let mut entries: Vec<ContentEntry> = tables
            .content
            .iter()
            .filter(|e| e.kind == kind && matches(e, query))
            .cloned()
            .collect();
        drop(tables);

        let order = kind.ordering();
        entries.sort_by(|a, b| {
            let ordering = compare_entries(a, b, order.key);
            if order.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        let total = entries.len() as u64;
        if let Some(page) = query.page {
            entries = entries
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.limit() as usize)
                .collect();
        }
        Ok(ContentPage { entries, total })
    }

    async fn replace(
        &self,
        kind: ContentKind,
        id: ContentId,
        data: serde_json::Value,
    ) -> AppResult<Option<ContentEntry>> {
        let mut tables = self.db.lock().await;
        Ok(tables
            .content
            .iter_mut()
            .find(|e| e.kind == kind && e.id == id)
            .map(|entry| {
                entry.data = data;
                entry.updated_at = Utc::now();
                entry.clone()
            }))
    }

    async fn increment(
        &self,
        kind: ContentKind,
        id: ContentId,
        field: &'static str,
    ) -> AppResult<Option<ContentEntry>> {
        let mut tables = self.db.lock().await;
        Ok(tables
            .content
            .iter_mut()
            .find(|e| e.kind == kind && e.id == id)
            .map(|entry| {
                let current = entry
                    .data
                    .get(field)
                    .and_then(json_text)
                    .and_then(|text| text.parse::<i64>().ok())
                    .unwrap_or(0);
                if let Some(object) = entry.data.as_object_mut() {
                    object.insert(field.to_string(), serde_json::json!(current + 1));
                }
                entry.updated_at = Utc::now();
                entry.clone()
            }))
    }

    async fn delete(&self, kind: ContentKind, id: ContentId) -> AppResult<bool> {
        let mut tables = self.db.lock().await;
        let before = tables.content.len();
        tables.content.retain(|e| !(e.kind == kind && e.id == id));
        let removed = tables.content.len() < before;
        if removed && kind == ContentKind::Career {
            tables.applications.retain(|a| a.career_id != id);
        }
        Ok(removed)
    }

    async fn count(&self, kind: ContentKind) -> AppResult<u64> {
        let tables = self.db.lock().await;
        Ok(tables.content.iter().filter(|e| e.kind == kind).count() as u64)
    }

    async fn latest(&self, kind: ContentKind) -> AppResult<Option<ContentEntry>> {
        let tables = self.db.lock().await;
        let key = kind.recency();
        Ok(tables
            .content
            .iter()
            .filter(|e| e.kind == kind)
            .max_by(|a, b| {
                let (va, vb) = (a.sort_value(key), b.sort_value(key));
                // Entries without a value never win, as with DESC NULLS LAST.
                va.is_some()
                    .cmp(&vb.is_some())
                    .then_with(|| va.cmp(&vb))
                    .then_with(|| a.created_at.cmp(&b.created_at))
            })
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContentStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_filter_and_search() {
        let store = MemoryContentStore::new(MemoryDatabase::default());
        store
            .insert(ContentKind::News, json!({"title": "Rust 2024", "content": "x", "category": "Technology"}))
            .await
            .unwrap();
        store
            .insert(ContentKind::News, json!({"title": "Election", "content": "y", "category": "Politics"}))
            .await
            .unwrap();

        let query = ContentQuery {
            filters: vec![("category", "Technology".to_string())],
            ..Default::default()
        };
        let page = store.list(ContentKind::News, &query).await.unwrap();
        assert_eq!(page.total, 1);

        let query = ContentQuery {
            search: Some((vec!["title", "content"], "ELECT".to_string())),
            ..Default::default()
        };
        let page = store.list(ContentKind::News, &query).await.unwrap();
        assert_eq!(page.entries[0].text("title").as_deref(), Some("Election"));
    }

    #[tokio::test]
    async fn test_blog_order_and_latest_use_publication_date() {
        let store = MemoryContentStore::new(MemoryDatabase::default());
        store
            .insert(ContentKind::Blog, json!({"title": "new", "date": "2025-03-01"}))
            .await
            .unwrap();
        store
            .insert(ContentKind::Blog, json!({"title": "old", "date": "2024-01-01"}))
            .await
            .unwrap();

        let page = store
            .list(ContentKind::Blog, &ContentQuery::default())
            .await
            .unwrap();
        let titles: Vec<_> = page.entries.iter().filter_map(|e| e.text("title")).collect();
        assert_eq!(titles, ["new", "old"]);

        let latest = store.latest(ContentKind::Blog).await.unwrap().unwrap();
        assert_eq!(latest.text("title").as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_team_order_puts_missing_department_last() {
        let store = MemoryContentStore::new(MemoryDatabase::default());
        store
            .insert(ContentKind::TeamMember, json!({"name": "a", "department": null}))
            .await
            .unwrap();
        store
            .insert(ContentKind::TeamMember, json!({"name": "b", "department": "Sales"}))
            .await
            .unwrap();
        store
            .insert(ContentKind::TeamMember, json!({"name": "c", "department": "Engineering"}))
            .await
            .unwrap();

        let page = store
            .list(ContentKind::TeamMember, &ContentQuery::default())
            .await
            .unwrap();
        let names: Vec<_> = page.entries.iter().filter_map(|e| e.text("name")).collect();
        assert_eq!(names, ["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_increment_counts_from_zero() {
        let store = MemoryContentStore::new(MemoryDatabase::default());
        let entry = store
            .insert(ContentKind::Blog, json!({"title": "t"}))
            .await
            .unwrap();
        store
            .increment(ContentKind::Blog, entry.id, "likes")
            .await
            .unwrap();
        let entry = store
            .increment(ContentKind::Blog, entry.id, "likes")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.data["likes"], json!(2));
    }
}
