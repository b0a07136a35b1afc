//! Typed CRUD over the content document store.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use sitehub_core::error::AppError;
use sitehub_core::types::{ContentId, PageRequest, PageResponse};
use sitehub_core::types::pagination::DEFAULT_PAGE_SIZE;
use sitehub_database::store::{ContentQuery, ContentStore};
use sitehub_entity::content::{
    Blog, Content, ContentEntry, ContentKind, ContentRecord, Review, ReviewStatus,
};

use super::access::Access;
use crate::context::{self, RequestContext};

/// Query-string parameters of a listing.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Free-text search.
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    /// Every other parameter. Only the kind's whitelisted attributes are
    /// used as filters.
    pub filters: HashMap<String, String>,
}

impl ListParams {
    /// Splits raw query parameters. Unparseable page numbers fall back to
    /// the defaults.
    pub fn from_query(mut query: HashMap<String, String>) -> Self {
        let search = query.remove("search");
        let page = query.remove("page").and_then(|p| p.parse().ok());
        let page_size = query.remove("page_size").and_then(|p| p.parse().ok());
        Self {
            search,
            page,
            page_size,
            filters: query,
        }
    }
}

/// CRUD for one content kind.
pub struct ContentService<T> {
    store: Arc<dyn ContentStore>,
    access: Access,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for ContentService<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            access: self.access,
            _record: PhantomData,
        }
    }
}

impl<T: ContentRecord> fmt::Debug for ContentService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentService")
            .field("kind", &T::KIND)
            .field("access", &self.access)
            .finish()
    }
}

impl<T: ContentRecord> ContentService<T> {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            access: Access::of(T::KIND),
            _record: PhantomData,
        }
    }

    /// The kind served.
    pub fn kind(&self) -> ContentKind {
        T::KIND
    }

    /// Every matching record in the kind's default order.
    pub async fn list(
        &self,
        ctx: Option<&RequestContext>,
        params: &ListParams,
    ) -> Result<Vec<Content<T>>, AppError> {
        self.access.list.check(ctx)?;
        let query = self.query(ctx, params, None);
        let page = self.store.list(T::KIND, &query).await?;
        page.entries.into_iter().map(Content::from_entry).collect()
    }

    /// One page of matching records.
    pub async fn list_page(
        &self,
        ctx: Option<&RequestContext>,
        params: &ListParams,
    ) -> Result<PageResponse<Content<T>>, AppError> {
        self.access.list.check(ctx)?;
        let request = PageRequest::new(
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );
        let query = self.query(ctx, params, Some(request));
        let page = self.store.list(T::KIND, &query).await?;
        if request.is_past_end(page.total) {
            return Err(AppError::not_found("Invalid page."));
        }
        let items = page
            .entries
            .into_iter()
            .map(Content::from_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PageResponse::new(items, request, page.total))
    }

    fn query(
        &self,
        ctx: Option<&RequestContext>,
        params: &ListParams,
        page: Option<PageRequest>,
    ) -> ContentQuery {
        let mut filters: Vec<(&'static str, String)> = T::KIND
            .filter_fields()
            .iter()
            .filter_map(|field| {
                params
                    .filters
                    .get(*field)
                    .filter(|v| !v.is_empty())
                    .map(|v| (*field, normalize_filter(field, v)))
            })
            .collect();

        // Visitors only ever see open job listings.
        if T::KIND == ContentKind::Career && !context::is_staff(ctx) {
            filters.retain(|(field, _)| *field != "active_listing");
            filters.push(("active_listing", "true".to_string()));
        }

        let search_fields = T::KIND.search_fields();
        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !search_fields.is_empty())
            .map(|s| (search_fields.to_vec(), s.to_string()));

        ContentQuery {
            filters,
            search,
            page,
        }
    }

    pub async fn retrieve(
        &self,
        ctx: Option<&RequestContext>,
        id: ContentId,
    ) -> Result<Content<T>, AppError> {
        self.access.retrieve.check(ctx)?;
        Content::from_entry(self.find(id).await?)
    }

    async fn find(&self, id: ContentId) -> Result<ContentEntry, AppError> {
        self.store
            .find(T::KIND, id)
            .await?
            .ok_or_else(|| not_found::<T>())
    }

    pub async fn create(
        &self,
        ctx: Option<&RequestContext>,
        data: Value,
    ) -> Result<Content<T>, AppError> {
        self.access.create.check(ctx)?;
        let record = decode::<T>(data)?;
        let entry = self.store.insert(T::KIND, serde_json::to_value(&record)?).await?;
        info!(kind = %T::KIND, id = %entry.id, "Content created");
        Content::from_entry(entry)
    }

    /// Replaces every attribute of a record.
    pub async fn replace(
        &self,
        ctx: Option<&RequestContext>,
        id: ContentId,
        data: Value,
    ) -> Result<Content<T>, AppError> {
        self.access.update.check(ctx)?;
        let record = decode::<T>(data)?;
        self.store_record(id, &record).await
    }

    /// Merges the supplied attributes into a record.
    pub async fn patch(
        &self,
        ctx: Option<&RequestContext>,
        id: ContentId,
        data: Value,
    ) -> Result<Content<T>, AppError> {
        self.access.update.check(ctx)?;
        let Value::Object(changes) = data else {
            return Err(AppError::validation("Expected a JSON object."));
        };

        let mut merged = self.find(id).await?.data;
        if let Value::Object(current) = &mut merged {
            current.extend(changes);
        }
        let record = decode::<T>(merged)?;
        self.store_record(id, &record).await
    }

    pub(crate) async fn store_record(&self, id: ContentId, record: &T) -> Result<Content<T>, AppError> {
        let entry = self
            .store
            .replace(T::KIND, id, serde_json::to_value(record)?)
            .await?
            .ok_or_else(|| not_found::<T>())?;
        debug!(kind = %T::KIND, id = %id, "Content updated");
        Content::from_entry(entry)
    }

    pub async fn delete(&self, ctx: Option<&RequestContext>, id: ContentId) -> Result<(), AppError> {
        self.access.delete.check(ctx)?;
        if !self.store.delete(T::KIND, id).await? {
            return Err(not_found::<T>());
        }
        info!(kind = %T::KIND, id = %id, "Content deleted");
        Ok(())
    }
}

impl ContentService<Blog> {
    /// Adds a like to a post and returns the new total. Anyone may like.
    pub async fn like(&self, id: ContentId) -> Result<u32, AppError> {
        let entry = self
            .store
            .increment(ContentKind::Blog, id, "likes")
            .await?
            .ok_or_else(|| not_found::<Blog>())?;
        Ok(Content::<Blog>::from_entry(entry)?.record.likes)
    }
}

impl ContentService<Review> {
    /// Flips a review between shown and hidden.
    pub async fn toggle(
        &self,
        ctx: Option<&RequestContext>,
        id: ContentId,
    ) -> Result<ReviewStatus, AppError> {
        self.access.update.check(ctx)?;
        let mut review = Content::<Review>::from_entry(self.find(id).await?)?.record;
        review.status = review.status.toggled();
        let stored = self.store_record(id, &review).await?;
        Ok(stored.record.status)
    }
}

/// Decodes and validates client input as a `T`.
fn decode<T: ContentRecord>(data: Value) -> Result<T, AppError> {
    let record: T = serde_json::from_value(data).map_err(|e| {
        AppError::validation(format!("Invalid {} data: {e}", T::KIND.label().to_lowercase()))
    })?;
    record.validate()?;
    Ok(record)
}

fn not_found<T: ContentRecord>() -> AppError {
    AppError::not_found(format!("{} not found.", T::KIND.label()))
}

/// Boolean filters accept the spellings browsers and admin tools send.
fn normalize_filter(field: &str, value: &str) -> String {
    if field == "active_listing" {
        match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => return "true".to_string(),
            "0" | "false" | "no" | "off" => return "false".to_string(),
            _ => {}
        }
    }
    value.to_string()
}
