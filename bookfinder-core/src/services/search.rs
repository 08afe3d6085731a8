use crate::error::{CatalogError, Result, TransportError};
use crate::models::book::Book;
use crate::models::responses::{
    from_object, SearchResponse, SearchResultEnvelope, WorkDetails, WorkResponse,
};
use crate::models::session::SearchField;
use crate::services::normalize::{normalize, record_key};
use crate::services::transport::Transport;
use crate::utils::text::clean_query;
use std::collections::HashSet;
use tracing::{error, info, warn};

pub const SEARCH_FIELDS: &str = "key,title,author_name,first_publish_year,isbn,cover_i,publisher,language,number_of_pages_median,ratings_average,subject";

/// Client for the remote bibliographic search service.
pub struct SearchClient {
    transport: Transport,
    base_url: String,
}

impl SearchClient {
    pub fn new(transport: Transport, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
        }
    }

    /// Runs one search. `page` and `limit` below 1 are raised to 1.
    ///
    /// Blank queries fail with [`CatalogError::InvalidQuery`] before any
    /// request is made. Transport failures, non-2xx statuses and bodies that
    /// do not parse all surface as [`CatalogError::SearchUnavailable`].
    pub async fn search(
        &self,
        query: &str,
        field: SearchField,
        page: u32,
        limit: u32,
    ) -> Result<SearchResultEnvelope> {
        let query = clean_query(query).ok_or(CatalogError::InvalidQuery)?;

        let params = vec![
            (field.as_param().to_string(), query.to_string()),
            ("page".to_string(), page.max(1).to_string()),
            ("limit".to_string(), limit.max(1).to_string()),
            ("fields".to_string(), SEARCH_FIELDS.to_string()),
        ];
        let url = format!("{}/search.json", self.base_url);

        info!("Searching {} for '{}' (page {})", field, query, page.max(1));

        let body = self.transport.get(&url, &params).await.map_err(|e| {
            error!("Error searching books: {}", e);
            e
        })?;

        let response: SearchResponse = from_object(&body).map_err(|e| {
            error!("Malformed search response: {}", e);
            TransportError::MalformedBody(e)
        })?;

        let books = normalize_docs(response.docs.unwrap_or_default());

        Ok(SearchResultEnvelope {
            books,
            total_matched: response.num_found.unwrap_or(0),
            offset: response.start.unwrap_or(0),
        })
    }

    /// Fetches the work record behind a search result key, e.g. `/works/OL45804W`.
    pub async fn work_details(&self, work_key: &str) -> Result<WorkDetails> {
        let key = clean_query(work_key).ok_or(CatalogError::InvalidQuery)?;
        let path = if key.starts_with('/') {
            key.to_string()
        } else {
            format!("/{}", key)
        };
        let url = format!("{}{}.json", self.base_url, path);

        let body = self.transport.get(&url, &[]).await.map_err(|e| {
            error!("Error fetching book details: {}", e);
            e
        })?;

        let response: WorkResponse = from_object(&body).map_err(TransportError::MalformedBody)?;

        Ok(WorkDetails::from_response(&path, response))
    }
}

// Keyless records are dropped; repeated keys keep their first occurrence.
fn normalize_docs(docs: Vec<serde_json::Value>) -> Vec<Book> {
    let total = docs.len();
    let mut seen = HashSet::new();

    let books: Vec<Book> = docs
        .iter()
        .filter(|raw| match record_key(raw) {
            Some(key) => seen.insert(key.to_string()),
            None => false,
        })
        .map(normalize)
        .collect();

    if books.len() < total {
        warn!(
            "Dropped {} of {} search records without a usable or unique key",
            total - books.len(),
            total
        );
    }

    books
}
