//! # HTTP Catalog
//!
//! [`OfferSource`] backed by the catalog REST API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET {base}/books                         → Vec<BookDto>                │
//! │  GET {base}/books/{isbn,isbn}/commercialOffers → OffersResponse         │
//! │                                                                         │
//! │  2xx  → parsed body                                                     │
//! │  404  → Ok(None)   ("no offers for this set")                          │
//! │  else → CatalogError::Http                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use bookstore_core::{Book, CommercialOffers};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::protocol::{parse_books, BookDto, OffersResponse};
use crate::source::{lookup_key, OfferSource};

/// Catalog API client.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpCatalog {
    /// Creates a client for `base_url` with the given per-request timeout.
    ///
    /// A missing trailing `/` is added so relative paths keep any prefix.
    pub fn new(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        Self::with_client(base_url, timeout, reqwest::Client::new())
    }

    /// Same as [`HttpCatalog::new`] but sends requests through `client`
    /// (proxy, TLS or pool settings).
    pub fn with_client(base_url: &str, timeout: Duration, client: reqwest::Client) -> CatalogResult<Self> {
        let mut raw = base_url.to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidUrl(format!(
                "Catalog URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(HttpCatalog {
            client,
            base_url,
            timeout,
        })
    }

    /// Creates a client from validated configuration.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::new(config.base_url()?.as_str(), config.timeout())
    }

    /// Base URL all requests are relative to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the book listing.
    pub fn books_url(&self) -> CatalogResult<Url> {
        Ok(self.base_url.join("books")?)
    }

    /// URL of the offers for this set of books.
    pub fn offers_url(&self, books: &[Book]) -> CatalogResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push("books")
            .push(&lookup_key(books))
            .push("commercialOffers");
        Ok(url)
    }

    /// Fetches the full catalog listing.
    pub async fn books(&self) -> CatalogResult<Vec<Book>> {
        let url = self.books_url()?;
        let dtos: Vec<BookDto> = self.get_json(&url).await?.unwrap_or_default();
        let books = parse_books(dtos);
        info!(count = books.len(), "Fetched catalog");
        Ok(books)
    }

    /// GETs `url` and decodes the body; 404 becomes `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> CatalogResult<Option<T>> {
        let timeout_secs = self.timeout.as_secs();

        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    CatalogError::Timeout(timeout_secs)
                } else {
                    CatalogError::ConnectionFailed(error.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(%url, "Catalog answered 404");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.json().await.map_err(|error| {
            if error.is_timeout() {
                CatalogError::Timeout(timeout_secs)
            } else {
                CatalogError::DeserializationFailed(error.to_string())
            }
        })?;
        Ok(Some(body))
    }
}

#[async_trait]
impl OfferSource for HttpCatalog {
    async fn commercial_offers(&self, books: &[Book]) -> CatalogResult<Option<CommercialOffers>> {
        if books.is_empty() {
            return Ok(None);
        }

        let url = self.offers_url(books)?;
        debug!(%url, "Fetching commercial offers");

        let response: Option<OffersResponse> = self.get_json(&url).await?;
        Ok(response.map(CommercialOffers::from))
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
