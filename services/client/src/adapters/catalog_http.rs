//! services/client/src/adapters/catalog_http.rs
//!
//! This module contains the HTTP adapter for the cocktail catalog service.
//! It implements the `CatalogService` port from the `core` crate.

use async_trait::async_trait;
use cocktail_core::domain::RawCatalogRecord;
use cocktail_core::ports::{CatalogReply, CatalogService, PortError, PortResult};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `CatalogService` port over the catalog's JSON API.
#[derive(Clone)]
pub struct HttpCatalogAdapter {
    client: Client,
    base_url: String,
}

impl HttpCatalogAdapter {
    /// Creates a new `HttpCatalogAdapter`.
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    async fn query(&self, endpoint: &str, key: &str, value: &str) -> PortResult<CatalogReply> {
        debug!("GET {}?{}={}", endpoint, key, value);
        let request = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(&[(key, value)]);
        let (status, body) = super::send_json::<Value>(request).await?;
        parse_catalog_body(status, body)
    }
}

//=========================================================================================
// Body Decoding
//=========================================================================================

fn field_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Keeps the remote field order, which `serde_json`'s `preserve_order` retains.
fn to_record(object: Map<String, Value>) -> RawCatalogRecord {
    object
        .into_iter()
        .map(|(key, value)| (key, field_value(value)))
        .collect()
}

/// Decodes a catalog body of the form `{"drinks": [...] | null}`.
///
/// `null` and the service's `"None Found"` marker both mean "no matches".
/// A body carrying `error`, or a non-success status, is a failure reply.
pub(crate) fn parse_catalog_body(status: StatusCode, body: Value) -> PortResult<CatalogReply> {
    let mut object = match body {
        Value::Object(object) => object,
        other => {
            return Err(PortError::Decode(format!(
                "expected a JSON object from the catalog, got {}",
                other
            )))
        }
    };

    if let Some(error) = object.remove("error") {
        return Ok(CatalogReply::Failure {
            error: field_value(error),
        });
    }
    if !status.is_success() {
        return Ok(CatalogReply::Failure {
            error: Some(format!("catalog service responded {}", status)),
        });
    }

    match object.remove("drinks") {
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(CatalogReply::Records(Vec::new())),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(fields) => Ok(to_record(fields)),
                other => Err(PortError::Decode(format!("unexpected drink entry {}", other))),
            })
            .collect::<PortResult<Vec<_>>>()
            .map(CatalogReply::Records),
        Some(other) => Err(PortError::Decode(format!("unexpected drinks value {}", other))),
    }
}

//=========================================================================================
// `CatalogService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CatalogService for HttpCatalogAdapter {
    async fn search_by_category(&self, category: &str) -> PortResult<CatalogReply> {
        self.query("filter.php", "c", category).await
    }

    async fn search_by_glass(&self, glass: &str) -> PortResult<CatalogReply> {
        self.query("filter.php", "g", glass).await
    }

    async fn search_by_name(&self, name: &str) -> PortResult<CatalogReply> {
        self.query("search.php", "s", name).await
    }

    async fn search_by_id(&self, id: &str) -> PortResult<CatalogReply> {
        self.query("lookup.php", "i", id).await
    }
}
