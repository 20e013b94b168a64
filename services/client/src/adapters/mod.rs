pub mod account_http;
pub mod catalog_http;

pub use account_http::HttpAccountAdapter;
pub use catalog_http::HttpCatalogAdapter;

use cocktail_core::ports::{PortError, PortResult};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Sends a request and decodes its JSON body, whatever the HTTP status.
///
/// Both services put their failure details in the body, so a non-2xx status
/// is not an error at this level. Connection problems map to
/// `PortError::Transport`, unreadable bodies to `PortError::Decode`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> PortResult<(StatusCode, T)> {
    let response = request
        .send()
        .await
        .map_err(|e| PortError::Transport(e.to_string()))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| PortError::Transport(e.to_string()))?;

    let decoded = serde_json::from_slice(&body)
        .map_err(|e| PortError::Decode(format!("HTTP {}: {}", status, e)))?;
    Ok((status, decoded))
}
