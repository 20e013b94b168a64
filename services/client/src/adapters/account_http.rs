//! services/client/src/adapters/account_http.rs
//!
//! This module contains the HTTP adapter for the user-account service.
//! It implements the `AccountService` port from the `core` crate.

use async_trait::async_trait;
use cocktail_core::ports::{
    AccountReply, AccountService, AuthToken, PortError, PortResult, RemoteUser, UserPatch,
};
use reqwest::Client;
use serde::{de::IgnoredAny, Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `AccountService` port over the account REST API.
#[derive(Clone)]
pub struct HttpAccountAdapter {
    client: Client,
    base_url: String,
}

impl HttpAccountAdapter {
    /// Creates a new `HttpAccountAdapter`.
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

//=========================================================================================
// Wire Types
//=========================================================================================

/// Every response carries `status` (`OK` / `KO`), plus `error` or `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusBody<T> {
    status: String,
    error: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthData {
    id: String,
    token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
    username: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    favorites: Vec<String>,
    #[serde(default)]
    creations: Vec<Value>,
}

#[derive(Serialize)]
struct CreateBody<'a> {
    name: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct AuthBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct PatchBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    favorites: Option<Vec<String>>,
}

impl<T> StatusBody<T> {
    fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("OK")
    }

    fn error_message(self) -> String {
        self.error
            .unwrap_or_else(|| format!("account service answered {}", self.status))
    }

    /// Maps a response that must carry `data` on success.
    pub(crate) fn into_reply<U>(self, map: impl FnOnce(T) -> U) -> PortResult<AccountReply<U>> {
        if !self.is_ok() {
            return Ok(AccountReply::Ko {
                error: self.error_message(),
            });
        }
        self.data
            .map(|data| AccountReply::Ok(map(data)))
            .ok_or_else(|| PortError::Decode("successful response without data".to_string()))
    }
}

impl StatusBody<IgnoredAny> {
    pub(crate) fn into_unit_reply(self) -> AccountReply<()> {
        if self.is_ok() {
            AccountReply::Ok(())
        } else {
            AccountReply::Ko {
                error: self.error_message(),
            }
        }
    }
}

fn auth_token(data: AuthData) -> AuthToken {
    AuthToken {
        id: data.id,
        token: data.token,
    }
}

fn remote_user(data: UserData) -> RemoteUser {
    RemoteUser {
        username: data.username,
        name: data.name,
        favorites: data.favorites,
        creations: data.creations,
    }
}

//=========================================================================================
// `AccountService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AccountService for HttpAccountAdapter {
    async fn create(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> PortResult<AccountReply<()>> {
        debug!("POST user");
        let request = self.client.post(self.url("user")).json(&CreateBody {
            name,
            username: email,
            password,
        });
        let (_, body) = super::send_json::<StatusBody<IgnoredAny>>(request).await?;
        Ok(body.into_unit_reply())
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> PortResult<AccountReply<AuthToken>> {
        debug!("POST auth");
        let request = self.client.post(self.url("auth")).json(&AuthBody {
            username: email,
            password,
        });
        let (_, body) = super::send_json::<StatusBody<AuthData>>(request).await?;
        body.into_reply(auth_token)
    }

    async fn retrieve(&self, user_id: &str, token: &str) -> PortResult<AccountReply<RemoteUser>> {
        debug!("GET user/{}", user_id);
        let request = self
            .client
            .get(self.url(&format!("user/{}", user_id)))
            .bearer_auth(token);
        let (_, body) = super::send_json::<StatusBody<UserData>>(request).await?;
        body.into_reply(remote_user)
    }

    async fn update(
        &self,
        user_id: &str,
        token: &str,
        patch: UserPatch,
    ) -> PortResult<AccountReply<()>> {
        debug!("PUT user/{}", user_id);
        let request = self
            .client
            .put(self.url(&format!("user/{}", user_id)))
            .bearer_auth(token)
            .json(&PatchBody {
                favorites: patch.favorites,
            });
        let (_, body) = super::send_json::<StatusBody<IgnoredAny>>(request).await?;
        Ok(body.into_unit_reply())
    }
}
