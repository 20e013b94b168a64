//! crates/cocktail_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the two remote services the
//! logic layer talks to. These traits are the boundary of the core: HTTP
//! clients, fakes in tests, or anything else can sit behind them.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::RawCatalogRecord;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// Errors raised below the domain level, while talking to a remote service.
///
/// These are never turned into `LogicError`s; they reach the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Reply Shapes
//=========================================================================================

/// The account service answers every call with a status of `OK` or `KO`.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountReply<T> {
    Ok(T),
    Ko { error: String },
}

/// Credentials issued by a successful `authenticate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub id: String,
    pub token: String,
}

/// The user document as stored by the account service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteUser {
    /// The account service keys users by e-mail under this name.
    pub username: String,
    pub name: String,
    pub favorites: Vec<String>,
    pub creations: Vec<Value>,
}

/// A partial update of a user document. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserPatch {
    pub favorites: Option<Vec<String>>,
}

/// What a catalog query returns: a (possibly empty) list of records, or a
/// failure object.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogReply {
    Records(Vec<RawCatalogRecord>),
    Failure { error: Option<String> },
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AccountService: Send + Sync {
    async fn create(&self, email: &str, password: &str, name: &str)
        -> PortResult<AccountReply<()>>;

    async fn authenticate(&self, email: &str, password: &str)
        -> PortResult<AccountReply<AuthToken>>;

    async fn retrieve(&self, user_id: &str, token: &str) -> PortResult<AccountReply<RemoteUser>>;

    async fn update(
        &self,
        user_id: &str,
        token: &str,
        patch: UserPatch,
    ) -> PortResult<AccountReply<()>>;
}

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn search_by_category(&self, category: &str) -> PortResult<CatalogReply>;

    async fn search_by_glass(&self, glass: &str) -> PortResult<CatalogReply>;

    async fn search_by_name(&self, name: &str) -> PortResult<CatalogReply>;

    /// Looks up the full record for one drink id.
    async fn search_by_id(&self, id: &str) -> PortResult<CatalogReply>;
}
