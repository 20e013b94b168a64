//! crates/cocktail_core/src/logic.rs
//!
//! The logic layer sitting between the UI and the two remote services.
//!
//! Every operation validates its arguments first, then reads the session,
//! then talks to the remote services. Lists of catalog ids are resolved into
//! full drinks concurrently and returned in their original order.

use futures::lock::Mutex;
use futures::{stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{DrinkSummary, NormalizedDrink, RawCatalogRecord, UserAccount};
use crate::error::{CocktailResult, LogicError};
use crate::normalize::{self, fields, DEFAULT_INGREDIENT_IMAGE_BASE};
use crate::ports::{
    AccountReply, AccountService, CatalogReply, CatalogService, PortError, RemoteUser, UserPatch,
};
use crate::session::SessionStore;
use crate::validate::{validate_arguments, validate_email, ArgSpec};

pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 8;

/// Tunables for a `CocktailLogic` instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicOptions {
    /// Upper bound on detail lookups in flight at once. Zero is treated as one.
    pub max_concurrent_lookups: usize,
    pub ingredient_image_base: String,
}

impl Default for LogicOptions {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
            ingredient_image_base: DEFAULT_INGREDIENT_IMAGE_BASE.to_string(),
        }
    }
}

/// Toggles `id` in `favorites`: removes its first occurrence, or appends it.
/// Returns `true` when the id ended up in the list.
pub fn toggle_membership(favorites: &mut Vec<String>, id: &str) -> bool {
    match favorites.iter().position(|favorite| favorite == id) {
        Some(index) => {
            favorites.remove(index);
            false
        }
        None => {
            favorites.push(id.to_string());
            true
        }
    }
}

fn not_logged_in() -> LogicError {
    LogicError::new("not logged in")
}

fn reply_error(error: Option<String>, fallback: impl FnOnce() -> String) -> LogicError {
    LogicError::new(error.unwrap_or_else(fallback))
}

pub struct CocktailLogic {
    accounts: Arc<dyn AccountService>,
    catalog: Arc<dyn CatalogService>,
    session: SessionStore,
    options: LogicOptions,
    // Serialises favorite toggles issued through this instance. Toggles from
    // other clients against the same account can still overwrite each other:
    // the account service offers no version token to detect it.
    favorites_lock: Mutex<()>,
}

impl CocktailLogic {
    pub fn new(
        accounts: Arc<dyn AccountService>,
        catalog: Arc<dyn CatalogService>,
        session: SessionStore,
        options: LogicOptions,
    ) -> Self {
        Self {
            accounts,
            catalog,
            session,
            options,
            favorites_lock: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn is_user_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    //=====================================================================================
    // Accounts
    //=====================================================================================

    pub async fn register_user(&self, name: &str, email: &str, password: &str) -> CocktailResult<()> {
        validate_arguments(&[
            ArgSpec::text("name", name),
            ArgSpec::text("email", email),
            ArgSpec::text("password", password),
        ])?;
        validate_email(email)?;

        match self.accounts.create(email, password, name).await? {
            AccountReply::Ok(()) => {
                info!("Registered a new account for {}", email);
                Ok(())
            }
            AccountReply::Ko { error } => {
                warn!("Registration rejected: {}", error);
                Err(LogicError::new(error).into())
            }
        }
    }

    /// Authenticates and stores the issued id and token in the session.
    /// On failure the session is left as it was.
    pub async fn login_user(&self, email: &str, password: &str) -> CocktailResult<()> {
        validate_arguments(&[
            ArgSpec::text("email", email),
            ArgSpec::text("password", password),
        ])?;
        validate_email(email)?;

        match self.accounts.authenticate(email, password).await? {
            AccountReply::Ok(auth) => {
                self.session.set_credentials(auth.id, auth.token);
                info!("User {} logged in", email);
                Ok(())
            }
            AccountReply::Ko { error } => {
                warn!("Login rejected for {}: {}", email, error);
                Err(LogicError::new(error).into())
            }
        }
    }

    pub fn logout_user(&self) {
        self.session.clear();
        info!("User logged out");
    }

    pub async fn retrieve_user(&self) -> CocktailResult<UserAccount> {
        let (user_id, token) = self.session.credentials().ok_or_else(not_logged_in)?;
        let user = self.fetch_user(&user_id, &token).await?;

        Ok(UserAccount {
            email: user.username,
            name: user.name,
            favorites: user.favorites,
            creations: user.creations,
        })
    }

    /// Adds `id` to the user's favorites, or removes it if already there.
    ///
    /// This re-reads the user, edits the list and writes the whole list back.
    pub async fn toggle_favorite_cocktail(&self, id: &str) -> CocktailResult<()> {
        validate_arguments(&[ArgSpec::any_text("id", id)])?;
        let (user_id, token) = self.session.credentials().ok_or_else(not_logged_in)?;

        let _guard = self.favorites_lock.lock().await;

        let mut favorites = self.fetch_user(&user_id, &token).await?.favorites;
        let added = toggle_membership(&mut favorites, id);
        debug!(added, count = favorites.len(), "Writing back favorites");

        let patch = UserPatch {
            favorites: Some(favorites),
        };
        match self.accounts.update(&user_id, &token, patch).await? {
            AccountReply::Ok(()) => Ok(()),
            AccountReply::Ko { error } => {
                warn!("Favorites update rejected: {}", error);
                Err(LogicError::new(error).into())
            }
        }
    }

    /// The user's favorite drinks, fully resolved, in favorites order.
    pub async fn retrieve_favorites(&self) -> CocktailResult<Vec<NormalizedDrink>> {
        let (user_id, token) = self.session.credentials().ok_or_else(not_logged_in)?;
        let favorites = self.fetch_user(&user_id, &token).await?.favorites;

        self.resolve_details(&favorites).await
    }

    async fn fetch_user(&self, user_id: &str, token: &str) -> CocktailResult<RemoteUser> {
        debug!("Retrieving user {}", user_id);
        match self.accounts.retrieve(user_id, token).await? {
            AccountReply::Ok(user) => Ok(user),
            AccountReply::Ko { error } => {
                warn!("User retrieval rejected: {}", error);
                Err(LogicError::new(error).into())
            }
        }
    }

    //=====================================================================================
    // Catalog
    //=====================================================================================

    pub async fn search_by_category(&self, query: &str) -> CocktailResult<Vec<DrinkSummary>> {
        validate_arguments(&[ArgSpec::text("query", query)])?;
        let reply = self.catalog.search_by_category(query).await?;
        summaries(reply, query)
    }

    pub async fn search_by_glass(&self, query: &str) -> CocktailResult<Vec<DrinkSummary>> {
        validate_arguments(&[ArgSpec::text("query", query)])?;
        let reply = self.catalog.search_by_glass(query).await?;
        summaries(reply, query)
    }

    /// Searches by name and resolves every hit into a full drink.
    /// An empty result is reported as a `LogicError`.
    pub async fn search_by_name(&self, query: &str) -> CocktailResult<Vec<NormalizedDrink>> {
        validate_arguments(&[ArgSpec::text("query", query)])?;
        let reply = self.catalog.search_by_name(query).await?;
        let ids = matched_ids(reply, query)?;
        self.resolve_details(&ids).await
    }

    /// Looks up one drink. An unknown id is reported as a `LogicError`.
    pub async fn cocktail_detail(&self, id: &str) -> CocktailResult<Vec<NormalizedDrink>> {
        validate_arguments(&[ArgSpec::text("id", id)])?;
        let reply = self.catalog.search_by_id(id).await?;
        let ids = matched_ids(reply, id)?;
        self.resolve_details(&ids).await
    }

    /// Resolves each id into a normalized drink.
    ///
    /// Lookups run concurrently, at most `max_concurrent_lookups` at a time.
    /// The output follows the order of `ids` regardless of which lookup
    /// finishes first. If any lookup fails, the whole call fails and the
    /// remaining lookups are dropped.
    pub async fn resolve_details(&self, ids: &[String]) -> CocktailResult<Vec<NormalizedDrink>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let limit = self.options.max_concurrent_lookups.max(1);
        debug!(count = ids.len(), limit, "Resolving cocktail details");

        stream::iter(ids)
            .map(|id| self.fetch_detail(id))
            .buffered(limit)
            .try_collect()
            .await
    }

    async fn fetch_detail(&self, id: &str) -> CocktailResult<NormalizedDrink> {
        let not_found = || format!("cocktail {id} not found");

        let record = match self.catalog.search_by_id(id).await? {
            CatalogReply::Records(records) => records.into_iter().next(),
            CatalogReply::Failure { error } => return Err(reply_error(error, not_found).into()),
        }
        .ok_or_else(|| LogicError::new(not_found()))?;

        let cleaned = record.without_blank_fields();
        normalize::normalize_record(&cleaned, &self.options.ingredient_image_base).ok_or_else(|| {
            PortError::Decode(format!("catalog record for {id} has no id or name")).into()
        })
    }
}

fn summaries(reply: CatalogReply, query: &str) -> CocktailResult<Vec<DrinkSummary>> {
    match reply {
        CatalogReply::Records(records) => {
            Ok(records.iter().filter_map(DrinkSummary::from_record).collect())
        }
        CatalogReply::Failure { error } => {
            warn!("Catalog search for {} failed", query);
            Err(reply_error(error, || format!("search for {query} failed")).into())
        }
    }
}

fn record_ids(records: &[RawCatalogRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.get(fields::ID))
        .map(str::to_string)
        .collect()
}

/// Ids of a search reply; an empty or failed reply becomes a `LogicError`.
fn matched_ids(reply: CatalogReply, query: &str) -> CocktailResult<Vec<String>> {
    let no_results = || format!("no results for {query}");
    match reply {
        CatalogReply::Records(records) => {
            let ids = record_ids(&records);
            if ids.is_empty() {
                Err(LogicError::new(no_results()).into())
            } else {
                Ok(ids)
            }
        }
        CatalogReply::Failure { error } => Err(reply_error(error, no_results).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_appends_missing_id() {
        let mut favorites = vec!["a".to_string(), "b".to_string()];
        assert!(toggle_membership(&mut favorites, "c"));
        assert_eq!(favorites, vec!["a", "b", "c"]);
    }

    #[test]
    fn toggle_removes_first_occurrence_only() {
        let mut favorites = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert!(!toggle_membership(&mut favorites, "a"));
        assert_eq!(favorites, vec!["b", "a"]);
    }

    #[test]
    fn toggle_twice_restores_the_list() {
        let original = vec!["x".to_string(), "y".to_string()];
        let mut favorites = original.clone();
        toggle_membership(&mut favorites, "z");
        toggle_membership(&mut favorites, "z");
        assert_eq!(favorites, original);
    }

    #[test]
    fn empty_search_reply_is_a_logic_error() {
        let err = matched_ids(CatalogReply::Records(Vec::new()), "zzz").unwrap_err();
        assert_eq!(err.to_string(), "no results for zzz");
    }

    #[test]
    fn failed_reply_keeps_remote_message() {
        let reply = CatalogReply::Failure {
            error: Some("service down".to_string()),
        };
        assert_eq!(matched_ids(reply, "q").unwrap_err().to_string(), "service down");
    }
}
