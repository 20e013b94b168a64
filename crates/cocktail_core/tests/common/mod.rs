//! In-memory stand-ins for the account and catalog services.

#![allow(dead_code)]

use async_trait::async_trait;
use cocktail_core::{
    AccountReply, AccountService, AuthToken, CatalogReply, CatalogService, PortError, PortResult,
    RawCatalogRecord, RemoteUser, UserPatch,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

//=========================================================================================
// Account Service
//=========================================================================================

pub struct FakeAccounts {
    pub create_reply: AccountReply<()>,
    pub auth_reply: AccountReply<AuthToken>,
    pub update_reply: AccountReply<()>,
    pub retrieve_error: Option<String>,
    pub user: Mutex<RemoteUser>,
    pub calls: Mutex<Vec<String>>,
    pub patches: Mutex<Vec<UserPatch>>,
}

impl FakeAccounts {
    pub fn new() -> Self {
        Self {
            create_reply: AccountReply::Ok(()),
            auth_reply: AccountReply::Ok(AuthToken {
                id: "u1".to_string(),
                token: "t1".to_string(),
            }),
            update_reply: AccountReply::Ok(()),
            retrieve_error: None,
            user: Mutex::new(RemoteUser {
                username: "a@b.com".to_string(),
                name: "Ann".to_string(),
                favorites: Vec::new(),
                creations: Vec::new(),
            }),
            calls: Mutex::new(Vec::new()),
            patches: Mutex::new(Vec::new()),
        }
    }

    pub fn with_favorites(self, favorites: &[&str]) -> Self {
        self.user.lock().unwrap().favorites = favorites.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn patches(&self) -> Vec<UserPatch> {
        self.patches.lock().unwrap().clone()
    }

    pub fn favorites(&self) -> Vec<String> {
        self.user.lock().unwrap().favorites.clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AccountService for FakeAccounts {
    async fn create(&self, email: &str, _password: &str, name: &str) -> PortResult<AccountReply<()>> {
        self.record(format!("create {email} {name}"));
        Ok(self.create_reply.clone())
    }

    async fn authenticate(&self, email: &str, _password: &str) -> PortResult<AccountReply<AuthToken>> {
        self.record(format!("authenticate {email}"));
        Ok(self.auth_reply.clone())
    }

    async fn retrieve(&self, user_id: &str, token: &str) -> PortResult<AccountReply<RemoteUser>> {
        self.record(format!("retrieve {user_id} {token}"));
        if let Some(error) = &self.retrieve_error {
            return Ok(AccountReply::Ko {
                error: error.clone(),
            });
        }
        Ok(AccountReply::Ok(self.user.lock().unwrap().clone()))
    }

    async fn update(&self, user_id: &str, token: &str, patch: UserPatch) -> PortResult<AccountReply<()>> {
        self.record(format!("update {user_id} {token}"));
        self.patches.lock().unwrap().push(patch.clone());
        if let (AccountReply::Ok(()), Some(favorites)) = (&self.update_reply, patch.favorites) {
            self.user.lock().unwrap().favorites = favorites;
        }
        Ok(self.update_reply.clone())
    }
}

//=========================================================================================
// Catalog Service
//=========================================================================================

#[derive(Default)]
pub struct FakeCatalog {
    pub records: HashMap<String, RawCatalogRecord>,
    pub delays: HashMap<String, Duration>,
    pub failing: HashSet<String>,
    pub name_reply: Option<CatalogReply>,
    pub filter_reply: Option<CatalogReply>,
    pub lookups: Mutex<Vec<String>>,
    pub completed: Mutex<Vec<String>>,
    pub filter_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeCatalog {
    pub fn with_drink(mut self, id: &str, name: &str) -> Self {
        self.records.insert(id.to_string(), drink_record(id, name));
        self
    }

    pub fn with_delay(mut self, id: &str, millis: u64) -> Self {
        self.delays.insert(id.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn failing_on(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    fn filter(&self) -> CatalogReply {
        self.filter_calls.fetch_add(1, Ordering::SeqCst);
        self.filter_reply
            .clone()
            .unwrap_or(CatalogReply::Records(Vec::new()))
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn search_by_category(&self, _category: &str) -> PortResult<CatalogReply> {
        Ok(self.filter())
    }

    async fn search_by_glass(&self, _glass: &str) -> PortResult<CatalogReply> {
        Ok(self.filter())
    }

    async fn search_by_name(&self, _name: &str) -> PortResult<CatalogReply> {
        self.filter_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .name_reply
            .clone()
            .unwrap_or(CatalogReply::Records(Vec::new())))
    }

    async fn search_by_id(&self, id: &str) -> PortResult<CatalogReply> {
        self.lookups.lock().unwrap().push(id.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.lock().unwrap().push(id.to_string());

        if self.failing.contains(id) {
            return Err(PortError::Transport(format!("connection reset while fetching {id}")));
        }

        Ok(CatalogReply::Records(
            self.records.get(id).cloned().into_iter().collect(),
        ))
    }
}

/// A catalog record shaped like the real service's, blanks included.
pub fn drink_record(id: &str, name: &str) -> RawCatalogRecord {
    RawCatalogRecord::from_iter([
        ("idDrink", Some(id.to_string())),
        ("strDrink", Some(name.to_string())),
        ("strTags", None),
        ("strCategory", Some("Cocktail".to_string())),
        ("strAlcoholic", Some("Alcoholic".to_string())),
        ("strGlass", Some("Highball glass".to_string())),
        ("strInstructions", Some("Stir.".to_string())),
        ("strDrinkThumb", Some(format!("https://img.test/{id}.jpg"))),
        ("strIngredient1", Some("Gin".to_string())),
        ("strIngredient2", Some("Tonic".to_string())),
        ("strIngredient3", Some("".to_string())),
        ("strMeasure1", Some("2 oz".to_string())),
        ("strMeasure2", Some("4 oz".to_string())),
        ("strMeasure3", None),
    ])
}
