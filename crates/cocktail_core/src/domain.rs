//! crates/cocktail_core/src/domain.rs
//!
//! Defines the core data structures for the cocktail client.
//! Raw records are kept as ordered field lists; everything handed back to
//! callers is a typed view model.

use serde::Serialize;
use serde_json::Value;

use crate::normalize::fields;

/// The authenticated user as seen by this client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAccount {
    pub email: String,
    pub name: String,
    /// Catalog record ids, in the order they were favorited.
    pub favorites: Vec<String>,
    /// Opaque to this client; passed through untouched.
    pub creations: Vec<Value>,
}

/// One raw record from the catalog service.
///
/// Field order is preserved exactly as the remote sent it, since the
/// ingredient/measure pairing relies on positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCatalogRecord {
    fields: Vec<(String, Option<String>)>,
}

impl RawCatalogRecord {
    pub fn new(fields: Vec<(String, Option<String>)>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[(String, Option<String>)] {
        &self.fields
    }

    /// Returns the value of `name`, if the field exists and is non-null.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Position of `name` in the field sequence.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(key, _)| key == name)
    }

    /// Drops every field whose value is null or blank after trimming.
    pub fn without_blank_fields(self) -> Self {
        let fields = self
            .fields
            .into_iter()
            .filter(|(_, value)| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
            .collect();
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for RawCatalogRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alcoholic {
    Alcoholic,
    NonAlcoholic,
    Optional,
    Unknown(String),
}

impl Alcoholic {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "alcoholic" => Self::Alcoholic,
            "non alcoholic" | "non-alcoholic" => Self::NonAlcoholic,
            "optional alcohol" | "optional" => Self::Optional,
            _ => Self::Unknown(raw.to_string()),
        }
    }
}

/// A single ingredient line of a drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: Option<String>,
    pub image_url: String,
}

/// The cleaned view model built from one raw catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedDrink {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub alcoholic: Option<Alcoholic>,
    pub glass: Option<String>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

/// A filter hit: catalog filters only return id, name and thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkSummary {
    pub id: String,
    pub name: Option<String>,
    pub thumbnail: Option<String>,
}

impl DrinkSummary {
    /// Builds a summary from a raw record; `None` when it carries no id.
    pub fn from_record(record: &RawCatalogRecord) -> Option<Self> {
        Some(Self {
            id: record.get(fields::ID)?.to_string(),
            name: record.get(fields::NAME).map(str::to_string),
            thumbnail: record.get(fields::THUMBNAIL).map(str::to_string),
        })
    }
}
