//! crates/cocktail_core/src/validate.rs
//!
//! Synchronous argument checks run before any remote call.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::ArgumentError;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is a valid regex")
});

/// The shape an argument is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    String,
    Number,
    Boolean,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Boolean => f.write_str("boolean"),
        }
    }
}

/// A value handed to the validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgValue<'a> {
    Missing,
    Str(&'a str),
    Number(f64),
    Boolean(bool),
}

impl ArgValue<'_> {
    fn kind(&self) -> Option<ArgKind> {
        match self {
            Self::Missing => None,
            Self::Str(_) => Some(ArgKind::String),
            Self::Number(_) => Some(ArgKind::Number),
            Self::Boolean(_) => Some(ArgKind::Boolean),
        }
    }
}

impl fmt::Display for ArgValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("undefined"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl<'a> From<&'a str> for ArgValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<Option<&'a str>> for ArgValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Self::Missing, Self::Str)
    }
}

/// One argument to check.
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec<'a> {
    pub name: &'a str,
    pub value: ArgValue<'a>,
    pub kind: ArgKind,
    pub not_empty: bool,
}

impl<'a> ArgSpec<'a> {
    /// A required, non-blank string.
    pub fn text(name: &'a str, value: impl Into<ArgValue<'a>>) -> Self {
        Self {
            name,
            value: value.into(),
            kind: ArgKind::String,
            not_empty: true,
        }
    }

    /// A string that may be blank.
    pub fn any_text(name: &'a str, value: impl Into<ArgValue<'a>>) -> Self {
        Self {
            not_empty: false,
            ..Self::text(name, value)
        }
    }
}

/// Checks each spec in order and fails on the first violation.
pub fn validate_arguments(specs: &[ArgSpec<'_>]) -> Result<(), ArgumentError> {
    for spec in specs {
        if spec.value.kind() != Some(spec.kind) {
            return Err(ArgumentError::new(format!(
                "{} {} is not a {}",
                spec.name, spec.value, spec.kind
            )));
        }

        if let (true, ArgValue::Str(s)) = (spec.not_empty, spec.value) {
            if s.trim().is_empty() {
                return Err(ArgumentError::new(format!("{} is empty", spec.name)));
            }
        }
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ArgumentError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ArgumentError::new(format!("{email} is not an e-mail")))
    }
}
