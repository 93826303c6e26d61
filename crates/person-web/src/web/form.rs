//! Explicit binding of urlencoded form fields to [`PersonForm`].
//!
//! Fields arrive as raw strings; each one is named and parsed here.

use crate::backend::model::PersonForm;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("age must be a whole number, got '{0}'")]
    InvalidAge(String),
}

/// Body of `POST /save` and `POST /update`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPersonForm {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: String,
}

/// Body of `POST /select`, `POST /delete` and the `?id=` query parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct IdParam {
    pub id: String,
}

impl TryFrom<RawPersonForm> for PersonForm {
    type Error = FormError;

    fn try_from(raw: RawPersonForm) -> Result<Self, Self::Error> {
        Ok(PersonForm {
            id: raw.id,
            name: raw.name,
            age: parse_age(&raw.age)?,
        })
    }
}

/// Blank means no age.
fn parse_age(value: &str) -> Result<Option<i32>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| FormError::InvalidAge(value.to_string()))
}
