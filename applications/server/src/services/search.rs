/// Discriminator-query helpers shared by the directories
///
/// Search endpoints take a single `query` parameter naming the lookup
/// (`all`, `by-id`, ...) plus the parameter that lookup needs. Parsing into a
/// typed criteria enum happens before any store access, so a missing or
/// unknown discriminator never reaches the database.
use crate::error::{Result, ServerError};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::{fmt::Display, str::FromStr};

/// Outcome of a search: a single record for keyed lookups, a list otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchResult<T> {
    One(T),
    Many(Vec<T>),
}

/// Deserialize an optional query parameter, treating `param=` as absent
///
/// Clients send the full parameter template (`?query=by-id&id=&dni=`), so a
/// blank value must read as "not supplied" rather than as an empty id or a
/// number that fails to parse.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Normalize the discriminator, failing when it is absent
pub(crate) fn discriminator(query: Option<&str>) -> Result<String> {
    query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Query parameter is required".to_string()))
}

/// Require the parameter a discriminator depends on
pub(crate) fn required<T>(value: Option<T>, name: &str, query: &str) -> Result<T> {
    value.ok_or_else(|| ServerError::BadRequest(format!("{name} is required for '{query}' query")))
}

/// Require a text parameter; blank text counts as missing
pub(crate) fn required_text(value: Option<String>, name: &str, query: &str) -> Result<String> {
    required(value.filter(|v| !v.trim().is_empty()), name, query)
}

/// Error for a discriminator the endpoint does not support
pub(crate) fn unsupported(query: &str) -> ServerError {
    ServerError::BadRequest(format!("Invalid query parameter: {query}"))
}
