//! Helix response shapes. Only the fields the pipeline reads are typed; clips keep
//! every other field they arrive with.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use time::OffsetDateTime;

/// Opaque numeric id of a channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BroadcasterId(pub String);

/// Opaque id of a game/category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl fmt::Display for BroadcasterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Bearer token obtained from the client-credentials grant. Expiry is not tracked.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(pub String);

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("Token(***)") }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipRecord {
    pub id: String,
    pub url: String,
    pub title: String,
    pub creator_name: String,
    pub game_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Remaining fields (view_count, thumbnail_url, ...) as returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: BroadcasterId,
    pub login: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub cursor: Option<String>,
}

/// One page of a Helix list endpoint. `data` is optional: error bodies and some
/// empty results come back without it. Missing `Option` fields read as `None`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Page<T> {
    pub data: Option<Vec<T>>,
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, cursor: Option<&str>) -> Self {
        Self {
            data: Some(data),
            pagination: Some(Pagination { cursor: cursor.map(str::to_string) }),
        }
    }

    /// Body without a `data` field.
    pub fn missing_data() -> Self {
        Self { data: None, pagination: None }
    }

    /// Continuation cursor, if the server handed back a non-empty one.
    pub fn cursor(&self) -> Option<&str> {
        self.pagination
            .as_ref()
            .and_then(|p| p.cursor.as_deref())
            .filter(|c| !c.is_empty())
    }
}
