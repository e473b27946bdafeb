//! Name → id lookups for channels and games.

use crate::error::{ClipError, Result};
use crate::helix::HelixApi;
use crate::models::{BroadcasterId, GameId};
use crate::query::fold_case;

/// Exact login lookup; the first returned user wins.
pub fn resolve_broadcaster<A: HelixApi + ?Sized>(api: &A, login: &str) -> Result<BroadcasterId> {
    let login = login.trim();
    let page = api.users_by_login(login)?;
    page.data
        .and_then(|users| users.into_iter().next())
        .map(|u| u.id)
        .ok_or_else(|| ClipError::BroadcasterNotFound(login.to_string()))
}

/// Result of a game lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameMatch {
    /// The platform's name equals the query ignoring case.
    Exact(GameId),
    /// The best match is named differently; the user has to accept it first.
    NeedsConfirmation { id: GameId, name: String },
}

impl GameMatch {
    /// Apply the user's answer. Declining yields no id, not an error.
    pub fn confirm(self, accepted: bool) -> Option<GameId> {
        match self {
            GameMatch::Exact(id) => Some(id),
            GameMatch::NeedsConfirmation { id, .. } if accepted => Some(id),
            GameMatch::NeedsConfirmation { .. } => None,
        }
    }

    pub fn id(&self) -> &GameId {
        match self {
            GameMatch::Exact(id) | GameMatch::NeedsConfirmation { id, .. } => id,
        }
    }
}

pub fn resolve_game<A: HelixApi + ?Sized>(api: &A, name: &str) -> Result<GameMatch> {
    let name = name.trim();
    let best = api
        .games_by_name(name)?
        .data
        .and_then(|games| games.into_iter().next())
        .ok_or_else(|| ClipError::GameNotFound(name.to_string()))?;

    if fold_case(&best.name) == fold_case(name) {
        Ok(GameMatch::Exact(best.id))
    } else {
        tracing::debug!(query=%name, found=%best.name, "game name differs from query");
        Ok(GameMatch::NeedsConfirmation { id: best.id, name: best.name })
    }
}
