//! Filter specification and normalization helpers used by the filters.

use crate::models::GameId;

/// Local constraints applied to fetched clips. `None` means "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub creator_name: Option<String>, // case-insensitive equality
    pub game_id: Option<GameId>,      // exact
    pub title_substring: Option<String>, // case-insensitive containment
}

impl FilterSpec {
    pub fn new() -> Self { Self::default() }

    pub fn creator(mut self, name: impl AsRef<str>) -> Self { self.creator_name = non_blank(name.as_ref()); self }
    pub fn game(mut self, id: Option<GameId>) -> Self { self.game_id = id.filter(|g| !g.0.trim().is_empty()); self }
    pub fn title_contains(mut self, text: impl AsRef<str>) -> Self { self.title_substring = non_blank(text.as_ref()); self }

    pub fn is_empty(&self) -> bool {
        self.creator_name.is_none() && self.game_id.is_none() && self.title_substring.is_none()
    }
}

/// Blank prompt answers mean "skip this filter".
#[inline]
pub fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Full Unicode case folding (`ß` folds to `ss`), not just lowercasing.
#[inline]
pub fn fold_case(s: &str) -> String {
    caseless::default_case_fold_str(s)
}
