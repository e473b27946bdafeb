//! Filtering of fetched clips against a [`FilterSpec`].

use crate::models::ClipRecord;
use crate::query::{fold_case, FilterSpec};

/// Case-folded view of a spec so each record only folds its own fields.
struct Prepared<'a> {
    creator: Option<String>,
    game_id: Option<&'a str>,
    title: Option<String>,
}

impl<'a> Prepared<'a> {
    fn new(spec: &'a FilterSpec) -> Self {
        Self {
            creator: spec.creator_name.as_deref().map(fold_case),
            game_id: spec.game_id.as_ref().map(|g| g.0.as_str()),
            title: spec.title_substring.as_deref().map(fold_case),
        }
    }

    fn matches(&self, clip: &ClipRecord) -> bool {
        if let Some(creator) = &self.creator {
            if fold_case(&clip.creator_name) != *creator { return false; }
        }
        if let Some(game) = self.game_id {
            if clip.game_id != game { return false; }
        }
        if let Some(title) = &self.title {
            if !fold_case(&clip.title).contains(title.as_str()) { return false; }
        }
        true
    }
}

pub fn clip_matches(clip: &ClipRecord, spec: &FilterSpec) -> bool {
    Prepared::new(spec).matches(clip)
}

/// Keep the records satisfying every present constraint, preserving order.
/// An empty spec returns the input untouched.
pub fn filter_clips(clips: Vec<ClipRecord>, spec: &FilterSpec) -> Vec<ClipRecord> {
    if spec.is_empty() {
        return clips;
    }
    let prepared = Prepared::new(spec);
    let before = clips.len();
    let kept: Vec<ClipRecord> = clips.into_iter().filter(|c| prepared.matches(c)).collect();
    tracing::debug!(before, after = kept.len(), "applied clip filters");
    kept
}
