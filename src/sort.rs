use crate::models::ClipRecord;
use std::fmt;
use std::str::FromStr;

/// Output ordering. The clips endpoint already answers most-viewed first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortPolicy {
    Oldest,
    Newest,
    #[default]
    Popular,
    Unpopular,
}

impl SortPolicy {
    pub const ALL: [SortPolicy; 4] = [SortPolicy::Oldest, SortPolicy::Newest, SortPolicy::Popular, SortPolicy::Unpopular];

    pub fn as_str(self) -> &'static str {
        match self {
            SortPolicy::Oldest => "oldest",
            SortPolicy::Newest => "newest",
            SortPolicy::Popular => "popular",
            SortPolicy::Unpopular => "unpopular",
        }
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oldest" => Ok(SortPolicy::Oldest),
            "newest" => Ok(SortPolicy::Newest),
            "popular" => Ok(SortPolicy::Popular),
            "unpopular" => Ok(SortPolicy::Unpopular),
            other => Err(format!("unknown sort order `{other}` (oldest, newest, popular, unpopular)")),
        }
    }
}

/// Reorder in place.
///
/// `Popular` keeps the current order and `Unpopular` reverses it, so both assume the
/// records are still in the order the API returned them.
pub fn sort_clips(clips: &mut [ClipRecord], policy: SortPolicy) {
    match policy {
        SortPolicy::Oldest => clips.sort_by_key(|c| c.created_at),
        SortPolicy::Newest => clips.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortPolicy::Popular => {}
        SortPolicy::Unpopular => clips.reverse(),
    }
}
