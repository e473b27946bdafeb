#![allow(dead_code)]

use clipgrabber::{BroadcasterId, ClipQuery, ClipRecord, Game, GameId, HelixApi, Page, Result, User};
use serde_json::{json, Map};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Build a clip with a predictable URL (`https://clips.twitch.tv/<id>`).
pub fn clip(id: &str, game_id: &str, creator: &str, title: &str, created_at: &str) -> ClipRecord {
    let mut extra = Map::new();
    extra.insert("view_count".into(), json!(0));
    ClipRecord {
        id: id.to_string(),
        url: format!("https://clips.twitch.tv/{id}"),
        title: title.to_string(),
        creator_name: creator.to_string(),
        game_id: game_id.to_string(),
        created_at: OffsetDateTime::parse(created_at, &Rfc3339).unwrap(),
        extra,
    }
}

/// `n` clips with ids `<prefix>-0..n`, one minute apart starting at 2024-01-01T00:00:00Z.
pub fn clips_batch(prefix: &str, n: usize) -> Vec<ClipRecord> {
    (0..n)
        .map(|i| {
            let ts = format!("2024-01-01T{:02}:{:02}:00Z", i / 60, i % 60);
            clip(&format!("{prefix}-{i}"), "456", "alice", "some clip", &ts)
        })
        .collect()
}

pub fn ids(clips: &[ClipRecord]) -> Vec<&str> {
    clips.iter().map(|c| c.id.as_str()).collect()
}

/// Read a text file line-by-line into strings.
pub fn read_lines(path: &Path) -> Vec<String> {
    let f = File::open(path).unwrap();
    let r = BufReader::new(f);
    r.lines().map(|l| l.unwrap()).collect()
}

/// In-memory Helix: scripted clip pages served in order, fixed users and games.
/// Records the `after` cursor of every clips request.
#[derive(Default)]
pub struct MockHelix {
    pub users: Vec<User>,
    pub games: Vec<Game>,
    pages: RefCell<VecDeque<Page<ClipRecord>>>,
    pub cursors_seen: RefCell<Vec<Option<String>>>,
    pub queries_seen: RefCell<Vec<Vec<(&'static str, String)>>>,
}

impl MockHelix {
    pub fn with_pages(pages: Vec<Page<ClipRecord>>) -> Self {
        Self { pages: RefCell::new(pages.into()), ..Default::default() }
    }

    pub fn user(mut self, id: &str, login: &str) -> Self {
        self.users.push(User { id: BroadcasterId(id.into()), login: login.into(), display_name: login.into() });
        self
    }

    pub fn game(mut self, id: &str, name: &str) -> Self {
        self.games.push(Game { id: GameId(id.into()), name: name.into() });
        self
    }

    pub fn requests(&self) -> usize {
        self.cursors_seen.borrow().len()
    }
}

impl HelixApi for MockHelix {
    fn users_by_login(&self, login: &str) -> Result<Page<User>> {
        let found = self.users.iter().filter(|u| u.login.eq_ignore_ascii_case(login)).cloned().collect();
        Ok(Page::new(found, None))
    }

    fn games_by_name(&self, name: &str) -> Result<Page<Game>> {
        // Mimics the platform's fuzzy lookup: best match is the first game whose
        // name starts with the query (case-insensitive).
        let q = name.to_lowercase();
        let found = self.games.iter().filter(|g| g.name.to_lowercase().starts_with(&q)).cloned().collect();
        Ok(Page::new(found, None))
    }

    fn clips(&self, query: &ClipQuery<'_>, after: Option<&str>) -> Result<Page<ClipRecord>> {
        self.cursors_seen.borrow_mut().push(after.map(str::to_string));
        self.queries_seen.borrow_mut().push(query.params(after));
        Ok(self.pages.borrow_mut().pop_front().unwrap_or_else(|| Page::new(vec![], None)))
    }
}
