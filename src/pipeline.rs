use crate::config::GrabberOptions;
use crate::credentials::Credential;
use crate::date::TimeWindow;
use crate::error::Result;
use crate::filters::filter_clips;
use crate::helix::{ClipQuery, HelixApi, HelixClient};
use crate::models::{BroadcasterId, ClipRecord};
use crate::paginate::{paginate_with, Cancellation};
use crate::progress::ProgressScope;
use crate::query::FilterSpec;
use crate::resolve::{resolve_broadcaster, resolve_game, GameMatch};
use crate::sink::UrlSink;
use crate::sort::{sort_clips, SortPolicy};
use std::path::PathBuf;

/// Session context: the authenticated API handle plus options, shared by every round.
pub struct Session<A = HelixClient> {
    api: A,
    opts: GrabberOptions,
}

impl Session<HelixClient> {
    /// Run the client-credentials grant and open a session on the real API.
    pub fn connect(opts: GrabberOptions, credential: &Credential) -> Result<Self> {
        let api = HelixClient::authenticate(&opts, credential)?;
        Ok(Self { api, opts })
    }
}

impl<A: HelixApi> Session<A> {
    pub fn with_api(api: A, opts: GrabberOptions) -> Self {
        Self { api, opts }
    }

    pub fn api(&self) -> &A { &self.api }
    pub fn options(&self) -> &GrabberOptions { &self.opts }

    pub fn broadcaster(&self, login: &str) -> Result<BroadcasterId> {
        resolve_broadcaster(&self.api, login)
    }

    pub fn game(&self, name: &str) -> Result<GameMatch> {
        resolve_game(&self.api, name)
    }

    /// Start a retrieval round. Filters default to none and the order to `popular`.
    pub fn request(&self, broadcaster_id: BroadcasterId, window: TimeWindow) -> ClipRequest<'_, A> {
        ClipRequest {
            session: self,
            broadcaster_id,
            window,
            filter: FilterSpec::default(),
            sort: SortPolicy::default(),
            cancel: Cancellation::new(),
        }
    }
}

/// One retrieval round: fetch → filter → sort → write.
pub struct ClipRequest<'s, A> {
    session: &'s Session<A>,
    broadcaster_id: BroadcasterId,
    window: TimeWindow,
    filter: FilterSpec,
    sort: SortPolicy,
    cancel: Cancellation,
}

/// What a finished round produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    pub fetched: usize,
    pub written: usize,
    pub path: PathBuf,
}

impl<'s, A: HelixApi> ClipRequest<'s, A> {
    pub fn filter(mut self, spec: FilterSpec) -> Self { self.filter = spec; self }
    pub fn sort(mut self, policy: SortPolicy) -> Self { self.sort = policy; self }
    pub fn cancellation(mut self, cancel: Cancellation) -> Self { self.cancel = cancel; self }

    pub fn window(&self) -> &TimeWindow { &self.window }

    /// Every clip in the window, unfiltered, in API order.
    pub fn fetch_raw(&self) -> Result<Vec<ClipRecord>> {
        let query = ClipQuery {
            broadcaster_id: &self.broadcaster_id,
            window: &self.window,
            page_size: self.session.opts.page_size,
        };
        tracing::info!(broadcaster=%self.broadcaster_id, window=%self.window, "retrieving clips");
        let progress = ProgressScope::new_if(self.session.opts.progress, "Retrieving clips");
        let clips = paginate_with(&self.session.api, &query, &self.cancel, |_, total| progress.set_total(total))?;
        progress.finish_and_clear();
        Ok(clips)
    }

    /// Fetched, filtered and sorted clips.
    pub fn fetch(&self) -> Result<(usize, Vec<ClipRecord>)> {
        let clips = self.fetch_raw()?;
        let fetched = clips.len();
        let mut clips = filter_clips(clips, &self.filter);
        sort_clips(&mut clips, self.sort);
        tracing::info!(fetched, kept = clips.len(), sort=%self.sort, "clips ready");
        Ok((fetched, clips))
    }

    /// Fetch and write into an already opened sink.
    pub fn run(self, sink: UrlSink) -> Result<RoundSummary> {
        let (fetched, clips) = self.fetch()?;
        let path = sink.path().to_path_buf();
        let written = sink.write_all(&clips)?;
        Ok(RoundSummary { fetched, written, path })
    }
}
