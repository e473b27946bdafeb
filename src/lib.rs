mod config;
mod credentials;
mod date;
mod error;
mod timeframe;

mod helix;
mod models;
mod resolve;
mod paginate;

mod query;
mod filters;
mod sort;
mod sink;

mod progress;
mod util;
mod pipeline;

pub use crate::config::{GrabberOptions, DEFAULT_API_BASE, DEFAULT_AUTH_URL, MAX_PAGE_SIZE};
pub use crate::credentials::{Credential, CredentialFile};
pub use crate::error::{ClipError, DateError, Result};

// Time window resolution.
pub use crate::date::{wire_format, Bucket, Span, TimeWindow};
pub use crate::timeframe::{custom_end, custom_start, resolve, resolve_custom, TimeExpression, LIFETIME_FLOOR, NAMED_TIMEFRAMES};

// Helix transport and wire models.
pub use crate::helix::{ClipQuery, HelixApi, HelixClient};
pub use crate::models::{BroadcasterId, ClipRecord, Game, GameId, Page, Pagination, Token, User};

// Identifier resolution and pagination.
pub use crate::resolve::{resolve_broadcaster, resolve_game, GameMatch};
pub use crate::paginate::{paginate, paginate_with, Cancellation};

// Local post-processing and output.
pub use crate::query::FilterSpec;
pub use crate::filters::{clip_matches, filter_clips};
pub use crate::sort::{sort_clips, SortPolicy};
pub use crate::sink::UrlSink;

pub use crate::pipeline::{ClipRequest, RoundSummary, Session};
pub use crate::progress::ProgressScope;
pub use crate::util::{ensure_txt_extension, init_tracing_once};
