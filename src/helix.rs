//! Blocking Helix client plus the [`HelixApi`] seam the resolvers and the paginator
//! are written against.

use crate::config::GrabberOptions;
use crate::credentials::Credential;
use crate::date::TimeWindow;
use crate::error::{ClipError, Result};
use crate::models::{BroadcasterId, ClipRecord, Game, Page, Token, TokenResponse, User};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Parameters of one clip listing run.
#[derive(Clone, Copy, Debug)]
pub struct ClipQuery<'a> {
    pub broadcaster_id: &'a BroadcasterId,
    pub window: &'a TimeWindow,
    pub page_size: u8,
}

impl ClipQuery<'_> {
    /// Query string for one request; `after` is attached only when a cursor is held.
    pub fn params(&self, after: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("broadcaster_id", self.broadcaster_id.0.clone()),
            ("first", self.page_size.to_string()),
            ("started_at", self.window.started_at()),
            ("ended_at", self.window.ended_at()),
        ];
        if let Some(cursor) = after {
            params.push(("after", cursor.to_string()));
        }
        params
    }
}

/// The three Helix lookups the pipeline needs.
pub trait HelixApi {
    fn users_by_login(&self, login: &str) -> Result<Page<User>>;
    fn games_by_name(&self, name: &str) -> Result<Page<Game>>;
    fn clips(&self, query: &ClipQuery<'_>, after: Option<&str>) -> Result<Page<ClipRecord>>;
}

/// Authenticated client: one token for the whole session.
#[derive(Debug, Clone)]
pub struct HelixClient {
    http: Client,
    api_base: String,
    client_id: String,
    token: Token,
}

fn build_http(opts: &GrabberOptions) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(t) = opts.timeout {
        builder = builder.timeout(t);
    }
    if let Some(ua) = &opts.user_agent {
        builder = builder.user_agent(ua.clone());
    }
    Ok(builder.build()?)
}

impl HelixClient {
    /// Client-credentials grant. Any non-200 answer is `AuthenticationFailed`.
    pub fn authenticate(opts: &GrabberOptions, credential: &Credential) -> Result<Self> {
        let http = build_http(opts)?;
        let params = [
            ("client_id", credential.client_id.as_str()),
            ("client_secret", credential.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];
        let resp = http.post(&opts.auth_url).query(&params).send()?;
        if resp.status() != reqwest::StatusCode::OK {
            tracing::debug!(status=%resp.status(), "token request rejected");
            return Err(ClipError::AuthenticationFailed);
        }
        let body: TokenResponse = serde_json::from_str(&resp.text()?)?;
        tracing::info!("acquired app access token");
        Ok(Self::with_token(http, opts, &credential.client_id, Token(body.access_token)))
    }

    fn with_token(http: Client, opts: &GrabberOptions, client_id: &str, token: Token) -> Self {
        Self {
            http,
            api_base: opts.api_base.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            token,
        }
    }

    fn authorized(&self, rb: RequestBuilder) -> RequestBuilder {
        rb.bearer_auth(&self.token.0).header("Client-Id", &self.client_id)
    }

    fn get_page<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Page<T>> {
        let url = format!("{}/{}", self.api_base, endpoint);
        let resp = self.authorized(self.http.get(&url)).query(params).send()?;
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(ClipError::UnexpectedStatus { status, body });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl HelixApi for HelixClient {
    fn users_by_login(&self, login: &str) -> Result<Page<User>> {
        self.get_page("users", &[("login", login.to_string())])
    }

    fn games_by_name(&self, name: &str) -> Result<Page<Game>> {
        self.get_page("games", &[("name", name.to_string())])
    }

    fn clips(&self, query: &ClipQuery<'_>, after: Option<&str>) -> Result<Page<ClipRecord>> {
        self.get_page("clips", &query.params(after))
    }
}
