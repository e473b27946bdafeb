//! HelixClient against a local mock server. The client is blocking, so every call
//! runs on a `spawn_blocking` thread while the runtime keeps the server alive.

use clipgrabber::{
    paginate, resolve, resolve_broadcaster, resolve_game, BroadcasterId, Cancellation, ClipError, ClipQuery, Credential, GrabberOptions,
    HelixClient,
};
use serde_json::{json, Value};
use time::macros::datetime;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options(server: &MockServer) -> GrabberOptions {
    GrabberOptions::default()
        .with_auth_url(format!("{}/oauth2/token", server.uri()))
        .with_api_base(format!("{}/helix", server.uri()))
        .with_progress(false)
}

fn credential() -> Credential {
    Credential::new("cid", "shh")
}

async fn mount_token_grant(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(query_param("client_id", "cid"))
        .and(query_param("client_secret", "shh"))
        .and(query_param("grant_type", "client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok",
            "expires_in": 5011271,
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn clip_json(id: &str) -> Value {
    json!({
        "id": id,
        "url": format!("https://clips.twitch.tv/{id}"),
        "title": "round",
        "creator_name": "alice",
        "game_id": "456",
        "created_at": "2024-03-15T10:00:00Z",
        "view_count": 3
    })
}

/// A rejected grant surfaces as `AuthenticationFailed`, not a transport error.
#[tokio::test(flavor = "multi_thread")]
async fn rejected_token_grant_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "status": 403, "message": "invalid client secret" })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = options(&server);
    let res = tokio::task::spawn_blocking(move || HelixClient::authenticate(&opts, &credential()))
        .await
        .unwrap();
    assert!(matches!(res, Err(ClipError::AuthenticationFailed)));
}

/// The grant is a client-credentials POST; later requests carry the bearer token and client id.
#[tokio::test(flavor = "multi_thread")]
async fn lookups_send_bearer_and_client_id() {
    let server = MockServer::start().await;
    mount_token_grant(&server).await;
    Mock::given(method("GET"))
        .and(path("/helix/users"))
        .and(query_param("login", "chewie"))
        .and(header("Authorization", "Bearer tok"))
        .and(header("Client-Id", "cid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "67955580", "login": "chewie", "display_name": "Chewie" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = options(&server);
    let id = tokio::task::spawn_blocking(move || -> clipgrabber::Result<_> {
        let client = HelixClient::authenticate(&opts, &credential())?;
        resolve_broadcaster(&client, "chewie")
    })
    .await
    .unwrap()
    .unwrap();
    assert_eq!(id, BroadcasterId("67955580".into()));
}

#[tokio::test(flavor = "multi_thread")]
async fn non_success_status_is_reported_with_body() {
    let server = MockServer::start().await;
    mount_token_grant(&server).await;
    Mock::given(method("GET"))
        .and(path("/helix/games"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let opts = options(&server);
    let res = tokio::task::spawn_blocking(move || -> clipgrabber::Result<_> {
        let client = HelixClient::authenticate(&opts, &credential())?;
        resolve_game(&client, "Just Chatting")
    })
    .await
    .unwrap();
    match res {
        Err(ClipError::UnexpectedStatus { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

/// The first clips request goes out without `after`; the second echoes the cursor
/// and the run stops once the cursor disappears.
#[tokio::test(flavor = "multi_thread")]
async fn second_page_is_requested_with_the_cursor() {
    let server = MockServer::start().await;
    mount_token_grant(&server).await;
    Mock::given(method("GET"))
        .and(path("/helix/clips"))
        .and(query_param("broadcaster_id", "67955580"))
        .and(query_param("first", "2"))
        .and(query_param("started_at", "2024-03-15T00:00:00Z"))
        .and(query_param("ended_at", "2024-03-15T23:59:59Z"))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [clip_json("a"), clip_json("b")],
            "pagination": { "cursor": "abc" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/helix/clips"))
        .and(query_param("after", "abc"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [clip_json("c")],
            "pagination": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = options(&server).with_page_size(2);
    let clips = tokio::task::spawn_blocking(move || -> clipgrabber::Result<_> {
        let client = HelixClient::authenticate(&opts, &credential())?;
        let window = resolve("today", datetime!(2024-03-15 14:30:45 UTC))?;
        let broadcaster = BroadcasterId("67955580".into());
        let query = ClipQuery { broadcaster_id: &broadcaster, window: &window, page_size: opts.page_size };
        paginate(&client, &query, &Cancellation::new())
    })
    .await
    .unwrap()
    .unwrap();

    let ids: Vec<&str> = clips.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(clips[0].extra.get("view_count"), Some(&json!(3)));
}
