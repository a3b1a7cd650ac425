//! HTTP contract with the game server.
//!
//! Every endpoint answers with a complete [`GameSnapshot`]; the client never
//! applies deltas. Transports report back through a `Callback` so the session
//! receives replies as ordinary events instead of being re-entered.

use gloo::net::http::Request;
use thiserror::Error;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

use crate::model::{GameSnapshot, MoveCommand, SnapshotError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiRequest {
    NewGame,
    State,
    Tick,
    Move(MoveCommand),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl ApiRequest {
    pub fn method(self) -> Method {
        match self {
            ApiRequest::NewGame | ApiRequest::State => Method::Get,
            ApiRequest::Tick | ApiRequest::Move(_) => Method::Post,
        }
    }

    pub fn path(self) -> String {
        match self {
            ApiRequest::NewGame => "/api/game/new".to_string(),
            ApiRequest::State => "/api/game/state".to_string(),
            ApiRequest::Tick => "/api/game/tick".to_string(),
            ApiRequest::Move(cmd) => format!("/api/game/move/{}", cmd.as_path()),
        }
    }

    pub fn url(self, base: &str) -> String {
        format!("{}{}", base, self.path())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] gloo::net::Error),
    #[error("{url} answered {status}")]
    Status { url: String, status: u16 },
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] SnapshotError),
}

pub type ApiResult = Result<GameSnapshot, ApiError>;

pub trait Transport {
    /// Issues `request` and eventually emits exactly one result on `reply`.
    /// Implementations must not emit synchronously from inside `send`.
    fn send(&self, request: ApiRequest, reply: Callback<ApiResult>);
}

/// Browser `fetch` transport.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HttpTransport {
    base: String,
}

impl HttpTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest, reply: Callback<ApiResult>) {
        let url = request.url(&self.base);
        spawn_local(async move {
            reply.emit(fetch_snapshot(request.method(), url).await);
        });
    }
}

async fn fetch_snapshot(method: Method, url: String) -> ApiResult {
    let response = match method {
        Method::Get => Request::get(&url).send().await?,
        Method::Post => Request::post(&url).send().await?,
    };
    if !response.ok() {
        return Err(ApiError::Status {
            url,
            status: response.status(),
        });
    }
    let snapshot: GameSnapshot = response.json().await?;
    snapshot.validate()?;
    Ok(snapshot)
}
