//! Local HTTP stand-in for the Twitter API v2, used to drive [`TwitterClient`]
//! over a real socket.
//!
//! Every request is recorded and answered with the next scripted response,
//! whatever its path.
//!
//! [`TwitterClient`]: super::TwitterClient

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderName, StatusCode, Uri};
use axum::Router;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::config::TwitterConfig;

pub(crate) const TEST_BEARER_TOKEN: &str = "test-bearer-token";

/// One request as seen by [`MockApi`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub path: String,
    pub params: HashMap<String, String>,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
}

struct MockApiState {
    responses: Mutex<VecDeque<(StatusCode, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub(crate) struct MockApi {
    base_url: String,
    state: Arc<MockApiState>,
}

impl MockApi {
    /// Binds an ephemeral port on localhost and serves `responses` in order.
    pub(crate) async fn start(responses: Vec<(u16, String)>) -> Self {
        let responses = responses
            .into_iter()
            .map(|(status, body)| (StatusCode::from_u16(status).unwrap(), body))
            .collect();
        let state = Arc::new(MockApiState {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .fallback(respond)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockApi {
            base_url: format!("http://{}/2", addr),
            state,
        }
    }

    /// A config pointed at this server, with no pause between pages.
    pub(crate) fn config(&self) -> TwitterConfig {
        let mut config = TwitterConfig::new(TEST_BEARER_TOKEN);
        config.api_base_url = self.base_url.clone();
        config.page_delay = Duration::ZERO;
        config.request_timeout = Duration::from_secs(5);
        config
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn respond(
    State(state): State<Arc<MockApiState>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let read = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        params,
        authorization: read(header::AUTHORIZATION),
        user_agent: read(header::USER_AGENT),
    });

    state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("unscripted request to {}", uri.path()),
        ))
}
