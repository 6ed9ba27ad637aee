//! In-process HTTP server for transport and endpoint tests.
//!
//! Binds `127.0.0.1:0`, records every request it receives, and answers all
//! of them with one fixed status and body.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::client::Client;
use crate::rest::{Credentials, Rest};

pub(crate) const APP_NAME: &str = "Api Test";
pub(crate) const ACCESS_TOKEN: &str = "FAKE-ACCESS-TOKEN";

#[derive(Debug, Clone)]
pub(crate) struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.query.as_deref().unwrap_or("").as_bytes())
            .into_owned()
            .collect()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

pub(crate) struct MockServer {
    pub url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockServer {
    pub async fn start(status: u16, response_body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();
        let status = StatusCode::from_u16(status).unwrap();

        let handle = tokio::spawn(async move {
            let app = axum::Router::new().fallback(move |request: Request<Body>| {
                let log = log.clone();
                async move {
                    let headers = request
                        .headers()
                        .iter()
                        .map(|(name, value)| {
                            (
                                name.to_string(),
                                value.to_str().unwrap_or("").to_string(),
                            )
                        })
                        .collect();
                    let method = request.method().to_string();
                    let path = request.uri().path().to_string();
                    let query = request.uri().query().map(str::to_string);
                    let body = axum::body::to_bytes(request.into_body(), 10 * 1024 * 1024)
                        .await
                        .unwrap()
                        .to_vec();
                    log.lock().unwrap().push(CapturedRequest {
                        method,
                        path,
                        query,
                        headers,
                        body,
                    });
                    (status, [(header::CONTENT_TYPE, "application/json")], response_body)
                }
            });
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}/"),
            requests,
            _handle: handle,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> CapturedRequest {
        self.requests()
            .pop()
            .expect("mock server received no requests")
    }
}

pub(crate) fn test_credentials() -> Credentials {
    Credentials {
        app_name: Some(APP_NAME.into()),
        access_token: Some(ACCESS_TOKEN.into()),
        refresh_token: Some("FAKE-REFRESH-TOKEN".into()),
    }
}

pub(crate) fn test_rest() -> Rest {
    Rest::new(test_credentials(), None, None).unwrap()
}

/// Client whose site is the mock server.
pub(crate) fn test_client(server: &MockServer) -> Client {
    Client::builder()
        .site(&server.url)
        .app_name(APP_NAME)
        .access_token(ACCESS_TOKEN)
        .refresh_token("FAKE-REFRESH-TOKEN")
        .build()
        .unwrap()
}
