//! HTTP transport
//!
//! The only place requests are built, sent and classified. Every call is one
//! round trip: headers are merged (caller first, defaults last so they win),
//! the caller's query is appended to whatever query the URL already carries,
//! the body is encoded as JSON or multipart, and the status code decides
//! between a parsed JSON value and a typed error.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use common::Secret;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{Error, RequestError, Result};
use crate::params::{Body, Form, FormValue, Headers, Query, RequestOptions};

/// Identity attached to every request.
///
/// `refresh_token` is carried for callers that refresh through the OAuth2
/// client; the transport never sends it.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub app_name: Option<String>,
    pub access_token: Option<Secret<String>>,
    pub refresh_token: Option<Secret<String>>,
}

/// Forward proxy used for every request.
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    pub host: String,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<Secret<String>>,
}

impl ProxyConfig {
    /// Proxy URL in `http://host[:port]` form. A host that already carries a
    /// scheme is used as given.
    pub fn url(&self) -> String {
        let host = if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("http://{}", self.host)
        };
        match self.port {
            Some(port) => format!("{}:{port}", host.trim_end_matches('/')),
            None => host,
        }
    }

    fn to_proxy(&self) -> Result<reqwest::Proxy> {
        let proxy = reqwest::Proxy::all(self.url())
            .map_err(|e| Error::InvalidUrl(format!("proxy {}: {e}", self.url())))?;
        Ok(match &self.user {
            Some(user) => proxy.basic_auth(
                user,
                self.password.as_ref().map(|p| p.expose_str()).unwrap_or(""),
            ),
            None => proxy,
        })
    }
}

/// Shared transport. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Rest {
    http: reqwest::Client,
    credentials: Arc<Credentials>,
}

impl Rest {
    /// Build a transport with its own HTTP client. Without a proxy the
    /// client ignores `HTTP_PROXY`-style environment variables.
    pub fn new(
        credentials: Credentials,
        proxy: Option<&ProxyConfig>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        builder = match proxy {
            Some(proxy) => builder.proxy(proxy.to_proxy()?),
            None => builder.no_proxy(),
        };
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Http(format!("building HTTP client: {e}")))?;
        Ok(Self::with_client(http, credentials))
    }

    /// Build a transport around an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            http,
            credentials: Arc::new(credentials),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub async fn get(&self, url: Url, opts: impl Into<RequestOptions>) -> Result<Value> {
        let (_, json) = self.request(Method::GET, url, None, opts.into()).await?;
        Ok(json)
    }

    pub async fn post(
        &self,
        url: Url,
        body: impl Into<Body>,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let (_, json) = self
            .request(Method::POST, url, Some(body.into()), opts.into())
            .await?;
        Ok(json)
    }

    pub async fn put(
        &self,
        url: Url,
        body: impl Into<Body>,
        opts: impl Into<RequestOptions>,
    ) -> Result<Value> {
        let (_, json) = self
            .request(Method::PUT, url, Some(body.into()), opts.into())
            .await?;
        Ok(json)
    }

    /// `true` when the server answered with any 2xx status.
    pub async fn delete(&self, url: Url, opts: impl Into<RequestOptions>) -> Result<bool> {
        let (status, _) = self.request(Method::DELETE, url, None, opts.into()).await?;
        Ok(status.is_success())
    }

    #[instrument(skip_all, fields(method = %method, path = %url.path()))]
    async fn request(
        &self,
        method: Method,
        mut url: Url,
        body: Option<Body>,
        opts: RequestOptions,
    ) -> Result<(StatusCode, Value)> {
        compose_query(&mut url, &opts.query);

        let body = match body {
            Some(Body::Json(value)) if opts.as_form => Some(Body::Form(Form::from_json(&value))),
            other => other,
        };
        let multipart = matches!(body, Some(Body::Form(_)));
        let headers = self.headers_from(&opts.headers, multipart)?;

        let mut request = self.http.request(method, url).headers(headers);
        request = match body {
            Some(Body::Json(value)) => {
                let text = serde_json::to_vec(&value)
                    .map_err(|e| Error::Serialization(format!("encoding JSON body: {e}")))?;
                request.body(text)
            }
            Some(Body::Form(form)) => request.multipart(multipart_form(form)?),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(format!("request failed: {e}")))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Http(format!("reading response body: {e}")))?;

        debug!(status = status.as_u16(), bytes = bytes.len(), "response received");
        let json = classify(status, &bytes)?;
        Ok((status, json))
    }

    /// Merge caller headers with the defaults. Defaults are applied last, so
    /// callers cannot replace `Content-Type`, `Authorization` or
    /// `User-Agent`. Multipart bodies keep the encoder's own content type.
    /// A caller header that is not a valid name or value fails the call.
    fn headers_from(&self, extra: &Headers, multipart: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in extra.present() {
            let header = HeaderName::from_str(name)
                .map_err(|e| Error::InvalidHeader(format!("{name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidHeader(format!("{name}: {e}")))?;
            headers.insert(header, value);
        }

        if multipart {
            headers.remove(CONTENT_TYPE);
        } else {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = &self.credentials.access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_str()))
                .map_err(|e| Error::InvalidHeader(format!("access token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(app_name) = &self.credentials.app_name {
            let value = HeaderValue::from_str(app_name)
                .map_err(|e| Error::InvalidHeader(format!("app name {app_name:?}: {e}")))?;
            headers.insert(USER_AGENT, value);
        }
        Ok(headers)
    }
}

/// Decode the URL's existing query, append `extra` (duplicates kept) and
/// re-encode the whole list as `application/x-www-form-urlencoded`.
pub(crate) fn compose_query(url: &mut Url, extra: &Query) {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    pairs.extend(extra.iter().map(|(k, v)| (k.to_owned(), v.to_owned())));
    if pairs.is_empty() {
        return;
    }
    url.query_pairs_mut().clear().extend_pairs(pairs);
}

fn multipart_form(form: Form) -> Result<reqwest::multipart::Form> {
    let mut multipart = reqwest::multipart::Form::new();
    for (name, value) in form.into_fields() {
        multipart = match value {
            FormValue::Text(text) => multipart.text(name, text),
            FormValue::File(upload) => {
                let mut part =
                    reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
                if let Some(mime) = upload.mime {
                    part = part
                        .mime_str(&mime)
                        .map_err(|e| Error::Serialization(format!("mime type {mime:?}: {e}")))?;
                }
                multipart.part(name, part)
            }
        };
    }
    Ok(multipart)
}

/// Map a status code and raw body to the call's outcome.
fn classify(status: StatusCode, body: &[u8]) -> Result<Value> {
    if status == StatusCode::NO_CONTENT {
        return Ok(empty_object());
    }
    if status.is_success() {
        return Ok(parse_body(body));
    }
    let error = match status.as_u16() {
        403 => RequestError::Forbidden,
        404 => RequestError::NotFound,
        400 | 422 => RequestError::BadRequest {
            errors: error_messages(parse_body(body)),
        },
        other => RequestError::UnexpectedStatus {
            status: other,
            body: String::from_utf8_lossy(body).into_owned(),
        },
    };
    Err(error.into())
}

/// Parse a JSON body. Empty or malformed bodies become `{}`.
fn parse_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return empty_object();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!(error = %e, "response body is not JSON, using empty object");
        empty_object()
    })
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Messages of a 400/422 body: its `errors` field, or the whole body when
/// there is none.
fn error_messages(body: Value) -> Vec<String> {
    let errors = match body {
        Value::Object(mut map) => match map.remove("errors") {
            Some(errors) => errors,
            None => Value::Object(map),
        },
        other => other,
    };
    flatten_messages(errors)
}

/// Flatten nested error payloads. Object keys prefix their messages, the
/// way Rails renders `{"name": ["is too short"]}` as "name is too short".
fn flatten_messages(value: Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(message) => vec![message],
        Value::Array(items) => items.into_iter().flat_map(flatten_messages).collect(),
        Value::Object(map) => map
            .into_iter()
            .flat_map(|(field, value)| {
                flatten_messages(value)
                    .into_iter()
                    .map(move |message| format!("{field} {message}"))
            })
            .collect(),
        other => vec![other.to_string()],
    }
}
