//! HTTP transport shared by all endpoint groups
//!
//! [`Transport::send`] is the single place where requests are signed, sent
//! and their status classified. Endpoint groups only build parameters and
//! decode envelopes.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::{Duration, Instant};

use cryptomkt_auth::{Canonicalization, ClockSource, Credentials, RequestSigner};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{ApiErrorBody, ApiErrorKind, RestError, RestResult};
use crate::hooks::{Hooks, RequestInfo, ResponseInfo};
use crate::types::{Envelope, EnvelopeStatus, Page, RawEnvelope};

/// API key header
pub const HEADER_API_KEY: &str = "X-MKT-APIKEY";
/// Unix timestamp header
pub const HEADER_TIMESTAMP: &str = "X-MKT-TIMESTAMP";
/// Signature header
pub const HEADER_SIGNATURE: &str = "X-MKT-SIGNATURE";

const JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Parameters travel in the query string
    Get,
    /// Parameters travel in a form-urlencoded body
    Post,
}

impl HttpMethod {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// One documented API route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the base URL (e.g. `/orders/cancel`)
    pub path: &'static str,
    /// How parameters enter the signature
    pub canonicalization: Canonicalization,
}

impl Endpoint {
    /// Declare a route
    pub const fn new(
        method: HttpMethod,
        path: &'static str,
        canonicalization: Canonicalization,
    ) -> Self {
        Self {
            method,
            path,
            canonicalization,
        }
    }
}

/// Signs, sends and classifies requests
///
/// Holds the HTTP connection pool, the optional credentials, the clock and
/// the hooks. Everything is read-only after construction.
pub struct Transport {
    http: Client,
    base_url: String,
    path_prefix: String,
    credentials: Option<Credentials>,
    clock: Arc<dyn ClockSource>,
    hooks: Hooks,
}

impl Transport {
    /// Build a transport
    ///
    /// The signing path prefix (e.g. `/v1`) is taken from the path of
    /// `base_url`.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
        credentials: Option<Credentials>,
        clock: Arc<dyn ClockSource>,
        hooks: Hooks,
    ) -> RestResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| RestError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(RestError::Config(format!("base URL {base_url:?} cannot have paths")));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| RestError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            path_prefix: parsed.path().trim_end_matches('/').to_string(),
            credentials,
            clock,
            hooks,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Version prefix that signed paths start with (e.g. `/v1`)
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Whether credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Send one request
    ///
    /// With `authenticated` set, a timestamp is read from the clock and the
    /// request is signed. Missing credentials and clock failures are reported
    /// before anything is sent. Public endpoints pass `false` and carry no auth
    /// headers even when credentials exist.
    #[instrument(skip(self, params), fields(method = endpoint.method.as_str(), path = endpoint.path))]
    pub async fn send(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, String)],
        authenticated: bool,
    ) -> RestResult<RawResponse> {
        let result = self.execute(endpoint, params, authenticated).await;
        if let Err(ref e) = result {
            debug!(error = %e, "Request failed");
            self.hooks.invoke_error(endpoint.path, e);
        }
        result
    }

    async fn execute(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, String)],
        authenticated: bool,
    ) -> RestResult<RawResponse> {
        let url = format!("{}{}", self.base_url, endpoint.path);

        let mut request = match endpoint.method {
            HttpMethod::Get => {
                let request = self.http.get(&url);
                if params.is_empty() {
                    request
                } else {
                    request.query(params)
                }
            }
            HttpMethod::Post => {
                let body = serde_urlencoded::to_string(params)
                    .map_err(|e| RestError::InvalidParameter(format!("cannot encode form: {e}")))?;
                self.http
                    .post(&url)
                    .header(CONTENT_TYPE, FORM_URLENCODED)
                    .body(body)
            }
        }
        .header(ACCEPT, JSON);

        if authenticated {
            let credentials = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
            let timestamp = self.clock.now().await?;
            let signing_path = format!("{}{}", self.path_prefix, endpoint.path);

            let signer = RequestSigner::new(credentials, timestamp);
            let signature = signer.sign(
                endpoint.method.as_str(),
                &signing_path,
                params,
                endpoint.canonicalization,
            );

            request = request
                .header(HEADER_API_KEY, signer.api_key())
                .header(HEADER_TIMESTAMP, signer.timestamp_header())
                .header(HEADER_SIGNATURE, signature);
        }

        self.hooks.invoke_request(&RequestInfo {
            method: endpoint.method.as_str(),
            path: endpoint.path,
            authenticated,
        });

        let started = Instant::now();
        let response = request.send().await.map_err(|source| RestError::Transport {
            url: url.clone(),
            source,
        })?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|source| RestError::Transport {
                url: url.clone(),
                source,
            })?
            .to_vec();

        let elapsed = started.elapsed();
        debug!(status, bytes = body.len(), ?elapsed, "Response received");
        self.hooks.invoke_response(&ResponseInfo {
            path: endpoint.path,
            status,
            bytes: body.len(),
            elapsed,
        });

        classify(status, &body)?;
        Ok(RawResponse { status, url, body })
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .field("clock", &self.clock)
            .field("hooks", &self.hooks)
            .finish()
    }
}

/// Turn documented error statuses into errors, pass everything else through
pub(crate) fn classify(status: u16, body: &[u8]) -> RestResult<()> {
    let Some(kind) = ApiErrorKind::from_status(status) else {
        if status != 200 {
            warn!(status, "Unclassified response status");
        }
        return Ok(());
    };

    let error: ApiErrorBody =
        serde_json::from_slice(body).map_err(|source| RestError::ErrorBody { status, source })?;
    Err(RestError::Api { kind, error })
}

/// Response that passed status classification
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Request URL (without query string)
    pub url: String,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Body as text, with invalid UTF-8 replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decode the whole body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> RestResult<T> {
        serde_json::from_slice(&self.body).map_err(|source| self.decode_error(source))
    }

    /// Decode the `{status, data, pagination?}` envelope
    ///
    /// An envelope with `status: "error"` becomes
    /// [`ApiErrorKind::Rejected`] even when `data` would not decode.
    pub fn envelope<T: DeserializeOwned>(&self) -> RestResult<Envelope<T>> {
        let raw: RawEnvelope = self.json()?;

        match raw.status {
            EnvelopeStatus::Error => Err(RestError::rejected(
                raw.message.unwrap_or_else(|| "request rejected".to_string()),
            )),
            EnvelopeStatus::Success => {
                let data = raw.data.unwrap_or(serde_json::Value::Null);
                let data = serde_json::from_value(data).map_err(|source| self.decode_error(source))?;
                Ok(Envelope {
                    status: raw.status,
                    data,
                    pagination: raw.pagination,
                })
            }
        }
    }

    /// Decode the envelope and keep only `data`
    pub fn data<T: DeserializeOwned>(&self) -> RestResult<T> {
        Ok(self.envelope()?.data)
    }

    /// Decode a list envelope into a [`Page`]
    pub fn page<T: DeserializeOwned>(&self) -> RestResult<Page<T>> {
        Ok(self.envelope::<Vec<T>>()?.into_page())
    }

    fn decode_error(&self, source: serde_json::Error) -> RestError {
        RestError::Decode {
            url: self.url.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptomkt_auth::SystemClock;

    fn raw(body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            url: "https://api.cryptomkt.com/v1/ticker".to_string(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_classify_passes_success_and_unknown_statuses() {
        assert!(classify(200, b"not json").is_ok());
        assert!(classify(500, b"<html>").is_ok());
        assert!(classify(302, b"").is_ok());
    }

    #[test]
    fn test_classify_documented_statuses() {
        let body = br#"{"status": "error", "message": "invalid signature"}"#;
        match classify(401, body) {
            Err(RestError::Api { kind, error }) => {
                assert_eq!(kind, ApiErrorKind::Unauthorized);
                assert_eq!(error.message, "invalid signature");
            }
            other => panic!("expected api error, got {:?}", other),
        }

        match classify(503, b"<html>Service Unavailable</html>") {
            Err(RestError::ErrorBody { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected error body failure, got {:?}", other),
        }
    }

    #[test]
    fn test_envelope_error_status_is_rejected() {
        let response = raw(r#"{"status": "error", "message": "market not found", "data": 42}"#);
        match response.data::<Vec<String>>() {
            Err(RestError::Api { kind, error }) => {
                assert_eq!(kind, ApiErrorKind::Rejected);
                assert_eq!(error.message, "market not found");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_envelope_decode_failures() {
        assert!(matches!(
            raw(r#"{"status": "success"}"#).data::<Vec<String>>(),
            Err(RestError::Decode { .. })
        ));
        assert!(matches!(
            raw("<html></html>").data::<Vec<String>>(),
            Err(RestError::Decode { .. })
        ));
        assert!(matches!(
            raw(r#"{"status": "success", "data": [1, 2]}"#).data::<Vec<String>>(),
            Err(RestError::Decode { .. })
        ));
    }

    #[test]
    fn test_page_keeps_pagination() {
        let response = raw(
            r#"{"status": "success", "pagination": {"previous": "null", "limit": 20, "page": 0, "next": 1},
                "data": ["ETHCLP", "BTCCLP"]}"#,
        );
        let page = response.page::<String>().unwrap();
        assert_eq!(page.items, vec!["ETHCLP".to_string(), "BTCCLP".to_string()]);
        assert_eq!(page.next_page(), Some(1));
    }

    #[test]
    fn test_path_prefix_from_base_url() {
        let clock: Arc<dyn ClockSource> = Arc::new(SystemClock);
        let transport = Transport::new(
            "https://api.cryptomkt.com/v1/",
            Duration::from_secs(5),
            "test",
            None,
            clock.clone(),
            Hooks::default(),
        )
        .unwrap();
        assert_eq!(transport.base_url(), "https://api.cryptomkt.com/v1");
        assert_eq!(transport.path_prefix(), "/v1");

        let transport = Transport::new(
            "http://127.0.0.1:8080",
            Duration::from_secs(5),
            "test",
            None,
            clock.clone(),
            Hooks::default(),
        )
        .unwrap();
        assert_eq!(transport.path_prefix(), "");

        assert!(matches!(
            Transport::new("not a url", Duration::from_secs(5), "test", None, clock, Hooks::default()),
            Err(RestError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticated_without_credentials_fails_before_sending() {
        let transport = Transport::new(
            // Nothing listens here; reaching the network would give a transport error
            "http://127.0.0.1:9/v1",
            Duration::from_secs(1),
            "test",
            None,
            Arc::new(SystemClock),
            Hooks::default(),
        )
        .unwrap();

        const BALANCE: Endpoint =
            Endpoint::new(HttpMethod::Get, "/balance", Canonicalization::PathOnly);
        let result = transport.send(&BALANCE, &[], true).await;
        assert!(matches!(result, Err(RestError::AuthRequired)));
    }
}
