//! Observability hooks for outgoing requests
//!
//! Hooks let an application watch every request the client makes without
//! installing a `tracing` subscriber. They are called synchronously from the
//! request path, so keep them fast.
//!
//! # Example
//!
//! ```
//! use cryptomkt_rest::hooks::Hooks;
//!
//! let hooks = Hooks::new()
//!     .on_request(|info| {
//!         println!("{} {} (signed: {})", info.method, info.path, info.authenticated);
//!     })
//!     .on_response(|info| {
//!         println!("{} -> {} in {:?}", info.path, info.status, info.elapsed);
//!     })
//!     .on_error(|path, err| {
//!         eprintln!("{} failed: {}", path, err);
//!     });
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::RestError;

/// Request about to be sent
#[derive(Debug, Clone)]
pub struct RequestInfo {
    /// HTTP method
    pub method: &'static str,
    /// Endpoint path relative to the base URL (e.g. `/orders/cancel`)
    pub path: &'static str,
    /// Whether auth headers are attached
    pub authenticated: bool,
}

/// Response received from the server
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    /// Endpoint path relative to the base URL
    pub path: &'static str,
    /// HTTP status code
    pub status: u16,
    /// Body size in bytes
    pub bytes: usize,
    /// Time from send to full body
    pub elapsed: Duration,
}

/// Callback for outgoing requests
pub type RequestHook = Arc<dyn Fn(&RequestInfo) + Send + Sync>;
/// Callback for received responses
pub type ResponseHook = Arc<dyn Fn(&ResponseInfo) + Send + Sync>;
/// Callback for failed requests (endpoint path and error)
pub type ErrorHook = Arc<dyn Fn(&str, &RestError) + Send + Sync>;

/// Request observer with a no-op default
#[derive(Clone, Default)]
pub struct Hooks {
    pub(crate) on_request: Option<RequestHook>,
    pub(crate) on_response: Option<ResponseHook>,
    pub(crate) on_error: Option<ErrorHook>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_request", &self.on_request.as_ref().map(|_| "..."))
            .field("on_response", &self.on_response.as_ref().map(|_| "..."))
            .field("on_error", &self.on_error.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Hooks {
    /// Create an empty hooks container
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked before each request is sent
    pub fn on_request<F>(mut self, f: F) -> Self
    where
        F: Fn(&RequestInfo) + Send + Sync + 'static,
    {
        self.on_request = Some(Arc::new(f));
        self
    }

    /// Register a callback invoked once a response body has been read
    ///
    /// Called for every status code, before the status is classified.
    pub fn on_response<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResponseInfo) + Send + Sync + 'static,
    {
        self.on_response = Some(Arc::new(f));
        self
    }

    /// Register a callback invoked when a request fails
    ///
    /// Covers transport, clock and classified status errors.
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &RestError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(f));
        self
    }

    pub(crate) fn invoke_request(&self, info: &RequestInfo) {
        if let Some(ref hook) = self.on_request {
            hook(info);
        }
    }

    pub(crate) fn invoke_response(&self, info: &ResponseInfo) {
        if let Some(ref hook) = self.on_response {
            hook(info);
        }
    }

    pub(crate) fn invoke_error(&self, path: &str, err: &RestError) {
        if let Some(ref hook) = self.on_error {
            hook(path, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_hooks_builder() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let hooks = Hooks::new().on_request(move |info| {
            assert_eq!(info.path, "/balance");
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        hooks.invoke_request(&RequestInfo {
            method: "GET",
            path: "/balance",
            authenticated: true,
        });
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hooks_clone_shares_callbacks() {
        let hooks = Hooks::new().on_response(|_| {}).on_error(|_, _| {});

        let cloned = hooks.clone();
        assert!(cloned.on_request.is_none());
        assert!(cloned.on_response.is_some());
        assert!(cloned.on_error.is_some());
    }

    #[test]
    fn test_hooks_default_is_noop() {
        let hooks = Hooks::default();
        hooks.invoke_error("/orders", &RestError::AuthRequired);
        hooks.invoke_response(&ResponseInfo {
            path: "/ticker",
            status: 200,
            bytes: 0,
            elapsed: Duration::ZERO,
        });
    }
}
