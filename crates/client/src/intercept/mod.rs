//! The caching interceptor.
//!
//! Sits between the application and the network transport. Per request it
//! decides whether caching applies at all, persists successful response
//! bodies, and falls back to the persisted copy when the network fails.
//!
//! ### Fallback chain for an opted-in request
//!
//! 1. Live attempt. A 2xx body is written to the store and returned; a
//!    non-2xx response is returned untouched and never cached.
//! 2. On a transport failure, the cached body for the request's
//!    fingerprint is replayed as a synthesized 200/"OK"/HTTP-1.0 response.
//! 3. With nothing cached, the transport is invoked once more and that
//!    outcome — success or failure — is the caller's answer, uncached.
//!
//! Requests without a cache opt-in pass straight through and never touch
//! the store.

use std::time::Instant;

use httpstash_core::{CacheStore, cache::fingerprint};

use crate::policy;
use crate::request::Request;
use crate::response::Response;
use crate::transport::{Transport, TransportError};

/// Transparent response cache wrapped around a [`Transport`].
///
/// The store is injected at construction; the interceptor never reaches
/// into ambient process state to find one. Sharing a store across
/// interceptors (or processes-worth of requests) is the caller cloning a
/// single [`CacheStore`] handle.
pub struct CachingInterceptor<T: Transport> {
    transport: T,
    store: CacheStore,
}

impl<T: Transport> CachingInterceptor<T> {
    /// Wrap a transport with a cache store.
    pub fn new(transport: T, store: CacheStore) -> Self {
        Self { transport, store }
    }

    /// Execute a request through the cache.
    pub async fn execute(&self, request: &Request) -> Result<Response, TransportError> {
        if !policy::should_attempt_cache(request.headers()) {
            return self.transport.proceed(request).await;
        }

        let key = fingerprint(request.url().as_str(), request.form_params());

        match self.transport.proceed(request).await {
            Ok(response) if response.is_success() => {
                self.store.set(&key, response.body()).await;
                tracing::debug!("cached {} under {key}", request.url());
                Ok(response)
            }
            // Failed statuses are never cached; hand them back untouched.
            Ok(response) => Ok(response),
            Err(err) => {
                tracing::debug!("transport failed for {}: {err}; trying cache", request.url());
                self.replay_or_retry(request, &key).await
            }
        }
    }

    async fn replay_or_retry(&self, request: &Request, key: &str) -> Result<Response, TransportError> {
        let start = Instant::now();
        match self.store.get(key).await {
            Some(body) => {
                tracing::debug!(
                    "replayed {} from cache ({} bytes, {}ms)",
                    request.url(),
                    body.len(),
                    start.elapsed().as_millis()
                );
                Ok(Response::replay(body))
            }
            // Nothing cached: one more live attempt decides the outcome.
            None => {
                tracing::debug!("no cache entry for {}; retrying transport", request.url());
                self.transport.proceed(request).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use reqwest::{StatusCode, Version};
    use url::Url;

    use crate::headers::Headers;
    use crate::policy::presets;

    /// Transport that replays scripted outcomes and counts invocations.
    struct MockTransport {
        outcomes: Mutex<VecDeque<Result<Response, TransportError>>>,
        calls: AtomicUsize,
    }

    impl MockTransport {
        fn new(outcomes: Vec<Result<Response, TransportError>>) -> Arc<Self> {
            Arc::new(Self { outcomes: Mutex::new(outcomes.into()), calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn proceed(&self, _request: &Request) -> Result<Response, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("transport invoked more times than scripted")
        }
    }

    fn live(status: StatusCode, body: &str) -> Response {
        Response::new(status, Version::HTTP_11, Headers::new(), body.to_string())
    }

    fn geocoding_request() -> Request {
        let url = Url::parse("http://x/geocoding").unwrap();
        let (name, value) = presets::NORMAL;
        Request::post_form(url, [("a", "SuzhouCity")]).header(name, value)
    }

    /// Fingerprint of the geocoding request: md5("http://x/geocodinga=SuzhouCity").
    const GEOCODING_KEY: &str = "237977d4be66609f5c0b00c487a98d30";

    async fn interceptor(
        outcomes: Vec<Result<Response, TransportError>>,
    ) -> (CachingInterceptor<Arc<MockTransport>>, Arc<MockTransport>, CacheStore) {
        let store = CacheStore::open_in_memory().await.unwrap();
        let transport = MockTransport::new(outcomes);
        (CachingInterceptor::new(Arc::clone(&transport), store.clone()), transport, store)
    }

    #[tokio::test]
    async fn test_pass_through_without_signal_headers() {
        let (interceptor, transport, store) = interceptor(vec![Ok(live(StatusCode::OK, "live"))]).await;
        let request = Request::get(Url::parse("http://x/geocoding").unwrap());

        let response = interceptor.execute(&request).await.unwrap();

        assert_eq!(response.body(), "live");
        assert!(!response.is_replay());
        assert_eq!(transport.calls(), 1);
        assert!(store.get(&fingerprint("http://x/geocoding", &[])).await.is_none());
    }

    #[tokio::test]
    async fn test_pass_through_propagates_failure_status() {
        // Scenario C: no signal headers, upstream 500 comes back unmodified.
        let (interceptor, transport, store) = interceptor(vec![Ok(live(StatusCode::INTERNAL_SERVER_ERROR, "boom"))]).await;
        let request = Request::get(Url::parse("http://x/geocoding").unwrap());

        let response = interceptor.execute(&request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body(), "boom");
        assert_eq!(transport.calls(), 1);
        assert!(store.get(&fingerprint("http://x/geocoding", &[])).await.is_none());
    }

    #[tokio::test]
    async fn test_successful_cacheable_response_is_persisted() {
        // Scenario A.
        let (interceptor, transport, store) = interceptor(vec![Ok(live(StatusCode::OK, r#"{"lon":"120.5"}"#))]).await;

        let response = interceptor.execute(&geocoding_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), r#"{"lon":"120.5"}"#);
        assert!(!response.is_replay());
        assert_eq!(transport.calls(), 1);
        assert_eq!(store.get(GEOCODING_KEY).await.as_deref(), Some(r#"{"lon":"120.5"}"#));
    }

    #[tokio::test]
    async fn test_transport_failure_replays_cached_body() {
        // Scenario B: the same request later, with the network down.
        let (interceptor, transport, store) = interceptor(vec![
            Ok(live(StatusCode::OK, r#"{"lon":"120.5"}"#)),
            Err(TransportError::Timeout),
        ])
        .await;
        let request = geocoding_request();

        interceptor.execute(&request).await.unwrap();
        let replayed = interceptor.execute(&request).await.unwrap();

        assert_eq!(replayed.status(), StatusCode::OK);
        assert_eq!(replayed.reason(), "OK");
        assert_eq!(replayed.version(), Version::HTTP_10);
        assert!(replayed.is_replay());
        assert_eq!(replayed.body(), r#"{"lon":"120.5"}"#);
        assert_eq!(transport.calls(), 2);
        assert_eq!(store.get(GEOCODING_KEY).await.as_deref(), Some(r#"{"lon":"120.5"}"#));
    }

    #[tokio::test]
    async fn test_non_success_response_not_cached() {
        // Scenario D: cacheable request, upstream 404.
        let (interceptor, transport, store) = interceptor(vec![Ok(live(StatusCode::NOT_FOUND, "missing"))]).await;

        let response = interceptor.execute(&geocoding_request()).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.body(), "missing");
        assert!(!response.is_replay());
        assert_eq!(transport.calls(), 1);
        assert!(store.get(GEOCODING_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_fallback_miss_retries_transport_once() {
        // Failure with an empty cache degrades to exactly one more live
        // attempt, whose failure is the caller's answer.
        let (interceptor, transport, _store) = interceptor(vec![
            Err(TransportError::Timeout),
            Err(TransportError::Connect("refused".to_string())),
        ])
        .await;

        let result = interceptor.execute(&geocoding_request()).await;

        assert!(matches!(result, Err(TransportError::Connect(_))));
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_fallback_miss_second_attempt_success_is_not_cached() {
        let (interceptor, transport, store) = interceptor(vec![
            Err(TransportError::Timeout),
            Ok(live(StatusCode::OK, "late")),
        ])
        .await;

        let response = interceptor.execute(&geocoding_request()).await.unwrap();

        assert_eq!(response.body(), "late");
        assert!(!response.is_replay());
        assert_eq!(transport.calls(), 2);
        assert!(store.get(GEOCODING_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_empty_body_round_trips_through_cache() {
        let (interceptor, transport, store) = interceptor(vec![
            Ok(live(StatusCode::OK, "")),
            Err(TransportError::Timeout),
        ])
        .await;
        let request = geocoding_request();

        interceptor.execute(&request).await.unwrap();
        assert_eq!(store.get(GEOCODING_KEY).await.as_deref(), Some(""));

        let replayed = interceptor.execute(&request).await.unwrap();
        assert!(replayed.is_replay());
        assert_eq!(replayed.body(), "");
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_cache_control_header_also_opts_in() {
        let url = Url::parse("http://x/weather").unwrap();
        let (name, value) = presets::NO_STORE;
        let request = Request::get(url).header(name, value);
        let (interceptor, _transport, store) = interceptor(vec![Ok(live(StatusCode::OK, "sunny"))]).await;

        interceptor.execute(&request).await.unwrap();

        let key = fingerprint("http://x/weather", &[]);
        assert_eq!(store.get(&key).await.as_deref(), Some("sunny"));
    }

    #[tokio::test]
    async fn test_last_write_wins_across_requests() {
        let (interceptor, _transport, store) = interceptor(vec![
            Ok(live(StatusCode::OK, "first")),
            Ok(live(StatusCode::OK, "second")),
        ])
        .await;
        let request = geocoding_request();

        interceptor.execute(&request).await.unwrap();
        interceptor.execute(&request).await.unwrap();

        assert_eq!(store.get(GEOCODING_KEY).await.as_deref(), Some("second"));
    }
}
