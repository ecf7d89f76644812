//! API-key authentication with per-client rate limiting for the payload
//! endpoint. Keys are compared in constant time.

use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::HeaderName, StatusCode},
    Error, HttpResponse,
};
use dashmap::DashMap;
use futures_util::Future;
use std::{
    future::{ready, Ready},
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::{Duration, Instant},
};
use subtle::ConstantTimeEq;

const DEFAULT_HEADER: &str = "x-api-key";
const DEFAULT_MAX_REQUESTS: u32 = 120;
const DEFAULT_WINDOW_SECS: u64 = 60;

#[derive(Clone)]
pub struct ApiKeyConfig {
    api_key: Arc<Vec<u8>>,
    header_name: HeaderName,
    max_requests: u32,
    window: Duration,
    /// Request counts per peer address, pruned by a background task.
    counters: Arc<DashMap<String, (u32, Instant)>>,
}

impl ApiKeyConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key: Arc::new(api_key.into_bytes()),
            header_name: HeaderName::from_static(DEFAULT_HEADER),
            max_requests: DEFAULT_MAX_REQUESTS,
            window: Duration::from_secs(DEFAULT_WINDOW_SECS),
            counters: Arc::new(DashMap::new()),
        }
    }

    pub fn with_header_name(
        mut self,
        name: &str,
    ) -> Result<Self, actix_web::http::header::InvalidHeaderName> {
        self.header_name = HeaderName::try_from(name)?;
        Ok(self)
    }

    pub fn with_rate_limit(mut self, max_requests: u32, window_seconds: u64) -> Self {
        self.max_requests = max_requests;
        self.window = Duration::from_secs(window_seconds);
        self
    }

    fn start_cleanup_task(&self) {
        let counters = self.counters.clone();
        let window = self.window;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(window);
            loop {
                interval.tick().await;
                let now = Instant::now();
                counters.retain(|_, (_, started)| now.duration_since(*started) < window);
            }
        });
    }

    fn key_matches(&self, candidate: &[u8]) -> bool {
        candidate.ct_eq(&self.api_key).unwrap_u8() == 1
    }

    /// Counts one request for `peer`; false when the window is exhausted.
    fn admit(&self, peer: &str) -> bool {
        let mut entry = self
            .counters
            .entry(peer.to_string())
            .or_insert((0, Instant::now()));
        let (count, started) = &mut *entry;

        let now = Instant::now();
        if now.duration_since(*started) >= self.window {
            *count = 0;
            *started = now;
        }

        if *count >= self.max_requests {
            return false;
        }
        *count += 1;
        true
    }
}

pub struct ApiKeyMiddleware {
    config: ApiKeyConfig,
}

impl ApiKeyMiddleware {
    pub fn new(config: ApiKeyConfig) -> Self {
        config.start_cleanup_task();
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = ApiKeyMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyMiddlewareService {
            service: Arc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct ApiKeyMiddlewareService<S> {
    service: Arc<S>,
    config: ApiKeyConfig,
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let config = self.config.clone();
        let service = self.service.clone();

        Box::pin(async move {
            let header = match req.headers().get(&config.header_name) {
                Some(value) => value,
                None => {
                    return Ok(error_response(
                        req,
                        StatusCode::UNAUTHORIZED,
                        "Missing API key",
                    ))
                }
            };

            let candidate = match header.to_str() {
                Ok(value) => value.as_bytes(),
                Err(_) => {
                    return Ok(error_response(
                        req,
                        StatusCode::BAD_REQUEST,
                        "Invalid API key format",
                    ))
                }
            };

            if !config.key_matches(candidate) {
                return Ok(error_response(
                    req,
                    StatusCode::FORBIDDEN,
                    "Invalid API key",
                ));
            }

            let peer = req
                .connection_info()
                .peer_addr()
                .unwrap_or("unknown")
                .to_string();
            if !config.admit(&peer) {
                return Ok(error_response(
                    req,
                    StatusCode::TOO_MANY_REQUESTS,
                    "Rate limit exceeded",
                ));
            }

            let res = service.call(req).await?;
            Ok(res.map_into_boxed_body())
        })
    }
}

fn error_response(
    req: ServiceRequest,
    status: StatusCode,
    message: &str,
) -> ServiceResponse<BoxBody> {
    let response = HttpResponse::build(status).json(serde_json::json!({
        "error": status.canonical_reason().unwrap_or("Error"),
        "message": message,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }));

    req.into_response(response).map_into_boxed_body()
}
