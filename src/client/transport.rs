//! Retrying, paginating transport.
//!
//! Every API call goes through [`Transport::request`]. Two throttling signals
//! are absorbed here: a 409 carrying a cooldown (the resource is locked for a
//! few seconds) and a 429 (global rate limit). Both are retried after a wait
//! and share a per-page attempt budget. Everything else >= 400 is returned to
//! the caller as [`ApiError::Api`].

use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::client::backend::{HttpBackend, HttpRequest, HttpResponse, Sleeper};
use crate::config::RetryConfig;
use crate::error::ApiError;

/// A logical API request, possibly spanning several pages.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
    pub paginate: bool,
    pub page_size: Option<u32>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            body: None,
            paginate: false,
            page_size: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Follow `meta` across pages and return every record.
    pub fn paginated(mut self) -> Self {
        self.paginate = true;
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct PageMeta {
    total: u64,
    page: Option<u64>,
    limit: Option<u64>,
}

struct Envelope {
    data: Value,
    meta: Option<PageMeta>,
}

/// How a single HTTP response should be handled.
enum Outcome {
    Success(Envelope),
    Cooldown { remaining_seconds: f64, payload: Value },
    RateLimited,
    Failed(ApiError),
}

/// Longest single cooldown wait, whatever the server reports.
pub const MAX_COOLDOWN_SECONDS: f64 = 86_400.0;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub cooldown_pad: Duration,
    pub rate_limit_wait: Duration,
    pub default_page_size: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            cooldown_pad: Duration::from_millis(250),
            rate_limit_wait: Duration::from_secs(1),
            default_page_size: 20,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(retry: &RetryConfig, page_size: u32) -> Self {
        Self {
            max_attempts: retry.max_attempts.max(1),
            cooldown_pad: retry.cooldown_pad(),
            rate_limit_wait: retry.rate_limit_wait(),
            default_page_size: page_size.max(1),
        }
    }

    fn cooldown_wait(&self, remaining_seconds: f64) -> Duration {
        let seconds = if remaining_seconds.is_finite() {
            remaining_seconds.clamp(1.0, MAX_COOLDOWN_SECONDS)
        } else {
            1.0
        };
        Duration::try_from_secs_f64(seconds)
            .unwrap_or(Duration::from_secs(1))
            .saturating_add(self.cooldown_pad)
    }
}

#[derive(Clone)]
pub struct Transport {
    backend: Arc<dyn HttpBackend>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl Transport {
    pub fn new(backend: Arc<dyn HttpBackend>, sleeper: Arc<dyn Sleeper>, policy: RetryPolicy) -> Self {
        Self {
            backend,
            sleeper,
            policy,
        }
    }

    /// Send a logical request and return the envelope's `data`.
    ///
    /// Paginated requests always yield a JSON array holding every record
    /// across all pages, in server order.
    pub async fn request(&self, request: ApiRequest) -> Result<Value, ApiError> {
        if !request.paginate {
            let envelope = self.send_page(&request, Vec::new()).await?;
            // A list served without pagination is taken as complete.
            return Ok(envelope.data);
        }

        let limit = request
            .page_size
            .unwrap_or(self.policy.default_page_size)
            .max(1) as u64;
        let mut accumulated: Vec<Value> = Vec::new();
        let mut page: u64 = 1;

        loop {
            let mut page_params = vec![("limit".to_string(), limit.to_string())];
            if page > 1 {
                page_params.push(("page".to_string(), page.to_string()));
            }

            let envelope = self.send_page(&request, page_params).await?;
            let items = match envelope.data {
                Value::Array(items) => items,
                single => {
                    accumulated.push(single);
                    return Ok(Value::Array(accumulated));
                }
            };

            let fetched = items.len();
            accumulated.extend(items);

            let Some(meta) = envelope.meta else {
                debug!(path = %request.path, records = accumulated.len(), "No pagination meta, stopping");
                break;
            };
            let limit_used = meta.limit.filter(|l| *l > 0).unwrap_or(limit);
            let current_page = meta.page.unwrap_or(page);
            if current_page != page {
                debug!(requested = page, reported = current_page, "Server reported a different page");
            }

            debug!(
                path = %request.path,
                page,
                fetched,
                total = meta.total,
                "Fetched page"
            );

            if fetched == 0 || page * limit_used >= meta.total {
                break;
            }
            page += 1;
        }

        Ok(Value::Array(accumulated))
    }

    /// Send one page, retrying through cooldowns and rate limits.
    async fn send_page(
        &self,
        request: &ApiRequest,
        page_params: Vec<(String, String)>,
    ) -> Result<Envelope, ApiError> {
        let mut query = request.params.clone();
        query.extend(page_params);
        let http_request = HttpRequest {
            method: request.method.clone(),
            path: request.path.clone(),
            query,
            body: request.body.clone(),
        };

        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            let response = self.backend.execute(&http_request).await?;

            match classify(response) {
                Outcome::Success(envelope) => return Ok(envelope),
                Outcome::Failed(err) => return Err(err),
                Outcome::Cooldown {
                    remaining_seconds,
                    payload,
                } => {
                    if attempts >= self.policy.max_attempts {
                        return Err(ApiError::CooldownExhausted { attempts, payload });
                    }
                    let wait = self.policy.cooldown_wait(remaining_seconds);
                    warn!(
                        path = %request.path,
                        attempt = attempts,
                        wait_seconds = wait.as_secs_f64(),
                        "Resource on cooldown, waiting before retry"
                    );
                    self.sleeper.sleep(wait).await;
                }
                Outcome::RateLimited => {
                    if attempts >= self.policy.max_attempts {
                        return Err(ApiError::RateLimitExhausted { attempts });
                    }
                    warn!(
                        path = %request.path,
                        attempt = attempts,
                        wait_seconds = self.policy.rate_limit_wait.as_secs_f64(),
                        "Rate limited, waiting before retry"
                    );
                    self.sleeper.sleep(self.policy.rate_limit_wait).await;
                }
            }
        }
    }
}

fn classify(response: HttpResponse) -> Outcome {
    let body_json = response.json();

    if response.status == 429 {
        return Outcome::RateLimited;
    }

    if response.status == 409 {
        let cooldown = body_json
            .as_ref()
            .and_then(|b| b.pointer("/error/data/cooldown"))
            .filter(|c| c.is_object());
        if let Some(cooldown) = cooldown {
            let remaining_seconds = cooldown
                .get("remainingSeconds")
                .and_then(Value::as_f64)
                .unwrap_or(1.0);
            let payload = body_json
                .as_ref()
                .and_then(|b| b.get("error"))
                .cloned()
                .unwrap_or_else(|| json!({}));
            return Outcome::Cooldown {
                remaining_seconds,
                payload,
            };
        }
    }

    if response.status >= 400 {
        return Outcome::Failed(api_error(&response, body_json));
    }

    let Some(mut body) = body_json else {
        return Outcome::Failed(ApiError::Envelope(format!(
            "expected a JSON body with status {}",
            response.status
        )));
    };
    let Some(data) = body.get_mut("data").map(Value::take) else {
        return Outcome::Failed(ApiError::Envelope(
            "response has no `data` field".to_string(),
        ));
    };
    let meta = body
        .get("meta")
        .cloned()
        .and_then(|m| serde_json::from_value::<PageMeta>(m).ok());

    Outcome::Success(Envelope { data, meta })
}

fn api_error(response: &HttpResponse, body_json: Option<Value>) -> ApiError {
    let error_obj = body_json.as_ref().and_then(|b| b.get("error")).cloned();

    let message = error_obj
        .as_ref()
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let raw = response.body.trim();
            if raw.is_empty() {
                format!("HTTP {}", response.status)
            } else {
                raw.to_string()
            }
        });

    let payload = error_obj.or(body_json).unwrap_or_else(|| json!({}));

    ApiError::Api {
        status: response.status,
        message,
        payload,
    }
}
