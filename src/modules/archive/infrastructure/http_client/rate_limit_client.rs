//! HTTP client with client-side rate limiting and retry logic
//!
//! Every archive request goes through here so that throttling, backoff and
//! response decoding live in one place.

use super::retry_policy::{is_retryable_error, is_retryable_status, RateLimitInfo, RetryPolicy};
use crate::shared::{
    config::{request_period, ArchiveConfig},
    errors::{AppError, AppResult},
};
use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{direct::NotKeyed, InMemoryState},
    Quota, RateLimiter as GovernorRateLimiter,
};
use reqwest::{Client, Response, StatusCode};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Rate-limited JSON GET client
pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectRateLimiter,
    retry_policy: RetryPolicy,
    provider_name: String,
}

impl RateLimitClient {
    /// Client for the archive, built from configuration
    pub fn for_archive(config: &ArchiveConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(
            "LoC",
            client,
            RetryPolicy::archive(),
            Self::create_rate_limiter(config.requests_per_second, config.burst)?,
        ))
    }

    /// Create a rate limiter with specified requests per second and burst capacity
    pub fn create_rate_limiter(
        requests_per_second: f64,
        burst_size: u32,
    ) -> AppResult<DirectRateLimiter> {
        let period = request_period(requests_per_second)?;
        let quota = Quota::with_period(period).ok_or_else(|| {
            AppError::InvalidInput(format!("Request rate {} is too high", requests_per_second))
        })?;
        let burst = NonZeroU32::new(burst_size.max(1)).unwrap_or(NonZeroU32::MIN);

        Ok(GovernorRateLimiter::direct(quota.allow_burst(burst)))
    }

    pub fn new(
        provider_name: &str,
        client: Client,
        retry_policy: RetryPolicy,
        rate_limiter: DirectRateLimiter,
    ) -> Self {
        Self {
            client,
            rate_limiter,
            retry_policy,
            provider_name: provider_name.to_string(),
        }
    }

    /// GET `url` and decode the JSON body, waiting on the rate limiter and
    /// retrying transient failures
    pub async fn get<T>(&self, url: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let attempts = self.retry_policy.max_retries + 1;

        for attempt in 0..attempts {
            let is_last = attempt + 1 == attempts;
            self.rate_limiter.until_ready().await;

            let response = match self.send(url).await {
                Ok(response) => response,
                Err(e) if is_retryable_error(&e) && !is_last => {
                    let delay = self.retry_policy.calculate_delay(attempt, None);
                    log::warn!(
                        "{} API request failed (attempt {}/{}): {}. Retrying in {:?}",
                        self.provider_name,
                        attempt + 1,
                        attempts,
                        e,
                        delay
                    );
                    sleep(delay).await;
                    continue;
                }
                Err(e) => {
                    return Err(AppError::ApiError(format!(
                        "{} API request failed: {}",
                        self.provider_name, e
                    )));
                }
            };

            let status = response.status();
            if status.is_success() {
                return self.parse_response(response).await;
            }

            if is_retryable_status(status.as_u16()) && !is_last {
                let delay = if status == StatusCode::TOO_MANY_REQUESTS {
                    let info = RateLimitInfo::from_headers(response.headers());
                    self.calculate_retry_delay(attempt, &info)
                } else {
                    self.retry_policy.calculate_delay(attempt, None)
                };
                log::warn!(
                    "{} API returned {} (attempt {}/{}). Waiting {:?} before retry.",
                    self.provider_name,
                    status,
                    attempt + 1,
                    attempts,
                    delay
                );
                sleep(delay).await;
                continue;
            }

            return Err(self.status_error(status, attempts));
        }

        Err(AppError::ApiError(format!(
            "{} API request failed after {} attempts",
            self.provider_name, attempts
        )))
    }

    async fn send(&self, url: &str) -> Result<Response, reqwest::Error> {
        self.client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
    }

    fn status_error(&self, status: StatusCode, attempts: u32) -> AppError {
        match status {
            StatusCode::NOT_FOUND => {
                AppError::NotFound(format!("{} API has no such resource", self.provider_name))
            }
            StatusCode::TOO_MANY_REQUESTS => AppError::RateLimitError(format!(
                "{} API rate limit exceeded after {} attempts",
                self.provider_name, attempts
            )),
            _ => AppError::ApiError(format!(
                "{} API returned error: {}",
                self.provider_name, status
            )),
        }
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.provider_name, e
            ))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.provider_name,
                e,
                preview(&response_text)
            ))
        })
    }

    fn calculate_retry_delay(&self, attempt: u32, rate_limit_info: &RateLimitInfo) -> Duration {
        self.retry_policy
            .calculate_delay(attempt, rate_limit_info.recommended_delay())
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}

/// First 200 characters of a body, for error messages
fn preview(body: &str) -> String {
    match body.char_indices().nth(200) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
