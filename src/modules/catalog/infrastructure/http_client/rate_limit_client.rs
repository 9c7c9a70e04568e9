//! HTTP client with client-side rate limiting and retry logic
//!
//! Shared by the TMDB adapter and the HTTP streaming provider so both get the
//! same status mapping, backoff and response diagnostics.

use super::retry_policy::{is_retryable_error, RateLimitInfo, RetryPolicy};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, Response, StatusCode};
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use tokio::time::sleep;

const USER_AGENT: &str = concat!("marquee/", env!("CARGO_PKG_VERSION"));

/// HTTP client that handles rate limiting and retries
pub struct RateLimitClient {
    client: Client,
    rate_limiter: DefaultDirectRateLimiter,
    retry_policy: RetryPolicy,
    provider_name: String,
}

impl RateLimitClient {
    /// Client for the TMDB API (~40 requests per second, generous burst)
    pub fn for_tmdb() -> Self {
        Self::new(
            "TMDB",
            RetryPolicy::tmdb(),
            Self::create_rate_limiter(40.0, 20),
            Duration::from_secs(10),
        )
    }

    /// Client for a streaming backend
    pub fn for_streaming() -> Self {
        Self::new(
            "Streaming",
            RetryPolicy::streaming(),
            Self::create_rate_limiter(10.0, 5),
            Duration::from_secs(5),
        )
    }

    /// Create a rate limiter with specified requests per second and burst capacity
    fn create_rate_limiter(requests_per_second: f64, burst_size: u32) -> DefaultDirectRateLimiter {
        let burst = NonZeroU32::new(burst_size.max(1)).unwrap_or(NonZeroU32::MIN);
        let period = if requests_per_second > 0.0 {
            Some(Duration::from_secs_f64(1.0 / requests_per_second))
        } else {
            None
        };
        let quota = period
            .and_then(Quota::with_period)
            .map(|quota| quota.allow_burst(burst))
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN));

        RateLimiter::direct(quota)
    }

    /// Create a custom client
    pub fn new(
        provider_name: &str,
        retry_policy: RetryPolicy,
        rate_limiter: DefaultDirectRateLimiter,
        request_timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            rate_limiter,
            retry_policy,
            provider_name: provider_name.to_string(),
        }
    }

    /// Same client with a different retry policy
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Make a GET request with rate limiting and retries
    pub async fn get<T>(&self, url: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.retry_policy.max_retries {
            // Wait for rate limiter before attempting request
            self.rate_limiter.until_ready().await;

            let started = Instant::now();
            let request = self.client.get(url).header("Accept", "application/json");
            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    let e = e.without_url();
                    if is_retryable_error(&e) && attempt < self.retry_policy.max_retries {
                        let delay = self.retry_policy.calculate_delay(attempt, None);
                        tracing::warn!(
                            "{} request failed (attempt {}/{}): {}. Retrying in {:?}",
                            self.provider_name,
                            attempt + 1,
                            self.retry_policy.max_retries + 1,
                            e,
                            delay
                        );
                        last_error = Some(AppError::from(e));
                        sleep(delay).await;
                        continue;
                    }
                    return Err(AppError::from(e));
                }
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let info = RateLimitInfo::from_headers(response.headers());
                if attempt < self.retry_policy.max_retries {
                    let delay = self.retry_policy.calculate_delay(attempt, info.retry_after);
                    tracing::warn!(
                        "{} rate limited (attempt {}/{}). Waiting {:?} before retry.",
                        self.provider_name,
                        attempt + 1,
                        self.retry_policy.max_retries + 1,
                        delay
                    );
                    last_error = Some(AppError::RateLimitError(format!(
                        "{} returned 429",
                        self.provider_name
                    )));
                    sleep(delay).await;
                    continue;
                }
                return Err(AppError::RateLimitError(format!(
                    "{} rate limit exceeded after {} attempts",
                    self.provider_name,
                    self.retry_policy.max_retries + 1
                )));
            }

            if status.is_server_error() && attempt < self.retry_policy.max_retries {
                let delay = self.retry_policy.calculate_delay(attempt, None);
                tracing::warn!(
                    "{} returned {} (attempt {}/{}). Retrying in {:?}",
                    self.provider_name,
                    status,
                    attempt + 1,
                    self.retry_policy.max_retries + 1,
                    delay
                );
                last_error = Some(AppError::ExternalServiceError(format!(
                    "{} returned {}",
                    self.provider_name, status
                )));
                sleep(delay).await;
                continue;
            }

            if !status.is_success() {
                return Err(self.status_error(status, url));
            }

            LogContext::api_call(
                &self.provider_name,
                &redact_api_key(url),
                status.as_str(),
                Some(started.elapsed().as_millis() as u64),
            );
            return self.parse_response(response).await;
        }

        // If we get here, all retries were exhausted
        Err(last_error.unwrap_or_else(|| {
            AppError::ExternalServiceError(format!(
                "{} request failed after {} attempts",
                self.provider_name,
                self.retry_policy.max_retries + 1
            ))
        }))
    }

    /// Map a non-success status to the error taxonomy
    fn status_error(&self, status: StatusCode, url: &str) -> AppError {
        match status {
            StatusCode::NOT_FOUND => AppError::NotFound(format!(
                "{} resource not found: {}",
                self.provider_name,
                redact_api_key(url)
            )),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(format!(
                "{} rejected the credentials ({})",
                self.provider_name, status
            )),
            s if s.is_server_error() => AppError::ExternalServiceError(format!(
                "{} returned {}",
                self.provider_name, status
            )),
            _ => AppError::ApiError(format!("{} returned error: {}", self.provider_name, status)),
        }
    }

    /// Parse the JSON body, keeping a snippet of the payload for diagnostics
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
            let snippet: String = response_text.chars().take(200).collect();
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.provider_name, e, snippet
            ))
        })
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    /// Get provider name
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}

/// Strip the `api_key` query value before a URL ends up in logs or errors
pub fn redact_api_key(url: &str) -> String {
    match url.find("api_key=") {
        Some(start) => {
            let value_start = start + "api_key=".len();
            let value_end = url[value_start..]
                .find('&')
                .map(|offset| value_start + offset)
                .unwrap_or(url.len());
            format!("{}***{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let tmdb_client = RateLimitClient::for_tmdb();
        assert_eq!(tmdb_client.provider_name(), "TMDB");

        let streaming_client = RateLimitClient::for_streaming();
        assert_eq!(streaming_client.provider_name(), "Streaming");
    }

    #[test]
    fn test_can_make_request() {
        let client = RateLimitClient::for_tmdb();
        assert!(client.can_make_request_now());
    }

    #[test]
    fn test_redact_api_key() {
        assert_eq!(
            redact_api_key("https://api.themoviedb.org/3/movie/550?api_key=secret&page=1"),
            "https://api.themoviedb.org/3/movie/550?api_key=***&page=1"
        );
        assert_eq!(
            redact_api_key("https://x/y?api_key=secret"),
            "https://x/y?api_key=***"
        );
        assert_eq!(redact_api_key("https://x/y"), "https://x/y");
    }

    #[tokio::test]
    async fn test_dropped_connection_error_hides_api_key() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept, then hang up before any response
            if let Ok((socket, _)) = listener.accept().await {
                drop(socket);
            }
        });

        let client = RateLimitClient::for_tmdb().with_retry_policy(RetryPolicy::none());
        let url = format!("http://{}/3/movie/550?api_key=top-secret&language=en-US", addr);
        let err = client.get::<serde_json::Value>(&url).await.unwrap_err();

        assert!(!err.to_string().contains("top-secret"), "{}", err);
        assert!(!format!("{:?}", err).contains("top-secret"));
    }
}
