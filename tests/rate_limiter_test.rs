//! Rate limiter and retry policy tests
//!
//! Tests the HTTP client rate limiting implementation with RateLimitClient.

use marquee_lib::modules::catalog::infrastructure::http_client::{RateLimitClient, RetryPolicy};
use std::time::Duration;

#[tokio::test]
async fn test_rate_limit_client_creation() {
    let client = RateLimitClient::for_tmdb();
    assert_eq!(client.provider_name(), "TMDB");
}

#[tokio::test]
async fn test_multiple_clients() {
    let tmdb_client = RateLimitClient::for_tmdb();
    let streaming_client = RateLimitClient::for_streaming();

    assert_eq!(tmdb_client.provider_name(), "TMDB");
    assert_eq!(streaming_client.provider_name(), "Streaming");

    assert!(tmdb_client.can_make_request_now());
    assert!(streaming_client.can_make_request_now());
}

#[test]
fn test_burst_is_eventually_limited() {
    let client = RateLimitClient::for_streaming();

    let granted = (0..50).filter(|_| client.can_make_request_now()).count();
    assert!(granted >= 1);
    assert!(granted < 50);
}

#[test]
fn test_retry_after_header_wins_but_is_capped() {
    let policy = RetryPolicy::tmdb();

    assert_eq!(
        policy.calculate_delay(0, Some(Duration::from_secs(2))),
        Duration::from_secs(2)
    );
    assert_eq!(
        policy.calculate_delay(0, Some(Duration::from_secs(600))),
        policy.max_delay
    );
}

#[test]
fn test_backoff_grows_with_jitter_bound() {
    let policy = RetryPolicy::tmdb();

    let first = policy.calculate_delay(0, None);
    let third = policy.calculate_delay(2, None);

    assert!(first >= Duration::from_millis(500) && first <= Duration::from_millis(550));
    assert!(third >= Duration::from_millis(2_000) && third <= Duration::from_millis(2_200));
    assert!(policy.calculate_delay(10, None) <= policy.max_delay + policy.max_delay / 10);
}

#[test]
fn test_streaming_policy_stays_short() {
    let policy = RetryPolicy::streaming();

    assert_eq!(policy.max_retries, 1);
    assert_eq!(policy.calculate_delay(0, None), Duration::from_millis(250));
    assert_eq!(policy.calculate_delay(3, None), Duration::from_millis(250));
    assert!(policy.calculate_delay(0, Some(Duration::from_secs(30))) <= Duration::from_secs(1));
}

#[test]
fn test_no_retry_policy() {
    let policy = RetryPolicy::none();
    assert_eq!(policy.max_retries, 0);
    assert_eq!(policy.calculate_delay(4, None), Duration::ZERO);
}
