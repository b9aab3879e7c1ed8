//! Error categorization and retry strategy.
//!
//! This module provides functions to categorize transport errors and build the
//! manifest retry schedule.

use std::time::Duration;

use super::types::TransportKind;

/// Builds the delay schedule for manifest retries.
///
/// The first delay is `initial_delay` and every following one doubles it.
/// `max_attempts` counts the initial request, so the schedule holds
/// `max_attempts - 1` delays: 5 attempts starting at 3s wait 3, 6, 12 and 24
/// seconds before the last error propagates.
///
/// # Returns
///
/// A delay iterator ready for use with `tokio_retry::RetryIf`.
pub fn manifest_retry_schedule(
    initial_delay: Duration,
    max_attempts: u32,
) -> impl Iterator<Item = Duration> {
    let retries = max_attempts.saturating_sub(1) as usize;
    std::iter::successors(Some(initial_delay), |delay| delay.checked_mul(2)).take(retries)
}

/// Categorizes a `reqwest::Error` into a `TransportKind`.
///
/// Status errors are checked first since `error_for_status()` produces
/// errors that carry a status code.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportKind {
    if error.status().is_some() || error.is_status() {
        return TransportKind::Status;
    }

    if error.is_builder() {
        TransportKind::Builder
    } else if error.is_redirect() {
        TransportKind::Redirect
    } else if error.is_timeout() {
        TransportKind::Timeout
    } else if error.is_connect() {
        TransportKind::Connect
    } else if error.is_request() {
        TransportKind::Request
    } else if error.is_body() {
        TransportKind::Body
    } else if error.is_decode() {
        TransportKind::Decode
    } else {
        TransportKind::Other
    }
}
