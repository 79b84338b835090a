//! Response checks and URL assembly shared by the endpoint modules.
//!
//! The snippet API answers failures with a JSON body such as
//! `{ "message": "Snippet not found" }`; that message becomes the
//! [`ApiError::Api`] text.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::ApiError;

/// Delay unit between listing retries; attempt `n` waits `n` units.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Wait applied to a 429 without a usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pass successful responses through and map failures to [`ApiError`].
///
/// A 429 becomes [`ApiError::RateLimited`]. Any other failure becomes
/// [`ApiError::Api`] carrying the body's `message`, the raw body when it
/// is not JSON, or the status reason when the body is empty.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ApiError::RateLimited {
            retry_after_secs: retry_after_secs(resp.headers()),
        });
    }
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Api {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// `Retry-After` in whole seconds. HTTP-date values fall back to the default.
fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if let Ok(ErrorBody {
        message: Some(message),
    }) = serde_json::from_str(body)
        && !message.is_empty()
    {
        return message;
    }
    if !body.is_empty() && !body.starts_with('{') {
        return body.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

/// Render `path` under `base` with percent-encoded values. Keys are
/// written as given so bracket notation stays readable.
pub fn build_url(base: &str, path: &str, pairs: &[(String, String)]) -> String {
    let mut url = format!("{}{path}", base.trim_end_matches('/'));
    if !pairs.is_empty() {
        let query = pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        url.push('?');
        url.push_str(&query);
    }
    url
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn rate_limited(retry_after: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(429)
                .header("Retry-After", retry_after)
                .body("")
                .unwrap(),
        )
    }

    #[rstest]
    #[case::seconds("120", 120)]
    #[case::padded(" 5 ", 5)]
    #[case::http_date("Wed, 21 Oct 2026 07:28:00 GMT", DEFAULT_RETRY_AFTER_SECS)]
    #[case::garbage("soon", DEFAULT_RETRY_AFTER_SECS)]
    fn retry_after_header(#[case] value: &str, #[case] expected: u64) {
        assert_eq!(retry_after_secs(rate_limited(value).headers()), expected);
    }

    #[test]
    fn retry_after_missing() {
        let resp = mock_response(429, "");
        assert_eq!(retry_after_secs(resp.headers()), DEFAULT_RETRY_AFTER_SECS);
    }

    #[tokio::test]
    async fn rate_limit_carries_retry_after() {
        let err = check_response(rate_limited("30")).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[rstest]
    #[case::json_message(404, r#"{"message":"Snippet not found"}"#, "Snippet not found")]
    #[case::json_with_extra_fields(
        422,
        r#"{"message":"Invalid tag id","code":"E_VALIDATION"}"#,
        "Invalid tag id"
    )]
    #[case::json_without_message(500, r#"{"errors":[]}"#, "Internal Server Error")]
    #[case::empty_json_message(400, r#"{"message":""}"#, "Bad Request")]
    #[case::plain_text(502, "upstream unavailable\n", "upstream unavailable")]
    #[case::empty_body(404, "", "Not Found")]
    #[tokio::test]
    async fn failure_message_comes_from_body(
        #[case] status: u16,
        #[case] body: &'static str,
        #[case] expected: &str,
    ) {
        let err = check_response(mock_response(status, body)).await.unwrap_err();
        let ApiError::Api {
            status: got,
            message,
        } = err
        else {
            panic!("expected an API error");
        };
        assert_eq!(got, status);
        assert_eq!(message, expected);
    }

    #[tokio::test]
    async fn only_server_errors_are_retryable() {
        let err = check_response(mock_response(404, "")).await.unwrap_err();
        assert!(!err.is_retryable());

        let err = check_response(mock_response(502, "")).await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = check_response(mock_response(200, "[]")).await.unwrap();
        assert_eq!(resp.text().await.unwrap(), "[]");
    }

    #[test]
    fn build_url_encodes_values_only() {
        let pairs = vec![
            ("tags[]".to_string(), "a b".to_string()),
            ("search".to_string(), "x&y".to_string()),
        ];
        assert_eq!(
            build_url("http://localhost:3333/v1/", "/snippets", &pairs),
            "http://localhost:3333/v1/snippets?tags[]=a%20b&search=x%26y"
        );
        assert_eq!(build_url("http://h/v1", "/tags", &[]), "http://h/v1/tags");
    }
}
