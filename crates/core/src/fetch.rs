//! Page fetching from URLs and local files.
//!
//! This module provides functions for retrieving HTML content from
//! HTTP/HTTPS URLs and from local files, plus the hostname normalization
//! the CLI applies before fetching.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{OrdskyError, Result};

/// HTTP client configuration for fetching web pages.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Ordsky/1.0; +https://github.com/stormlightlabs/ordsky)".to_string(),
        }
    }
}

/// Normalizes a user-supplied address into a fetchable URL.
///
/// Bare hostnames such as `vg.no` are accepted on the command line; a
/// default scheme is prefixed so the HTTP client can resolve them.
pub fn normalize_url(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("http://{}", input)
    }
}

/// Fetches HTML content from a URL.
///
/// This function performs an HTTP GET request and returns the response body
/// as text. It follows redirects, respects the configured timeout, and uses
/// a browser-like User-Agent for better compatibility. A non-2xx response
/// is an error; the body is decoded per the response's charset.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| OrdskyError::InvalidUrl(e.to_string()))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(OrdskyError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "nb-NO,nb;q=0.9,en;q=0.8")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                OrdskyError::Timeout { timeout: config.timeout }
            } else {
                OrdskyError::HttpError(e)
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(OrdskyError::FetchFailed { url: url.to_string(), status: status.as_u16() });
    }

    let content = response.text().await?;

    Ok(content)
}

/// Reads HTML content from a local file.
///
/// Lets the pipeline run against saved pages, which is also how the
/// integration tests exercise it without a network.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(OrdskyError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(OrdskyError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Ordsky"));
    }

    #[test]
    fn test_normalize_bare_hostname() {
        assert_eq!(normalize_url("vg.no"), "http://vg.no");
    }

    #[test]
    fn test_normalize_keeps_scheme() {
        assert_eq!(normalize_url("https://nrk.no"), "https://nrk.no");
        assert_eq!(normalize_url("http://vg.no"), "http://vg.no");
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("not a url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(OrdskyError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(OrdskyError::FileNotFound(_))));
    }

    #[test]
    fn test_error_timeout_message() {
        let err = OrdskyError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }
}
