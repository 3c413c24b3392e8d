//! Publishing rendered clouds to Twitter.
//!
//! This module loads the operator's API credentials from a JSON file and
//! posts a caption plus image through the v1.1 endpoints: a multipart
//! media upload followed by a status update referencing the uploaded
//! media id. Requests are signed with OAuth 1.0a (HMAC-SHA1).

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distributions::Alphanumeric};
use serde::Deserialize;
use sha1::Sha1;

use crate::{OrdskyError, Result};

type HmacSha1 = Hmac<Sha1>;

const MEDIA_UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";
const STATUS_UPDATE_URL: &str = "https://api.twitter.com/1.1/statuses/update.json";

/// RFC 3986 unreserved characters pass through; everything else is encoded.
/// OAuth 1.0a requires exactly this set for signature material.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn oauth_encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Twitter API credentials.
///
/// Field names match the credentials file on disk: a JSON object with
/// `consumer_key`, `consumer_secret`, `access_token`, and
/// `access_token_secret`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// Reads credentials from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`OrdskyError::ConfigError`] when the file is missing or
    /// malformed. Fatal at startup; publishing cannot proceed without it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| OrdskyError::ConfigError(format!("cannot read credentials {}: {}", path.display(), e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| OrdskyError::ConfigError(format!("malformed credentials {}: {}", path.display(), e)))
    }
}

/// Client for posting a caption and image to a Twitter account.
pub struct TwitterClient {
    client: reqwest::Client,
    credentials: Credentials,
}

impl TwitterClient {
    /// Creates a client from loaded credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self { client: reqwest::Client::new(), credentials }
    }

    /// Posts `caption` with the image at `image_path` attached.
    ///
    /// Uploads the image first, then sends a status update referencing it.
    /// Any non-success response surfaces as [`OrdskyError::PublishError`].
    pub async fn post(&self, caption: &str, image_path: &Path) -> Result<()> {
        let media_id = self.upload_media(image_path).await?;
        self.update_status(caption, &media_id).await
    }

    async fn upload_media(&self, image_path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(image_path).await?;
        let file_name = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cloud.png".to_string());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/png")
            .map_err(|e| OrdskyError::PublishError(format!("cannot build upload: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("media", part);

        // Multipart body parameters are excluded from the OAuth signature.
        let auth = self.authorization_header("POST", MEDIA_UPLOAD_URL, &[]);
        let response = self
            .client
            .post(MEDIA_UPLOAD_URL)
            .header("Authorization", auth)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OrdskyError::PublishError(format!(
                "media upload rejected (HTTP {}): {}",
                status.as_u16(),
                body
            )));
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| OrdskyError::PublishError(format!("unexpected media upload response: {}", e)))?;

        value
            .get("media_id_string")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| OrdskyError::PublishError("media upload response missing media_id_string".to_string()))
    }

    async fn update_status(&self, caption: &str, media_id: &str) -> Result<()> {
        let params = [("status", caption), ("media_ids", media_id)];
        let auth = self.authorization_header("POST", STATUS_UPDATE_URL, &params);

        let response = self
            .client
            .post(STATUS_UPDATE_URL)
            .header("Authorization", auth)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OrdskyError::PublishError(format!(
                "status update rejected (HTTP {}): {}",
                status.as_u16(),
                body
            )));
        }

        Ok(())
    }

    fn authorization_header(&self, method: &str, url: &str, params: &[(&str, &str)]) -> String {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
            .to_string();
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        let signature = signature(&self.credentials, method, url, params, &nonce, &timestamp);

        let header_params = [
            ("oauth_consumer_key", self.credentials.consumer_key.as_str()),
            ("oauth_nonce", nonce.as_str()),
            ("oauth_signature", signature.as_str()),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.credentials.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let joined = header_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, oauth_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        format!("OAuth {}", joined)
    }
}

/// Computes the OAuth 1.0a HMAC-SHA1 signature for a request.
///
/// `params` are the request's query/body parameters; the oauth protocol
/// parameters are derived from `credentials`, `nonce`, and `timestamp`.
fn signature(
    credentials: &Credentials,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    nonce: &str,
    timestamp: &str,
) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .chain(
            [
                ("oauth_consumer_key", credentials.consumer_key.as_str()),
                ("oauth_nonce", nonce),
                ("oauth_signature_method", "HMAC-SHA1"),
                ("oauth_timestamp", timestamp),
                ("oauth_token", credentials.access_token.as_str()),
                ("oauth_version", "1.0"),
            ]
            .iter(),
        )
        .map(|(k, v)| (oauth_encode(k), oauth_encode(v)))
        .collect();
    pairs.sort();

    let param_string = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let base_string = format!("{}&{}&{}", method, oauth_encode(url), oauth_encode(&param_string));
    let signing_key = format!(
        "{}&{}",
        oauth_encode(&credentials.consumer_secret),
        oauth_encode(&credentials.access_token_secret)
    );

    // HMAC accepts keys of any length, so this cannot fail.
    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes()).unwrap();
    mac.update(base_string.as_bytes());

    BASE64.encode(mac.finalize().into_bytes())
}
