//! HTTP client for contact form submissions.

use super::SubmitError;
use log::*;
use reqwest::header::ACCEPT;
use serde::Deserialize;

/// Message used when a rejection carries no `error` field.
///
pub const DEFAULT_REJECTION: &str = "Submission failed";

/// Body of a non-success reply.
///
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Posts form data and interprets the endpoint reply.
///
#[derive(Clone)]
pub struct Client {
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created. This should never happen
    /// in practice as reqwest::Client::builder().build() only fails on
    /// invalid configuration, which we don't use.
    pub fn new() -> Self {
        Client {
            http_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// POST the fields form-encoded to `url`, asking for JSON back. A
    /// non-success status becomes [`SubmitError::Rejected`] carrying the
    /// body's `error` message.
    ///
    pub async fn submit(&self, url: &str, fields: &[(String, String)]) -> Result<(), SubmitError> {
        debug!("Posting {} form fields to {}...", fields.len(), url);
        let response = self
            .http_client
            .post(url)
            .header(ACCEPT, "application/json")
            .form(fields)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Endpoint accepted submission with status {}", status);
            return Ok(());
        }

        let text = response.text().await?;
        let body: ErrorBody = serde_json::from_str(&text)?;
        Err(SubmitError::Rejected {
            status: status.as_u16(),
            message: body.error.unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
        })
    }
}

impl Default for Client {
    fn default() -> Self {
        Client::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;
    use serde_json::json;

    fn fields() -> Vec<(String, String)> {
        vec![
            ("email".to_string(), "a@b.co".to_string()),
            ("message".to_string(), "Hello there, world".to_string()),
        ]
    }

    #[tokio::test]
    async fn submit_success() -> Result<(), SubmitError> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/f/contact")
                    .header("Accept", "application/json")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body_contains("email=a%40b.co");
                then.status(200).json_body(json!({ "ok": true }));
            })
            .await;

        Client::new().submit(&server.url("/f/contact"), &fields()).await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn submit_rejected_with_message() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/f/contact");
                then.status(422).json_body(json!({ "error": "bad input" }));
            })
            .await;

        let result = Client::new().submit(&server.url("/f/contact"), &fields()).await;
        mock.assert_async().await;
        match result {
            Err(SubmitError::Rejected { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "bad input");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn submit_rejected_without_message() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/f/contact");
                then.status(500).json_body(json!({}));
            })
            .await;

        let result = Client::new().submit(&server.url("/f/contact"), &fields()).await;
        assert!(matches!(
            result,
            Err(SubmitError::Rejected { status: 500, ref message }) if message == DEFAULT_REJECTION
        ));
    }

    #[tokio::test]
    async fn submit_rejected_with_unparsable_body() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("POST").path("/f/contact");
                then.status(502).body("<html>Bad Gateway</html>");
            })
            .await;

        let result = Client::new().submit(&server.url("/f/contact"), &fields()).await;
        assert!(matches!(result, Err(SubmitError::InvalidReply(_))));
    }

    #[tokio::test]
    async fn submit_unreachable_endpoint() {
        let result = Client::new()
            .submit("http://127.0.0.1:9/unreachable", &fields())
            .await;
        assert!(matches!(result, Err(SubmitError::HttpRequest(_))));
    }
}
