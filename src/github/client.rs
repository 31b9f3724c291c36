//! Pull-request comment client.
//!
//! Posts the rendered report to a pull request's comments endpoint
//! (`github.event.pull_request.comments_url` in Actions).

use reqwest::{Client, header};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::CommentConfig;
use crate::error::{GitHubError, Result, SummaryError};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Upper bound on a server-requested retry delay.
const MAX_RETRY_DELAY_SECS: u64 = 30;

/// User agent sent with every request; GitHub rejects requests without one.
const USER_AGENT: &str = concat!("tfplan-summary/", env!("CARGO_PKG_VERSION"));

/// Comment request body.
#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

/// Client for posting pull-request comments.
#[derive(Debug, Clone)]
pub struct CommentClient {
    /// HTTP client.
    client: Client,
    /// Comments endpoint.
    url: String,
    /// API token.
    token: String,
    /// Delay unit between retries.
    retry_delay: Duration,
}

impl CommentClient {
    /// Creates a client from comment settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &CommentConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GitHubError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            token: config.token.clone(),
            retry_delay: Duration::from_secs(1),
        })
    }

    /// Sets the base delay between retries.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Posts `body` as a new comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the comment could not be posted after retries.
    pub async fn post_comment(&self, body: &str) -> Result<()> {
        info!("Posting summary to pull request comment: {}", self.url);

        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = last_error
                    .as_ref()
                    .and_then(SummaryError::retry_delay_secs)
                    .map_or(self.retry_delay * attempt, |secs| {
                        Duration::from_secs(secs.min(MAX_RETRY_DELAY_SECS))
                    });
                debug!("Retry attempt {attempt} of {MAX_RETRIES} after {delay:?}");
                tokio::time::sleep(delay).await;
            }

            match self.post_once(body).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_retryable() => {
                    warn!("Posting comment failed: {e}");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SummaryError::GitHub(GitHubError::network("Max retries exceeded"))
        }))
    }

    /// Sends a single comment request.
    async fn post_once(&self, body: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .json(&CommentRequest { body })
            .send()
            .await
            .map_err(|e| GitHubError::network(format!("Request failed: {e}")))?;

        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(SummaryError::GitHub(GitHubError::RateLimited {
                retry_after_secs: retry_after,
            }));
        }

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(SummaryError::GitHub(GitHubError::AuthenticationFailed {
                message: format!("token rejected with status {status}"),
            }));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummaryError::GitHub(GitHubError::api_error(
                status.as_u16(),
                body,
            )));
        }

        debug!("Comment posted with status {status}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COMMENTS_PATH: &str = "/repos/acme/infra/issues/42/comments";

    async fn client_for(server: &MockServer) -> CommentClient {
        let config = CommentConfig {
            url: format!("{}{COMMENTS_PATH}", server.uri()),
            token: String::from("test-token"),
        };
        CommentClient::new(&config)
            .expect("client should build")
            .with_retry_delay(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_post_comment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMMENTS_PATH))
            .and(header("authorization", "token test-token"))
            .and(body_json(serde_json::json!({ "body": "**Terraform Plan**\n\n" })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .post_comment("**Terraform Plan**\n\n")
            .await
            .expect("comment should post");
    }

    #[tokio::test]
    async fn test_post_comment_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.post_comment("body").await.unwrap_err();
        assert!(matches!(
            err,
            SummaryError::GitHub(GitHubError::AuthenticationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_post_comment_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .expect(u64::from(MAX_RETRIES))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.post_comment("body").await.unwrap_err();
        assert!(matches!(
            err,
            SummaryError::GitHub(GitHubError::ApiRequestFailed { status: 502, .. })
        ));
    }

    #[tokio::test]
    async fn test_post_comment_client_error_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("Validation Failed"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.post_comment("body").await.unwrap_err();
        assert!(err.to_string().contains("Validation Failed"));
    }
}
