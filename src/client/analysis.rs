use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::shared::types::ErrorResponse;

/// Outcome of a single report lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportFetch {
    Ready(String),
    NotReady,
}

/// How often and how long to wait for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: 30,
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Analysis not ready after {attempts} attempts")]
    NotReady { attempts: u32 },
}

/// Client for `GET /api/getAnalysis`
pub struct AnalysisClient {
    http: Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/api/getAnalysis", base_url.trim_end_matches('/')),
        }
    }

    /// Look the report up once
    pub async fn fetch(&self, report_key: &str) -> Result<ReportFetch, AnalysisClientError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("filename", report_key)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(ReportFetch::NotReady);
        }

        let body = response.text().await?;
        if status.is_success() {
            return Ok(ReportFetch::Ready(body));
        }

        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        Err(AnalysisClientError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// Poll until the report exists or the policy runs out of attempts
    pub async fn wait_for_report(
        &self,
        report_key: &str,
        policy: PollPolicy,
    ) -> Result<String, AnalysisClientError> {
        let attempts = policy.max_attempts.max(1);

        for attempt in 1..=attempts {
            match self.fetch(report_key).await? {
                ReportFetch::Ready(html) => {
                    info!(
                        "Analysis report '{}' ready after {} attempt(s)",
                        report_key, attempt
                    );
                    return Ok(html);
                }
                ReportFetch::NotReady => {
                    debug!(
                        "Analysis report '{}' not ready (attempt {}/{})",
                        report_key, attempt, attempts
                    );
                    if attempt < attempts {
                        tokio::time::sleep(policy.interval).await;
                    }
                }
            }
        }

        Err(AnalysisClientError::NotReady { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const REPORT: &str = "<html><body>NDVI 0.71</body></html>";

    fn fast_policy(max_attempts: u32) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(5),
            max_attempts,
        }
    }

    #[tokio::test]
    async fn test_fetch_ready_report() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/getAnalysis")
            .match_query(Matcher::UrlEncoded(
                "filename".to_string(),
                "1712345678901-a.html".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(REPORT)
            .create_async()
            .await;

        let client = AnalysisClient::new(Client::new(), &server.url());
        let fetch = client.fetch("1712345678901-a.html").await.unwrap();

        mock.assert_async().await;
        assert_eq!(fetch, ReportFetch::Ready(REPORT.to_string()));
    }

    #[tokio::test]
    async fn test_fetch_not_ready() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/getAnalysis")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Analysis not ready yet"}"#)
            .create_async()
            .await;

        let client = AnalysisClient::new(Client::new(), &server.url());

        assert_eq!(
            client.fetch("1-a.html").await.unwrap(),
            ReportFetch::NotReady
        );
    }

    #[tokio::test]
    async fn test_fetch_server_error_carries_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/getAnalysis")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Failed to fetch analysis: AWS Region is missing"}"#)
            .create_async()
            .await;

        let client = AnalysisClient::new(Client::new(), &server.url());

        match client.fetch("1-a.html").await {
            Err(AnalysisClientError::Server { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to fetch analysis: AWS Region is missing");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wait_for_report_gives_up() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/getAnalysis")
            .match_query(Matcher::Any)
            .with_status(404)
            .expect(3)
            .create_async()
            .await;

        let client = AnalysisClient::new(Client::new(), &server.url());
        let err = client
            .wait_for_report("1-a.html", fast_policy(3))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, AnalysisClientError::NotReady { attempts: 3 }));
    }

    #[tokio::test]
    async fn test_wait_for_report_returns_once_ready() {
        let mut server = mockito::Server::new_async().await;
        let not_ready = server
            .mock("GET", "/api/getAnalysis")
            .match_query(Matcher::Any)
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let client = AnalysisClient::new(Client::new(), &server.url());
        assert_eq!(
            client.fetch("1-a.html").await.unwrap(),
            ReportFetch::NotReady
        );
        not_ready.assert_async().await;
        not_ready.remove_async().await;

        let ready = server
            .mock("GET", "/api/getAnalysis")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(REPORT)
            .create_async()
            .await;

        let html = client
            .wait_for_report("1-a.html", fast_policy(5))
            .await
            .unwrap();

        ready.assert_async().await;
        assert_eq!(html, REPORT);
    }
}
