//! API client for the conference back-end.
//!
//! The page controller only talks to the `ApiClient` trait; `HttpApiClient`
//! implements it over the back-end's JSON API.
//!
//! # Usage
//!
//! ```rust,no_run
//! use planner_core::client::{ApiClient, HttpApiClient};
//!
//! #[tokio::main]
//! async fn main() -> planner_core::Result<()> {
//!     let client = HttpApiClient::new("http://localhost:5000")?;
//!     let sessions = client.get_sessions().await?;
//!     println!("{} sessions", sessions.len());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Session, SessionRef};

/// Operations the schedule pages need from the back-end
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Sessions on an attendee's personal schedule
    async fn get_sessions_by_attendee(&self, name: &str) -> Result<Vec<SessionRef>>;

    /// Every session of the conference
    async fn get_sessions(&self) -> Result<Vec<Session>>;

    /// Put a session on an attendee's schedule
    async fn add_session_to_attendee(&self, name: &str, session_id: i32) -> Result<()>;

    /// Take a session off an attendee's schedule
    async fn remove_session_from_attendee(&self, name: &str, session_id: i32) -> Result<()>;
}

#[cfg(feature = "client")]
pub use http::HttpApiClient;

#[cfg(feature = "client")]
mod http {
    use super::*;
    use crate::error::Error;
    use serde::de::DeserializeOwned;
    use std::time::Duration;
    use tracing::debug;

    /// Default request timeout
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// `ApiClient` over HTTP
    #[derive(Clone)]
    pub struct HttpApiClient {
        /// Base URL of the back-end, e.g. `http://localhost:5000`
        base_url: reqwest::Url,
        /// HTTP client
        client: reqwest::Client,
    }

    impl HttpApiClient {
        /// Create a client with the default timeout
        pub fn new(base_url: &str) -> Result<Self> {
            Self::with_timeout(base_url, DEFAULT_TIMEOUT)
        }

        /// Create a client with a custom request timeout
        pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
            let base_url = reqwest::Url::parse(base_url)
                .map_err(|e| Error::Config(format!("Invalid API URL {}: {}", base_url, e)))?;
            if base_url.cannot_be_a_base() {
                return Err(Error::Config(format!("API URL cannot be a base: {}", base_url)));
            }

            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

            Ok(Self { base_url, client })
        }

        pub fn base_url(&self) -> &reqwest::Url {
            &self.base_url
        }

        /// Base URL with `segments` appended, each percent-encoded
        fn url(&self, segments: &[&str]) -> reqwest::Url {
            let mut url = self.base_url.clone();
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().extend(segments);
            }
            url
        }

        async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
            let resp = self.send(reqwest::Method::GET, segments).await?;
            resp.json()
                .await
                .map_err(|e| Error::Decode(e.to_string()))
        }

        async fn send(
            &self,
            method: reqwest::Method,
            segments: &[&str],
        ) -> Result<reqwest::Response> {
            let url = self.url(segments);
            debug!("API request: {} {}", method, url);

            let resp = self
                .client
                .request(method, url.clone())
                .send()
                .await
                .map_err(|e| Error::Http(e.to_string()))?;

            let status = resp.status();
            if status.is_success() {
                Ok(resp)
            } else if status == reqwest::StatusCode::NOT_FOUND {
                Err(Error::NotFound(url.path().to_string()))
            } else {
                let error_text = resp.text().await.unwrap_or_default();
                Err(Error::api(status.as_u16(), error_text))
            }
        }
    }

    #[async_trait]
    impl ApiClient for HttpApiClient {
        async fn get_sessions_by_attendee(&self, name: &str) -> Result<Vec<SessionRef>> {
            if name.is_empty() {
                return Ok(Vec::new());
            }
            match self.get(&["api", "attendees", name, "sessions"]).await {
                Ok(sessions) => Ok(sessions),
                // Attendee not registered yet
                Err(Error::NotFound(_)) => Ok(Vec::new()),
                Err(e) => Err(e),
            }
        }

        async fn get_sessions(&self) -> Result<Vec<Session>> {
            self.get(&["api", "sessions"]).await
        }

        async fn add_session_to_attendee(&self, name: &str, session_id: i32) -> Result<()> {
            if name.is_empty() {
                return Err(Error::MissingIdentity);
            }
            let id = session_id.to_string();
            self.send(
                reqwest::Method::POST,
                &["api", "attendees", name, "session", &id],
            )
            .await?;
            Ok(())
        }

        async fn remove_session_from_attendee(&self, name: &str, session_id: i32) -> Result<()> {
            if name.is_empty() {
                return Err(Error::MissingIdentity);
            }
            let id = session_id.to_string();
            self.send(
                reqwest::Method::DELETE,
                &["api", "attendees", name, "session", &id],
            )
            .await?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        #[test]
        fn test_invalid_base_url() {
            let result = HttpApiClient::new("not a url");
            assert!(matches!(result, Err(Error::Config(_))));
        }

        #[test]
        fn test_base_url_is_parsed() {
            let client = HttpApiClient::new("http://localhost:5000").unwrap();
            assert_eq!(client.base_url().as_str(), "http://localhost:5000/");
        }

        #[test]
        fn test_url_encodes_segments() {
            let client = HttpApiClient::new("http://localhost:5000/backend/").unwrap();
            let url = client.url(&["api", "attendees", "ann lee", "sessions"]);
            assert_eq!(
                url.as_str(),
                "http://localhost:5000/backend/api/attendees/ann%20lee/sessions"
            );
        }

        #[tokio::test]
        async fn test_get_sessions() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/sessions"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                    {
                        "id": 1,
                        "title": "Keynote",
                        "trackId": 1,
                        "startTime": "2019-01-01T09:00:00+00:00",
                        "endTime": "2019-01-01T10:00:00+00:00"
                    },
                    { "id": 2, "startTime": null, "endTime": null }
                ])))
                .mount(&server)
                .await;

            let client = HttpApiClient::new(&server.uri()).unwrap();
            let sessions = client.get_sessions().await.unwrap();

            assert_eq!(sessions.len(), 2);
            assert_eq!(sessions[0].title.as_deref(), Some("Keynote"));
            assert!(sessions[1].start_time.is_none());
        }

        #[tokio::test]
        async fn test_get_sessions_by_attendee() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/attendees/alice/sessions"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!([{ "id": 4 }, { "id": 8 }])),
                )
                .mount(&server)
                .await;

            let client = HttpApiClient::new(&server.uri()).unwrap();
            let refs = client.get_sessions_by_attendee("alice").await.unwrap();

            assert_eq!(refs, vec![SessionRef { id: 4 }, SessionRef { id: 8 }]);
        }

        #[tokio::test]
        async fn test_unknown_attendee_has_no_sessions() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(404))
                .mount(&server)
                .await;

            let client = HttpApiClient::new(&server.uri()).unwrap();
            let refs = client.get_sessions_by_attendee("nobody").await.unwrap();
            assert!(refs.is_empty());
        }

        #[tokio::test]
        async fn test_anonymous_attendee_skips_request() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(500))
                .expect(0)
                .mount(&server)
                .await;

            let client = HttpApiClient::new(&server.uri()).unwrap();
            assert!(client.get_sessions_by_attendee("").await.unwrap().is_empty());
            assert!(matches!(
                client.add_session_to_attendee("", 1).await,
                Err(Error::MissingIdentity)
            ));
            assert!(matches!(
                client.remove_session_from_attendee("", 1).await,
                Err(Error::MissingIdentity)
            ));
        }

        #[tokio::test]
        async fn test_add_and_remove_session() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/api/attendees/alice/session/42"))
                .respond_with(ResponseTemplate::new(204))
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("DELETE"))
                .and(path("/api/attendees/alice/session/42"))
                .respond_with(ResponseTemplate::new(204))
                .expect(1)
                .mount(&server)
                .await;

            let client = HttpApiClient::new(&server.uri()).unwrap();
            client.add_session_to_attendee("alice", 42).await.unwrap();
            client.remove_session_from_attendee("alice", 42).await.unwrap();
        }

        #[tokio::test]
        async fn test_server_error_propagates() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/sessions"))
                .respond_with(ResponseTemplate::new(503).set_body_string("down"))
                .mount(&server)
                .await;

            let client = HttpApiClient::new(&server.uri()).unwrap();
            let err = client.get_sessions().await.unwrap_err();
            assert!(matches!(err, Error::Api { status: 503, ref body } if body == "down"));
        }

        #[tokio::test]
        async fn test_bad_json_is_decode_error() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/api/sessions"))
                .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
                .mount(&server)
                .await;

            let client = HttpApiClient::new(&server.uri()).unwrap();
            assert!(matches!(
                client.get_sessions().await,
                Err(Error::Decode(_))
            ));
        }
    }
}
