use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::prelude::*;

pub mod envelope;

mod banners;
mod comments;
mod long_videos;
mod notifications;
mod users;
mod video_categories;

pub use banners::{Banner, BannerForm};
pub use comments::Comment;
pub use long_videos::{LongVideo, LongVideoForm};
pub use notifications::{Notification, NotificationForm};
pub use users::{NewStaffMember, StaffForm, User};
pub use video_categories::{CategoryForm, CategoryUpdate, VideoCategory};

/// Thin client for the media platform's REST API. Each operation maps to exactly one request.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    notifications_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, human_errors::Error> {
        Self::with_urls(config.base_url()?, config.notifications_url()?)
    }

    pub fn with_urls(
        base_url: impl ToString,
        notifications_url: impl ToString,
    ) -> Result<Self, human_errors::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("media-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err_as_system(&["Report the issue to the development team on GitHub."])?;

        Ok(Self {
            http,
            base_url: base_url.to_string().trim_end_matches('/').to_string(),
            notifications_url: notifications_url.to_string().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of one record; the id is percent-encoded so it always stays a single path segment.
    fn resource(&self, path: &str, id: &str) -> String {
        format!("{}{}/{}", self.base_url, path, urlencoding::encode(id))
    }

    fn notifications(&self, path: &str) -> String {
        format!("{}{}", self.notifications_url, path)
    }

    fn request(&self, method: Method, url: String, session: Option<&Session>) -> RequestBuilder {
        let request = self.http.request(method, url);
        match session.and_then(Session::token) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get(
        &self,
        operation: &str,
        url: String,
        session: Option<&Session>,
    ) -> Result<Value, human_errors::Error> {
        self.execute(operation, self.request(Method::GET, url, session))
            .await
    }

    async fn delete(
        &self,
        operation: &str,
        url: String,
        session: Option<&Session>,
    ) -> Result<Value, human_errors::Error> {
        self.execute(operation, self.request(Method::DELETE, url, session))
            .await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        operation: &str,
        method: Method,
        url: String,
        session: Option<&Session>,
        body: &B,
    ) -> Result<Value, human_errors::Error> {
        self.execute(operation, self.request(method, url, session).json(body))
            .await
    }

    async fn execute(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<Value, human_errors::Error> {
        let response = request
            .send()
            .await
            .inspect_err(|err| error!(error = %err, "Request to {operation} failed to reach the backend."))
            .wrap_err_as_user(
                format!("We were unable to reach the backend to {operation}."),
                &[
                    "Make sure that your network connection is working properly.",
                    "Check that the configured API address is correct and the backend is running.",
                ],
            )?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .inspect_err(|err| error!(error = %err, "Failed to read the backend's response to {operation}."))
            .wrap_err_as_user(
                format!("We could not read the backend's response while trying to {operation}."),
                &["Try again later, as the server may be temporarily unavailable."],
            )?;

        debug!(status = status.as_u16(), "Backend responded to {operation}.");
        envelope::interpret(operation, status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let client = ApiClient::with_urls("http://127.0.0.1:9", "http://127.0.0.1:9").unwrap();
        let err = client.list_banners().await.unwrap_err();
        assert!(err.to_string().contains("unable to reach the backend"));
    }

    #[tokio::test]
    async fn bearer_token_is_attached_when_present() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/video-category"))
            .and(header("Authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let session = Session::from_token("secret-token");

        let categories = client.list_video_categories(&session).await.unwrap();
        assert!(categories.is_empty());
    }

    #[test]
    fn record_ids_stay_in_one_path_segment() {
        let client = ApiClient::with_urls("https://api.example.com", "https://api.example.com").unwrap();
        assert_eq!(
            client.resource("/api/users/deleteuser", "../../banner/b1"),
            "https://api.example.com/api/users/deleteuser/..%2F..%2Fbanner%2Fb1"
        );
        assert_eq!(
            client.resource("/api/comments", "c1?force=true#x"),
            "https://api.example.com/api/comments/c1%3Fforce%3Dtrue%23x"
        );
    }

    #[tokio::test]
    async fn dot_segments_in_ids_cannot_reach_another_resource() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/banner/b1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/api/users/deleteuser/..%2F..%2Fbanner%2Fb1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "User not found"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let err = client
            .delete_user("../../banner/b1", &Session::from_token("t"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("User not found"));
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = ApiClient::with_urls("https://api.example.com/", "https://n.example.com/").unwrap();
        assert_eq!(client.url("/api/banner"), "https://api.example.com/api/banner");
        assert_eq!(
            client.notifications("/notifications"),
            "https://n.example.com/notifications"
        );
    }
}
