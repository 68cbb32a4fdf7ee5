use serde::{Deserialize, Serialize};

use super::{ApiClient, envelope};
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongVideo {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub video_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongVideoForm {
    #[serde(default, deserialize_with = "crate::validation::trimmed")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::validation::trimmed", skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::validation::trimmed")]
    pub video_url: String,
    #[serde(default, deserialize_with = "crate::validation::trimmed", skip_serializing_if = "String::is_empty")]
    pub thumbnail_url: String,
    #[serde(default, deserialize_with = "crate::validation::trimmed", skip_serializing_if = "String::is_empty")]
    pub category: String,
}

impl ApiClient {
    #[instrument("api.long_videos.list", skip(self), err(Display))]
    pub async fn list_long_videos(&self) -> Result<Vec<LongVideo>, human_errors::Error> {
        let value = self
            .get("list long videos", self.url("/api/longVideo"), None)
            .await?;
        envelope::collection("list long videos", "videos", value)
    }

    #[instrument("api.long_videos.create", skip(self, form), err(Display))]
    pub async fn create_long_video(
        &self,
        form: &LongVideoForm,
    ) -> Result<Option<LongVideo>, human_errors::Error> {
        let value = self
            .send(
                "create the long video",
                reqwest::Method::POST,
                self.url("/api/longVideo"),
                None,
                form,
            )
            .await?;
        Ok(envelope::optional_record(value))
    }

    #[instrument("api.long_videos.delete", skip(self), err(Display))]
    pub async fn delete_long_video(&self, id: &str) -> Result<(), human_errors::Error> {
        self.delete(
            "delete the long video",
            self.resource("/api/longVideo", id),
            None,
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lists_videos_from_an_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/longVideo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "videos": [
                    { "_id": "lv1", "title": "Documentary", "videoUrl": "https://cdn.example.com/doc.mp4" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let videos = client.list_long_videos().await.unwrap();

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_url, "https://cdn.example.com/doc.mp4");
    }

    #[tokio::test]
    async fn delete_failure_is_surfaced() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/longVideo/lv1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Video not found" })))
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let err = client.delete_long_video("lv1").await.unwrap_err();
        assert!(err.to_string().contains("Video not found"));
    }
}
