use serde::{Deserialize, Serialize};

use super::{ApiClient, envelope};
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "image")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerForm {
    #[serde(default, deserialize_with = "crate::validation::trimmed")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::validation::trimmed")]
    pub image_url: String,
    #[serde(default, deserialize_with = "crate::validation::trimmed", skip_serializing_if = "String::is_empty")]
    pub link: String,
}

impl ApiClient {
    #[instrument("api.banners.list", skip(self), err(Display))]
    pub async fn list_banners(&self) -> Result<Vec<Banner>, human_errors::Error> {
        let value = self
            .get("list banners", self.url("/api/banner"), None)
            .await?;
        envelope::collection("list banners", "banners", value)
    }

    #[instrument("api.banners.create", skip(self, form), err(Display))]
    pub async fn create_banner(
        &self,
        form: &BannerForm,
    ) -> Result<Option<Banner>, human_errors::Error> {
        let value = self
            .send(
                "create the banner",
                reqwest::Method::POST,
                self.url("/api/banner"),
                None,
                form,
            )
            .await?;
        Ok(envelope::optional_record(value))
    }

    #[instrument("api.banners.delete", skip(self), err(Display))]
    pub async fn delete_banner(&self, id: &str) -> Result<(), human_errors::Error> {
        self.delete(
            "delete the banner",
            self.resource("/api/banner", id),
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
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lists_banners_from_fixture() {
        let mock_server = MockServer::start().await;
        let test_data = crate::testing::get_test_file_contents("banners.json");

        Mock::given(method("GET"))
            .and(path("/api/banner"))
            .respond_with(ResponseTemplate::new(200).set_body_string(test_data))
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let banners = client.list_banners().await.unwrap();

        assert_eq!(banners.len(), 2);
        assert_eq!(banners[0].title, "Summer Sale");
        assert_eq!(banners[1].link, None);
    }

    #[tokio::test]
    async fn create_banner_omits_empty_link() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/banner"))
            .and(body_json(json!({
                "title": "Launch",
                "imageUrl": "https://cdn.example.com/launch.png"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "_id": "b9",
                "title": "Launch",
                "imageUrl": "https://cdn.example.com/launch.png"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let created = client
            .create_banner(&BannerForm {
                title: "Launch".into(),
                image_url: "https://cdn.example.com/launch.png".into(),
                link: String::new(),
            })
            .await
            .unwrap();

        assert_eq!(created.map(|b| b.id), Some("b9".to_string()));
    }
}
