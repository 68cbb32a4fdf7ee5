use serde::{Deserialize, Serialize};

use super::{ApiClient, envelope};
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "body")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationForm {
    #[serde(default, deserialize_with = "crate::validation::trimmed")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::validation::trimmed")]
    pub message: String,
}

impl ApiClient {
    #[instrument("api.notifications.list", skip(self), err(Display))]
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, human_errors::Error> {
        let value = self
            .get("list notifications", self.notifications("/notifications"), None)
            .await?;
        envelope::collection("list notifications", "notifications", value)
    }

    #[instrument("api.notifications.create", skip(self, form), err(Display))]
    pub async fn create_notification(
        &self,
        form: &NotificationForm,
    ) -> Result<Option<Notification>, human_errors::Error> {
        let value = self
            .send(
                "send the notification",
                reqwest::Method::POST,
                self.notifications("/notifications"),
                None,
                form,
            )
            .await?;
        Ok(envelope::optional_record(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn notifications_use_their_own_host() {
        let api = MockServer::start().await;
        let notifications = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/notifications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "_id": "n1", "title": "Maintenance", "message": "Tonight at 10pm" }
            ])))
            .expect(1)
            .mount(&notifications)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&api)
            .await;

        let client = ApiClient::with_urls(api.uri(), notifications.uri()).unwrap();
        let items = client.list_notifications().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].message, "Tonight at 10pm");
    }
}
