use serde::{Deserialize, Serialize};

use super::{ApiClient, envelope};
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCategory {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryForm {
    #[serde(default, deserialize_with = "crate::validation::trimmed")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::validation::trimmed", skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl From<VideoCategory> for CategoryForm {
    fn from(category: VideoCategory) -> Self {
        Self {
            name: category.name,
            description: category.description.unwrap_or_default(),
        }
    }
}

/// A full replacement of an existing category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    pub id: String,
    pub form: CategoryForm,
}

impl ApiClient {
    #[instrument("api.video_categories.list", skip(self, session), err(Display))]
    pub async fn list_video_categories(
        &self,
        session: &Session,
    ) -> Result<Vec<VideoCategory>, human_errors::Error> {
        let value = self
            .get(
                "list video categories",
                self.url("/api/video-category"),
                Some(session),
            )
            .await?;
        envelope::collection("list video categories", "categories", value)
    }

    #[instrument("api.video_categories.get", skip(self, session), err(Display))]
    pub async fn get_video_category(
        &self,
        id: &str,
        session: &Session,
    ) -> Result<VideoCategory, human_errors::Error> {
        let value = self
            .get(
                "get the video category",
                self.resource("/api/video-category", id),
                Some(session),
            )
            .await?;
        envelope::record("get the video category", value)
    }

    #[instrument("api.video_categories.create", skip(self, form, session), err(Display))]
    pub async fn create_video_category(
        &self,
        form: &CategoryForm,
        session: &Session,
    ) -> Result<Option<VideoCategory>, human_errors::Error> {
        let value = self
            .send(
                "create the video category",
                reqwest::Method::POST,
                self.url("/api/video-category"),
                Some(session),
                form,
            )
            .await?;
        Ok(envelope::optional_record(value))
    }

    #[instrument("api.video_categories.update", skip(self, update, session), fields(id = %update.id), err(Display))]
    pub async fn update_video_category(
        &self,
        update: &CategoryUpdate,
        session: &Session,
    ) -> Result<Option<VideoCategory>, human_errors::Error> {
        let value = self
            .send(
                "update the video category",
                reqwest::Method::PUT,
                self.resource("/api/video-category", &update.id),
                Some(session),
                &update.form,
            )
            .await?;
        Ok(envelope::optional_record(value))
    }

    #[instrument("api.video_categories.delete", skip(self, session), err(Display))]
    pub async fn delete_video_category(
        &self,
        id: &str,
        session: &Session,
    ) -> Result<(), human_errors::Error> {
        self.delete(
            "delete the video category",
            self.resource("/api/video-category", id),
            Some(session),
        )
        .await?;
        Ok(())
    }
}
