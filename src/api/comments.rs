use serde::{Deserialize, Serialize};

use super::{ApiClient, envelope};
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, alias = "content")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<CommentAuthor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<CommentVideo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentVideo {
    #[serde(default)]
    pub title: Option<String>,
}

impl ApiClient {
    #[instrument("api.comments.list", skip(self), err(Display))]
    pub async fn list_comments(&self) -> Result<Vec<Comment>, human_errors::Error> {
        let value = self
            .get("list comments", self.url("/api/comments"), None)
            .await?;
        envelope::collection("list comments", "comments", value)
    }

    #[instrument("api.comments.delete", skip(self), err(Display))]
    pub async fn delete_comment(&self, id: &str) -> Result<(), human_errors::Error> {
        self.delete(
            "delete the comment",
            self.resource("/api/comments", id),
            None,
        )
        .await?;
        Ok(())
    }
}
