use super::{Column, format_timestamp};
use crate::api::{Banner, Comment, LongVideo, Notification, User, VideoCategory};
use crate::prelude::*;

fn timestamp(raw: &Option<String>) -> FilterValue {
    raw.as_deref().map(format_timestamp).into()
}

impl Filterable for User {
    fn get(&self, key: &str) -> FilterValue {
        match key {
            "id" => self.id.as_str().into(),
            "displayName" => self.display_name.as_str().into(),
            "email" => self.email.as_str().into(),
            "phone" => self.phone.as_ref().into(),
            "role" => self.role.map(|r| r.as_str()).into(),
            "createdAt" => timestamp(&self.created_at),
            _ => FilterValue::Null,
        }
    }
}

#[async_trait::async_trait]
impl Record for User {
    const SECTION: Section = Section::Users;
    const SEARCH_FIELD: &'static str = "displayName";
    const COLUMNS: &'static [Column] = &[
        Column::new("displayName", "Name"),
        Column::new("email", "Email"),
        Column::new("phone", "Phone"),
        Column::new("role", "Role"),
        Column::new("createdAt", "Joined"),
    ];
    const HAS_DETAIL: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch_all(
        api: &ApiClient,
        _session: &Session,
    ) -> Result<Vec<Self>, human_errors::Error> {
        api.list_users().await
    }

    async fn remove(
        api: &ApiClient,
        session: &Session,
        id: &str,
    ) -> Result<(), human_errors::Error> {
        api.delete_user(id, session).await
    }
}

impl Filterable for Comment {
    fn get(&self, key: &str) -> FilterValue {
        match key {
            "id" => self.id.as_str().into(),
            "text" => self.text.as_str().into(),
            "user.displayName" => self
                .user
                .as_ref()
                .and_then(|u| u.display_name.as_deref())
                .into(),
            "video.title" => self
                .video
                .as_ref()
                .and_then(|v| v.title.as_deref())
                .into(),
            "createdAt" => timestamp(&self.created_at),
            _ => FilterValue::Null,
        }
    }
}

#[async_trait::async_trait]
impl Record for Comment {
    const SECTION: Section = Section::Comments;
    const SEARCH_FIELD: &'static str = "text";
    const COLUMNS: &'static [Column] = &[
        Column::new("text", "Comment"),
        Column::new("user.displayName", "Author"),
        Column::new("video.title", "Video"),
        Column::new("createdAt", "Posted"),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch_all(
        api: &ApiClient,
        _session: &Session,
    ) -> Result<Vec<Self>, human_errors::Error> {
        api.list_comments().await
    }

    async fn remove(
        api: &ApiClient,
        _session: &Session,
        id: &str,
    ) -> Result<(), human_errors::Error> {
        api.delete_comment(id).await
    }
}

impl Filterable for Banner {
    fn get(&self, key: &str) -> FilterValue {
        match key {
            "id" => self.id.as_str().into(),
            "title" => self.title.as_str().into(),
            "imageUrl" => self.image_url.as_str().into(),
            "link" => self.link.as_ref().into(),
            "createdAt" => timestamp(&self.created_at),
            _ => FilterValue::Null,
        }
    }
}

#[async_trait::async_trait]
impl Record for Banner {
    const SECTION: Section = Section::Banners;
    const SEARCH_FIELD: &'static str = "title";
    const COLUMNS: &'static [Column] = &[
        Column::new("title", "Title"),
        Column::new("imageUrl", "Image"),
        Column::new("link", "Link"),
        Column::new("createdAt", "Created"),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch_all(
        api: &ApiClient,
        _session: &Session,
    ) -> Result<Vec<Self>, human_errors::Error> {
        api.list_banners().await
    }

    async fn remove(
        api: &ApiClient,
        _session: &Session,
        id: &str,
    ) -> Result<(), human_errors::Error> {
        api.delete_banner(id).await
    }
}

impl Filterable for VideoCategory {
    fn get(&self, key: &str) -> FilterValue {
        match key {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "description" => self.description.as_ref().into(),
            "createdAt" => timestamp(&self.created_at),
            _ => FilterValue::Null,
        }
    }
}

#[async_trait::async_trait]
impl Record for VideoCategory {
    const SECTION: Section = Section::VideoCategories;
    const SEARCH_FIELD: &'static str = "name";
    const COLUMNS: &'static [Column] = &[
        Column::new("name", "Name"),
        Column::new("description", "Description"),
        Column::new("createdAt", "Created"),
    ];
    const EDITABLE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch_all(
        api: &ApiClient,
        session: &Session,
    ) -> Result<Vec<Self>, human_errors::Error> {
        api.list_video_categories(session).await
    }

    async fn remove(
        api: &ApiClient,
        session: &Session,
        id: &str,
    ) -> Result<(), human_errors::Error> {
        api.delete_video_category(id, session).await
    }
}

impl Filterable for LongVideo {
    fn get(&self, key: &str) -> FilterValue {
        match key {
            "id" => self.id.as_str().into(),
            "title" => self.title.as_str().into(),
            "description" => self.description.as_ref().into(),
            "videoUrl" => self.video_url.as_str().into(),
            "thumbnailUrl" => self.thumbnail_url.as_ref().into(),
            "category" => self.category.as_ref().into(),
            "createdAt" => timestamp(&self.created_at),
            _ => FilterValue::Null,
        }
    }
}

#[async_trait::async_trait]
impl Record for LongVideo {
    const SECTION: Section = Section::LongVideos;
    const SEARCH_FIELD: &'static str = "title";
    const COLUMNS: &'static [Column] = &[
        Column::new("title", "Title"),
        Column::new("category", "Category"),
        Column::new("videoUrl", "Video"),
        Column::new("createdAt", "Uploaded"),
    ];

    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch_all(
        api: &ApiClient,
        _session: &Session,
    ) -> Result<Vec<Self>, human_errors::Error> {
        api.list_long_videos().await
    }

    async fn remove(
        api: &ApiClient,
        _session: &Session,
        id: &str,
    ) -> Result<(), human_errors::Error> {
        api.delete_long_video(id).await
    }
}

impl Filterable for Notification {
    fn get(&self, key: &str) -> FilterValue {
        match key {
            "id" => self.id.as_str().into(),
            "title" => self.title.as_str().into(),
            "message" => self.message.as_str().into(),
            "createdAt" => timestamp(&self.created_at),
            _ => FilterValue::Null,
        }
    }
}

#[async_trait::async_trait]
impl Record for Notification {
    const SECTION: Section = Section::Notifications;
    const SEARCH_FIELD: &'static str = "title";
    const COLUMNS: &'static [Column] = &[
        Column::new("title", "Title"),
        Column::new("message", "Message"),
        Column::new("createdAt", "Sent"),
    ];
    const DELETABLE: bool = false;

    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch_all(
        api: &ApiClient,
        _session: &Session,
    ) -> Result<Vec<Self>, human_errors::Error> {
        api.list_notifications().await
    }

    async fn remove(
        _api: &ApiClient,
        _session: &Session,
        _id: &str,
    ) -> Result<(), human_errors::Error> {
        Err(human_errors::user(
            "Notifications cannot be deleted once they have been sent.",
            &["Send a follow-up notification to correct or retract the message."],
        ))
    }
}
