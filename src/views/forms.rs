use super::form::{Field, FieldKind, Form};
use crate::api::{
    Banner, BannerForm, CategoryForm, CategoryUpdate, LongVideo, LongVideoForm, NewStaffMember,
    Notification, NotificationForm, User, VideoCategory,
};
use crate::prelude::*;
use crate::validation::{MIN_PASSWORD_LENGTH, PHONE_DIGITS, Rule, ValidationErrors, Validator};

#[async_trait::async_trait]
impl Form for NewStaffMember {
    type Output = Option<User>;
    const SECTION: Section = Section::Users;
    const ACTION: Action = Action::Create;

    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .field("displayName", &self.details.display_name, &[Rule::Required])
            .field("email", &self.details.email, &[Rule::Required, Rule::Email])
            .field(
                "password",
                &self.details.password,
                &[Rule::Required, Rule::MinLength(MIN_PASSWORD_LENGTH)],
            )
            .field(
                "phone",
                &self.details.phone,
                &[Rule::Required, Rule::Digits(PHONE_DIGITS)],
            )
            .finish()
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("displayName", "Display name", FieldKind::Text, &self.details.display_name).required(),
            Field::new("email", "Email", FieldKind::Email, &self.details.email).required(),
            Field::new("password", "Password", FieldKind::Password, &self.details.password).required(),
            Field::new("phone", "Phone number", FieldKind::Phone, &self.details.phone).required(),
        ]
    }

    async fn send(
        &self,
        api: &ApiClient,
        session: &Session,
    ) -> Result<Self::Output, human_errors::Error> {
        api.create_user_with_role(self, session).await
    }
}

#[async_trait::async_trait]
impl Form for BannerForm {
    type Output = Option<Banner>;
    const SECTION: Section = Section::Banners;
    const ACTION: Action = Action::Create;

    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .field("title", &self.title, &[Rule::Required])
            .field("imageUrl", &self.image_url, &[Rule::Required, Rule::Url])
            .field("link", &self.link, &[Rule::Url])
            .finish()
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("title", "Title", FieldKind::Text, &self.title).required(),
            Field::new("imageUrl", "Image URL", FieldKind::Url, &self.image_url).required(),
            Field::new("link", "Link", FieldKind::Url, &self.link),
        ]
    }

    async fn send(
        &self,
        api: &ApiClient,
        _session: &Session,
    ) -> Result<Self::Output, human_errors::Error> {
        api.create_banner(self).await
    }
}

fn category_fields(form: &CategoryForm) -> Vec<Field> {
    vec![
        Field::new("name", "Name", FieldKind::Text, &form.name).required(),
        Field::new("description", "Description", FieldKind::TextArea, &form.description),
    ]
}

fn validate_category(form: &CategoryForm) -> Result<(), ValidationErrors> {
    Validator::new()
        .field("name", &form.name, &[Rule::Required])
        .finish()
}

#[async_trait::async_trait]
impl Form for CategoryForm {
    type Output = Option<VideoCategory>;
    const SECTION: Section = Section::VideoCategories;
    const ACTION: Action = Action::Create;

    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_category(self)
    }

    fn fields(&self) -> Vec<Field> {
        category_fields(self)
    }

    async fn send(
        &self,
        api: &ApiClient,
        session: &Session,
    ) -> Result<Self::Output, human_errors::Error> {
        api.create_video_category(self, session).await
    }
}

#[async_trait::async_trait]
impl Form for CategoryUpdate {
    type Output = Option<VideoCategory>;
    const SECTION: Section = Section::VideoCategories;
    const ACTION: Action = Action::Edit;

    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_category(&self.form)
    }

    fn fields(&self) -> Vec<Field> {
        category_fields(&self.form)
    }

    async fn send(
        &self,
        api: &ApiClient,
        session: &Session,
    ) -> Result<Self::Output, human_errors::Error> {
        api.update_video_category(self, session).await
    }
}

impl CategoryUpdate {
    /// Loads the category and pre-populates the edit form with its current values.
    pub async fn load(
        api: &ApiClient,
        session: &Session,
        id: &str,
    ) -> Result<Self, human_errors::Error> {
        let category = api.get_video_category(id, session).await?;
        Ok(Self {
            id: category.id.clone(),
            form: category.into(),
        })
    }
}

#[async_trait::async_trait]
impl Form for LongVideoForm {
    type Output = Option<LongVideo>;
    const SECTION: Section = Section::LongVideos;
    const ACTION: Action = Action::Create;

    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .field("title", &self.title, &[Rule::Required])
            .field("videoUrl", &self.video_url, &[Rule::Required, Rule::Url])
            .field("thumbnailUrl", &self.thumbnail_url, &[Rule::Url])
            .finish()
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("title", "Title", FieldKind::Text, &self.title).required(),
            Field::new("description", "Description", FieldKind::TextArea, &self.description),
            Field::new("videoUrl", "Video URL", FieldKind::Url, &self.video_url).required(),
            Field::new("thumbnailUrl", "Thumbnail URL", FieldKind::Url, &self.thumbnail_url),
            Field::new("category", "Category", FieldKind::Text, &self.category),
        ]
    }

    async fn send(
        &self,
        api: &ApiClient,
        _session: &Session,
    ) -> Result<Self::Output, human_errors::Error> {
        api.create_long_video(self).await
    }
}

#[async_trait::async_trait]
impl Form for NotificationForm {
    type Output = Option<Notification>;
    const SECTION: Section = Section::Notifications;
    const ACTION: Action = Action::Create;

    fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .field("title", &self.title, &[Rule::Required])
            .field("message", &self.message, &[Rule::Required])
            .finish()
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("title", "Title", FieldKind::Text, &self.title).required(),
            Field::new("message", "Message", FieldKind::TextArea, &self.message).required(),
        ]
    }

    async fn send(
        &self,
        api: &ApiClient,
        _session: &Session,
    ) -> Result<Self::Output, human_errors::Error> {
        api.create_notification(self).await
    }
}
