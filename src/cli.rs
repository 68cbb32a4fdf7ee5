use crate::api::{Banner, Comment, LongVideo, Notification, User, VideoCategory};
use crate::prelude::*;
use crate::views::{Confirmation, DeleteOutcome, ListView};

pub fn parse_section(slug: &str) -> Result<Section, human_errors::Error> {
    Section::from_slug(slug).ok_or_else(|| {
        human_errors::user(
            format!("'{slug}' is not a section of the dashboard."),
            &[
                "Use one of: users, comments, banners, categories, videos, notifications.",
            ],
        )
    })
}

fn permission_denied(session: &Session, action: Action, section: Section) -> human_errors::Error {
    let who = session
        .principal()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "An anonymous session".to_string());

    human_errors::user(
        format!("{who} is not allowed to {action:?} {}.", section.slug()),
        &[
            "Set session.token in your configuration (or MEDIA_ADMIN_TOKEN) to a token with the required role.",
        ],
    )
}

/// Renders the visible rows of a section as tab-separated lines, headers first.
pub async fn list(
    api: &ApiClient,
    session: &Session,
    section: Section,
    search: &str,
    tab: Option<&str>,
) -> Result<String, human_errors::Error> {
    match section {
        Section::Users => list_records::<User>(api, session, search, tab).await,
        Section::Comments => list_records::<Comment>(api, session, search, tab).await,
        Section::Banners => list_records::<Banner>(api, session, search, tab).await,
        Section::VideoCategories => list_records::<VideoCategory>(api, session, search, tab).await,
        Section::LongVideos => list_records::<LongVideo>(api, session, search, tab).await,
        Section::Notifications => list_records::<Notification>(api, session, search, tab).await,
    }
}

async fn list_records<T: Record>(
    api: &ApiClient,
    session: &Session,
    search: &str,
    tab: Option<&str>,
) -> Result<String, human_errors::Error> {
    if !session.can(Action::View, T::SECTION) {
        return Err(permission_denied(session, Action::View, T::SECTION));
    }

    let mut view = ListView::<T>::load(api, session).await?;
    view.apply(session, search, tab);

    let mut lines = Vec::with_capacity(view.visible().len() + 1);
    lines.push(
        std::iter::once("ID")
            .chain(T::COLUMNS.iter().map(|c| c.title))
            .collect::<Vec<_>>()
            .join("\t"),
    );
    for row in view.rows(session) {
        lines.push(
            std::iter::once(row.id)
                .chain(row.cells)
                .collect::<Vec<_>>()
                .join("\t"),
        );
    }

    Ok(lines.join("\n"))
}

pub async fn delete(
    api: &ApiClient,
    session: &Session,
    section: Section,
    id: &str,
    confirmed: bool,
) -> Result<(), human_errors::Error> {
    match section {
        Section::Users => delete_record::<User>(api, session, id, confirmed).await,
        Section::Comments => delete_record::<Comment>(api, session, id, confirmed).await,
        Section::Banners => delete_record::<Banner>(api, session, id, confirmed).await,
        Section::VideoCategories => delete_record::<VideoCategory>(api, session, id, confirmed).await,
        Section::LongVideos => delete_record::<LongVideo>(api, session, id, confirmed).await,
        Section::Notifications => delete_record::<Notification>(api, session, id, confirmed).await,
    }
}

async fn delete_record<T: Record>(
    api: &ApiClient,
    session: &Session,
    id: &str,
    confirmed: bool,
) -> Result<(), human_errors::Error> {
    if !T::DELETABLE {
        return Err(human_errors::user(
            format!("Records in {} cannot be deleted.", T::SECTION.slug()),
            &["Only users, comments, banners, categories and videos support deletion."],
        ));
    }

    if !session.can(Action::Delete, T::SECTION) {
        return Err(permission_denied(session, Action::Delete, T::SECTION));
    }

    let confirmation = if confirmed {
        Confirmation::Confirmed
    } else {
        Confirmation::Pending
    };

    let mut view = ListView::<T>::new(Vec::new());
    match view.delete(api, session, id, confirmation).await {
        DeleteOutcome::Deleted => Ok(()),
        DeleteOutcome::NeedsConfirmation => Err(human_errors::user(
            format!("Deleting '{id}' from {} needs confirmation.", T::SECTION.slug()),
            &["Run the command again with --yes to permanently delete the record."],
        )),
        DeleteOutcome::Failed(message) => Err(human_errors::user(
            message,
            &["Check that the record still exists and that your role allows deleting it."],
        )),
    }
}

pub fn whoami(session: &Session) -> String {
    match session.principal() {
        Some(principal) => principal.to_string(),
        None if session.token().is_some() => {
            "The configured token could not be decoded; requests will be sent without a known role."
                .to_string()
        }
        None => "Not signed in.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::encode_test_token;
    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session(role: &str) -> Session {
        Session::from_token(encode_test_token(json!({ "id": "cli", "role": role })))
    }

    #[rstest]
    #[case("users", Section::Users)]
    #[case("categories", Section::VideoCategories)]
    #[case("videos", Section::LongVideos)]
    fn sections_parse_from_slugs(#[case] slug: &str, #[case] expected: Section) {
        assert_eq!(parse_section(slug).unwrap(), expected);
    }

    #[test]
    fn unknown_section_is_a_user_error() {
        assert!(parse_section("playlists").is_err());
    }

    #[tokio::test]
    async fn lists_searched_rows_as_tab_separated_lines() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/banner"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(crate::testing::get_test_file_contents("banners.json")),
            )
            .mount(&mock_server)
            .await;

        let api = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let output = list(&api, &session("content"), Section::Banners, "summer", None)
            .await
            .unwrap();

        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID\t"));
        assert!(lines[1].starts_with("b1\tSummer Sale\t"));
    }

    #[tokio::test]
    async fn moderator_listing_is_limited_to_content_users() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/users"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(crate::testing::get_test_file_contents("users.json")),
            )
            .mount(&mock_server)
            .await;

        let api = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let output = list(&api, &session("moderator"), Section::Users, "", Some("admins"))
            .await
            .unwrap();

        assert!(output.contains("Ada Lovelace"));
        assert!(!output.contains("Root Admin"));
        assert!(!output.contains("Grace Hopper"));
    }

    #[tokio::test]
    async fn listing_without_permission_makes_no_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let api = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let err = list(&api, &session("content"), Section::Users, "", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not allowed"));
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let api = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let err = delete(&api, &session("moderator"), Section::Comments, "c1", false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--yes"));
    }

    #[tokio::test]
    async fn confirmed_delete_calls_the_backend_once() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/comments/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        delete(&api, &session("moderator"), Section::Comments, "c1", true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn notifications_cannot_be_deleted() {
        let mock_server = MockServer::start().await;
        let api = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        assert!(
            delete(&api, &session("admin"), Section::Notifications, "n1", true)
                .await
                .is_err()
        );
    }

    #[test]
    fn whoami_describes_the_session() {
        assert_eq!(whoami(&session("admin")), "cli (admin)");
        assert_eq!(whoami(&Session::anonymous()), "Not signed in.");
        assert!(whoami(&Session::from_token("garbage")).contains("could not be decoded"));
    }
}
