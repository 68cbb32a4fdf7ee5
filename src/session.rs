use std::fmt::Display;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use tracing_batteries::prelude::*;

/// Name of the cookie carrying the bearer token for the web dashboard.
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Content,
    Moderator,
    Admin,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Content => "content",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The areas of the dashboard, each backed by one kind of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Users,
    Comments,
    Banners,
    VideoCategories,
    LongVideos,
    Notifications,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Users,
        Section::Comments,
        Section::Banners,
        Section::VideoCategories,
        Section::LongVideos,
        Section::Notifications,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Users => "users",
            Section::Comments => "comments",
            Section::Banners => "banners",
            Section::VideoCategories => "categories",
            Section::LongVideos => "videos",
            Section::Notifications => "notifications",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Users => "Users",
            Section::Comments => "Comments",
            Section::Banners => "Banners",
            Section::VideoCategories => "Video Categories",
            Section::LongVideos => "Long Videos",
            Section::Notifications => "Notifications",
        }
    }

    pub fn path(&self) -> String {
        format!("/{}", self.slug())
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

/// Tabs on the users page, each scoping the list to one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserTab {
    Users,
    Moderators,
    Admins,
}

impl UserTab {
    pub const ALL: [UserTab; 3] = [UserTab::Users, UserTab::Moderators, UserTab::Admins];

    pub fn slug(&self) -> &'static str {
        match self {
            UserTab::Users => "users",
            UserTab::Moderators => "moderators",
            UserTab::Admins => "admins",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            UserTab::Users => "Users",
            UserTab::Moderators => "Moderators",
            UserTab::Admins => "Admins",
        }
    }

    pub fn role(&self) -> Role {
        match self {
            UserTab::Users => Role::Content,
            UserTab::Moderators => Role::Moderator,
            UserTab::Admins => Role::Admin,
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub identity: String,
    pub role: Role,
}

impl Principal {
    pub fn can(&self, action: Action, section: Section) -> bool {
        use Action::*;
        use Section::*;

        match self.role {
            Role::Admin => true,
            Role::Moderator => matches!(
                (section, action),
                (Users, View) | (Comments, View) | (Comments, Delete) | (Notifications, View) | (Notifications, Create)
            ),
            Role::Content => match section {
                Banners | VideoCategories | LongVideos => true,
                Comments => action == View,
                _ => false,
            },
            Role::Unknown => false,
        }
    }

    pub fn visible_tabs(&self) -> Vec<UserTab> {
        match self.role {
            Role::Admin => UserTab::ALL.to_vec(),
            Role::Moderator => vec![UserTab::Users],
            Role::Content | Role::Unknown => Vec::new(),
        }
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.identity, self.role)
    }
}

/// The acting session, passed explicitly to views and privileged API calls.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    principal: Option<Principal>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Decodes the principal from `token` once. A token which cannot be decoded is
    /// still kept for bearer authentication, but leaves the principal empty.
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim().to_string();
        if token.is_empty() {
            return Self::anonymous();
        }

        let principal = match decode_principal(&token) {
            Ok(principal) => Some(principal),
            Err(reason) => {
                debug!("Unable to decode the session token, continuing without a principal: {reason}");
                None
            }
        };

        Self {
            token: Some(token),
            principal,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.principal.as_ref().map(|p| p.role)
    }

    pub fn can(&self, action: Action, section: Section) -> bool {
        self.principal
            .as_ref()
            .map(|p| p.can(action, section))
            .unwrap_or(false)
    }

    pub fn visible_tabs(&self) -> Vec<UserTab> {
        self.principal
            .as_ref()
            .map(|p| p.visible_tabs())
            .unwrap_or_default()
    }

    pub fn visible_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| self.can(Action::View, *s))
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenClaims {
    id: Option<String>,
    #[serde(rename = "_id")]
    object_id: Option<String>,
    user_id: Option<String>,
    sub: Option<String>,
    email: Option<String>,
    role: Option<Role>,
}

fn decode_principal(token: &str) -> Result<Principal, String> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err("the token is not made up of three segments".into()),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| format!("the token payload is not valid base64: {e}"))?;
    let claims: TokenClaims = serde_json::from_slice(&bytes)
        .map_err(|e| format!("the token payload is not valid JSON: {e}"))?;

    let identity = claims
        .id
        .or(claims.object_id)
        .or(claims.user_id)
        .or(claims.sub)
        .or(claims.email)
        .ok_or("the token does not identify a user")?;
    let role = claims.role.ok_or("the token does not carry a role")?;

    Ok(Principal { identity, role })
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: serde_json::Value) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn decodes_identity_and_role() {
        let session = Session::from_token(encode_test_token(json!({ "id": "42", "role": "admin" })));
        assert_eq!(
            session.principal(),
            Some(&Principal {
                identity: "42".into(),
                role: Role::Admin
            })
        );
        assert!(session.token().is_some());
    }

    #[rstest]
    #[case(json!({ "_id": "a", "role": "moderator" }), "a")]
    #[case(json!({ "userId": "b", "role": "moderator" }), "b")]
    #[case(json!({ "sub": "c", "role": "moderator" }), "c")]
    #[case(json!({ "email": "d@example.com", "role": "moderator" }), "d@example.com")]
    fn identity_claim_aliases(#[case] claims: serde_json::Value, #[case] identity: &str) {
        let session = Session::from_token(encode_test_token(claims));
        assert_eq!(session.principal().map(|p| p.identity.as_str()), Some(identity));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-token")]
    #[case("a.!!!.c")]
    #[case("a.bm90IGpzb24.c")]
    fn invalid_tokens_degrade_silently(#[case] token: &str) {
        let session = Session::from_token(token);
        assert!(session.principal().is_none());
        assert!(session.visible_sections().is_empty());
        assert!(session.visible_tabs().is_empty());
    }

    #[test]
    fn missing_role_leaves_principal_empty() {
        let session = Session::from_token(encode_test_token(json!({ "id": "1" })));
        assert!(session.principal().is_none());
        assert_eq!(session.token().map(|t| t.is_empty()), Some(false));
    }

    #[test]
    fn unknown_roles_are_granted_nothing() {
        let session = Session::from_token(encode_test_token(json!({ "id": "1", "role": "viewer" })));
        assert_eq!(session.role(), Some(Role::Unknown));
        assert!(session.visible_sections().is_empty());
    }

    #[test]
    fn moderators_never_see_staff_tabs() {
        let session = Session::from_token(encode_test_token(json!({ "id": "1", "role": "moderator" })));
        assert_eq!(session.visible_tabs(), vec![UserTab::Users]);
    }

    #[test]
    fn admins_see_every_tab() {
        let session = Session::from_token(encode_test_token(json!({ "id": "1", "role": "admin" })));
        assert_eq!(
            session.visible_tabs(),
            vec![UserTab::Users, UserTab::Moderators, UserTab::Admins]
        );
    }

    #[rstest]
    #[case(Role::Admin, Action::Delete, Section::Users, true)]
    #[case(Role::Moderator, Action::View, Section::Users, true)]
    #[case(Role::Moderator, Action::Delete, Section::Users, false)]
    #[case(Role::Moderator, Action::Create, Section::Users, false)]
    #[case(Role::Moderator, Action::Delete, Section::Comments, true)]
    #[case(Role::Moderator, Action::View, Section::Banners, false)]
    #[case(Role::Content, Action::Create, Section::Banners, true)]
    #[case(Role::Content, Action::Edit, Section::VideoCategories, true)]
    #[case(Role::Content, Action::Delete, Section::Comments, false)]
    #[case(Role::Content, Action::View, Section::Users, false)]
    fn permission_matrix(
        #[case] role: Role,
        #[case] action: Action,
        #[case] section: Section,
        #[case] allowed: bool,
    ) {
        let principal = Principal {
            identity: "x".into(),
            role,
        };
        assert_eq!(principal.can(action, section), allowed);
    }

    #[test]
    fn sections_round_trip_through_slugs() {
        for section in Section::ALL {
            assert_eq!(Section::from_slug(section.slug()), Some(section));
        }
        assert_eq!(Section::from_slug("nope"), None);
    }
}
