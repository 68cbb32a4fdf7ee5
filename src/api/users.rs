use serde::{Deserialize, Serialize};

use super::{ApiClient, envelope};
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// The details entered when creating a moderator or admin account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffForm {
    #[serde(default, deserialize_with = "crate::validation::trimmed")]
    pub display_name: String,
    #[serde(default, deserialize_with = "crate::validation::trimmed")]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, deserialize_with = "crate::validation::trimmed")]
    pub phone: String,
}

/// A staff account request: the entered details plus the role fixed by the form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStaffMember {
    pub role: Role,
    pub details: StaffForm,
}

#[derive(Serialize)]
struct CreateUserWithRole<'a> {
    #[serde(flatten)]
    details: &'a StaffForm,
    role: Role,
}

impl ApiClient {
    #[instrument("api.users.list", skip(self), err(Display))]
    pub async fn list_users(&self) -> Result<Vec<User>, human_errors::Error> {
        let value = self
            .get("list users", self.url("/api/users/users"), None)
            .await?;
        envelope::collection("list users", "users", value)
    }

    #[instrument("api.users.get", skip(self, session), err(Display))]
    pub async fn get_user(&self, id: &str, session: &Session) -> Result<User, human_errors::Error> {
        let value = self
            .get(
                "get the user",
                self.resource("/api/users/users", id),
                Some(session),
            )
            .await?;
        envelope::record("get the user", value)
    }

    #[instrument("api.users.delete", skip(self, session), err(Display))]
    pub async fn delete_user(&self, id: &str, session: &Session) -> Result<(), human_errors::Error> {
        self.delete(
            "delete the user",
            self.resource("/api/users/deleteuser", id),
            Some(session),
        )
        .await?;
        Ok(())
    }

    #[instrument("api.users.create_with_role", skip(self, request, session), fields(role = %request.role), err(Display))]
    pub async fn create_user_with_role(
        &self,
        request: &NewStaffMember,
        session: &Session,
    ) -> Result<Option<User>, human_errors::Error> {
        let body = CreateUserWithRole {
            details: &request.details,
            role: request.role,
        };

        let value = self
            .send(
                "create the user",
                reqwest::Method::POST,
                self.url("/api/auth/create-user-with-role"),
                Some(session),
                &body,
            )
            .await?;
        Ok(envelope::optional_record(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lists_users_from_fixture() {
        let mock_server = MockServer::start().await;
        let test_data = crate::testing::get_test_file_contents("users.json");

        Mock::given(method("GET"))
            .and(path("/api/users/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string(test_data))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let users = client.list_users().await.unwrap();

        assert_eq!(users.len(), 4);
        assert_eq!(users[0].id, "u1");
        assert_eq!(users[0].display_name, "Ada Lovelace");
        assert_eq!(users[0].role, Some(Role::Content));
        assert_eq!(users[3].role, Some(Role::Admin));
    }

    #[tokio::test]
    async fn get_user_uses_bearer_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/users/u1"))
            .and(header("Authorization", "Bearer t"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "_id": "u1", "displayName": "Ada", "email": "ada@example.com", "role": "content" }
            })))
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let user = client.get_user("u1", &Session::from_token("t")).await.unwrap();
        assert_eq!(user.display_name, "Ada");
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn delete_user_reports_server_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/users/deleteuser/u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Cannot delete yourself"
            })))
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let err = client
            .delete_user("u1", &Session::from_token("t"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Cannot delete yourself"));
    }

    #[tokio::test]
    async fn create_with_role_injects_the_role() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/create-user-with-role"))
            .and(body_json(json!({
                "displayName": "Grace",
                "email": "grace@example.com",
                "password": "hunter2hunter2",
                "phone": "0123456789",
                "role": "moderator"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "message": "User created"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::with_urls(mock_server.uri(), mock_server.uri()).unwrap();
        let request = NewStaffMember {
            role: Role::Moderator,
            details: StaffForm {
                display_name: "Grace".into(),
                email: "grace@example.com".into(),
                password: "hunter2hunter2".into(),
                phone: "0123456789".into(),
            },
        };

        let created = client
            .create_user_with_role(&request, &Session::from_token("t"))
            .await
            .unwrap();
        assert_eq!(created, None);
    }
}
