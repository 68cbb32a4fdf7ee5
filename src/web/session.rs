use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::{HttpServiceFactory, Payload};
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use futures::future::{Ready, ready};
use serde::Deserialize;
use yew::html;

use crate::prelude::*;
use crate::session::TOKEN_COOKIE;
use crate::ui::{Center, render_page};

/// Reads the session from the token cookie once per request.
impl FromRequest for Session {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req
            .cookie(TOKEN_COOKIE)
            .map(|cookie| Session::from_token(cookie.value()))
            .unwrap_or_default();
        ready(Ok(session))
    }
}

pub fn configure() -> impl HttpServiceFactory {
    web::scope("/session")
        .route("", web::get().to(sign_in))
        .route("", web::post().to(store_token))
        .route("/logout", web::post().to(sign_out))
}

#[derive(Deserialize)]
pub struct TokenForm {
    #[serde(default)]
    token: String,
}

async fn sign_in(session: Session) -> HttpResponse {
    render_page("Sign in | Media Admin", &session, || {
        html! {
            <Center>
                <h1>{ "Sign in" }</h1>
                <p>{ "Paste the access token issued by the media platform to manage its content." }</p>
                <form method="post" action="/session">
                    <input type="password" name="token" placeholder="Access token" required=true />
                    <button type="submit">{ "Sign in" }</button>
                </form>
            </Center>
        }
    })
    .await
}

/// Builds the token cookie. It is never sent on cross-site requests, and only over TLS
/// when the dashboard itself is served over https.
fn token_cookie(req: &HttpRequest, value: String) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(req.connection_info().scheme() == "https")
        .finish()
}

#[instrument("web.session.store", skip(req, form))]
async fn store_token(req: HttpRequest, form: web::Form<TokenForm>) -> HttpResponse {
    let session = Session::from_token(form.token.as_str());
    match session.principal() {
        Some(principal) => info!("Signed in as {principal}."),
        None => warn!("Stored a session token which does not identify a principal."),
    }

    let cookie = token_cookie(&req, form.token.trim().to_string());

    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, "/"))
        .cookie(cookie)
        .finish()
}

async fn sign_out(req: HttpRequest) -> HttpResponse {
    let mut cookie = token_cookie(&req, String::new());
    cookie.make_removal();

    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, "/session"))
        .cookie(cookie)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use serde_json::json;

    #[actix_web::test]
    async fn storing_a_token_sets_the_cookie() {
        let app = test::init_service(App::new().service(configure())).await;
        let token = crate::session::encode_test_token(json!({ "id": "1", "role": "admin" }));

        let req = test::TestRequest::post()
            .uri("/session")
            .set_form([("token", token.as_str())])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == TOKEN_COOKIE)
            .expect("token cookie should be set");
        assert_eq!(cookie.value(), token);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[actix_web::test]
    async fn token_cookie_is_secure_behind_https() {
        let app = test::init_service(App::new().service(configure())).await;

        let req = test::TestRequest::post()
            .uri("/session")
            .insert_header(("X-Forwarded-Proto", "https"))
            .set_form([("token", "opaque-token")])
            .to_request();
        let resp = test::call_service(&app, req).await;

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == TOKEN_COOKIE)
            .expect("token cookie should be set");
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    }

    #[actix_web::test]
    async fn signing_out_clears_the_cookie_with_the_same_attributes() {
        let app = test::init_service(App::new().service(configure())).await;

        let req = test::TestRequest::post().uri("/session/logout").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == TOKEN_COOKIE)
            .expect("removal cookie should be set");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    }

    #[actix_web::test]
    async fn session_is_extracted_from_the_cookie() {
        let token = crate::session::encode_test_token(json!({ "id": "7", "role": "moderator" }));
        let req = test::TestRequest::default()
            .cookie(Cookie::new(TOKEN_COOKIE, token))
            .to_http_request();

        let session = Session::extract(&req).await.unwrap();
        assert_eq!(session.role(), Some(Role::Moderator));

        let anonymous = Session::extract(&test::TestRequest::default().to_http_request())
            .await
            .unwrap();
        assert!(anonymous.principal().is_none());
    }
}
