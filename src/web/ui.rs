use actix_web::http::StatusCode;
use yew::html;

use crate::prelude::*;
use crate::ui::{Center, render_page, render_page_with_status};

pub async fn index(session: Session) -> actix_web::HttpResponse {
    let sections = session
        .visible_sections()
        .into_iter()
        .map(|s| (s.title(), s.path()))
        .collect::<Vec<_>>();
    let greeting = session
        .principal()
        .map(|p| format!("Signed in as {p}."))
        .unwrap_or_else(|| "Sign in with your access token to manage the platform.".to_string());

    render_page("Dashboard | Media Admin", &session, move || {
        html! {
            <Center>
                <h1>{ "Media Admin" }</h1>
                <p>{ greeting }</p>
                <ul class="sections">
                    { for sections.into_iter().map(|(title, path)| html! {
                        <li><a href={path}>{ title }</a></li>
                    }) }
                </ul>
            </Center>
        }
    })
    .await
}

pub async fn not_found(session: Session) -> actix_web::HttpResponse {
    error_page(
        &session,
        StatusCode::NOT_FOUND,
        "Not Found",
        "The page you are looking for does not exist.",
    )
    .await
}

pub async fn forbidden(session: &Session) -> actix_web::HttpResponse {
    let message = if session.principal().is_some() {
        "Your role does not allow you to access this page."
    } else {
        "You need to sign in before you can access this page."
    };

    error_page(session, StatusCode::FORBIDDEN, "Forbidden", message).await
}

/// Shown when a backend call fails before anything could be rendered.
pub async fn backend_error(session: &Session, err: &human_errors::Error) -> actix_web::HttpResponse {
    error!(error = %err, "A backend call failed while rendering a page.");
    error_page(
        session,
        StatusCode::BAD_GATEWAY,
        "Backend Unavailable",
        err.to_string(),
    )
    .await
}

pub async fn error_page(
    session: &Session,
    code: StatusCode,
    title: impl ToString,
    message: impl ToString,
) -> actix_web::HttpResponse {
    let title = title.to_string();
    let message = message.to_string();

    render_page_with_status(code, format!("{} | Media Admin", title), session, move || {
        html! {
            <Center>
                <h1><strong>{ code.as_u16() }</strong> { " " } { title }</h1>
                <p>{ message }</p>
            </Center>
        }
    })
    .await
}
