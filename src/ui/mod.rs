use actix_web::http::StatusCode;
use yew::{Html, ServerRenderer};

use crate::session::Session;

mod form;
mod helpers;
mod page;
mod table;

pub use form::*;
pub use helpers::*;
pub use page::*;
pub use table::*;

pub async fn render_page<F>(title: impl ToString, session: &Session, children: F) -> actix_web::HttpResponse
where
    F: FnOnce() -> Html + 'static + Send,
{
    render_page_with_status(StatusCode::OK, title, session, children).await
}

pub async fn render_page_with_status<F>(
    status: StatusCode,
    title: impl ToString,
    session: &Session,
    children: F,
) -> actix_web::HttpResponse
where
    F: FnOnce() -> Html + 'static + Send,
{
    let title = title.to_string();
    let nav = NavLink::for_session(session);
    let principal = session.principal().map(|p| p.to_string());

    let renderer = ServerRenderer::<Page>::with_props(move || PageProps {
        title: Some(title),
        nav,
        principal,
        children: children(),
    });

    actix_web::HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(format!("<!DOCTYPE html>{}", renderer.render().await))
}
