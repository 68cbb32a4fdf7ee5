use actix_web::{HttpResponse, web};
use serde::Deserialize;
use yew::html;

use super::ui::{backend_error, forbidden};
use crate::prelude::*;
use crate::session::UserTab;
use crate::ui::{Center, DataTable, Flash, NavLink, Toolbar, render_page};
use crate::views::{Confirmation, DeleteOutcome, ListView};

#[derive(Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub tab: Option<String>,
    #[serde(default)]
    pub notice: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct DeleteForm {
    #[serde(default)]
    pub confirm: Option<String>,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub tab: Option<String>,
}

#[instrument("web.resources.list", skip(services, session, query), fields(section = T::SECTION.slug()))]
pub async fn list<S: Services, T: Record>(
    services: web::Data<S>,
    session: Session,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if !session.can(Action::View, T::SECTION) {
        return forbidden(&session).await;
    }

    let query = query.into_inner();
    match ListView::<T>::load(&services.api(), &session).await {
        Ok(mut view) => {
            let tab = view.apply(&session, &query.q, query.tab.as_deref());
            render_list(&view, &session, tab, query.notice, query.error).await
        }
        Err(err) => backend_error(&session, &err).await,
    }
}

/// Query string which carries the search text and role tab back to the listing.
fn filter_query(q: &str, tab: Option<&str>) -> String {
    let mut params = Vec::new();
    if !q.is_empty() {
        params.push(format!("q={}", urlencoding::encode(q)));
    }
    if let Some(tab) = tab.filter(|t| !t.is_empty()) {
        params.push(format!("tab={}", urlencoding::encode(tab)));
    }

    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

fn confirmation_redirect<T: Record>(id: &str, q: &str, tab: Option<&str>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((
            actix_web::http::header::LOCATION,
            format!(
                "{}/{}/delete{}",
                T::SECTION.path(),
                urlencoding::encode(id),
                filter_query(q, tab)
            ),
        ))
        .finish()
}

pub async fn confirm_delete<T: Record>(
    session: Session,
    id: web::Path<String>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    if !T::DELETABLE || !session.can(Action::Delete, T::SECTION) {
        return forbidden(&session).await;
    }

    let id = id.into_inner();
    let query = query.into_inner();
    let section = T::SECTION;
    let action = format!("{}/{}/delete", section.path(), urlencoding::encode(&id));
    let cancel = format!(
        "{}{}",
        section.path(),
        filter_query(&query.q, query.tab.as_deref())
    );
    let q = query.q;
    let tab = query.tab.filter(|t| !t.is_empty());

    render_page(format!("Delete | {}", section.title()), &session, move || {
        html! {
            <Center>
                <h1>{ format!("Delete from {}?", section.title()) }</h1>
                <p>{ format!("The record '{id}' will be permanently removed. This cannot be undone.") }</p>
                <form method="post" action={action}>
                    <input type="hidden" name="confirm" value="yes" />
                    <input type="hidden" name="q" value={q} />
                    if let Some(tab) = tab {
                        <input type="hidden" name="tab" value={tab} />
                    }
                    <button type="submit">{ "Delete" }</button>
                    <a href={cancel}>{ "Cancel" }</a>
                </form>
            </Center>
        }
    })
    .await
}

#[instrument("web.resources.delete", skip(services, session, form), fields(section = T::SECTION.slug()))]
pub async fn delete<S: Services, T: Record>(
    services: web::Data<S>,
    session: Session,
    id: web::Path<String>,
    form: web::Form<DeleteForm>,
) -> HttpResponse {
    if !T::DELETABLE || !session.can(Action::Delete, T::SECTION) {
        return forbidden(&session).await;
    }

    let id = id.into_inner();
    let form = form.into_inner();
    let confirmation = match form.confirm.as_deref() {
        Some("yes") => Confirmation::Confirmed,
        _ => Confirmation::Pending,
    };

    // Confirmation is settled before anything is fetched.
    if confirmation == Confirmation::Pending {
        return confirmation_redirect::<T>(&id, &form.q, form.tab.as_deref());
    }

    // The page is rendered from the list as it stands after the delete, so the
    // listing is read once alongside the single DELETE.
    let api = services.api();
    let mut view = match ListView::<T>::load(&api, &session).await {
        Ok(view) => view,
        Err(err) => return backend_error(&session, &err).await,
    };

    let tab = view.apply(&session, &form.q, form.tab.as_deref());

    match view.delete(&api, &session, &id, confirmation).await {
        DeleteOutcome::NeedsConfirmation => {
            confirmation_redirect::<T>(&id, &form.q, form.tab.as_deref())
        }
        DeleteOutcome::Deleted => {
            render_list(&view, &session, tab, Some("The record was deleted.".into()), None).await
        }
        DeleteOutcome::Failed(message) => {
            render_list(&view, &session, tab, None, Some(message)).await
        }
    }
}

async fn render_list<T: Record>(
    view: &ListView<T>,
    session: &Session,
    tab: Option<UserTab>,
    notice: Option<String>,
    error: Option<String>,
) -> HttpResponse {
    let section = T::SECTION;
    let headers = T::COLUMNS
        .iter()
        .map(|c| c.title.to_string())
        .collect::<Vec<_>>();
    let search = view.search_text().to_string();
    let filters = filter_query(&search, tab.map(|t| t.slug()));
    let rows = view
        .rows(session)
        .into_iter()
        .map(|mut row| {
            for action in row.actions.iter_mut().filter(|a| a.href.ends_with("/delete")) {
                action.href.push_str(&filters);
            }
            row
        })
        .collect::<Vec<_>>();

    let tabs = session
        .visible_tabs()
        .into_iter()
        .filter(|_| section == Section::Users)
        .map(|t| {
            NavLink::new(t.title(), format!("{}?tab={}", section.path(), t.slug()))
                .active(Some(t) == tab)
        })
        .collect::<Vec<_>>();

    let create = create_links(session, section);
    let count = format!("{} of {} records", view.visible().len(), view.records().len());

    render_page(format!("{} | Media Admin", section.title()), session, move || {
        html! {
            <>
                <h1>{ section.title() }</h1>
                <Flash notice={notice} error={error} />
                <Toolbar
                    action={section.path()}
                    search={search}
                    tabs={tabs}
                    tab={tab.map(|t| t.slug().to_string())}
                    create={create}
                />
                <p class="count">{ count }</p>
                <DataTable headers={headers} rows={rows} />
            </>
        }
    })
    .await
}

fn create_links(session: &Session, section: Section) -> Vec<NavLink> {
    if !session.can(Action::Create, section) {
        return Vec::new();
    }

    match section {
        Section::Users => vec![
            NavLink::new("New moderator", "/users/new/moderator"),
            NavLink::new("New admin", "/users/new/admin"),
        ],
        Section::Comments => Vec::new(),
        Section::Notifications => vec![NavLink::new("Send notification", "/notifications/new")],
        other => vec![NavLink::new("Create", format!("{}/new", other.path()))],
    }
}
