use actix_web::{HttpResponse, web};
use yew::html;

use super::forms::{FormState, render_form, respond};
use super::ui::{backend_error, forbidden, not_found};
use crate::api::{NewStaffMember, StaffForm};
use crate::prelude::*;
use crate::ui::Center;
use crate::views::format_timestamp;

/// Staff accounts may only be created as moderators or admins.
fn staff_role(slug: &str) -> Option<Role> {
    match slug {
        "moderator" => Some(Role::Moderator),
        "admin" => Some(Role::Admin),
        _ => None,
    }
}

fn staff_path(role: Role) -> String {
    format!("{}/new/{}", Section::Users.path(), role.as_str())
}

pub async fn new_staff(session: Session, role: web::Path<String>) -> HttpResponse {
    let Some(role) = staff_role(&role) else {
        return not_found(session).await;
    };

    if !session.can(Action::Create, Section::Users) {
        return forbidden(&session).await;
    }

    let request = NewStaffMember {
        role,
        details: StaffForm::default(),
    };
    render_form(
        &session,
        &request,
        &staff_path(role),
        &format!("Create {role}"),
        FormState::default(),
    )
    .await
}

#[instrument("web.users.create_staff", skip(services, session, form))]
pub async fn create_staff<S: Services>(
    services: web::Data<S>,
    session: Session,
    role: web::Path<String>,
    form: web::Form<StaffForm>,
) -> HttpResponse {
    let Some(role) = staff_role(&role) else {
        return not_found(session).await;
    };

    if !session.can(Action::Create, Section::Users) {
        return forbidden(&session).await;
    }

    let request = NewStaffMember {
        role,
        details: form.into_inner(),
    };
    respond(
        &services.api(),
        &session,
        &request,
        &staff_path(role),
        &format!("Create {role}"),
        &format!("The {role} account was created."),
    )
    .await
}

#[instrument("web.users.detail", skip(services, session))]
pub async fn detail<S: Services>(
    services: web::Data<S>,
    session: Session,
    id: web::Path<String>,
) -> HttpResponse {
    if !session.can(Action::View, Section::Users) {
        return forbidden(&session).await;
    }

    let user = match services.api().get_user(&id, &session).await {
        Ok(user) => user,
        Err(err) => return backend_error(&session, &err).await,
    };

    let entries = vec![
        ("Display name", user.display_name.clone()),
        ("Email", user.email.clone()),
        ("Phone", user.phone.clone().unwrap_or_default()),
        (
            "Role",
            user.role.map(|r| r.to_string()).unwrap_or_default(),
        ),
        (
            "Joined",
            user.created_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
        ),
    ];
    let title = user.display_name.clone();

    crate::ui::render_page(format!("{title} | Users"), &session, move || {
        html! {
            <Center>
                <h1>{ title }</h1>
                <dl class="record-detail">
                    { for entries.into_iter().map(|(label, value)| html! {
                        <>
                            <dt>{ label }</dt>
                            <dd>{ value }</dd>
                        </>
                    }) }
                </dl>
                <a href={Section::Users.path()}>{ "Back to users" }</a>
            </Center>
        }
    })
    .await
}
