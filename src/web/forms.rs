use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use yew::html;

use super::redirect_with_notice;
use super::ui::{backend_error, forbidden};
use crate::api::{CategoryForm, CategoryUpdate};
use crate::prelude::*;
use crate::ui::{Flash, FormPanel, render_page_with_status};
use crate::validation::ValidationErrors;
use crate::views::{Form, Submission, submit};

pub async fn new<F>(session: Session) -> HttpResponse
where
    F: Form + Default,
{
    if !session.can(F::ACTION, F::SECTION) {
        return forbidden(&session).await;
    }

    let action = format!("{}/new", F::SECTION.path());
    render_form(&session, &F::default(), &action, "Create", FormState::default()).await
}

#[instrument("web.forms.create", skip(services, session, form), fields(section = F::SECTION.slug()))]
pub async fn create<S, F>(services: web::Data<S>, session: Session, form: web::Form<F>) -> HttpResponse
where
    S: Services,
    F: Form + DeserializeOwned,
{
    if !session.can(F::ACTION, F::SECTION) {
        return forbidden(&session).await;
    }

    let form = form.into_inner();
    let action = format!("{}/new", F::SECTION.path());
    respond(&services.api(), &session, &form, &action, "Create", "The record was created.").await
}

pub async fn edit_category<S: Services>(
    services: web::Data<S>,
    session: Session,
    id: web::Path<String>,
) -> HttpResponse {
    if !session.can(Action::Edit, Section::VideoCategories) {
        return forbidden(&session).await;
    }

    match CategoryUpdate::load(&services.api(), &session, &id).await {
        Ok(update) => {
            let action = edit_path(&update.id);
            render_form(&session, &update, &action, "Save", FormState::default()).await
        }
        Err(err) => backend_error(&session, &err).await,
    }
}

#[instrument("web.forms.update_category", skip(services, session, form))]
pub async fn update_category<S: Services>(
    services: web::Data<S>,
    session: Session,
    id: web::Path<String>,
    form: web::Form<CategoryForm>,
) -> HttpResponse {
    if !session.can(Action::Edit, Section::VideoCategories) {
        return forbidden(&session).await;
    }

    let update = CategoryUpdate {
        id: id.into_inner(),
        form: form.into_inner(),
    };
    let action = edit_path(&update.id);
    respond(&services.api(), &session, &update, &action, "Save", "The category was updated.").await
}

fn edit_path(id: &str) -> String {
    format!(
        "{}/{}/edit",
        Section::VideoCategories.path(),
        urlencoding::encode(id)
    )
}

/// Submits the form and either redirects to the listing or re-renders it with the problem.
pub(crate) async fn respond<F: Form>(
    api: &ApiClient,
    session: &Session,
    form: &F,
    action: &str,
    submit_label: &str,
    notice: &str,
) -> HttpResponse {
    match submit(form, api, session).await {
        Submission::Saved(_) => redirect_with_notice(&F::SECTION.path(), notice),
        Submission::Invalid(errors) => {
            render_form(
                session,
                form,
                action,
                submit_label,
                FormState {
                    status: Some(StatusCode::UNPROCESSABLE_ENTITY),
                    errors,
                    error: None,
                },
            )
            .await
        }
        Submission::Failed(message) => {
            render_form(
                session,
                form,
                action,
                submit_label,
                FormState {
                    status: Some(StatusCode::BAD_GATEWAY),
                    errors: ValidationErrors::default(),
                    error: Some(message),
                },
            )
            .await
        }
    }
}

#[derive(Default)]
pub(crate) struct FormState {
    status: Option<StatusCode>,
    errors: ValidationErrors,
    error: Option<String>,
}

pub(crate) async fn render_form<F: Form>(
    session: &Session,
    form: &F,
    action: &str,
    submit_label: &str,
    state: FormState,
) -> HttpResponse {
    let section = F::SECTION;
    let heading = match F::ACTION {
        Action::Edit => format!("Edit {}", section.title()),
        _ => format!("New in {}", section.title()),
    };
    let fields = form.fields();
    let errors = state
        .errors
        .iter()
        .map(|e| (e.field.to_string(), e.message.clone()))
        .collect::<Vec<_>>();
    let error = state.error;
    let action = action.to_string();
    let submit_label = submit_label.to_string();

    render_page_with_status(
        state.status.unwrap_or(StatusCode::OK),
        format!("{heading} | Media Admin"),
        session,
        move || {
            html! {
                <>
                    <h1>{ heading }</h1>
                    <Flash error={error} />
                    <FormPanel
                        action={action}
                        fields={fields}
                        errors={errors}
                        submit={submit_label}
                        cancel={section.path()}
                    />
                </>
            }
        },
    )
    .await
}
