use crate::prelude::*;
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Phone,
    Url,
    TextArea,
}

impl FieldKind {
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::TextArea => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Phone => "tel",
            FieldKind::Url => "url",
        }
    }
}

/// One rendered input of a form, with its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
}

impl Field {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind, value: &str) -> Self {
        Self {
            name,
            label,
            kind,
            // Passwords are never echoed back into the page.
            value: if kind == FieldKind::Password {
                String::new()
            } else {
                value.to_string()
            },
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[async_trait::async_trait]
pub trait Form: Send + Sync {
    type Output: Send;

    const SECTION: Section;

    /// The verb shown on the submit button and used for permission checks.
    const ACTION: Action;

    fn validate(&self) -> Result<(), ValidationErrors>;

    fn fields(&self) -> Vec<Field>;

    async fn send(
        &self,
        api: &ApiClient,
        session: &Session,
    ) -> Result<Self::Output, human_errors::Error>;
}

#[derive(Debug, PartialEq)]
pub enum Submission<T> {
    Invalid(ValidationErrors),
    Saved(T),
    Failed(String),
}

/// Validates the form and, only when it is valid, issues its single backend call.
#[instrument("views.form.submit", skip(form, api, session), fields(section = F::SECTION.slug()))]
pub async fn submit<F: Form>(form: &F, api: &ApiClient, session: &Session) -> Submission<F::Output> {
    if let Err(errors) = form.validate() {
        debug!("Form for {} failed validation: {errors}", F::SECTION.slug());
        return Submission::Invalid(errors);
    }

    match form.send(api, session).await {
        Ok(output) => {
            info!("Saved {} form.", F::SECTION.slug());
            Submission::Saved(output)
        }
        Err(err) => {
            warn!(error = %err, "Failed to save {} form.", F::SECTION.slug());
            Submission::Failed(err.to_string())
        }
    }
}
