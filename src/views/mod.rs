use crate::prelude::*;

mod form;
mod forms;
mod list;
mod records;

pub use form::{Field, FieldKind, Form, Submission, submit};
pub use list::{Confirmation, DeleteOutcome, ListView, Row, RowAction, active_tab};

/// A table column, read from a record through [`Filterable::get`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub key: &'static str,
    pub title: &'static str,
}

impl Column {
    pub const fn new(key: &'static str, title: &'static str) -> Self {
        Self { key, title }
    }
}

/// A backend-owned entity which can be listed in a table.
#[async_trait::async_trait]
pub trait Record: DeserializeOwned + Filterable + Clone + Send + Sync + 'static {
    const SECTION: Section;

    /// The field matched by the search box.
    const SEARCH_FIELD: &'static str;

    const COLUMNS: &'static [Column];

    const HAS_DETAIL: bool = false;
    const EDITABLE: bool = false;
    const DELETABLE: bool = true;

    fn id(&self) -> &str;

    async fn fetch_all(
        api: &ApiClient,
        session: &Session,
    ) -> Result<Vec<Self>, human_errors::Error>;

    async fn remove(
        api: &ApiClient,
        session: &Session,
        id: &str,
    ) -> Result<(), human_errors::Error>;

    fn actions(&self, session: &Session) -> Vec<RowAction> {
        let base = format!("{}/{}", Self::SECTION.path(), urlencoding::encode(self.id()));
        let mut actions = Vec::new();

        if Self::HAS_DETAIL && session.can(Action::View, Self::SECTION) {
            actions.push(RowAction::link("View", base.clone()));
        }

        if Self::EDITABLE && session.can(Action::Edit, Self::SECTION) {
            actions.push(RowAction::link("Edit", format!("{base}/edit")));
        }

        if Self::DELETABLE && session.can(Action::Delete, Self::SECTION) {
            actions.push(RowAction::link("Delete", format!("{base}/delete")));
        }

        actions
    }
}

/// Formats RFC 3339 timestamps as `YYYY-MM-DD HH:MM` (UTC), leaving anything else untouched.
pub fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|ts| {
            ts.with_timezone(&chrono::Utc)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}
