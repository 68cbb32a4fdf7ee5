use crate::filter::{Scope, search};
use crate::prelude::*;
use crate::session::UserTab;

/// Resolves the requested role tab against the tabs this session may see.
pub fn active_tab(session: &Session, requested: Option<&str>) -> Option<UserTab> {
    let visible = session.visible_tabs();
    requested
        .and_then(UserTab::from_slug)
        .filter(|tab| visible.contains(tab))
        .or_else(|| visible.first().copied())
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowAction {
    pub label: &'static str,
    pub href: String,
}

impl RowAction {
    pub fn link(label: &'static str, href: impl Into<String>) -> Self {
        Self {
            label,
            href: href.into(),
        }
    }
}

/// A record flattened into display cells, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    pub cells: Vec<String>,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Pending,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    NeedsConfirmation,
    Deleted,
    Failed(String),
}

/// The full fetched collection of one record type, and the subset currently on display.
///
/// The visible set is always recomputed from the full set, the active scope and the
/// active search text; it is never edited in place except when a delete succeeds.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    all: Vec<T>,
    visible: Vec<T>,
    scope: Option<Scope>,
    search: String,
}

impl<T: Record> ListView<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            visible: records.clone(),
            all: records,
            scope: None,
            search: String::new(),
        }
    }

    #[instrument("views.list.load", skip(api, session), fields(section = T::SECTION.slug()), err(Display))]
    pub async fn load(api: &ApiClient, session: &Session) -> Result<Self, human_errors::Error> {
        let records = T::fetch_all(api, session).await?;
        debug!("Loaded {} {} records.", records.len(), T::SECTION.slug());
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[T] {
        &self.all
    }

    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.recompute();
    }

    pub fn set_scope(&mut self, scope: Option<Scope>) {
        self.scope = scope;
        self.recompute();
    }

    /// Applies the role tab (users only) and the search text, returning the tab in effect.
    pub fn apply(&mut self, session: &Session, search: &str, tab: Option<&str>) -> Option<UserTab> {
        let tab = if T::SECTION == Section::Users {
            active_tab(session, tab)
        } else {
            None
        };

        self.scope = tab.map(|t| Scope::new("role", t.role()));
        self.search(search);
        tab
    }

    pub fn rows(&self, session: &Session) -> Vec<Row> {
        self.visible
            .iter()
            .map(|record| Row {
                id: record.id().to_string(),
                cells: T::COLUMNS
                    .iter()
                    .map(|c| record.get(c.key).to_string())
                    .collect(),
                actions: record.actions(session),
            })
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.all.iter().find(|r| r.id() == id)
    }

    /// Deletes a record once the user has confirmed it. Both collections only change
    /// when the backend reports success.
    #[instrument("views.list.delete", skip(self, api, session, confirmation), fields(section = T::SECTION.slug()))]
    pub async fn delete(
        &mut self,
        api: &ApiClient,
        session: &Session,
        id: &str,
        confirmation: Confirmation,
    ) -> DeleteOutcome {
        if confirmation == Confirmation::Pending {
            return DeleteOutcome::NeedsConfirmation;
        }

        match T::remove(api, session, id).await {
            Ok(()) => {
                self.all.retain(|r| r.id() != id);
                self.visible.retain(|r| r.id() != id);
                info!("Deleted {} record '{}'.", T::SECTION.slug(), id);
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(error = %err, "Failed to delete {} record '{}'.", T::SECTION.slug(), id);
                DeleteOutcome::Failed(err.to_string())
            }
        }
    }

    fn recompute(&mut self) {
        self.visible = search(&self.all, T::SEARCH_FIELD, &self.search, self.scope.as_ref());
    }
}
