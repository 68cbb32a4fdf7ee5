use chrono::{Datelike, Utc};
use yew::prelude::*;

use crate::session::Session;

const DEFAULT_STYLES: &str = include_str!("styles.css");

#[derive(Clone, PartialEq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

impl NavLink {
    pub fn new(label: impl ToString, href: impl ToString) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            active: false,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Navigation entries for the sections this session may view.
    pub fn for_session(session: &Session) -> Vec<NavLink> {
        session
            .visible_sections()
            .into_iter()
            .map(|section| NavLink::new(section.title(), section.path()))
            .collect()
    }
}

#[derive(Properties, PartialEq)]
pub struct PageProps {
    pub title: Option<String>,
    #[prop_or_default]
    pub nav: Vec<NavLink>,
    #[prop_or_default]
    pub principal: Option<String>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Page)]
pub fn page(props: &PageProps) -> Html {
    let principal = match &props.principal {
        Some(principal) => html! {
            <form class="principal" method="post" action="/session/logout">
                <span>{ principal.clone() }</span>
                <button type="submit">{ "Sign out" }</button>
            </form>
        },
        None => html! {
            <a class="principal" href="/session">{ "Sign in" }</a>
        },
    };

    html! {
        <html>
            <head>
                <title>{props.title.clone().unwrap_or_else(|| "Media Admin".to_string())}</title>
                <meta
                    http-equiv="Content-Type"
                    content="text/html; charset=utf-8"
                />
                <meta
                    name="viewport"
                    content="width=device-width, initial-scale=1.0"
                />

                <style>{ DEFAULT_STYLES }</style>
            </head>

            <body>
                <div class="header">
                    <a class="brand" href="/">{ "Media Admin" }</a>
                    <nav>
                        { for props.nav.iter().map(|link| html! {
                            <a href={link.href.clone()} class={classes!(link.active.then_some("active"))}>
                                { link.label.clone() }
                            </a>
                        }) }
                    </nav>
                    { principal }
                </div>

                <main>
                    {props.children.clone()}
                </main>

                <footer>
                    <p>
                        { format!("Media Admin © {}", Utc::now().year()) }
                    </p>
                </footer>
            </body>
        </html>
    }
}
