use yew::prelude::*;

use super::NavLink;
use crate::views::Row;

#[derive(Properties, PartialEq)]
pub struct DataTableProps {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

#[function_component(DataTable)]
pub fn data_table(props: &DataTableProps) -> Html {
    if props.rows.is_empty() {
        return html! { <p class="empty">{ "No records to show." }</p> };
    }

    html! {
        <table>
            <thead>
                <tr>
                    { for props.headers.iter().map(|header| html! { <th>{ header.clone() }</th> }) }
                    <th>{ "Actions" }</th>
                </tr>
            </thead>
            <tbody>
                { for props.rows.iter().map(|row| html! {
                    <tr key={row.id.clone()}>
                        { for row.cells.iter().map(|cell| html! { <td>{ cell.clone() }</td> }) }
                        <td class="actions">
                            { for row.actions.iter().map(|action| html! {
                                <a href={action.href.clone()}>{ action.label }</a>
                            }) }
                        </td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToolbarProps {
    /// Path the search form submits to.
    pub action: String,
    pub search: String,
    #[prop_or_default]
    pub tabs: Vec<NavLink>,
    #[prop_or_default]
    pub tab: Option<String>,
    #[prop_or_default]
    pub create: Vec<NavLink>,
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let hidden_tab = match &props.tab {
        Some(tab) => html! { <input type="hidden" name="tab" value={tab.clone()} /> },
        None => html! {},
    };

    html! {
        <div class="toolbar">
            <div class="tabs">
                { for props.tabs.iter().map(|tab| html! {
                    <a href={tab.href.clone()} class={classes!("tab", tab.active.then_some("active"))}>
                        { tab.label.clone() }
                    </a>
                }) }
            </div>
            <form class="search" method="get" action={props.action.clone()}>
                { hidden_tab }
                <input type="search" name="q" placeholder="Search" value={props.search.clone()} />
                <button type="submit">{ "Search" }</button>
            </form>
            <div class="create">
                { for props.create.iter().map(|link| html! {
                    <a class="button" href={link.href.clone()}>{ link.label.clone() }</a>
                }) }
            </div>
        </div>
    }
}
