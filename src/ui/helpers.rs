use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CenterProps {
    pub children: Html,
}

#[function_component(Center)]
pub fn center(props: &CenterProps) -> Html {
    html! {
        <div class="center">
            {props.children.clone()}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FlashProps {
    #[prop_or_default]
    pub notice: Option<String>,
    #[prop_or_default]
    pub error: Option<String>,
}

/// Outcome banner shown above a view after an action completes.
#[function_component(Flash)]
pub fn flash(props: &FlashProps) -> Html {
    let notice = match &props.notice {
        Some(message) => html! { <div class="flash notice">{ message.clone() }</div> },
        None => html! {},
    };

    let error = match &props.error {
        Some(message) => html! { <div class="flash error">{ message.clone() }</div> },
        None => html! {},
    };

    html! {
        <>
            { notice }
            { error }
        </>
    }
}
