use yew::prelude::*;

use crate::views::{Field, FieldKind};

#[derive(Properties, PartialEq)]
pub struct FormPanelProps {
    pub action: String,
    pub fields: Vec<Field>,
    #[prop_or_default]
    pub errors: Vec<(String, String)>,
    pub submit: String,
    pub cancel: String,
}

#[function_component(FormPanel)]
pub fn form_panel(props: &FormPanelProps) -> Html {
    html! {
        <form class="record-form" method="post" action={props.action.clone()}>
            { for props.fields.iter().map(|field| {
                let error = props
                    .errors
                    .iter()
                    .find(|(name, _)| name == field.name)
                    .map(|(_, message)| html! { <span class="field-error">{ message.clone() }</span> })
                    .unwrap_or_default();

                let input = if field.kind == FieldKind::TextArea {
                    html! {
                        <textarea
                            id={field.name}
                            name={field.name}
                            value={field.value.clone()}
                            required={field.required}
                        />
                    }
                } else {
                    html! {
                        <input
                            id={field.name}
                            type={field.kind.input_type()}
                            name={field.name}
                            value={field.value.clone()}
                            required={field.required}
                        />
                    }
                };

                html! {
                    <div class="field">
                        <label for={field.name}>{ field.label }</label>
                        { input }
                        { error }
                    </div>
                }
            }) }
            <div class="form-actions">
                <button type="submit">{ props.submit.clone() }</button>
                <a href={props.cancel.clone()}>{ "Cancel" }</a>
            </div>
        </form>
    }
}
