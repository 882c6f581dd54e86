use yew::prelude::*;

#[derive(PartialEq, Properties)]
pub struct Props {
    pub message: Option<String>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

#[function_component(ErrorAlert)]
pub fn error_alert(props: &Props) -> Html {
    let Some(message) = &props.message else {
        return html! {};
    };

    match &props.on_dismiss {
        Some(on_dismiss) => {
            let on_click = on_dismiss.reform(|_: MouseEvent| ());
            html! {
                <div class="alert alert-danger alert-dismissible" role="alert">
                    {message}
                    <button type="button" class="btn-close" onclick={on_click}></button>
                </div>
            }
        }
        None => html! {
            <div class="alert alert-danger" role="alert">{message}</div>
        },
    }
}
