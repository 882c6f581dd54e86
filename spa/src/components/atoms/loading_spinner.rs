use yew::prelude::*;

#[function_component(LoadingSpinner)]
pub fn loading_spinner() -> Html {
    html! {
        <div class="text-center py-5">
            <div class="spinner-border" role="status">
                <span class="visually-hidden">{"Loading..."}</span>
            </div>
        </div>
    }
}
