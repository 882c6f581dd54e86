use crate::components::atoms::error_alert::ErrorAlert;
use crate::components::atoms::input_text::{InputText, InputType};
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Debug, PartialEq, Default, Clone)]
pub struct LoginFormData {
    pub email: String,
    pub password: String,
}

#[derive(PartialEq, Properties)]
pub struct Props {
    pub on_login: Callback<LoginFormData>,
    #[prop_or_default]
    pub is_loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &Props) -> Html {
    let state = use_state(LoginFormData::default);

    let on_change_email = {
        let state = state.clone();
        Callback::from(move |input_text: String| {
            let mut data: LoginFormData = (*state).clone();
            data.email = input_text;
            state.set(data);
        })
    };

    let on_change_password = {
        let state = state.clone();
        Callback::from(move |input_text: String| {
            let mut data = (*state).clone();
            data.password = input_text;
            state.set(data);
        })
    };

    let on_submit = {
        let state = state.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let data = (*state).clone();
            if !data.email.is_empty() && !data.password.is_empty() {
                on_login.emit(data);
            }
        })
    };

    html! {
        <div class="container mt-5" style="max-width: 400px;">
            <div class="card">
                <div class="card-body">
                    <h2 class="card-title text-center mb-4">{ "Sign in" }</h2>
                    <ErrorAlert message={props.error.clone()} />
                    <form onsubmit={on_submit}>
                        <div class="mb-3">
                            <label for="email" class="form-label">{ "Email" }</label>
                            <InputText
                                id="email"
                                name="email"
                                placeholder="Enter your email"
                                class={"form-control"}
                                input_type={InputType::Email}
                                value={state.email.clone()}
                                required={true}
                                on_change={on_change_email} />
                        </div>
                        <div class="mb-3">
                            <label for="password" class="form-label">{ "Password" }</label>
                            <InputText
                                id="password"
                                name="password"
                                placeholder="Enter your password"
                                input_type={InputType::Password}
                                class={"form-control"}
                                value={state.password.clone()}
                                required={true}
                                on_change={on_change_password} />
                        </div>
                        <div class="d-grid">
                            <button class="btn btn-primary" type="submit" disabled={props.is_loading}>
                                { if props.is_loading { "Signing in..." } else { "Sign in" } }
                            </button>
                        </div>
                    </form>
                    <div class="text-center mt-3">
                        <Link<Route> to={Route::Register}>{ "No account yet? Register" }</Link<Route>>
                    </div>
                </div>
            </div>
        </div>
    }
}
