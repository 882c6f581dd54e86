use crate::components::atoms::error_alert::ErrorAlert;
use crate::components::atoms::input_text::{InputText, InputType};
use crate::router::Route;
use secrecy::SecretString;
use shared::RegisterRequest;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Debug, PartialEq, Default, Clone)]
pub struct RegisterFormData {
    pub email: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
}

impl From<RegisterFormData> for RegisterRequest {
    fn from(value: RegisterFormData) -> Self {
        let phone = value.phone.trim();
        RegisterRequest {
            email: value.email,
            password: SecretString::from(value.password),
            name: value.name,
            surname: value.surname,
            phone: if phone.is_empty() {
                None
            } else {
                Some(phone.to_owned())
            },
        }
    }
}

#[derive(PartialEq, Properties)]
pub struct Props {
    pub on_register: Callback<RegisterFormData>,
    #[prop_or_default]
    pub is_loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
}

#[function_component(RegisterForm)]
pub fn register_form(props: &Props) -> Html {
    let state = use_state(RegisterFormData::default);

    let field = |apply: fn(&mut RegisterFormData, String)| {
        let state = state.clone();
        Callback::from(move |input_text: String| {
            let mut data = (*state).clone();
            apply(&mut data, input_text);
            state.set(data);
        })
    };
    let on_change_email = field(|data, value| data.email = value);
    let on_change_password = field(|data, value| data.password = value);
    let on_change_name = field(|data, value| data.name = value);
    let on_change_surname = field(|data, value| data.surname = value);
    let on_change_phone = field(|data, value| data.phone = value);

    let on_submit = {
        let state = state.clone();
        let on_register = props.on_register.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_register.emit((*state).clone());
        })
    };

    html! {
        <div class="container mt-5" style="max-width: 500px;">
            <div class="card">
                <div class="card-body">
                    <h2 class="card-title text-center mb-4">{ "Create an account" }</h2>
                    <ErrorAlert message={props.error.clone()} />
                    <form onsubmit={on_submit}>
                        <div class="mb-3">
                            <label for="email" class="form-label">{ "Email *" }</label>
                            <InputText id="email" name="email" class={"form-control"}
                                input_type={InputType::Email} placeholder="Enter your email"
                                value={state.email.clone()} required={true}
                                on_change={on_change_email} />
                        </div>
                        <div class="mb-3">
                            <label for="password" class="form-label">{ "Password *" }</label>
                            <InputText id="password" name="password" class={"form-control"}
                                input_type={InputType::Password} placeholder="Choose a password"
                                value={state.password.clone()} required={true}
                                on_change={on_change_password} />
                        </div>
                        <div class="mb-3">
                            <label for="name" class="form-label">{ "Name *" }</label>
                            <InputText id="name" name="name" class={"form-control"}
                                value={state.name.clone()} required={true}
                                on_change={on_change_name} />
                        </div>
                        <div class="mb-3">
                            <label for="surname" class="form-label">{ "Surname *" }</label>
                            <InputText id="surname" name="surname" class={"form-control"}
                                value={state.surname.clone()} required={true}
                                on_change={on_change_surname} />
                        </div>
                        <div class="mb-3">
                            <label for="phone" class="form-label">{ "Phone" }</label>
                            <InputText id="phone" name="phone" class={"form-control"}
                                input_type={InputType::Tel} placeholder="+380..."
                                value={state.phone.clone()}
                                on_change={on_change_phone} />
                        </div>
                        <div class="d-grid">
                            <button class="btn btn-primary" type="submit" disabled={props.is_loading}>
                                { if props.is_loading { "Creating account..." } else { "Register" } }
                            </button>
                        </div>
                    </form>
                    <div class="text-center mt-3">
                        <Link<Route> to={Route::Login}>{ "Already registered? Sign in" }</Link<Route>>
                    </div>
                </div>
            </div>
        </div>
    }
}
