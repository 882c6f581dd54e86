use secrecy::SecretString;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::composite::login_form::{LoginForm, LoginFormData};
use crate::router::Route;
use crate::session_context::use_session;

#[derive(Clone, PartialEq, Default)]
struct LoginState {
    is_loading: bool,
    error: Option<String>,
}

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let context = use_session();
    let navigator = use_navigator();
    let state = use_state(LoginState::default);

    let on_login = {
        let client = context.client.clone();
        let state = state.clone();
        Callback::from(move |event: LoginFormData| {
            let client = client.clone();
            let state = state.clone();
            let navigator = navigator.clone();
            state.set(LoginState {
                is_loading: true,
                error: None,
            });
            spawn_local(async move {
                let password = SecretString::from(event.password);
                match client.session.login(&event.email, &password).await {
                    Ok(identity) => {
                        log::info!("User login successful, user_id={}", identity.id);
                        state.set(LoginState::default());
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Books);
                        }
                    }
                    Err(error) => {
                        log::warn!("Login failed, error: {error}");
                        state.set(LoginState {
                            is_loading: false,
                            error: error.user_message(),
                        });
                    }
                }
            });
        })
    };

    html! {
        <LoginForm on_login={on_login} is_loading={state.is_loading} error={state.error.clone()} />
    }
}
