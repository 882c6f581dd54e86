use shared::RegisterRequest;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::composite::register_form::{RegisterForm, RegisterFormData};
use crate::router::Route;
use crate::session_context::use_session;

#[derive(Clone, PartialEq, Default)]
struct RegisterState {
    is_loading: bool,
    error: Option<String>,
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let context = use_session();
    let navigator = use_navigator();
    let state = use_state(RegisterState::default);

    let on_register = {
        let client = context.client.clone();
        let state = state.clone();
        Callback::from(move |event: RegisterFormData| {
            let client = client.clone();
            let state = state.clone();
            let navigator = navigator.clone();
            state.set(RegisterState {
                is_loading: true,
                error: None,
            });
            spawn_local(async move {
                match client.session.register(RegisterRequest::from(event)).await {
                    Ok(identity) => {
                        log::info!("User registered, user_id={}", identity.id);
                        state.set(RegisterState::default());
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Books);
                        }
                    }
                    Err(error) => {
                        log::warn!("Registration failed, error: {error}");
                        state.set(RegisterState {
                            is_loading: false,
                            error: error.user_message(),
                        });
                    }
                }
            });
        })
    };

    html! {
        <RegisterForm on_register={on_register} is_loading={state.is_loading} error={state.error.clone()} />
    }
}
