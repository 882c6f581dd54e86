use client::{guard, GuardDecision};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::atoms::loading_spinner::LoadingSpinner;
use crate::router::Route;
use crate::session_context::use_session;

#[derive(PartialEq, Properties)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
}

/// Renders its children only for an authenticated session. While the startup
/// check is running it shows a spinner, never the login page.
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &Props) -> Html {
    let context = use_session();
    let navigator = use_navigator();
    let decision = guard(&context.session);

    // replace, not push: going back must not land on the protected view again
    use_effect_with(decision, move |decision| {
        if *decision == GuardDecision::RedirectToLogin {
            if let Some(navigator) = navigator {
                navigator.replace(&Route::Login);
            }
        }
    });

    match decision {
        GuardDecision::Loading | GuardDecision::RedirectToLogin => html! { <LoadingSpinner /> },
        GuardDecision::Render => props.children.clone(),
    }
}
