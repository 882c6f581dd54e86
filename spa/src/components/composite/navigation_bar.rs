use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;
use crate::session_context::use_session;

#[function_component(NavigationBar)]
pub fn navigation_bar() -> Html {
    let context = use_session();
    let navigator = use_navigator();
    let route = use_route::<Route>();

    let nav_classes = |target: Route| {
        if route.as_ref() == Some(&target) {
            classes!("nav-link", "active")
        } else {
            classes!("nav-link")
        }
    };

    let on_logout_click = {
        let client = context.client.clone();
        Callback::from(move |_: MouseEvent| {
            log::info!("User logged out");
            client.session.logout();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let account = match context.identity() {
        Some(identity) => html! {
            <>
                <span class="navbar-text me-3">{identity.display_name()}</span>
                <button onclick={on_logout_click} class="btn btn-sm btn-outline-secondary">
                    {"Logout"}
                </button>
            </>
        },
        None if context.session.is_initializing() => html! {},
        None => html! {
            <>
                <Link<Route> to={Route::Login} classes={classes!("btn", "btn-sm", "me-2", "btn-outline-primary")}>
                    {"Login"}
                </Link<Route>>
                <Link<Route> to={Route::Register} classes={classes!("btn", "btn-sm", "btn-primary")}>
                    {"Register"}
                </Link<Route>>
            </>
        },
    };

    html! {
        <nav class="navbar navbar-expand-lg bg-body-tertiary">
            <div class="container-fluid">
                <Link<Route> to={Route::Books} classes={classes!("navbar-brand")}>{"Library"}</Link<Route>>
                <div class="collapse navbar-collapse show">
                    <ul class="navbar-nav me-auto mb-2 mb-lg-0">
                        <li class="nav-item">
                            <Link<Route> to={Route::Books} classes={nav_classes(Route::Books)}>
                                {"Catalog"}
                            </Link<Route>>
                        </li>
                        if context.is_authenticated() {
                            <li class="nav-item">
                                <Link<Route> to={Route::Reservations} classes={nav_classes(Route::Reservations)}>
                                    {"My reservations"}
                                </Link<Route>>
                            </li>
                        }
                    </ul>
                    {account}
                </div>
            </div>
        </nav>
    }
}
